use std::path::Path;

use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    client::{ClientConfig, Notifier, ReviewApi, ReviewPoller, TelegramBot},
    config::{BotConfig, Credentials, load_config},
    logging::{LoggingConfig, init_logging},
    result::{BotError, Result},
};

pub type Poller = ReviewPoller<ReviewApi, TelegramBot>;

pub struct AppComponents {
    pub poller: Poller,
    pub _log_guard: Option<WorkerGuard>,
}

/// Loads config, installs logging, checks credentials and wires the poller.
///
/// Missing tokens are the only fatal condition; the caller exits without polling.
pub fn initialize_app(config_path: &Path, debug: bool) -> Result<AppComponents> {
    let config = load_config(config_path)?;
    let log_guard = initialize_logging(&config, debug)?;
    info!(version = env!("CARGO_PKG_VERSION"), config = %config_path.display(), "Homework bot starting up");

    let credentials = Credentials::from_env().inspect_err(|e| {
        error!(error = %e, "Required environment variables are missing, halting");
    })?;

    let client_config = ClientConfig::from_parts(&config, credentials);
    client_config.validate()?;

    let poller = create_poller(client_config)?;

    Ok(AppComponents { poller, _log_guard: log_guard })
}

fn initialize_logging(config: &BotConfig, debug: bool) -> Result<Option<WorkerGuard>> {
    let mut logging_config = LoggingConfig::from_env();

    logging_config.log_file = config.log_file.clone();

    if let Some(log_level) = &config.log_level {
        if let Ok(level) = log_level.parse() {
            logging_config.file_level = level;
            logging_config.console_level = level;
        }

        // Disable file logging if set to "Off"
        if log_level == "Off" {
            logging_config.log_file = None;
        }
    }

    if debug {
        logging_config.console_level = tracing::Level::DEBUG;
        logging_config.file_level = tracing::Level::DEBUG;
    }

    init_logging(logging_config)
        .map_err(|e| BotError::GeneralError(format!("Failed to initialize logging: {e}")))
}

fn create_poller(config: ClientConfig) -> Result<Poller> {
    let api = ReviewApi::new(&config)?;
    let bot = TelegramBot::new(&config)?;
    let notifier = Notifier::new(bot, config.chat_id);

    Ok(ReviewPoller::new(api, notifier, config.polling))
}
