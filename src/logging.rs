//! Tracing subscriber setup: console plus an optional log file

use std::{fs::File, path::PathBuf};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for the console layer
    pub console_level: Level,
    /// Level for the file layer
    pub file_level: Level,
    /// Log file, truncated on every start; `None` disables file logging
    pub log_file: Option<PathBuf>,
    /// Emit JSON lines instead of plain text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: Level::INFO,
            file_level: Level::DEBUG,
            log_file: Some(PathBuf::from("bot_log.log")),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Defaults overridden by `HOMEWORK_BOT_LOG_LEVEL` and `HOMEWORK_BOT_LOG_JSON`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(level) = std::env::var("HOMEWORK_BOT_LOG_LEVEL")
            .ok()
            .and_then(|l| l.parse().ok())
        {
            config.file_level = level;
            config.console_level = level;
        }

        config.json = std::env::var("HOMEWORK_BOT_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");

        config
    }
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process or buffered file output is lost.
pub fn init_logging(
    config: LoggingConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.console_level.to_string()));

    let mut layers = vec![boxed_layer(std::io::stdout, true, console_filter, config.json)];

    let guard = match &config.log_file {
        Some(path) => {
            let file = File::create(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let filter = EnvFilter::new(config.file_level.to_string());
            layers.push(boxed_layer(writer, false, filter, config.json));
            Some(guard)
        },
        None => None,
    };

    tracing_subscriber::registry().with(layers).try_init()?;

    Ok(guard)
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn boxed_layer<W>(writer: W, ansi: bool, filter: EnvFilter, json: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);

    if json {
        layer.json().with_filter(filter).boxed()
    } else {
        layer.with_filter(filter).boxed()
    }
}
