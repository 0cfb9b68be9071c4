use std::path::{Path, PathBuf};

use compact_str::CompactString;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::{
    client::config::{DEFAULT_CHAT_ID, DEFAULT_ENDPOINT, DEFAULT_TELEGRAM_URL, ONE_MONTH_SECS},
    id::ChatId,
    result::{BotError, Result},
};

pub const REVIEW_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Non-secret settings persisted as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub endpoint: CompactString,
    pub telegram_base_url: CompactString,
    pub chat_id: ChatId,
    pub retry_period_secs: u64,
    pub lookback_secs: u64,
    pub request_timeout_secs: u64,
    pub log_level: Option<CompactString>,
    pub log_file: Option<PathBuf>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            telegram_base_url: DEFAULT_TELEGRAM_URL.into(),
            chat_id: ChatId::new(DEFAULT_CHAT_ID),
            retry_period_secs: 600,
            lookback_secs: ONE_MONTH_SECS,
            request_timeout_secs: 30,
            log_level: None,
            log_file: Some(PathBuf::from("bot_log.log")),
        }
    }
}

/// Secrets, only ever sourced from the process environment
#[derive(Clone)]
pub struct Credentials {
    pub review_token: CompactString,
    pub telegram_token: CompactString,
    pub chat_id: Option<ChatId>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("review_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Missing or blank tokens are reported together so the operator can fix them in one go
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let review_token = read(REVIEW_TOKEN_VAR);
        let telegram_token = read(TELEGRAM_TOKEN_VAR);

        let missing: Vec<&'static str> = [
            (REVIEW_TOKEN_VAR, review_token.is_none()),
            (TELEGRAM_TOKEN_VAR, telegram_token.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(review_token), Some(telegram_token)) = (review_token, telegram_token) else {
            return Err(BotError::MissingCredentials { names: missing });
        };

        let chat_id = read(CHAT_ID_VAR)
            .map(|raw| {
                raw.parse::<ChatId>().map_err(|e| {
                    BotError::config_validation_error(CHAT_ID_VAR, format!("{raw}: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            review_token: review_token.into(),
            telegram_token: telegram_token.into(),
            chat_id,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dirs) = BaseDirs::new() {
        dirs.config_dir().join("homework-bot.toml")
    } else {
        PathBuf::from("homework-bot.toml")
    }
}

/// Loads the config file, writing defaults when it does not exist yet
pub fn load_config(config_file: &Path) -> Result<BotConfig> {
    confy::load_path(config_file).map_err(|e| BotError::config_load_error(config_file.into(), e))
}
