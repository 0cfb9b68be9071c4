//! Runtime configuration for the review and Telegram clients

use std::time::Duration;

use compact_str::CompactString;

use super::error::{ClientError, Result};
use crate::{
    config::{BotConfig, Credentials},
    id::ChatId,
};

/// Main configuration shared by the poller and its clients
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Homework statuses endpoint
    pub endpoint: CompactString,
    /// Telegram Bot API base URL
    pub telegram_base_url: CompactString,
    /// OAuth token for the review API
    pub review_token: CompactString,
    /// Telegram bot token
    pub telegram_token: CompactString,
    /// Destination chat for every notification
    pub chat_id: ChatId,
    /// Polling configuration
    pub polling: PollingConfig,
    /// Request configuration
    pub request: RequestConfig,
}

/// Poll cadence and initial cursor
#[derive(Debug, Clone)]
pub struct PollingConfig {
    /// Flat pause between cycles
    pub retry_period: Duration,
    /// How far back the first `from_date` reaches
    pub lookback: Duration,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Request timeout
    pub timeout: Duration,
}

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_URL: &str = "https://api.telegram.org";
pub const DEFAULT_CHAT_ID: i64 = 1_099_215_744;
pub const ONE_MONTH_SECS: u64 = 2_629_743;

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            retry_period: Duration::from_secs(600),
            lookback: Duration::from_secs(ONE_MONTH_SECS),
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30) }
    }
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(
        review_token: impl Into<CompactString>,
        telegram_token: impl Into<CompactString>,
    ) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            telegram_base_url: DEFAULT_TELEGRAM_URL.into(),
            review_token: review_token.into(),
            telegram_token: telegram_token.into(),
            chat_id: ChatId::new(DEFAULT_CHAT_ID),
            polling: PollingConfig::default(),
            request: RequestConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.review_token.is_empty() {
            return Err(ClientError::config_validation(
                "review_token",
                "Review API token cannot be empty",
            ));
        }

        if self.telegram_token.is_empty() {
            return Err(ClientError::config_validation(
                "telegram_token",
                "Telegram token cannot be empty",
            ));
        }

        for (field, value) in [
            ("endpoint", &self.endpoint),
            ("telegram_base_url", &self.telegram_base_url),
        ] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(ClientError::config_validation(
                    field,
                    "URL must start with http:// or https://",
                ));
            }

            if url::Url::parse(value).is_err() {
                return Err(ClientError::config_validation(
                    field,
                    "URL is not a valid URL format",
                ));
            }
        }

        if self.request.timeout.is_zero() {
            return Err(ClientError::config_validation(
                "timeout",
                "Timeout must be greater than zero",
            ));
        }

        if self.polling.retry_period.is_zero() {
            return Err(ClientError::config_validation(
                "retry_period",
                "Retry period must be greater than zero",
            ));
        }

        Ok(())
    }
}

impl ClientConfig {
    /// Build the runtime configuration from the file config and environment secrets
    pub fn from_parts(config: &BotConfig, credentials: Credentials) -> Self {
        Self::new(credentials.review_token, credentials.telegram_token)
            .with_endpoint(config.endpoint.clone())
            .with_telegram_base_url(config.telegram_base_url.clone())
            .with_chat_id(credentials.chat_id.unwrap_or(config.chat_id))
            .with_polling(PollingConfig {
                retry_period: Duration::from_secs(config.retry_period_secs),
                lookback: Duration::from_secs(config.lookback_secs),
            })
            .with_request(RequestConfig {
                timeout: Duration::from_secs(config.request_timeout_secs),
            })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<CompactString>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_telegram_base_url(mut self, url: impl Into<CompactString>) -> Self {
        self.telegram_base_url = url.into();
        self
    }

    pub fn with_chat_id(mut self, chat_id: ChatId) -> Self {
        self.chat_id = chat_id;
        self
    }

    /// Set polling configuration
    pub fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    /// Set request configuration
    pub fn with_request(mut self, request: RequestConfig) -> Self {
        self.request = request;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ClientConfig::new("review", "bot").validate().is_ok());
    }

    #[test]
    fn empty_tokens_are_rejected() {
        let err = ClientConfig::new("", "bot").validate().unwrap_err();
        assert!(matches!(err, ClientError::Config { ref field, .. } if field == "review_token"));

        let err = ClientConfig::new("review", "").validate().unwrap_err();
        assert!(matches!(err, ClientError::Config { ref field, .. } if field == "telegram_token"));
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let config = ClientConfig::new("review", "bot").with_endpoint("ftp://example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = ClientConfig::new("review", "bot")
            .with_request(RequestConfig { timeout: Duration::ZERO });
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_retry_period_is_rejected() {
        let config = ClientConfig::new("review", "bot").with_polling(PollingConfig {
            retry_period: Duration::ZERO,
            ..PollingConfig::default()
        });
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ClientError::Config { ref field, .. } if field == "retry_period"));
    }

    #[test]
    fn environment_chat_id_overrides_file() {
        let file = BotConfig { chat_id: ChatId::new(1), ..BotConfig::default() };
        let credentials = Credentials {
            review_token: "review".into(),
            telegram_token: "bot".into(),
            chat_id: Some(ChatId::new(2)),
        };
        let config = ClientConfig::from_parts(&file, credentials);
        assert_eq!(config.chat_id, ChatId::new(2));
        assert_eq!(config.polling.retry_period, Duration::from_secs(600));
    }
}
