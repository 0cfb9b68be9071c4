//! Error types for the review API and Telegram clients

use compact_str::CompactString;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, timeout, ...)
    #[error("Ошибка запроса к эндпоинту: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Ошибка запроса к эндпоинту: {status}")]
    HttpStatus { status: u16 },

    #[error("Ответ сервера не преобразовывается в JSON: {path}: {message}")]
    Decode {
        path: CompactString,
        message: CompactString,
        #[source]
        source: serde_json::Error,
    },

    /// Telegram answered with `ok: false`
    #[error("Telegram API error {code}: {description}")]
    Api { code: u16, description: CompactString },

    #[error("Invalid configuration for {field}: {message}")]
    Config { field: CompactString, message: CompactString },
}

impl ClientError {
    pub fn decode(
        path: impl Into<CompactString>,
        message: impl Into<CompactString>,
        source: serde_json::Error,
    ) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    pub fn api(code: u16, description: impl Into<CompactString>) -> Self {
        Self::Api { code, description: description.into() }
    }

    pub fn config_validation(
        field: impl Into<CompactString>,
        message: impl Into<CompactString>,
    ) -> Self {
        Self::Config { field: field.into(), message: message.into() }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e)
    }
}
