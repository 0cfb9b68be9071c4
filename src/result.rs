use std::path::PathBuf;

use thiserror::Error;

use crate::client::ClientError;

pub type Result<T> = std::result::Result<T, BotError>;

/// Payload shape violations found while validating or interpreting a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Ответ API домашки не словарь.")]
    NotAMapping,
    #[error("В ответе API домашки нет ключа \"homeworks\".")]
    MissingHomeworks,
    #[error("Ответ API домашки под ключом `homeworks` не список.")]
    HomeworksNotAList,
    #[error("Список домашних работ пуст.")]
    EmptyList,
    #[error("Такой домашней работы нет.")]
    MissingName,
    #[error("Недокументированный статус домашней работы: {0}")]
    UnknownStatus(String),
}

/// The chat channel refused or could not take a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Ошибка отправки сообщения: {cause}")]
pub struct DeliveryError {
    pub cause: String,
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("Missing required environment variables: {}", .names.join(", "))]
    MissingCredentials { names: Vec<&'static str> },

    #[error("Failed to load configuration from: {path}: {message}")]
    ConfigLoadError { path: PathBuf, message: String },

    #[error("Invalid configuration: {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{0}")]
    GeneralError(String),
}

impl DeliveryError {
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self { cause: cause.to_string() }
    }
}

impl BotError {
    /// Create a configuration load error
    pub fn config_load_error(path: PathBuf, source: impl std::fmt::Display) -> Self {
        Self::ConfigLoadError { path, message: source.to_string() }
    }

    /// Create a configuration validation error
    pub fn config_validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidationError { field: field.into(), message: message.into() }
    }

    /// Failures of the notification channel itself are never reported through it
    pub fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_delivery_errors_are_classified_as_delivery() {
        assert!(BotError::from(DeliveryError::new("chat not found")).is_delivery());
        assert!(!BotError::from(SchemaError::EmptyList).is_delivery());
        assert!(!BotError::from(ClientError::HttpStatus { status: 500 }).is_delivery());
    }

    #[test]
    fn missing_credentials_lists_every_name() {
        let err = BotError::MissingCredentials {
            names: vec!["PRACTICUM_TOKEN", "TELEGRAM_TOKEN"],
        };
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_TOKEN"
        );
    }
}
