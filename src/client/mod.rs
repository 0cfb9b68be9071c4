//! Review API and Telegram clients plus the poller driving them

pub mod api;
pub mod config;
pub mod error;
pub mod notifier;
pub mod poller;
pub mod telegram;

pub use api::ReviewApi;
pub use config::ClientConfig;
pub use error::ClientError;
pub use notifier::Notifier;
pub use poller::ReviewPoller;
pub use telegram::TelegramBot;
