//! Minimal Telegram Bot API client, only `sendMessage` is needed

use compact_str::CompactString;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{
    config::ClientConfig,
    error::{ClientError, Result},
};
use crate::id::ChatId;

/// Delivers a text message to a chat
pub trait ChatSender {
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<()>;
}

#[derive(Debug)]
pub struct TelegramBot {
    client: Client,
    base_url: CompactString,
    token: CompactString,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

/// Envelope of every Bot API reply
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    error_code: Option<u16>,
    description: Option<CompactString>,
}

impl TelegramBot {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request.timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            client,
            base_url: config.telegram_base_url.trim_end_matches('/').into(),
            token: config.telegram_token.clone(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }
}

impl ChatSender for TelegramBot {
    #[instrument(skip(self, text), fields(chat_id = %chat_id, text_length = text.len()))]
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<()> {
        let request = SendMessageRequest { chat_id: chat_id.value(), text };
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await
            // reqwest errors carry the URL, which embeds the bot token
            .map_err(|e| ClientError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.without_url()))?;

        match serde_json::from_str::<TelegramResponse>(&body) {
            Ok(reply) if reply.ok => {
                debug!("Telegram accepted message");
                Ok(())
            },
            Ok(reply) => Err(ClientError::api(
                reply.error_code.unwrap_or(status.as_u16()),
                reply.description.unwrap_or_default(),
            )),
            Err(_) if !status.is_success() => Err(ClientError::HttpStatus { status: status.as_u16() }),
            Err(e) => Err(ClientError::decode("sendMessage", "Failed to parse response", e)),
        }
    }
}
