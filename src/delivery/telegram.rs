// src/delivery/telegram.rs

use crate::config::TelegramConfig;
use crate::delivery::{DeliveryError, Messenger};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Sends report chunks through the Telegram Bot API `sendMessage` method.
pub struct TelegramClient {
    client: Client,
    endpoint: Url,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        Self::with_http_client(config, client)
    }

    /// Like `new`, but with a caller-built HTTP client.
    pub fn with_http_client(config: &TelegramConfig, client: Client) -> Result<Self, DeliveryError> {
        Ok(Self {
            client,
            endpoint: send_message_url(&config.api_base, &config.bot_token)?,
            chat_id: config.chat_id.clone(),
        })
    }
}

impl Messenger for TelegramClient {
    fn send_message(&self, text: &str) -> Result<Value, DeliveryError> {
        if text.trim().is_empty() {
            return Err(DeliveryError::EmptyMessage);
        }

        let payload = SendMessagePayload {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };

        tracing::debug!(chars = text.chars().count(), "Sending message to Telegram");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .map_err(|e| DeliveryError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| DeliveryError::Transport(e.without_url().to_string()))?;

        if status != StatusCode::OK {
            return Err(DeliveryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| DeliveryError::InvalidResponse(e.to_string()))
    }
}

/// `{api_base}/bot{token}/sendMessage`
fn send_message_url(api_base: &str, bot_token: &str) -> Result<Url, DeliveryError> {
    let mut url =
        Url::parse(api_base).map_err(|e| DeliveryError::Config(format!("api base: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(DeliveryError::Config(format!("api base: {api_base} is not a base URL")));
    }
    if bot_token.contains(['/', '?', '#']) {
        return Err(DeliveryError::Config("bot token contains URL delimiters".into()));
    }

    // Tokens look like `123:ABC`, which Url::join would read as a scheme.
    let path = format!(
        "{}/bot{bot_token}/sendMessage",
        url.path().trim_end_matches('/')
    );
    url.set_path(&path);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_send_message_url() {
        let url = send_message_url("https://api.telegram.org", "123:abc").unwrap();
        assert_eq!(url.as_str(), "https://api.telegram.org/bot123:abc/sendMessage");
    }

    #[test]
    fn keeps_base_path_prefix() {
        let url = send_message_url("http://127.0.0.1:8081/proxy", "t").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8081/proxy/bott/sendMessage");
    }

    #[test]
    fn rejects_unparsable_base_and_odd_tokens() {
        assert!(matches!(
            send_message_url("not a url", "t"),
            Err(DeliveryError::Config(_))
        ));
        assert!(matches!(
            send_message_url("https://api.telegram.org", "a/b"),
            Err(DeliveryError::Config(_))
        ));
    }

    #[test]
    fn payload_shape() {
        let payload = SendMessagePayload {
            chat_id: "42",
            text: "hi",
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "chat_id": "42",
                "text": "hi",
                "parse_mode": "HTML",
                "disable_web_page_preview": true
            })
        );
    }
}
