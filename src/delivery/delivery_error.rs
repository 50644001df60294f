use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Invalid delivery configuration: {0}")]
    Config(String),
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Telegram API error: {status} {body}")]
    Api { status: u16, body: String },
    #[error("Unreadable Telegram response: {0}")]
    InvalidResponse(String),
}
