mod delivery_error;
mod telegram;

pub use delivery_error::DeliveryError;
pub use telegram::TelegramClient;

use serde_json::Value;

/// Something that can post one chat message and wait for the answer.
pub trait Messenger {
    /// Sends `text` as a single message, returning the endpoint's parsed reply.
    fn send_message(&self, text: &str) -> Result<Value, DeliveryError>;
}
