//! The outbound messaging seam.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::record::ChatId;
use crate::reply::Reply;

/// Errors that can occur when delivering a message.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The transport failed before the platform answered.
    #[error("transport error: {0}")]
    Transport(String),

    /// The platform refused the message (blocked bot, unknown chat, ...).
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Sends replies back through the messaging platform.
///
/// Used by the processor and the reminder job. This trait is object-safe.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Deliver one reply to a chat.
    async fn send(&self, chat_id: ChatId, reply: &Reply) -> Result<(), DeliveryError>;

    /// Acknowledge a button press so the client stops its spinner.
    ///
    /// Default implementation does nothing.
    async fn acknowledge(&self, callback_id: &str) -> Result<(), DeliveryError> {
        let _ = callback_id;
        Ok(())
    }
}

#[async_trait]
impl<T: Messenger + ?Sized> Messenger for Arc<T> {
    async fn send(&self, chat_id: ChatId, reply: &Reply) -> Result<(), DeliveryError> {
        (**self).send(chat_id, reply).await
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), DeliveryError> {
        (**self).acknowledge(callback_id).await
    }
}
