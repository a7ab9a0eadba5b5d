//! [`Messenger`] implementation over the Bot API.

use async_trait::async_trait;
use checkin_core::{ChatId, DeliveryError, Messenger, Reply};
use telegram_client::{ApiError, SendMessageParams, TelegramClient};
use tracing::debug;

use crate::keyboard;

/// Delivers replies through a [`TelegramClient`].
#[derive(Debug, Clone)]
pub struct TelegramMessenger {
    client: TelegramClient,
}

impl TelegramMessenger {
    pub fn new(client: TelegramClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &TelegramClient {
        &self.client
    }
}

/// Build the `sendMessage` payload for a reply.
pub fn send_params(chat_id: ChatId, reply: &Reply) -> SendMessageParams {
    let params = SendMessageParams::text(chat_id.0, reply.text.clone());
    match reply.keyboard {
        Some(kb) => params.with_keyboard(keyboard::render(kb)),
        None => params,
    }
}

fn delivery_error(err: ApiError) -> DeliveryError {
    match err {
        ApiError::Api { code, description } => {
            DeliveryError::Rejected(format!("{code}: {description}"))
        }
        other => DeliveryError::Transport(other.to_string()),
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, chat_id: ChatId, reply: &Reply) -> Result<(), DeliveryError> {
        let message = self
            .client
            .send_message(send_params(chat_id, reply))
            .await
            .map_err(delivery_error)?;
        debug!(chat_id = %chat_id, message_id = message.message_id, "Delivered reply");
        Ok(())
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), DeliveryError> {
        self.client
            .answer_callback_query(callback_id)
            .await
            .map_err(delivery_error)
    }
}
