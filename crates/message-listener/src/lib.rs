//! Inbound pipeline for the mood check-in bot.
//!
//! Turns Bot API updates into engine events, applies them to the stored
//! user record and sends the replies back:
//!
//! - [`Inbound`] - transport-neutral decoding of an update
//! - [`callback`] - button data shared by the decoder and [`keyboard`]
//! - [`MessageProcessor`] - load, transition, save, send
//! - [`TelegramMessenger`] - [`Messenger`](checkin_core::Messenger) over the Bot API
//!
//! # Example
//!
//! ```no_run
//! use checkin_store::JsonFileStore;
//! use message_listener::{MessageProcessor, ProcessResult, TelegramMessenger};
//! use telegram_client::{ClientConfig, TelegramClient};
//! use futures::StreamExt;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TelegramClient::connect(ClientConfig::new("123:token")).await?;
//! let processor = MessageProcessor::with_defaults(
//!     JsonFileStore::default(),
//!     TelegramMessenger::new(client.clone()),
//! );
//!
//! let mut updates = telegram_client::subscribe(&client);
//! while let Some(Ok(update)) = updates.next().await {
//!     if let ProcessResult::Error(e) = processor.process_update(&update).await {
//!         eprintln!("Error: {}", e);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod inbound;
pub mod keyboard;
mod processor;
mod sender;

pub use inbound::{Command, Inbound, InboundKind};
pub use processor::{MessageProcessor, ProcessResult, ProcessorConfig, ProcessorError};
pub use sender::{send_params, TelegramMessenger};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
