//! Telegram Bot API client library.
//!
//! A small client covering what the check-in bot needs:
//!
//! - Verifying the token (`getMe`)
//! - Receiving updates by long polling, as a [`futures::Stream`]
//! - Sending messages with inline keyboards
//! - Answering callback queries
//!
//! # Example
//!
//! ```no_run
//! use telegram_client::{ClientConfig, TelegramClient};
//!
//! # async fn example() -> Result<(), telegram_client::ApiError> {
//! let client = TelegramClient::connect(ClientConfig::new("123456:token")).await?;
//!
//! use futures::StreamExt;
//! let mut updates = telegram_client::subscribe(&client);
//! while let Some(result) = updates.next().await {
//!     match result {
//!         Ok(update) => {
//!             if let Some(message) = update.message {
//!                 client.send_text(message.chat.id, "Привет!").await?;
//!             }
//!         }
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod poll;
pub mod types;

pub use client::TelegramClient;
pub use config::{ClientConfig, DEFAULT_API_BASE, DEFAULT_POLL_TIMEOUT};
pub use error::ApiError;
pub use poll::{subscribe, subscribe_with_backoff, BackoffConfig, UpdateStream};
pub use types::*;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
