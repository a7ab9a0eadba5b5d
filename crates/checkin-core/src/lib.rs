//! Conversation engine for the mood check-in bot.
//!
//! This crate holds everything that does not touch the network or the disk:
//!
//! - [`UserRecord`] / [`UserTable`] - the persisted per-user state
//! - [`Event`] - decoded user actions
//! - [`transition`] - the pure state machine
//! - [`Reply`] / [`Keyboard`] - what to say back
//! - [`Messenger`] - the trait transports implement to deliver replies
//!
//! # Example
//!
//! ```rust
//! use checkin_core::{
//!     transition, ConversationState, EngineConfig, Event, Mode, TransitionContext, UserRecord,
//! };
//!
//! let config = EngineConfig::default();
//! let ctx = TransitionContext::new(&config, chrono::Utc::now());
//!
//! let result = transition(&UserRecord::new(), &ctx, Event::ModeSelected { mode: Mode::Support });
//! assert_eq!(result.record.state, ConversationState::WaitingIntensity);
//! assert_eq!(result.replies.len(), 1);
//! ```

mod config;
mod event;
mod messenger;
mod record;
mod reply;
mod table;
pub mod texts;
mod transition;

#[cfg(test)]
mod proptests;

pub use config::{EngineConfig, DEFAULT_SHORT_TEXT_MAX_CHARS};
pub use event::Event;
pub use messenger::{DeliveryError, Messenger};
pub use record::{
    truncate_chars, ChatId, Choice, ConversationState, HistoryEntry, Intensity,
    IntensityOutOfRange, LastCheckin, Mode, UserRecord, MAX_HISTORY, MAX_LABEL_CHARS,
    MAX_TOPIC_CHARS,
};
pub use reply::{Keyboard, Reply};
pub use table::UserTable;
pub use transition::{transition, Transition, TransitionContext};

// Re-export async_trait for implementors of `Messenger`
pub use async_trait::async_trait;
