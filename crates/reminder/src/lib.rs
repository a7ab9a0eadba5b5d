//! Daily reminder sweep.
//!
//! Sends the daily check-in prompt once to every user who opted in and has a
//! known chat. Meant to be run from a scheduler, once per run.
//!
//! # Example
//!
//! ```no_run
//! use checkin_core::{async_trait, ChatId, DeliveryError, Messenger, Reply};
//! use checkin_store::JsonFileStore;
//! use reminder::ReminderSweep;
//!
//! struct Stdout;
//!
//! #[async_trait]
//! impl Messenger for Stdout {
//!     async fn send(&self, chat_id: ChatId, reply: &Reply) -> Result<(), DeliveryError> {
//!         println!("{}: {}", chat_id, reply.text);
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() {
//! let report = ReminderSweep::new(JsonFileStore::default(), Stdout).run().await;
//! println!("sent {}, failed {}", report.sent, report.failed);
//! # }
//! ```

use checkin_core::{texts, Keyboard, Messenger, Reply};
use checkin_store::UserStore;
use tracing::{info, warn};

/// The message every opted-in user receives.
pub fn reminder_reply() -> Reply {
    Reply::with_keyboard(texts::DAILY_PROMPT, Keyboard::MainMenu)
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub sent: usize,
    pub failed: usize,
    /// One line per failed recipient: `<chat id>: <error>`.
    pub errors: Vec<String>,
}

/// One pass over the user table.
pub struct ReminderSweep<S: UserStore, M: Messenger> {
    store: S,
    messenger: M,
    enabled: bool,
}

impl<S: UserStore, M: Messenger> ReminderSweep<S, M> {
    pub fn new(store: S, messenger: M) -> Self {
        Self {
            store,
            messenger,
            enabled: true,
        }
    }

    /// Turn the whole sweep off, e.g. when daily reminders are disabled in
    /// the bot's configuration. A disabled sweep reads nothing and sends
    /// nothing.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Send the reminder to every eligible user.
    ///
    /// A failed delivery is logged and counted; the sweep moves on. The table
    /// is read once and never written.
    pub async fn run(&self) -> SweepReport {
        if !self.enabled {
            info!("Daily reminders are disabled, skipping sweep");
            return SweepReport::default();
        }

        let table = self.store.load().await;
        let recipients: Vec<_> = table.reminder_recipients().collect();

        info!(
            users = table.len(),
            recipient_count = recipients.len(),
            "Sending daily reminders"
        );

        let reply = reminder_reply();
        let mut report = SweepReport::default();

        for (user_id, chat_id) in recipients {
            match self.messenger.send(chat_id, &reply).await {
                Ok(()) => {
                    report.sent += 1;
                    info!(user_id = %user_id, chat_id = %chat_id, "Reminder sent");
                }
                Err(err) => {
                    report.failed += 1;
                    report.errors.push(format!("{}: {}", chat_id, err));
                    warn!(user_id = %user_id, chat_id = %chat_id, error = %err, "Reminder failed");
                }
            }
        }

        info!(sent = report.sent, failed = report.failed, "Reminder sweep complete");
        report
    }
}

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
