//! Per-user conversation record.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of completed check-ins kept per user.
pub const MAX_HISTORY: usize = 60;

/// Maximum stored label length, in characters.
pub const MAX_LABEL_CHARS: usize = 64;

/// Maximum stored topic length, in characters.
pub const MAX_TOPIC_CHARS: usize = 180;

/// Destination chat for push messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position in the check-in flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    WaitingIntensity,
    WaitingLabel,
    WaitingTopic,
    WaitingChoice,
}

/// Conversation branch chosen at the start of a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Support,
    Correct,
    Clarity,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Support, Mode::Correct, Mode::Clarity];

    /// Stable identifier, also used in JSON and callback data.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Support => "support",
            Mode::Correct => "correct",
            Mode::Clarity => "clarity",
        }
    }

    /// Parse a mode from its identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Mode::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

/// Micro-choice offered in `correct` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Stay,
    Soften,
}

impl Choice {
    pub fn as_str(self) -> &'static str {
        match self {
            Choice::Stay => "stay",
            Choice::Soften => "soften",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "stay" => Some(Choice::Stay),
            "soften" => Some(Choice::Soften),
            _ => None,
        }
    }
}

/// Error returned when an intensity is outside 0..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("intensity {0} is outside 0..=10")]
pub struct IntensityOutOfRange(pub u8);

/// Self-reported intensity on a 0..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub const MAX: u8 = 10;
    pub const ZERO: Intensity = Intensity(0);

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// All valid intensities in ascending order.
    pub fn all() -> impl Iterator<Item = Intensity> {
        (0..=Self::MAX).map(Intensity)
    }
}

impl TryFrom<u8> for Intensity {
    type Error = IntensityOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Intensity::new(value).ok_or(IntensityOutOfRange(value))
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Values captured during the most recent flow.
///
/// These are overwritten as a new flow captures each step, never reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastCheckin {
    pub intensity: Option<Intensity>,
    pub label: Option<String>,
    pub topic: Option<String>,
    pub choice: Option<Choice>,
}

/// A completed check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub mode: Option<Mode>,
    pub intensity: Option<Intensity>,
    pub label: Option<String>,
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice: Option<Choice>,
}

/// Everything the bot remembers about one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRecord {
    pub chat_id: Option<ChatId>,
    pub state: ConversationState,
    pub mode: Option<Mode>,
    pub last: LastCheckin,
    pub daily_enabled: bool,
    pub history: VecDeque<HistoryEntry>,
}

impl UserRecord {
    /// A fresh record for a user seen for the first time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `last` into the history, evicting the oldest entries past
    /// [`MAX_HISTORY`].
    ///
    /// `choice` is passed in rather than read from `last`, since only the
    /// `correct` flow captures one.
    pub fn push_history(&mut self, at: DateTime<Utc>, choice: Option<Choice>) {
        self.history.push_back(HistoryEntry {
            at,
            mode: self.mode,
            intensity: self.last.intensity,
            label: self.last.label.clone(),
            topic: self.last.topic.clone(),
            choice,
        });
        while self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }
    }

    /// Whether the reminder job should message this user, and where.
    pub fn reminder_target(&self) -> Option<ChatId> {
        if self.daily_enabled {
            self.chat_id
        } else {
            None
        }
    }
}

/// Truncate `text` to at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
