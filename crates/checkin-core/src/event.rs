//! Inbound events that drive the conversation.

use crate::record::{Choice, Intensity, Mode};

/// Something the user did, already decoded from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// First contact or `/start`.
    Start,
    /// `/menu`.
    MenuRequested,
    /// `/checkin` or the check-in menu button.
    CheckinRequested,
    ModeSelected { mode: Mode },
    IntensitySelected { value: Intensity },
    /// Free text, already trimmed and non-empty.
    TextReceived { text: String },
    ChoiceMade { choice: Choice },
    CancelRequested,
    /// `/daily_on` or `/daily_off`.
    DailyToggled { enabled: bool },
}

impl Event {
    /// Short name for logging. Never includes user text.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::MenuRequested => "menu",
            Event::CheckinRequested => "checkin",
            Event::ModeSelected { .. } => "mode_selected",
            Event::IntensitySelected { .. } => "intensity_selected",
            Event::TextReceived { .. } => "text",
            Event::ChoiceMade { .. } => "choice",
            Event::CancelRequested => "cancel",
            Event::DailyToggled { .. } => "daily_toggled",
        }
    }
}
