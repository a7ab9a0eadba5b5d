//! Engine feature toggles.

/// Default threshold for the gentle short-text menu, in characters.
pub const DEFAULT_SHORT_TEXT_MAX_CHARS: usize = 20;

/// Feature toggles that distinguish bot deployments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Offer the gentle menu when idle users send short free text.
    pub gentle_short_text: bool,
    /// Longest text, in characters, that still counts as short.
    pub short_text_max_chars: usize,
    /// Allow users to opt in and out of daily reminders.
    pub daily_reminders: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gentle_short_text: true,
            short_text_max_chars: DEFAULT_SHORT_TEXT_MAX_CHARS,
            daily_reminders: true,
        }
    }
}

impl EngineConfig {
    /// Config with every optional feature turned off.
    pub fn minimal() -> Self {
        Self {
            gentle_short_text: false,
            daily_reminders: false,
            ..Self::default()
        }
    }

    pub(crate) fn is_short_text(&self, text: &str) -> bool {
        self.gentle_short_text && text.chars().count() <= self.short_text_max_chars
    }
}
