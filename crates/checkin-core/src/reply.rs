//! Outbound messages produced by the engine.

/// Which set of buttons to attach to a reply.
///
/// Semantic only; the transport decides how each layout is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// Mode buttons plus check-in.
    MainMenu,
    /// Intensity 0..=10 plus cancel.
    Intensity,
    /// Stay / soften plus cancel.
    Choice,
    /// Offered for short free text while idle.
    Gentle,
}

/// A message to send back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    /// Plain text reply without buttons.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    /// Reply with a keyboard attached.
    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}
