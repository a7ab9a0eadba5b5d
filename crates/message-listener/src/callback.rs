//! Callback data carried by inline keyboard buttons.
//!
//! The renderer and the decoder both go through this module, so every button
//! the bot draws decodes back to an event.

use checkin_core::{Choice, Event, Intensity, Mode};

pub const CHECKIN: &str = "checkin";
pub const CANCEL: &str = "cancel";

const MODE_PREFIX: &str = "mode_";
const INTENSITY_PREFIX: &str = "int_";
const CHOICE_PREFIX: &str = "choice_";

pub fn mode(mode: Mode) -> String {
    format!("{MODE_PREFIX}{}", mode.as_str())
}

pub fn intensity(value: Intensity) -> String {
    format!("{INTENSITY_PREFIX}{}", value.value())
}

pub fn choice(choice: Choice) -> String {
    format!("{CHOICE_PREFIX}{}", choice.as_str())
}

/// Decode button data into an event. Unknown data yields `None`.
pub fn decode(data: &str) -> Option<Event> {
    match data {
        CHECKIN => return Some(Event::CheckinRequested),
        CANCEL => return Some(Event::CancelRequested),
        _ => {}
    }

    if let Some(name) = data.strip_prefix(MODE_PREFIX) {
        return Mode::from_name(name).map(|mode| Event::ModeSelected { mode });
    }
    if let Some(raw) = data.strip_prefix(INTENSITY_PREFIX) {
        // Only plain decimal digits; "int_+5" and "int_05" style variants are foreign.
        if raw.is_empty() || raw.len() > 2 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = raw.parse::<u8>().ok().and_then(Intensity::new)?;
        return Some(Event::IntensitySelected { value });
    }
    if let Some(name) = data.strip_prefix(CHOICE_PREFIX) {
        return Choice::from_name(name).map(|choice| Event::ChoiceMade { choice });
    }
    None
}
