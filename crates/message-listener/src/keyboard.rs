//! Renders semantic keyboards into inline buttons.

use checkin_core::{Choice, Intensity, Keyboard, Mode};
use telegram_client::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::callback;

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Support => "🟢 Поддержка",
        Mode::Correct => "🟡 Коррекция",
        Mode::Clarity => "🔵 Ясность",
    }
}

fn mode_button(mode: Mode) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(mode_label(mode), callback::mode(mode))
}

fn checkin_button() -> InlineKeyboardButton {
    InlineKeyboardButton::callback("🧾 Чек-ин", callback::CHECKIN)
}

fn intensity_button(value: Intensity) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(value.to_string(), callback::intensity(value))
}

fn cancel_button() -> InlineKeyboardButton {
    InlineKeyboardButton::callback("Отмена", callback::CANCEL)
}

/// Draw a keyboard as rows of callback buttons.
pub fn render(keyboard: Keyboard) -> InlineKeyboardMarkup {
    let rows = match keyboard {
        Keyboard::MainMenu => {
            let mut rows: Vec<_> = Mode::ALL.iter().map(|m| vec![mode_button(*m)]).collect();
            rows.push(vec![checkin_button()]);
            rows
        }
        Keyboard::Intensity => {
            let (low, high): (Vec<_>, Vec<_>) = Intensity::all().partition(|v| v.value() < 5);
            vec![
                low.into_iter().map(intensity_button).collect(),
                high.into_iter().map(intensity_button).collect(),
                vec![cancel_button()],
            ]
        }
        Keyboard::Choice => vec![
            vec![InlineKeyboardButton::callback(
                "Остаться с этим",
                callback::choice(Choice::Stay),
            )],
            vec![InlineKeyboardButton::callback(
                "Сделать на 5% мягче",
                callback::choice(Choice::Soften),
            )],
            vec![cancel_button()],
        ],
        Keyboard::Gentle => vec![
            vec![mode_button(Mode::Support)],
            vec![checkin_button()],
            vec![cancel_button()],
        ],
    };
    InlineKeyboardMarkup::new(rows)
}
