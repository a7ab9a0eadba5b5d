//! Bot API payload types.

mod send;
mod update;

pub use send::{
    AnswerCallbackQueryParams, GetUpdatesParams, InlineKeyboardButton, InlineKeyboardMarkup,
    SendMessageParams,
};
pub use update::{CallbackQuery, Chat, Message, Update, User};
