//! Transport-neutral view of an incoming update.

use checkin_core::{ChatId, Event};
use telegram_client::Update;

use crate::callback;

/// Slash commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Menu,
    Checkin,
    Cancel,
    DailyOn,
    DailyOff,
}

impl Command {
    /// Parse `/name` or `/name@botname`, ignoring any arguments.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.strip_prefix('/')?.split_whitespace().next()?;
        let name = word.split('@').next().unwrap_or(word);
        match name {
            "start" => Some(Command::Start),
            "menu" => Some(Command::Menu),
            "checkin" => Some(Command::Checkin),
            "cancel" => Some(Command::Cancel),
            "daily_on" => Some(Command::DailyOn),
            "daily_off" => Some(Command::DailyOff),
            _ => None,
        }
    }

    pub fn event(self) -> Event {
        match self {
            Command::Start => Event::Start,
            Command::Menu => Event::MenuRequested,
            Command::Checkin => Event::CheckinRequested,
            Command::Cancel => Event::CancelRequested,
            Command::DailyOn => Event::DailyToggled { enabled: true },
            Command::DailyOff => Event::DailyToggled { enabled: false },
        }
    }
}

/// What the user sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundKind {
    /// Free text, trimmed and non-empty.
    Text(String),
    Command(Command),
    /// A button press; `data` is decoded lazily so unknown buttons can still
    /// be acknowledged.
    Callback { id: String, data: String },
}

/// One decoded update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub user_id: String,
    pub chat_id: ChatId,
    pub kind: InboundKind,
}

impl Inbound {
    /// Decode an update, or say why it is skipped.
    pub fn from_update(update: &Update) -> Result<Self, String> {
        if let Some(query) = &update.callback_query {
            if query.from.is_bot {
                return Err("callback from a bot".to_string());
            }
            let chat_id = query
                .message
                .as_ref()
                .map(|m| m.chat.id)
                .unwrap_or(query.from.id);
            return Ok(Self {
                user_id: query.from.id.to_string(),
                chat_id: ChatId(chat_id),
                kind: InboundKind::Callback {
                    id: query.id.clone(),
                    data: query.data.clone().unwrap_or_default(),
                },
            });
        }

        let message = update
            .message
            .as_ref()
            .ok_or_else(|| "no message or callback".to_string())?;
        let from = message
            .from
            .as_ref()
            .ok_or_else(|| "message without sender".to_string())?;
        if from.is_bot {
            return Err("message from a bot".to_string());
        }

        let text = message.text.as_deref().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err("no text content".to_string());
        }

        let kind = if text.starts_with('/') {
            match Command::parse(text) {
                Some(command) => InboundKind::Command(command),
                None => return Err("unknown command".to_string()),
            }
        } else {
            InboundKind::Text(text.to_string())
        };

        Ok(Self {
            user_id: from.id.to_string(),
            chat_id: ChatId(message.chat.id),
            kind,
        })
    }

    /// The engine event, if this update maps to one.
    pub fn event(&self) -> Option<Event> {
        match &self.kind {
            InboundKind::Text(text) => Some(Event::TextReceived { text: text.clone() }),
            InboundKind::Command(command) => Some(command.event()),
            InboundKind::Callback { data, .. } => callback::decode(data),
        }
    }

    /// Callback query id to acknowledge, if any.
    pub fn callback_id(&self) -> Option<&str> {
        match &self.kind {
            InboundKind::Callback { id, .. } => Some(id),
            _ => None,
        }
    }
}
