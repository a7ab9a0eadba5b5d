//! Pure state transition function.
//!
//! Given the same record, context and event, [`transition`] always produces
//! the same record and replies. It performs no I/O; the caller loads and saves
//! the record and delivers the replies.

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::event::Event;
use crate::record::{
    truncate_chars, Choice, ConversationState, Intensity, Mode, UserRecord, MAX_LABEL_CHARS,
    MAX_TOPIC_CHARS,
};
use crate::reply::{Keyboard, Reply};
use crate::texts;

/// Inputs to a transition besides the record and event.
#[derive(Debug, Clone)]
pub struct TransitionContext<'a> {
    pub config: &'a EngineConfig,
    /// Timestamp recorded on history entries.
    pub now: DateTime<Utc>,
}

impl<'a> TransitionContext<'a> {
    pub fn new(config: &'a EngineConfig, now: DateTime<Utc>) -> Self {
        Self { config, now }
    }
}

/// Result of a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub record: UserRecord,
    pub replies: Vec<Reply>,
}

impl Transition {
    fn new(record: UserRecord) -> Self {
        Self {
            record,
            replies: Vec::new(),
        }
    }

    fn reply(mut self, reply: Reply) -> Self {
        self.replies.push(reply);
        self
    }

    /// Leave the record untouched and point the user back to `/checkin`.
    fn rejected(record: &UserRecord) -> Self {
        Self::new(record.clone()).reply(Reply::text(texts::RESTART_GUIDANCE))
    }
}

/// Compute the next record and replies for one event.
pub fn transition(record: &UserRecord, ctx: &TransitionContext<'_>, event: Event) -> Transition {
    use ConversationState as S;

    match (record.state, event) {
        // Menu surface, valid everywhere and never mutating.
        (_, Event::Start) => Transition::new(record.clone())
            .reply(Reply::with_keyboard(texts::GREETING, Keyboard::MainMenu)),

        (_, Event::MenuRequested) => Transition::new(record.clone())
            .reply(Reply::with_keyboard(texts::MENU, Keyboard::MainMenu)),

        (_, Event::CheckinRequested) => {
            let mut next = record.clone();
            next.state = S::Idle;
            next.mode = None;
            Transition::new(next)
                .reply(Reply::with_keyboard(texts::CHECKIN_PROMPT, Keyboard::MainMenu))
        }

        (_, Event::CancelRequested) => {
            let mut next = record.clone();
            next.state = S::Idle;
            next.mode = None;
            Transition::new(next).reply(Reply::with_keyboard(texts::CANCELLED, Keyboard::MainMenu))
        }

        (_, Event::DailyToggled { enabled }) => {
            if !ctx.config.daily_reminders {
                return Transition::new(record.clone()).reply(Reply::text(texts::DAILY_UNAVAILABLE));
            }
            let mut next = record.clone();
            next.daily_enabled = enabled;
            let text = if enabled { texts::DAILY_ON } else { texts::DAILY_OFF };
            Transition::new(next).reply(Reply::text(text))
        }

        // Mode buttons stay on screen after a flow ends, so they start a new
        // flow from any state.
        (_, Event::ModeSelected { mode }) => {
            let mut next = record.clone();
            next.mode = Some(mode);
            next.state = S::WaitingIntensity;
            Transition::new(next).reply(Reply::with_keyboard(
                texts::intensity_prompt(mode),
                Keyboard::Intensity,
            ))
        }

        (S::WaitingIntensity, Event::IntensitySelected { value }) => {
            let mut next = record.clone();
            next.last.intensity = Some(value);
            next.state = S::WaitingLabel;
            Transition::new(next).reply(Reply::text(texts::ASK_LABEL))
        }

        (S::WaitingLabel, Event::TextReceived { text }) => {
            let mut next = record.clone();
            next.last.label = Some(truncate_chars(text.trim(), MAX_LABEL_CHARS));
            next.state = S::WaitingTopic;
            Transition::new(next).reply(Reply::text(texts::ASK_TOPIC))
        }

        (S::WaitingTopic, Event::TextReceived { text }) => complete_topic(record, ctx, &text),

        (S::WaitingChoice, Event::ChoiceMade { choice }) if record.mode == Some(Mode::Correct) => {
            let mut next = record.clone();
            next.last.choice = Some(choice);
            next.state = S::Idle;
            next.push_history(ctx.now, Some(choice));

            let guidance = match choice {
                Choice::Stay => texts::STAY_GUIDANCE,
                Choice::Soften => texts::SOFTEN_GUIDANCE,
            };
            let text = format!("{guidance}\n\n{}", texts::closing_line(Mode::Correct));
            Transition::new(next).reply(Reply::with_keyboard(text, Keyboard::MainMenu))
        }

        (S::Idle, Event::TextReceived { text }) if ctx.config.is_short_text(text.trim()) => {
            Transition::new(record.clone())
                .reply(Reply::with_keyboard(texts::GENTLE_ACK, Keyboard::Gentle))
        }

        // Everything else arrived out of order.
        (_, Event::IntensitySelected { .. })
        | (_, Event::TextReceived { .. })
        | (_, Event::ChoiceMade { .. }) => Transition::rejected(record),
    }
}

/// Store the topic and branch on mode.
fn complete_topic(record: &UserRecord, ctx: &TransitionContext<'_>, text: &str) -> Transition {
    let mut next = record.clone();
    next.last.topic = Some(truncate_chars(text.trim(), MAX_TOPIC_CHARS));

    let label = next.last.label.as_deref().unwrap_or_default();
    let intensity = next.last.intensity.unwrap_or(Intensity::ZERO);
    let reflect = texts::reflection(label, intensity);

    match next.mode {
        Some(Mode::Support) => {
            next.state = ConversationState::Idle;
            next.push_history(ctx.now, None);
            let text = format!(
                "{reflect}\n\n{}\n\n{}",
                texts::BODY_ANCHOR,
                texts::closing_line(Mode::Support)
            );
            Transition::new(next).reply(Reply::with_keyboard(text, Keyboard::MainMenu))
        }
        Some(Mode::Correct) => {
            next.state = ConversationState::WaitingChoice;
            let text = format!("{reflect}\n\n{}", texts::CHOICE_PROMPT);
            Transition::new(next).reply(Reply::with_keyboard(text, Keyboard::Choice))
        }
        // A missing mode falls through to clarity.
        Some(Mode::Clarity) | None => {
            next.state = ConversationState::Idle;
            next.push_history(ctx.now, None);
            let text = format!(
                "{reflect}\n\n{}\n\n{}",
                texts::CLARITY_QUESTION,
                texts::closing_line(Mode::Clarity)
            );
            Transition::new(next).reply(Reply::with_keyboard(text, Keyboard::MainMenu))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    fn run(record: &UserRecord, config: &EngineConfig, event: Event) -> Transition {
        transition(record, &TransitionContext::new(config, now()), event)
    }

    fn intensity(n: u8) -> Intensity {
        Intensity::new(n).unwrap()
    }

    fn text(s: &str) -> Event {
        Event::TextReceived {
            text: s.to_string(),
        }
    }

    fn in_state(state: ConversationState, mode: Option<Mode>) -> UserRecord {
        UserRecord {
            state,
            mode,
            ..UserRecord::default()
        }
    }

    #[test]
    fn test_mode_selection_from_idle() {
        let config = EngineConfig::default();
        for mode in Mode::ALL {
            let result = run(&UserRecord::new(), &config, Event::ModeSelected { mode });
            assert_eq!(result.record.state, ConversationState::WaitingIntensity);
            assert_eq!(result.record.mode, Some(mode));
            assert!(result.record.history.is_empty());
            assert_eq!(result.replies.len(), 1);
            assert_eq!(result.replies[0].keyboard, Some(Keyboard::Intensity));
        }
    }

    #[test]
    fn test_intensity_captured() {
        let config = EngineConfig::default();
        let record = in_state(ConversationState::WaitingIntensity, Some(Mode::Support));
        let result = run(&record, &config, Event::IntensitySelected { value: intensity(4) });
        assert_eq!(result.record.state, ConversationState::WaitingLabel);
        assert_eq!(result.record.last.intensity, Some(intensity(4)));
        assert_eq!(result.replies[0].text, texts::ASK_LABEL);
    }

    #[test]
    fn test_intensity_out_of_state_rejected() {
        let config = EngineConfig::default();
        let record = in_state(ConversationState::WaitingLabel, Some(Mode::Clarity));
        let result = run(&record, &config, Event::IntensitySelected { value: intensity(4) });
        assert_eq!(result.record, record);
        assert_eq!(result.replies, vec![Reply::text(texts::RESTART_GUIDANCE)]);
    }

    #[test]
    fn test_label_truncated_and_trimmed() {
        let config = EngineConfig::default();
        let record = in_state(ConversationState::WaitingLabel, Some(Mode::Support));
        let long = format!("  {}  ", "б".repeat(100));
        let result = run(&record, &config, text(&long));
        assert_eq!(result.record.state, ConversationState::WaitingTopic);
        assert_eq!(
            result.record.last.label.as_deref().map(|l| l.chars().count()),
            Some(MAX_LABEL_CHARS)
        );
    }

    #[test]
    fn test_topic_truncated() {
        let config = EngineConfig::default();
        let mut record = in_state(ConversationState::WaitingTopic, Some(Mode::Correct));
        record.last.label = Some("усталость".to_string());
        record.last.intensity = Some(intensity(3));
        let result = run(&record, &config, text(&"x".repeat(500)));
        assert_eq!(
            result.record.last.topic.as_deref().map(str::len),
            Some(MAX_TOPIC_CHARS)
        );
    }

    #[test]
    fn test_support_completes_with_history() {
        let config = EngineConfig::default();
        let mut record = in_state(ConversationState::WaitingTopic, Some(Mode::Support));
        record.last.label = Some("тревога".to_string());
        record.last.intensity = Some(intensity(9));

        let result = run(&record, &config, text("дедлайн"));
        assert_eq!(result.record.state, ConversationState::Idle);
        assert_eq!(result.record.history.len(), 1);
        let entry = &result.record.history[0];
        assert_eq!(entry.mode, Some(Mode::Support));
        assert_eq!(entry.topic.as_deref(), Some("дедлайн"));
        assert_eq!(entry.at, now());
        assert!(entry.choice.is_none());

        let reply = &result.replies[0];
        assert!(reply.text.contains("очень интенсивно"));
        assert!(reply.text.contains(texts::BODY_ANCHOR));
        assert!(reply.text.ends_with(texts::closing_line(Mode::Support)));
        assert_eq!(reply.keyboard, Some(Keyboard::MainMenu));
    }

    #[test]
    fn test_clarity_completes_with_history() {
        let config = EngineConfig::default();
        let mut record = in_state(ConversationState::WaitingTopic, Some(Mode::Clarity));
        record.last.label = Some("пустота".to_string());
        record.last.intensity = Some(intensity(2));

        let result = run(&record, &config, text("ничего не хочется"));
        assert_eq!(result.record.state, ConversationState::Idle);
        assert_eq!(result.record.history.len(), 1);
        assert!(result.replies[0].text.contains(texts::CLARITY_QUESTION));
        assert!(result.replies[0].text.contains("тихое"));
    }

    #[test]
    fn test_topic_without_mode_falls_back_to_clarity() {
        let config = EngineConfig::default();
        let record = in_state(ConversationState::WaitingTopic, None);
        let result = run(&record, &config, text("что-то"));
        assert_eq!(result.record.state, ConversationState::Idle);
        assert!(result.replies[0].text.contains(texts::CLARITY_QUESTION));
        assert!(result.replies[0].text.contains("0/10"));
    }

    #[test]
    fn test_correct_waits_for_choice() {
        let config = EngineConfig::default();
        let mut record = in_state(ConversationState::WaitingTopic, Some(Mode::Correct));
        record.last.label = Some("злость".to_string());
        record.last.intensity = Some(intensity(7));

        let result = run(&record, &config, text("конфликт на работе"));
        assert_eq!(result.record.state, ConversationState::WaitingChoice);
        assert!(result.record.history.is_empty());
        assert_eq!(result.replies[0].keyboard, Some(Keyboard::Choice));
        assert!(result.replies[0].text.contains("«злость»"));
        assert!(result.replies[0].text.contains("7/10"));
    }

    #[test]
    fn test_choice_stay_and_soften() {
        let config = EngineConfig::default();
        let record = in_state(ConversationState::WaitingChoice, Some(Mode::Correct));

        for (choice, guidance) in [
            (Choice::Stay, texts::STAY_GUIDANCE),
            (Choice::Soften, texts::SOFTEN_GUIDANCE),
        ] {
            let result = run(&record, &config, Event::ChoiceMade { choice });
            assert_eq!(result.record.state, ConversationState::Idle);
            assert_eq!(result.record.last.choice, Some(choice));
            assert_eq!(result.record.history.len(), 1);
            assert_eq!(result.record.history[0].choice, Some(choice));
            assert!(result.replies[0].text.starts_with(guidance));
        }
    }

    #[test]
    fn test_support_after_correct_records_no_choice() {
        let config = EngineConfig::default();
        let mut record = UserRecord::new();
        for event in [
            Event::ModeSelected { mode: Mode::Correct },
            Event::IntensitySelected { value: intensity(7) },
            text("злость"),
            text("конфликт"),
            Event::ChoiceMade { choice: Choice::Soften },
            Event::ModeSelected { mode: Mode::Support },
            Event::IntensitySelected { value: intensity(3) },
            text("усталость"),
            text("дедлайн"),
        ] {
            record = run(&record, &config, event).record;
        }

        assert_eq!(record.history.len(), 2);
        assert_eq!(record.history[0].choice, Some(Choice::Soften));
        let last = record.history.back().unwrap();
        assert_eq!(last.mode, Some(Mode::Support));
        assert_eq!(last.choice, None);
    }

    #[test]
    fn test_choice_requires_correct_mode() {
        let config = EngineConfig::default();
        let record = in_state(ConversationState::WaitingChoice, Some(Mode::Support));
        let result = run(&record, &config, Event::ChoiceMade { choice: Choice::Stay });
        assert_eq!(result.record, record);
        assert_eq!(result.replies[0].text, texts::RESTART_GUIDANCE);
    }

    #[test]
    fn test_choice_in_idle_rejected() {
        let config = EngineConfig::default();
        let record = UserRecord::new();
        let result = run(&record, &config, Event::ChoiceMade { choice: Choice::Soften });
        assert_eq!(result.record, record);
    }

    #[test]
    fn test_text_while_waiting_for_buttons_rejected() {
        let config = EngineConfig::default();
        for state in [ConversationState::WaitingIntensity, ConversationState::WaitingChoice] {
            let record = in_state(state, Some(Mode::Correct));
            let result = run(&record, &config, text("эй"));
            assert_eq!(result.record, record);
            assert_eq!(result.replies[0].text, texts::RESTART_GUIDANCE);
        }
    }

    #[test]
    fn test_cancel_from_any_state() {
        let config = EngineConfig::default();
        let mut record = in_state(ConversationState::WaitingTopic, Some(Mode::Support));
        record.last.label = Some("грусть".to_string());

        let result = run(&record, &config, Event::CancelRequested);
        assert_eq!(result.record.state, ConversationState::Idle);
        assert!(result.record.mode.is_none());
        // Captured values are superseded later, not cleared.
        assert_eq!(result.record.last.label.as_deref(), Some("грусть"));
        assert_eq!(result.replies[0].text, texts::CANCELLED);
    }

    #[test]
    fn test_checkin_resets_flow() {
        let config = EngineConfig::default();
        let record = in_state(ConversationState::WaitingChoice, Some(Mode::Correct));
        let result = run(&record, &config, Event::CheckinRequested);
        assert_eq!(result.record.state, ConversationState::Idle);
        assert!(result.record.mode.is_none());
        assert_eq!(result.replies[0].text, texts::CHECKIN_PROMPT);
        assert_eq!(result.replies[0].keyboard, Some(Keyboard::MainMenu));
    }

    #[test]
    fn test_start_and_menu_do_not_mutate() {
        let config = EngineConfig::default();
        let record = in_state(ConversationState::WaitingLabel, Some(Mode::Clarity));
        for event in [Event::Start, Event::MenuRequested] {
            let result = run(&record, &config, event);
            assert_eq!(result.record, record);
            assert_eq!(result.replies[0].keyboard, Some(Keyboard::MainMenu));
        }
    }

    #[test]
    fn test_gentle_menu_for_short_text() {
        let config = EngineConfig::default();
        let record = UserRecord::new();
        let result = run(&record, &config, text("плохо"));
        assert_eq!(result.record, record);
        assert_eq!(result.replies[0].keyboard, Some(Keyboard::Gentle));
    }

    #[test]
    fn test_long_idle_text_gets_guidance() {
        let config = EngineConfig::default();
        let record = UserRecord::new();
        let result = run(&record, &config, text(&"а".repeat(21)));
        assert_eq!(result.record, record);
        assert_eq!(result.replies[0].text, texts::RESTART_GUIDANCE);

        let at_limit = run(&record, &config, text(&"а".repeat(20)));
        assert_eq!(at_limit.replies[0].keyboard, Some(Keyboard::Gentle));
    }

    #[test]
    fn test_gentle_menu_disabled() {
        let config = EngineConfig::minimal();
        let result = run(&UserRecord::new(), &config, text("плохо"));
        assert_eq!(result.replies[0].text, texts::RESTART_GUIDANCE);
    }

    #[test]
    fn test_daily_toggle() {
        let config = EngineConfig::default();
        let record = in_state(ConversationState::WaitingLabel, Some(Mode::Support));

        let on = run(&record, &config, Event::DailyToggled { enabled: true });
        assert!(on.record.daily_enabled);
        assert_eq!(on.record.state, ConversationState::WaitingLabel);
        assert_eq!(on.replies[0].text, texts::DAILY_ON);

        let off = run(&on.record, &config, Event::DailyToggled { enabled: false });
        assert!(!off.record.daily_enabled);
        assert_eq!(off.replies[0].text, texts::DAILY_OFF);
    }

    #[test]
    fn test_daily_toggle_unavailable() {
        let config = EngineConfig::minimal();
        let record = UserRecord::new();
        let result = run(&record, &config, Event::DailyToggled { enabled: true });
        assert_eq!(result.record, record);
        assert_eq!(result.replies[0].text, texts::DAILY_UNAVAILABLE);
    }

    #[test]
    fn test_full_correct_scenario() {
        let config = EngineConfig::default();
        let record = UserRecord::new();

        let step = run(&record, &config, Event::ModeSelected { mode: Mode::Correct });
        assert_eq!(step.record.state, ConversationState::WaitingIntensity);
        assert_eq!(step.record.mode, Some(Mode::Correct));

        let step = run(&step.record, &config, Event::IntensitySelected { value: intensity(7) });
        assert_eq!(step.record.state, ConversationState::WaitingLabel);
        assert_eq!(step.record.last.intensity, Some(intensity(7)));

        let step = run(&step.record, &config, text("злость"));
        assert_eq!(step.record.state, ConversationState::WaitingTopic);

        let step = run(&step.record, &config, text("конфликт на работе"));
        assert_eq!(step.record.state, ConversationState::WaitingChoice);
        assert!(step.replies[0].text.contains("злость"));
        assert!(step.replies[0].text.contains("7/10"));

        let step = run(&step.record, &config, Event::ChoiceMade { choice: Choice::Soften });
        assert_eq!(step.record.state, ConversationState::Idle);
        assert_eq!(step.record.last.choice, Some(Choice::Soften));
        assert_eq!(step.record.history.len(), 1);

        let entry = &step.record.history[0];
        assert_eq!(entry.intensity, Some(intensity(7)));
        assert_eq!(entry.label.as_deref(), Some("злость"));
        assert_eq!(entry.topic.as_deref(), Some("конфликт на работе"));
        assert_eq!(entry.choice, Some(Choice::Soften));
    }
}
