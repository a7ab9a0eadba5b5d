//! Property-based tests for the conversation engine.
//!
//! These check invariants across arbitrary records and events.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use crate::*;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = ConversationState> {
    prop_oneof![
        Just(ConversationState::Idle),
        Just(ConversationState::WaitingIntensity),
        Just(ConversationState::WaitingLabel),
        Just(ConversationState::WaitingTopic),
        Just(ConversationState::WaitingChoice),
    ]
}

fn arb_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Support), Just(Mode::Correct), Just(Mode::Clarity)]
}

fn arb_choice() -> impl Strategy<Value = Choice> {
    prop_oneof![Just(Choice::Stay), Just(Choice::Soften)]
}

fn arb_intensity() -> impl Strategy<Value = Intensity> {
    (0u8..=10).prop_map(|n| Intensity::new(n).unwrap())
}

fn arb_record() -> impl Strategy<Value = UserRecord> {
    (
        arb_state(),
        proptest::option::of(arb_mode()),
        proptest::option::of(arb_intensity()),
        proptest::option::of("[а-яa-z ]{0,64}"),
        any::<bool>(),
    )
        .prop_map(|(state, mode, intensity, label, daily_enabled)| {
            let mut record = UserRecord::new();
            record.state = state;
            record.mode = mode;
            record.last.intensity = intensity;
            record.last.label = label;
            record.daily_enabled = daily_enabled;
            record
        })
}

/// Every event of one completed check-in, from mode selection to the
/// closing reply.
fn arb_checkin() -> impl Strategy<Value = Vec<Event>> {
    (arb_mode(), arb_intensity(), "[а-я]{1,10}", "[а-я]{1,20}", arb_choice()).prop_map(
        |(mode, value, label, topic, choice)| {
            let mut events = vec![
                Event::ModeSelected { mode },
                Event::IntensitySelected { value },
                Event::TextReceived { text: label },
                Event::TextReceived { text: topic },
            ];
            if mode == Mode::Correct {
                events.push(Event::ChoiceMade { choice });
            }
            events
        },
    )
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Start),
        Just(Event::MenuRequested),
        Just(Event::CheckinRequested),
        Just(Event::CancelRequested),
        arb_mode().prop_map(|mode| Event::ModeSelected { mode }),
        arb_intensity().prop_map(|value| Event::IntensitySelected { value }),
        "[а-яa-z ]{1,300}".prop_map(|text| Event::TextReceived { text }),
        arb_choice().prop_map(|choice| Event::ChoiceMade { choice }),
        any::<bool>().prop_map(|enabled| Event::DailyToggled { enabled }),
    ]
}

fn step(record: &UserRecord, event: Event) -> Transition {
    let config = EngineConfig::default();
    transition(record, &TransitionContext::new(&config, fixed_now()), event)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn mode_selection_from_idle_enters_intensity(mode in arb_mode(), record in arb_record()) {
        let mut record = record;
        record.state = ConversationState::Idle;
        let result = step(&record, Event::ModeSelected { mode });
        prop_assert_eq!(result.record.state, ConversationState::WaitingIntensity);
        prop_assert_eq!(result.record.mode, Some(mode));
        prop_assert_eq!(&result.record.history, &record.history);
    }

    #[test]
    fn intensity_is_captured_while_waiting(value in arb_intensity(), mode in arb_mode()) {
        let mut record = UserRecord::new();
        record.state = ConversationState::WaitingIntensity;
        record.mode = Some(mode);
        let result = step(&record, Event::IntensitySelected { value });
        prop_assert_eq!(result.record.state, ConversationState::WaitingLabel);
        prop_assert_eq!(result.record.last.intensity, Some(value));
    }

    #[test]
    fn intensity_outside_waiting_state_is_rejected(record in arb_record(), value in arb_intensity()) {
        prop_assume!(record.state != ConversationState::WaitingIntensity);
        let result = step(&record, Event::IntensitySelected { value });
        prop_assert_eq!(result.record.state, record.state);
        prop_assert_eq!(result.record.mode, record.mode);
        prop_assert_eq!(&result.record.last, &record.last);
        prop_assert_eq!(result.replies.len(), 1);
    }

    #[test]
    fn every_event_gets_a_reply(record in arb_record(), event in arb_event()) {
        let result = step(&record, event);
        prop_assert!(!result.replies.is_empty());
    }

    #[test]
    fn stored_text_respects_limits(record in arb_record(), event in arb_event()) {
        let result = step(&record, event);
        if let Some(label) = &result.record.last.label {
            prop_assert!(label.chars().count() <= MAX_LABEL_CHARS);
        }
        if let Some(topic) = &result.record.last.topic {
            prop_assert!(topic.chars().count() <= MAX_TOPIC_CHARS);
        }
    }

    #[test]
    fn history_never_exceeds_cap(
        flows in proptest::collection::vec(arb_checkin(), MAX_HISTORY - 5..MAX_HISTORY + 20)
    ) {
        let count = flows.len();
        let mut record = UserRecord::new();
        for flow in flows {
            for event in flow {
                record = step(&record, event).record;
            }
            prop_assert_eq!(record.state, ConversationState::Idle);
            prop_assert!(record.history.len() <= MAX_HISTORY);
        }
        prop_assert_eq!(record.history.len(), count.min(MAX_HISTORY));
    }

    #[test]
    fn label_at_limit_is_preserved(label in "[а-я]{64}") {
        let mut record = UserRecord::new();
        record.state = ConversationState::WaitingLabel;
        let result = step(&record, Event::TextReceived { text: label.clone() });
        prop_assert_eq!(result.record.last.label, Some(label));
    }

    #[test]
    fn long_label_is_truncated(label in "[а-я]{65,200}") {
        let mut record = UserRecord::new();
        record.state = ConversationState::WaitingLabel;
        let result = step(&record, Event::TextReceived { text: label.clone() });
        let stored = result.record.last.label.unwrap();
        prop_assert_eq!(stored.chars().count(), MAX_LABEL_CHARS);
        prop_assert!(label.starts_with(&stored));
    }
}

#[test]
fn full_history_evicts_oldest_on_next_checkin() {
    let mut record = UserRecord::new();
    for _ in 0..MAX_HISTORY {
        record.push_history(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), None);
    }

    record.state = ConversationState::WaitingTopic;
    record.mode = Some(Mode::Support);
    let result = step(&record, Event::TextReceived { text: "день".to_string() });

    assert_eq!(result.record.history.len(), MAX_HISTORY);
    assert_eq!(result.record.history.back().unwrap().at, fixed_now());
}
