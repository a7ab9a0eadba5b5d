//! User-facing text templates.

use crate::record::{truncate_chars, Intensity, Mode, MAX_LABEL_CHARS};

pub const GREETING: &str =
    "Я твой корректор настроения.\n\nКоманда: /checkin\nИли выбирай режим кнопками ниже.";

pub const MENU: &str = "Меню:";

pub const CHECKIN_PROMPT: &str =
    "Чек-ин. Сначала пауза.\n\nСделай один спокойный вдох.\nКогда будешь готова — выбери режим:";

pub const DAILY_PROMPT: &str =
    "Ежедневный чек-ин.\n\nСделай один спокойный вдох.\nКогда будешь готова — выбери режим:";

pub const ASK_LABEL: &str = "Одним-двумя словами: как это называется сейчас?\nПримеры: тревога, усталость, злость, пустота, нежность.";

pub const ASK_TOPIC: &str = "Что произошло или что давит? Одной фразой.";

pub const RESTART_GUIDANCE: &str = "Ок. Начни с /checkin";

pub const CANCELLED: &str = "Ок, отменили. Если надо — /checkin";

pub const GENTLE_ACK: &str =
    "Слышу тебя. Можно просто побыть с этим — или сделать короткий чек-ин:";

pub const BODY_ANCHOR: &str = "Сейчас сделай так:\n1) Ноги в пол.\n2) Плечи вниз.\n3) Длинный выдох.";

pub const CLARITY_QUESTION: &str =
    "Один вопрос на ясность:\nЧто мне важно защитить или сохранить прямо сейчас?";

pub const CHOICE_PROMPT: &str = "Хочешь остаться с этим или сделать на 5% мягче?";

pub const STAY_GUIDANCE: &str = "Хорошо. Тогда без “чинить”.\n\nСделай 3 дыхания: вдох — короче, выдох — длиннее.\nИ скажи себе: «Я могу это выдержать без спешки».";

pub const SOFTEN_GUIDANCE: &str = "Ок, делаем 5% мягче.\n\nМикро-действие на 60 секунд:\n1) Назови 3 предмета вокруг.\n2) Почувствуй опору под стопами.\n3) Один длинный выдох.";

pub const DAILY_ON: &str = "Ежедневные напоминания включены. Выключить — /daily_off";

pub const DAILY_OFF: &str = "Ежедневные напоминания выключены. Включить — /daily_on";

pub const DAILY_UNAVAILABLE: &str = "Ежедневные напоминания сейчас недоступны.";

/// Placeholder used when the label is empty.
pub const LABEL_PLACEHOLDER: &str = "что-то";

/// Prompt shown right after a mode is chosen.
pub fn intensity_prompt(mode: Mode) -> String {
    let header = match mode {
        Mode::Support => "🟢 Поддержка.",
        Mode::Correct => "🟡 Коррекция.",
        Mode::Clarity => "🔵 Ясность.",
    };
    format!("{header}\nОцени интенсивность состояния от 0 до 10:")
}

/// Reflect the feeling back without trying to fix it.
pub fn reflection(label: &str, intensity: Intensity) -> String {
    let label = if label.trim().is_empty() {
        LABEL_PLACEHOLDER.to_string()
    } else {
        truncate_chars(label, MAX_LABEL_CHARS)
    };
    let n = intensity.value();

    if n >= 8 {
        format!("Сейчас это очень интенсивно: «{label}» примерно на {n}/10.")
    } else if n >= 5 {
        format!("Похоже на «{label}» примерно на {n}/10.")
    } else {
        format!("Сейчас скорее тихое «{label}» на {n}/10.")
    }
}

pub fn closing_line(mode: Mode) -> &'static str {
    match mode {
        Mode::Support => "На сейчас достаточно. Ты не обязана быть сильной.",
        Mode::Correct => "Микросдвиг сделан. Дальше можно жить шагом.",
        Mode::Clarity => "Ясность на 1% — уже ясность. Хорошо.",
    }
}
