use chrono::{Local, NaiveDateTime, Timelike};

use super::language::Language;

/// Source of local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Monotonic turn counter. One turn per batch of events handled by the reactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Turn {
    pub index: u64,
}

impl Turn {
    pub fn new() -> Self {
        Turn { index: 0 }
    }

    pub fn next(&self) -> Self {
        Turn { index: self.index + 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    pub fn of(at: NaiveDateTime) -> Self {
        match at.hour() {
            5..=11 => DayPart::Morning,
            12..=16 => DayPart::Afternoon,
            17..=20 => DayPart::Evening,
            _ => DayPart::Night,
        }
    }
}

/// Date as written in the language's locale.
pub fn format_date(at: NaiveDateTime, language: Language) -> String {
    let text = match language {
        Language::English => at.format("%-m/%-d/%Y").to_string(),
        Language::Hindi | Language::Bengali => at.format("%-d/%-m/%Y").to_string(),
    };
    localize_digits(&text, language)
}

/// 12-hour time as written in the language's locale.
pub fn format_time(at: NaiveDateTime, language: Language) -> String {
    let text = match language {
        Language::Hindi => at.format("%-I:%M:%S %P").to_string(),
        Language::English | Language::Bengali => at.format("%-I:%M:%S %p").to_string(),
    };
    localize_digits(&text, language)
}

fn localize_digits(text: &str, language: Language) -> String {
    match language {
        Language::Bengali => text
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) if c.is_ascii_digit() => char::from_u32(0x09E6 + d).unwrap_or(c),
                _ => c,
            })
            .collect(),
        Language::English | Language::Hindi => text.to_string(),
    }
}
