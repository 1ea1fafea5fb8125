use serde::{Deserialize, Serialize};

use crate::kernel::language::Language;

/// An utterance as received plus the lowercased, trimmed copy rules match on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    raw: String,
    normalized: String,
}

impl Utterance {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let normalized = raw.to_lowercase();
        Self { raw, normalized }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// The raw text behind `normalized[start..]`, trimmed. Falls back to the
    /// normalized text when lowercasing moved byte offsets.
    pub fn original_tail(&self, start: usize) -> &str {
        let tail = if self.raw.len() == self.normalized.len() && self.raw.is_char_boundary(start) {
            &self.raw[start..]
        } else {
            &self.normalized[start..]
        };
        tail.trim()
    }
}

/// Which rule produced a response. Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    OpenSite,
    Lookup,
    Search,
    PlayMedia,
    SwitchToBengali,
    SwitchToHindi,
    SwitchToEnglish,
    Arithmetic,
    DateTime,
    Greeting,
    Identity,
    Farewell,
    NamedGreeting,
}

/// Side effect requested by a response, carried as data for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    OpenUrl(String),
    Lookup(String),
    SwitchLanguage(Language),
    StopListening,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub intent: IntentKind,
    /// Never empty.
    pub text: String,
    /// Language `text` is written in.
    pub language: Language,
    pub action: Option<Action>,
}

impl Response {
    pub fn new(intent: IntentKind, text: String, language: Language) -> Self {
        Self {
            intent,
            text,
            language,
            action: None,
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

/// Who a named greeting is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Greetee {
    Person(String),
    Everyone,
}

/// Parameters a rule pulled out of the utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum Slots {
    Empty,
    Site(&'static super::sites::Site),
    Topic(String),
    Query(String),
    Language(Language),
    Math(Result<f64, crate::kernel::arithmetic::MathError>),
    Greetee(Greetee),
}
