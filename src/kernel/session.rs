use super::intent::{self, Action, Response};
use super::language::Language;
use super::localizer::{localize, MessageKey};
use super::time::{Clock, DayPart, SystemClock};

/// Conversation state owned by one caller: the active language and the
/// clock rules read. Nothing else survives between turns.
pub struct Session {
    language: Language,
    clock: Box<dyn Clock>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self::with_clock(language, Box::new(SystemClock))
    }

    pub fn with_clock(language: Language, clock: Box<dyn Clock>) -> Self {
        Self { language, clock }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            tracing::info!("Language switched: {} -> {}", self.language, language);
        }
        self.language = language;
    }

    /// Interprets one utterance. A language switch takes effect before
    /// this returns, so the next call already answers in the new language.
    pub fn interpret(&mut self, utterance: &str) -> Option<Response> {
        let response = intent::interpret(utterance, self.language, self.clock.as_ref())?;
        if let Some(Action::SwitchLanguage(target)) = &response.action {
            self.set_language(*target);
        }
        Some(response)
    }

    /// Time-of-day welcome in the active language.
    pub fn welcome(&self) -> String {
        let key = match DayPart::of(self.clock.now()) {
            DayPart::Morning => MessageKey::WelcomeMorning,
            DayPart::Afternoon => MessageKey::WelcomeAfternoon,
            DayPart::Evening => MessageKey::WelcomeEvening,
            DayPart::Night => MessageKey::WelcomeNight,
        };
        localize(key, self.language, &[])
    }
}
