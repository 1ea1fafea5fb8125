use super::event::OutputId;
use super::intent::{Action, Response};
use super::language::{Language, VoiceProfile};
use super::time::Turn;

pub struct Scheduler;

/// Instructions for the driver. The kernel never performs I/O itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    Log(String),
    Display(String),
    Speak {
        id: OutputId,
        text: String,
        voice: VoiceProfile,
    },
    OpenUrl(String),
    Lookup { topic: String },
    StopListening,
}

impl Scheduler {
    /// Pure projection: Response -> ordered side effects.
    /// Text is displayed and spoken before the response's action runs.
    pub fn schedule(&self, response: &Response, turn: Turn, ordinal: u16) -> Vec<SideEffect> {
        let mut effects = self.say(&response.text, response.language, turn, ordinal);

        match &response.action {
            None => {}
            Some(Action::OpenUrl(url)) => effects.push(SideEffect::OpenUrl(url.clone())),
            Some(Action::Lookup(topic)) => {
                effects.push(SideEffect::Lookup { topic: topic.clone() })
            }
            Some(Action::SwitchLanguage(language)) => {
                effects.push(SideEffect::Log(format!("Output language is now {}", language)))
            }
            Some(Action::StopListening) => effects.push(SideEffect::StopListening),
        }

        effects
    }

    /// Display and speak a plain message.
    pub fn say(&self, text: &str, language: Language, turn: Turn, ordinal: u16) -> Vec<SideEffect> {
        self.say_split(text, text, language, turn, ordinal)
    }

    /// Display one text while speaking another (e.g. a summary without its link).
    pub fn say_split(
        &self,
        shown: &str,
        spoken: &str,
        language: Language,
        turn: Turn,
        ordinal: u16,
    ) -> Vec<SideEffect> {
        vec![
            SideEffect::Display(shown.to_string()),
            SideEffect::Speak {
                id: OutputId::new(turn, ordinal),
                text: strip_emoji(spoken),
                voice: language.voice(),
            },
        ]
    }
}

/// Drops emoticons (U+1F600..=U+1F6FF) that speech engines read aloud.
pub fn strip_emoji(text: &str) -> String {
    text.chars()
        .filter(|c| !('\u{1F600}'..='\u{1F6FF}').contains(c))
        .collect()
}
