use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output language of every reply. English is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "bn")]
    Bengali,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Bengali];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Bengali => "bn",
        }
    }

    /// BCP 47 tag handed to the speech backend.
    pub fn locale(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Hindi => "hi-IN",
            Language::Bengali => "bn-IN",
        }
    }

    pub fn voice(&self) -> VoiceProfile {
        let rate = match self {
            Language::English => 1.1,
            Language::Hindi | Language::Bengali => 1.0,
        };
        VoiceProfile {
            locale: self.locale(),
            rate,
            pitch: 1.5,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown language '{0}', expected one of en, hi, bn")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" | "en-us" => Ok(Language::English),
            "hi" | "hindi" | "hi-in" => Ok(Language::Hindi),
            "bn" | "bengali" | "bangla" | "bn-in" => Ok(Language::Bengali),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// Per-language voice settings for speech playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceProfile {
    pub locale: &'static str,
    pub rate: f32,
    pub pitch: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_names() {
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!(" Bengali ".parse::<Language>().unwrap(), Language::Bengali);
        assert_eq!("en-US".parse::<Language>().unwrap(), Language::English);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn english_speaks_faster() {
        assert_eq!(Language::English.voice().rate, 1.1);
        assert_eq!(Language::Hindi.voice().locale, "hi-IN");
        assert_eq!(Language::Bengali.voice().pitch, 1.5);
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&Language::Bengali).unwrap();
        assert_eq!(json, "\"bn\"");
    }
}
