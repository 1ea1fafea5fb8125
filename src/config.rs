use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::kernel::language::{Language, UnknownLanguage};
use crate::memory::history::DEFAULT_CAPACITY;

pub const CONFIG_ENV: &str = "GOLU_CONFIG";
pub const LANGUAGE_ENV: &str = "GOLU_LANG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Language(#[from] UnknownLanguage),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language at startup.
    pub language: Language,
    pub history_path: PathBuf,
    pub history_capacity: usize,
    pub speech: SpeechConfig,
    /// Overrides the platform URL opener (`xdg-open`, `open`, `explorer`).
    pub opener: Option<String>,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// TTS command; the text is passed as its last argument. Unset means
    /// replies are only printed.
    pub program: Option<String>,
    /// Pass `-v <locale> -s <words per minute> -p <pitch>` (espeak-style) before the text.
    pub voice_args: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub max_summary_chars: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            timeout_ms: 5000,
            max_summary_chars: 400,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            history_path: default_data_dir().join("history.json"),
            history_capacity: DEFAULT_CAPACITY,
            speech: SpeechConfig::default(),
            opener: None,
            lookup: LookupConfig::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("golu")
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("golu").join("config.json"))
}

impl Config {
    /// `$GOLU_CONFIG`, else `<config dir>/golu/config.json`, else defaults.
    /// `$GOLU_LANG` overrides the configured language.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        if let Ok(lang) = std::env::var(LANGUAGE_ENV) {
            config.language = lang.parse()?;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.language, Language::English);
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.lookup.max_summary_chars, 400);
        assert!(config.speech.program.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_json(
            r#"{ "language": "bn", "speech": { "program": "espeak-ng", "voice_args": true }, "lookup": { "timeout_ms": 900 } }"#,
        )
        .unwrap();
        assert_eq!(config.language, Language::Bengali);
        assert_eq!(config.speech.program.as_deref(), Some("espeak-ng"));
        assert!(config.speech.voice_args);
        assert_eq!(config.lookup.timeout_ms, 900);
        assert_eq!(config.lookup.base_url, "https://en.wikipedia.org");
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(Config::from_json(r#"{ "language": "fr" }"#).is_err());
    }
}
