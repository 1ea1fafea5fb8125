use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::config::LookupConfig;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("no summary available for '{0}'")]
    NotFound(String),
    #[error("lookup transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Transport(e.to_string())
    }
}

/// A short encyclopedia summary and where to read the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupSummary {
    pub summary: String,
    pub link: String,
}

#[derive(Deserialize)]
struct PageSummary {
    extract: Option<String>,
}

#[derive(Clone)]
pub struct LookupService {
    client: Client,
    base_url: String,
    max_summary_chars: usize,
}

impl LookupService {
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_summary_chars: config.max_summary_chars,
        }
    }

    /// Page URL with `topic` as a single encoded path segment.
    fn page_url(&self, path: &[&str], topic: &str) -> Result<Url, LookupError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| LookupError::Transport(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| {
                LookupError::Transport(format!("cannot-be-a-base url: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(path)
            .push(topic);
        Ok(url)
    }

    pub fn article_link(&self, topic: &str) -> Result<String, LookupError> {
        Ok(self.page_url(&["wiki"], topic)?.to_string())
    }

    /// Fetches the summary for `topic`. One attempt, no retries.
    pub async fn summarize(&self, topic: &str) -> Result<LookupSummary, LookupError> {
        let url = self.page_url(&["api", "rest_v1", "page", "summary"], topic)?;
        tracing::debug!("Fetching summary: {}", url);

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(topic.to_string()));
        }
        if !response.status().is_success() {
            return Err(LookupError::Transport(format!("server returned {}", response.status())));
        }

        let page: PageSummary = response.json().await?;
        let extract = page
            .extract
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| LookupError::NotFound(topic.to_string()))?;

        Ok(LookupSummary {
            summary: truncate_summary(&extract, self.max_summary_chars),
            link: self.article_link(topic)?,
        })
    }
}

/// Cuts `text` to `max_chars` characters, marking the cut with "...".
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> LookupService {
        LookupService::new(&LookupConfig::default())
    }

    #[test]
    fn short_summaries_are_untouched() {
        assert_eq!(truncate_summary("Rust is a language.", 400), "Rust is a language.");
    }

    #[test]
    fn long_summaries_are_cut_on_char_boundaries() {
        let text = "অ".repeat(401);
        let cut = truncate_summary(&text, 400);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 403);
    }

    #[test]
    fn topics_are_path_encoded() {
        let link = service().article_link("albert einstein").unwrap();
        assert_eq!(link, "https://en.wikipedia.org/wiki/albert%20einstein");

        let url = service()
            .page_url(&["api", "rest_v1", "page", "summary"], "c/c++")
            .unwrap();
        assert_eq!(url.as_str(), "https://en.wikipedia.org/api/rest_v1/page/summary/c%2Fc++");
    }
}
