//! The ordered intent table.
//!
//! Triggers overlap ("google" is both a site and a search word, "what is"
//! opens both lookups and arithmetic), so the position of a rule in
//! [`RULES`] decides which one answers. The first rule whose predicate
//! holds and whose extractor yields slots wins.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use super::sites::{self, MEDIA_SEARCH_URL, WEB_SEARCH_URL};
use super::types::{Action, Greetee, IntentKind, Response, Slots, Utterance};
use crate::kernel::arithmetic::{self, format_number};
use crate::kernel::language::Language;
use crate::kernel::lexicon::resolve_words;
use crate::kernel::localizer::{localize, MessageKey};
use crate::kernel::time::{format_date, format_time, Clock};

/// What a responder may read besides its slots.
pub struct RuleContext<'a> {
    pub language: Language,
    pub clock: &'a dyn Clock,
}

pub struct IntentRule {
    pub kind: IntentKind,
    /// Cheap trigger test on the normalized utterance.
    pub matches: fn(&str) -> bool,
    /// `None` lets the utterance fall through to the next rule.
    pub extract: fn(&Utterance) -> Option<Slots>,
    pub respond: fn(Slots, &RuleContext<'_>) -> Option<Response>,
}

pub static RULES: &[IntentRule] = &[
    IntentRule {
        kind: IntentKind::OpenSite,
        matches: opens_site,
        extract: extract_site,
        respond: respond_open_site,
    },
    IntentRule {
        kind: IntentKind::Lookup,
        matches: asks_about,
        extract: extract_topic,
        respond: respond_lookup,
    },
    IntentRule {
        kind: IntentKind::Search,
        matches: mentions_search,
        extract: extract_search_query,
        respond: respond_search,
    },
    IntentRule {
        kind: IntentKind::PlayMedia,
        matches: mentions_play,
        extract: extract_media_query,
        respond: respond_play,
    },
    IntentRule {
        kind: IntentKind::SwitchToBengali,
        matches: asks_for_bengali,
        extract: target_bengali,
        respond: respond_switch,
    },
    IntentRule {
        kind: IntentKind::SwitchToHindi,
        matches: asks_for_hindi,
        extract: target_hindi,
        respond: respond_switch,
    },
    IntentRule {
        kind: IntentKind::SwitchToEnglish,
        matches: asks_for_english,
        extract: target_english,
        respond: respond_switch,
    },
    IntentRule {
        kind: IntentKind::Arithmetic,
        matches: looks_like_math,
        extract: extract_math,
        respond: respond_math,
    },
    IntentRule {
        kind: IntentKind::DateTime,
        matches: asks_time,
        extract: no_slots,
        respond: respond_datetime,
    },
    IntentRule {
        kind: IntentKind::Greeting,
        matches: greets,
        extract: no_slots,
        respond: respond_greeting,
    },
    IntentRule {
        kind: IntentKind::Identity,
        matches: asks_identity,
        extract: no_slots,
        respond: respond_identity,
    },
    IntentRule {
        kind: IntentKind::Farewell,
        matches: says_goodbye,
        extract: no_slots,
        respond: respond_farewell,
    },
    IntentRule {
        kind: IntentKind::NamedGreeting,
        matches: asks_to_greet,
        extract: extract_greetee,
        respond: respond_named_greeting,
    },
];

const LOOKUP_PREFIXES: [&str; 3] = ["who is", "what is", "tell me about"];
const SEARCH_NOISE: [&str; 3] = ["search", "in google", "google"];
const MEDIA_NOISE: [&str; 4] = ["play", "song", "music", "video"];

const BENGALI_TRIGGERS: [&str; 3] = ["speak in bengali", "speak bengali", "বাংলা"];
const HINDI_TRIGGERS: [&str; 3] = ["speak in hindi", "speak hindi", "हिंदी"];
const ENGLISH_TRIGGERS: [&str; 2] = ["speak in english", "speak english"];

const TIME_WORDS: [&str; 3] = ["time", "date", "today"];
const GREETING_WORDS: [&str; 3] = ["hello", "hi", "hey"];
const IDENTITY_PHRASES: [&str; 4] = ["who are you", "your name", "introduce yourself", "about you"];
const FAREWELL_WORDS: [&str; 3] = ["good night", "bye", "goodbye"];

const GREET_PHRASE: &str = "say hello to";
// "mrs" before "mr" so the longer title is seen first.
const HONORIFICS: [(&str, &str); 4] = [
    ("my friend", ""),
    ("mrs", "Mrs. "),
    ("mr", "Mr. "),
    ("ms", "Ms. "),
];
const GROUP_PHRASES: [&str; 2] = ["all my friends", "everyone"];

static MATH_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([0-9]+|[A-Za-z0-9_]+)\s?(plus|minus|times|multiplied by|divided by|over)\s?([0-9]+|[A-Za-z0-9_]+)",
    )
    .expect("math shape pattern is valid")
});

fn contains_any(message: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| message.contains(phrase))
}

/// Removes the first occurrence of each phrase in turn.
fn strip_phrases(message: &str, phrases: &[&str]) -> String {
    phrases
        .iter()
        .fold(message.to_string(), |text, phrase| text.replacen(phrase, "", 1))
        .trim()
        .to_string()
}

fn no_slots(_: &Utterance) -> Option<Slots> {
    Some(Slots::Empty)
}

// 1. Open a known site

fn opens_site(message: &str) -> bool {
    sites::find_opened(message).is_some()
}

fn extract_site(utterance: &Utterance) -> Option<Slots> {
    sites::find_opened(utterance.normalized()).map(Slots::Site)
}

fn respond_open_site(slots: Slots, ctx: &RuleContext<'_>) -> Option<Response> {
    let Slots::Site(site) = slots else { return None };
    let text = localize(MessageKey::Opening, ctx.language, &[site.display_name]);
    Some(
        Response::new(IntentKind::OpenSite, text, ctx.language)
            .with_action(Action::OpenUrl(site.url.to_string())),
    )
}

// 2. Encyclopedia lookup

fn asks_about(message: &str) -> bool {
    LOOKUP_PREFIXES.iter().any(|prefix| message.starts_with(prefix))
}

fn extract_topic(utterance: &Utterance) -> Option<Slots> {
    let message = utterance.normalized();
    let topic = strip_phrases(message, &LOOKUP_PREFIXES);
    if topic.is_empty() {
        return None;
    }
    // "what is 5 plus 7" is a sum, not a subject.
    if looks_like_math(message) && arithmetic::is_arithmetic(&resolve_words(&topic)) {
        return None;
    }
    Some(Slots::Topic(topic))
}

fn respond_lookup(slots: Slots, ctx: &RuleContext<'_>) -> Option<Response> {
    let Slots::Topic(topic) = slots else { return None };
    let text = localize(MessageKey::LookingUp, ctx.language, &[topic.as_str()]);
    Some(Response::new(IntentKind::Lookup, text, ctx.language).with_action(Action::Lookup(topic)))
}

// 3. Web search

fn mentions_search(message: &str) -> bool {
    message.contains("search") || message.contains("google")
}

fn extract_search_query(utterance: &Utterance) -> Option<Slots> {
    let query = strip_phrases(utterance.normalized(), &SEARCH_NOISE);
    (!query.is_empty()).then_some(Slots::Query(query))
}

fn respond_search(slots: Slots, ctx: &RuleContext<'_>) -> Option<Response> {
    let Slots::Query(query) = slots else { return None };
    let url = Url::parse_with_params(WEB_SEARCH_URL, &[("q", query.as_str())]).ok()?;
    let text = localize(MessageKey::Searching, ctx.language, &[query.as_str()]);
    Some(
        Response::new(IntentKind::Search, text, ctx.language)
            .with_action(Action::OpenUrl(url.to_string())),
    )
}

// 4. Media playback

fn mentions_play(message: &str) -> bool {
    message.contains("play")
}

fn extract_media_query(utterance: &Utterance) -> Option<Slots> {
    let query = strip_phrases(utterance.normalized(), &MEDIA_NOISE);
    (!query.is_empty()).then_some(Slots::Query(query))
}

fn respond_play(slots: Slots, ctx: &RuleContext<'_>) -> Option<Response> {
    let Slots::Query(query) = slots else { return None };
    let url = Url::parse_with_params(MEDIA_SEARCH_URL, &[("search_query", query.as_str())]).ok()?;
    let text = localize(MessageKey::Playing, ctx.language, &[query.as_str()]);
    Some(
        Response::new(IntentKind::PlayMedia, text, ctx.language)
            .with_action(Action::OpenUrl(url.to_string())),
    )
}

// 5. Language switches

fn asks_for_bengali(message: &str) -> bool {
    contains_any(message, &BENGALI_TRIGGERS)
}

fn asks_for_hindi(message: &str) -> bool {
    contains_any(message, &HINDI_TRIGGERS)
}

fn asks_for_english(message: &str) -> bool {
    contains_any(message, &ENGLISH_TRIGGERS)
}

fn target_bengali(_: &Utterance) -> Option<Slots> {
    Some(Slots::Language(Language::Bengali))
}

fn target_hindi(_: &Utterance) -> Option<Slots> {
    Some(Slots::Language(Language::Hindi))
}

fn target_english(_: &Utterance) -> Option<Slots> {
    Some(Slots::Language(Language::English))
}

fn respond_switch(slots: Slots, _ctx: &RuleContext<'_>) -> Option<Response> {
    let Slots::Language(target) = slots else { return None };
    let kind = match target {
        Language::Bengali => IntentKind::SwitchToBengali,
        Language::Hindi => IntentKind::SwitchToHindi,
        Language::English => IntentKind::SwitchToEnglish,
    };
    // Confirmed in the language just selected.
    let text = localize(MessageKey::LanguageChanged, target, &[]);
    Some(Response::new(kind, text, target).with_action(Action::SwitchLanguage(target)))
}

// 6. Arithmetic

pub fn looks_like_math(message: &str) -> bool {
    MATH_SHAPE.is_match(message)
}

fn extract_math(utterance: &Utterance) -> Option<Slots> {
    Some(Slots::Math(arithmetic::solve(utterance.normalized())))
}

fn respond_math(slots: Slots, ctx: &RuleContext<'_>) -> Option<Response> {
    let Slots::Math(result) = slots else { return None };
    let text = match result {
        Ok(value) => {
            let answer = format_number(value);
            localize(MessageKey::MathAnswer, ctx.language, &[answer.as_str()])
        }
        Err(e) => {
            tracing::debug!("Arithmetic unsolvable: {}", e);
            localize(MessageKey::MathTricky, ctx.language, &[])
        }
    };
    Some(Response::new(IntentKind::Arithmetic, text, ctx.language))
}

// 7. Date and time

fn asks_time(message: &str) -> bool {
    contains_any(message, &TIME_WORDS)
}

fn respond_datetime(_: Slots, ctx: &RuleContext<'_>) -> Option<Response> {
    let now = ctx.clock.now();
    let date = format_date(now, ctx.language);
    let time = format_time(now, ctx.language);
    let text = localize(MessageKey::DateTime, ctx.language, &[date.as_str(), time.as_str()]);
    Some(Response::new(IntentKind::DateTime, text, ctx.language))
}

// 8-10. Static small talk

// "say hello to ..." belongs to the named greeting further down.
fn greets(message: &str) -> bool {
    contains_any(message, &GREETING_WORDS) && !message.contains(GREET_PHRASE)
}

fn respond_greeting(_: Slots, ctx: &RuleContext<'_>) -> Option<Response> {
    let text = localize(MessageKey::Greeting, ctx.language, &[]);
    Some(Response::new(IntentKind::Greeting, text, ctx.language))
}

fn asks_identity(message: &str) -> bool {
    contains_any(message, &IDENTITY_PHRASES)
}

fn respond_identity(_: Slots, ctx: &RuleContext<'_>) -> Option<Response> {
    let text = localize(MessageKey::Identity, ctx.language, &[]);
    Some(Response::new(IntentKind::Identity, text, ctx.language))
}

fn says_goodbye(message: &str) -> bool {
    contains_any(message, &FAREWELL_WORDS)
}

fn respond_farewell(_: Slots, ctx: &RuleContext<'_>) -> Option<Response> {
    let text = localize(MessageKey::Farewell, ctx.language, &[]);
    Some(
        Response::new(IntentKind::Farewell, text, ctx.language)
            .with_action(Action::StopListening),
    )
}

// 11. Greeting someone by name

fn asks_to_greet(message: &str) -> bool {
    message.contains(GREET_PHRASE)
}

/// Length of a leading honorific (with its optional period) and the
/// prefix it contributes to the name.
fn leading_honorific(rest: &str) -> (usize, &'static str) {
    let trimmed = rest.trim_start();
    let skipped = rest.len() - trimmed.len();

    for (word, prefix) in HONORIFICS {
        let Some(after) = trimmed.strip_prefix(word) else { continue };
        match after.chars().next() {
            None => return (skipped + word.len(), prefix),
            Some('.') => return (skipped + word.len() + 1, prefix),
            Some(c) if c.is_whitespace() => return (skipped + word.len(), prefix),
            Some(_) => {}
        }
    }
    (0, "")
}

fn extract_greetee(utterance: &Utterance) -> Option<Slots> {
    let message = utterance.normalized();
    let start = message.find(GREET_PHRASE)? + GREET_PHRASE.len();
    let (consumed, prefix) = leading_honorific(&message[start..]);
    let name = utterance.original_tail(start + consumed);

    if !name.is_empty() {
        return Some(Slots::Greetee(Greetee::Person(format!("{}{}", prefix, name))));
    }
    // Group greeting only when nothing follows the phrase.
    if contains_any(message, &GROUP_PHRASES) {
        return Some(Slots::Greetee(Greetee::Everyone));
    }
    None
}

fn respond_named_greeting(slots: Slots, ctx: &RuleContext<'_>) -> Option<Response> {
    let Slots::Greetee(greetee) = slots else { return None };
    let text = match greetee {
        Greetee::Person(name) => {
            localize(MessageKey::NamedGreeting, ctx.language, &[name.as_str()])
        }
        Greetee::Everyone => localize(MessageKey::GroupGreeting, ctx.language, &[]),
    };
    Some(Response::new(IntentKind::NamedGreeting, text, ctx.language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_intent_order() {
        let kinds: Vec<IntentKind> = RULES.iter().map(|rule| rule.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IntentKind::OpenSite,
                IntentKind::Lookup,
                IntentKind::Search,
                IntentKind::PlayMedia,
                IntentKind::SwitchToBengali,
                IntentKind::SwitchToHindi,
                IntentKind::SwitchToEnglish,
                IntentKind::Arithmetic,
                IntentKind::DateTime,
                IntentKind::Greeting,
                IntentKind::Identity,
                IntentKind::Farewell,
                IntentKind::NamedGreeting,
            ]
        );
    }

    #[test]
    fn phrase_removal_is_cumulative() {
        assert_eq!(strip_phrases("what is who is tell me about rust", &LOOKUP_PREFIXES), "rust");
        assert_eq!(strip_phrases("search cats in google", &SEARCH_NOISE), "cats");
    }

    #[test]
    fn honorifics_need_a_word_boundary() {
        assert_eq!(leading_honorific(" mr smith"), (3, "Mr. "));
        assert_eq!(leading_honorific(" mrs. smith"), (5, "Mrs. "));
        assert_eq!(leading_honorific(" mrinal"), (0, ""));
        assert_eq!(leading_honorific(" my friend raj"), (10, ""));
    }

    #[test]
    fn group_phrase_after_greet_phrase_is_a_name() {
        let named = extract_greetee(&Utterance::new("say hello to all my friends"));
        assert_eq!(named, Some(Slots::Greetee(Greetee::Person("all my friends".to_string()))));

        let group = extract_greetee(&Utterance::new("everyone, say hello to"));
        assert_eq!(group, Some(Slots::Greetee(Greetee::Everyone)));
    }

    #[test]
    fn math_shape_is_loose() {
        assert!(looks_like_math("5 plus 7"));
        assert!(looks_like_math("ten divided by zero"));
        assert!(looks_like_math("game over there"));
        assert!(!looks_like_math("open the door"));
    }
}
