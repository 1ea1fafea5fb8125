use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Spelled-out operands and operator words, mapped to their symbolic token.
pub const NUMBER_WORDS: &[(&str, &str)] = &[
    ("plus", "+"),
    ("add", "+"),
    ("and", "+"),
    ("sum", "+"),
    ("minus", "-"),
    ("subtract", "-"),
    ("remove", "-"),
    ("times", "*"),
    ("multiplied by", "*"),
    ("multiply", "*"),
    ("product", "*"),
    ("divided by", "/"),
    ("over", "/"),
    ("divide", "/"),
    ("quotient", "/"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("zero", "0"),
    ("ten", "10"),
    ("twenty", "20"),
    ("thirty", "30"),
    ("forty", "40"),
    ("fifty", "50"),
    ("sixty", "60"),
    ("seventy", "70"),
    ("eighty", "80"),
    ("ninety", "90"),
    ("hundred", "100"),
    ("thousand", "1000"),
];

// Longest keys first so multi-word entries win over their prefixes.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let mut keys: Vec<&str> = NUMBER_WORDS.iter().map(|(word, _)| *word).collect();
    keys.sort_by_key(|word| std::cmp::Reverse(word.len()));
    let alternation = keys
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).expect("lexicon pattern is valid")
});

/// Looks up the token for a single key, ignoring case.
pub fn token_for(word: &str) -> Option<&'static str> {
    let lower = word.to_lowercase();
    NUMBER_WORDS
        .iter()
        .find(|(key, _)| *key == lower)
        .map(|(_, token)| *token)
}

/// Replaces every whole-word occurrence of a lexicon key with its token.
/// Text without any key comes back unchanged.
pub fn resolve_words(text: &str) -> String {
    WORD_PATTERN
        .replace_all(text, |caps: &Captures| {
            let word = &caps[0];
            token_for(word).unwrap_or(word).to_string()
        })
        .into_owned()
}
