use std::sync::LazyLock;

use regex::Regex;

use super::Intent;

/// A pattern that pulls the recipe subject out of an utterance.
pub struct ExtractionRule {
    pub name: &'static str,
    pattern: Regex,
}

impl ExtractionRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("extraction pattern must compile"),
        }
    }

    /// The captured subject, or `None` when the rule does not apply or the
    /// capture is empty.
    pub fn extract<'a>(&self, utterance: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(utterance)
            .and_then(|captures| captures.get(1))
            .map(|capture| capture.as_str())
            .filter(|subject| !subject.trim().is_empty())
    }
}

/// Tried in order; the first rule that extracts a subject wins.
static EXTRACTION_RULES: LazyLock<Vec<ExtractionRule>> = LazyLock::new(|| {
    vec![
        ExtractionRule::new(
            "recipe-suffix",
            r"(?i)^(?:list |)([^\s]+(?:\s[^\s]+)*)\s(?:recipes|recipe)$",
        ),
        ExtractionRule::new(
            "command-prefix",
            r"(?i)^(?:search recipes on |ingredients for |how to make )([^\s]+(?:\s[^\s]+)*)$",
        ),
    ]
});

pub fn extraction_rules() -> &'static [ExtractionRule] {
    &EXTRACTION_RULES
}

/// Decides the intent once a subject has been extracted.
pub struct ClassificationRule {
    pub name: &'static str,
    pub intent: Intent,
    matches: fn(&str, &[&str]) -> bool,
}

impl ClassificationRule {
    pub fn applies(&self, utterance: &str, words: &[&str]) -> bool {
        (self.matches)(utterance, words)
    }
}

fn has_word(words: &[&str], word: &str) -> bool {
    words.iter().any(|candidate| candidate.eq_ignore_ascii_case(word))
}

fn mentions_search(_utterance: &str, words: &[&str]) -> bool {
    has_word(words, "search") || has_word(words, "list")
}

fn starts_with_how_to_make(utterance: &str, _words: &[&str]) -> bool {
    utterance.starts_with("how to make")
}

fn mentions_ingredients(_utterance: &str, words: &[&str]) -> bool {
    has_word(words, "ingredients")
}

fn always(_utterance: &str, _words: &[&str]) -> bool {
    true
}

/// Precedence is table order: search beats how-to-make beats ingredients,
/// and info is the fallback.
const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "search",
        intent: Intent::Search,
        matches: mentions_search,
    },
    ClassificationRule {
        name: "how-to-make",
        intent: Intent::HowToMake,
        matches: starts_with_how_to_make,
    },
    ClassificationRule {
        name: "ingredients",
        intent: Intent::Ingredients,
        matches: mentions_ingredients,
    },
    ClassificationRule {
        name: "info",
        intent: Intent::Info,
        matches: always,
    },
];

pub fn classification_rules() -> &'static [ClassificationRule] {
    CLASSIFICATION_RULES
}

/// Words that make a subject ambiguous when they show up inside it.
pub const AMBIGUOUS_SUBJECT_WORDS: &[&str] = &["recipe", "recipes"];
