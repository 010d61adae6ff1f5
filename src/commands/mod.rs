//! Interpretation of free-text chat commands.
//!
//! An utterance is matched against the extraction rules in
//! [`registry::extraction_rules`] to find the recipe subject, then against
//! [`registry::classification_rules`] to pick the intent. Both tables are
//! ordered; the first applicable rule wins.

mod registry;

pub use registry::{classification_rules, extraction_rules, ClassificationRule, ExtractionRule};

use tracing::debug;

pub const HELP_KEYWORD: &str = "help";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Help,
    /// "search recipes on X" and "list X recipes".
    Search,
    Ingredients,
    HowToMake,
    /// "X recipe": summary of a single recipe.
    Info,
    /// A subject was extracted but it still contains command words, so no
    /// lookup is attempted.
    Ambiguous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub intent: Intent,
    pub query: Option<RecipeQuery>,
}

/// Split an utterance into word tokens. Apostrophes stay inside words so
/// "what's" is one token.
pub fn words(utterance: &str) -> Vec<&str> {
    utterance
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|word| !word.is_empty())
        .collect()
}

/// Extract the recipe subject using the first matching extraction rule.
pub fn extract_subject(utterance: &str) -> Option<&str> {
    extraction_rules().iter().find_map(|rule| {
        let subject = rule.extract(utterance)?;
        debug!(rule = rule.name, subject, "Extracted recipe subject");
        Some(subject)
    })
}

/// Classify a lowercased utterance. `None` means no rule recognised it.
pub fn interpret(utterance: &str) -> Option<Interpretation> {
    let utterance = utterance.trim();

    if utterance == HELP_KEYWORD {
        return Some(Interpretation {
            intent: Intent::Help,
            query: None,
        });
    }

    let subject = extract_subject(utterance)?;
    let query = RecipeQuery {
        subject: subject.to_string(),
    };

    let subject_words = words(subject);
    if registry::AMBIGUOUS_SUBJECT_WORDS
        .iter()
        .any(|word| subject_words.iter().any(|candidate| candidate.eq_ignore_ascii_case(word)))
    {
        debug!(subject, "Subject contains command words; treating as ambiguous");
        return Some(Interpretation {
            intent: Intent::Ambiguous,
            query: Some(query),
        });
    }

    let utterance_words = words(utterance);
    let intent = classification_rules()
        .iter()
        .find(|rule| rule.applies(utterance, &utterance_words))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Info);

    Some(Interpretation {
        intent,
        query: Some(query),
    })
}
