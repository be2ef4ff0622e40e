//! Vocabulary entries, extraction requests, and the code-level validation
//! rules applied to untrusted model output.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated word and its translated meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    /// Headword as it appears on the page.
    pub word: String,
    /// Meaning in the requested target language.
    pub meaning: String,
    /// Part of speech, when the model supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    /// Example sentence, when the model supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Difficulty label, when the model supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl VocabularyEntry {
    /// Creates an entry with only the required fields.
    #[must_use]
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            part_of_speech: None,
            example: None,
            difficulty: None,
        }
    }

    /// Both `word` and `meaning` are non-empty after trimming.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.word.trim().is_empty() && !self.meaning.trim().is_empty()
    }

    /// Reads one element of an untrusted `words` array.
    ///
    /// Returns `None` unless the element is an object whose `word` and
    /// `meaning` are strings that stay non-empty after trimming. Values are
    /// taken as-is; nothing is coerced into a valid state.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let word = object.get("word")?.as_str()?;
        let meaning = object.get("meaning")?.as_str()?;

        let optional = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        let entry = Self {
            word: word.to_string(),
            meaning: meaning.to_string(),
            part_of_speech: optional("partOfSpeech"),
            example: optional("example"),
            difficulty: optional("difficulty"),
        };
        entry.is_well_formed().then_some(entry)
    }
}

/// Converts a repaired `words` array into entries, dropping every element
/// that fails the well-formedness rule.
#[must_use]
pub fn validate_entries(items: &[Value]) -> Vec<VocabularyEntry> {
    items.iter().filter_map(VocabularyEntry::from_value).collect()
}

/// Keeps only well-formed entries. Applying it twice equals applying it once.
#[must_use]
pub fn retain_well_formed(mut entries: Vec<VocabularyEntry>) -> Vec<VocabularyEntry> {
    entries.retain(VocabularyEntry::is_well_formed);
    entries
}

/// Removes entries whose `word` repeats an earlier one, ignoring case.
/// The first occurrence wins and insertion order is preserved.
#[must_use]
pub fn dedupe_entries(entries: Vec<VocabularyEntry>) -> Vec<VocabularyEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.word.to_lowercase()))
        .collect()
}

/// Inputs of one pipeline run. Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    url: String,
    source_language: String,
    target_language: String,
}

impl ExtractionRequest {
    /// `source_language` may be `"auto"` or a language code.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Page to extract from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Source language code or `"auto"`.
    #[must_use]
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Language the meanings are written in.
    #[must_use]
    pub fn target_language(&self) -> &str {
        &self.target_language
    }
}
