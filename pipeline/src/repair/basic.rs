//! Deterministic, model-free repair of `{"words":[...]}` text.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use super::RepairFailure;

/// Canonical structural start marker.
pub const START_MARKER: &str = r#"{"words":["#;
/// What a repair produces when no complete entry survives.
pub const EMPTY_WORD_LIST: &str = r#"{"words":[]}"#;

#[allow(clippy::unwrap_used)]
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json|JSON)?\n?|\n?```").unwrap());

#[allow(clippy::unwrap_used)]
static START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{\s*"words"\s*:\s*\["#).unwrap());

#[allow(clippy::unwrap_used)]
static ENTRY_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:"|\d|true|false|null)\s*\}"#).unwrap());

#[allow(clippy::unwrap_used)]
static TRAILING_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",(\s*[\]}])").unwrap());

/// Coerces possibly decorated or truncated model output towards
/// `{"words":[...]}`.
///
/// Strips code fences. Text that is then already a valid word list is
/// returned as-is. Otherwise discards any prefix before the start marker (or
/// synthesizes the marker), cuts everything after the last complete entry,
/// closes the structure and removes trailing commas. The result may still
/// fail to parse; callers escalate in that case.
#[must_use]
pub fn basic_repair(text: &str) -> String {
    let unfenced = FENCE_RE.replace_all(text.trim(), "");
    let unfenced = unfenced.trim();

    if parse_word_list(unfenced).is_ok() {
        return unfenced.to_string();
    }

    let body = match START_RE.find(unfenced) {
        Some(marker) => &unfenced[marker.end()..],
        // A bare array of entries: drop its opening bracket.
        None => unfenced.strip_prefix('[').unwrap_or(unfenced),
    };

    let Some(last_entry) = ENTRY_END_RE.find_iter(body).last() else {
        return EMPTY_WORD_LIST.to_string();
    };

    let mut fixed = String::with_capacity(START_MARKER.len() + last_entry.end() + 2);
    fixed.push_str(START_MARKER);
    fixed.push_str(&body[..last_entry.end()]);
    fixed.push_str("]}");

    TRAILING_COMMA_RE.replace_all(&fixed, "$1").into_owned()
}

/// True when `text` contains the structural start marker anywhere.
#[must_use]
pub fn has_start_marker(text: &str) -> bool {
    START_RE.is_match(text)
}

/// Parses repaired text and checks it is an object holding a `words` array.
///
/// Returns the raw array elements; per-entry validation happens later.
///
/// # Errors
/// `RepairFailure::Unparseable` for invalid JSON, `RepairFailure::Structure`
/// when the `words` array is missing or has the wrong type.
pub fn parse_word_list(text: &str) -> Result<Vec<Value>, RepairFailure> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| RepairFailure::Unparseable(e.to_string()))?;

    let errors = collect_structure_errors(&value);
    if !errors.is_empty() {
        return Err(RepairFailure::Structure(errors.join("; ")));
    }

    match value {
        Value::Object(mut object) => match object.remove("words") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(RepairFailure::Structure("words array not found".to_string())),
        },
        _ => Err(RepairFailure::Structure("top-level value is not an object".to_string())),
    }
}

fn word_list_schema() -> Value {
    json!({
        "type": "object",
        "required": ["words"],
        "properties": {
            "words": { "type": "array" }
        }
    })
}

/// Structural validation errors, formatted with instance paths.
#[must_use]
pub fn collect_structure_errors(instance: &Value) -> Vec<String> {
    match jsonschema::Validator::new(&word_list_schema()) {
        Ok(validator) => validator
            .iter_errors(instance)
            .map(|error| format!("At path '{}': {}", error.instance_path, error))
            .collect(),
        Err(e) => vec![format!("Schema compilation error: {e}")],
    }
}
