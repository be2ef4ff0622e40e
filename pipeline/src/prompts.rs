//! Prompt builders for the sample, full and repair calls.

use std::fmt::Write;

use vocab_harvest_markup::MarkupHint;

use crate::profile::LanguageProfile;
use crate::repair::RepairAttempt;

/// Inclusion and exclusion rules shared by the sample and full passes.
pub const TAUGHT_VOCABULARY_RULES: [&str; 4] = [
    "Include a word only if the page presents it as taught vocabulary: a lesson, flashcard, glossary, word list, or an annotated term shown with its meaning",
    "Do not extract words that merely occur in ordinary prose",
    "Exclude navigation labels, menus, buttons, advertisements, and other UI text",
    "Exclude basic function words such as articles, conjunctions, prepositions, and pronouns",
];

fn format_example(profile: &LanguageProfile) -> String {
    format!(
        r#"{{"words":[{{"word":"agree","meaning":"meaning in {}"}}]}}"#,
        profile.target_name
    )
}

fn push_numbered<'a>(
    prompt: &mut String,
    start: usize,
    rules: impl IntoIterator<Item = &'a str>,
) -> usize {
    let mut number = start;
    for rule in rules {
        let _ = writeln!(prompt, "{number}. {rule}");
        number += 1;
    }
    number
}

/// Small sample prompt, optionally steered towards markup regions.
#[must_use]
pub fn sample_prompt(
    url: &str,
    profile: &LanguageProfile,
    limit: usize,
    hints: &[MarkupHint],
) -> String {
    let mut prompt = format!("{}\nURL: {url}\n\n", profile.extraction_prompt);
    let _ = writeln!(prompt, "{}", profile.extraction_note);
    let _ = writeln!(prompt, "{}\n", format_example(profile));

    prompt.push_str("Extraction rules:\n");
    let sample_limit = format!("Extract only the first {limit} entries as a sample");
    let next = push_numbered(
        &mut prompt,
        1,
        [
            "Extract vocabulary word and meaning pairs from tables, lists, or content on the site",
            sample_limit.as_str(),
            "Focus ONLY on words that are directly relevant to the main topic of the site",
            "Prioritize specialized terminology, key concepts, and characteristic expressions",
        ],
    );
    let next = push_numbered(&mut prompt, next, TAUGHT_VOCABULARY_RULES);
    let mut closing = vec![
        "Each entry must contain both \"word\" and \"meaning\"",
        "Return pure JSON only (no markdown or explanations)",
        "Exclude incomplete entries",
        "Extract only words that actually exist on the site (don't create imaginary words)",
    ];
    if profile.auto_detect {
        closing.push(
            "The source language is auto-detect: identify the language and extract accordingly",
        );
    }
    push_numbered(&mut prompt, next, closing);

    if !hints.is_empty() {
        prompt.push_str(
            "\nFocus extraction on content within these regions of the page (CSS selectors):\n",
        );
        for hint in hints {
            let _ = writeln!(prompt, "- {}", hint.selector);
        }
    }

    prompt
}

/// Large-budget prompt asking for the complete vocabulary set.
#[must_use]
pub fn full_prompt(url: &str, profile: &LanguageProfile) -> String {
    let mut prompt = format!(
        "{} Extract ALL vocabulary words and their meanings from the following URL and return in pure JSON format.\nURL: {url}\n\n",
        profile.extraction_prompt
    );
    let _ = writeln!(prompt, "{}", profile.extraction_note);
    let _ = writeln!(prompt, "{}\n", format_example(profile));

    prompt.push_str("Extraction rules:\n");
    let next = push_numbered(&mut prompt, 1, profile.extraction_rules.iter().copied());
    push_numbered(&mut prompt, next, TAUGHT_VOCABULARY_RULES);

    prompt.push_str("\nTechnical instructions:\n");
    for instruction in profile.technical_instructions {
        let _ = writeln!(prompt, "- {instruction}");
    }

    prompt
}

/// Truncates to `max_chars` characters, marking the cut with `...`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Repair prompt for one attempt.
///
/// From the second attempt on, the previous rejection is fed back with the
/// attempt counter so the model can correct course.
#[must_use]
pub fn repair_prompt(
    profile: &LanguageProfile,
    candidate: &str,
    attempt: usize,
    max_attempts: usize,
    previous: Option<&RepairAttempt>,
) -> String {
    let mut prompt = format!("{}\n\n{}\n\n", profile.repair_prompt, profile.repair_note);
    prompt.push_str(r#"{"words":[{"word":"example","meaning":"meaning in target language"}]}"#);
    prompt.push_str("\n\nRepair rules:\n");
    push_numbered(&mut prompt, 1, profile.repair_rules.iter().copied());

    if let Some(previous) = previous {
        let _ = write!(
            prompt,
            "\nAttempt {attempt}/{max_attempts}: the previous repair was rejected.\n"
        );
        if let crate::repair::RepairOutcome::Failure { reason } = &previous.outcome {
            let _ = writeln!(prompt, "Reason: {reason}");
        }
        if !previous.response_text.is_empty() {
            let _ = writeln!(
                prompt,
                "Previous response (first 500 chars):\n{}",
                truncate_chars(&previous.response_text, 500)
            );
        }
    }

    let _ = write!(prompt, "\n{}\n{candidate}", profile.incomplete_label);
    prompt
}
