//! Boxed-answer extraction

use std::sync::OnceLock;

use regex::Regex;

/// Matches `\boxed{...}` up to the first closing brace. Nested braces inside
/// an answer truncate the capture; historical accuracy figures depend on this,
/// so the pattern stays non-nested.
const BOXED_PATTERN: &str = r"\\boxed\{([^}]*)\}";

fn boxed_regex() -> &'static Regex {
    static BOXED: OnceLock<Regex> = OnceLock::new();
    BOXED.get_or_init(|| Regex::new(BOXED_PATTERN).unwrap())
}

/// Extract every `\boxed{...}` occurrence as a trimmed candidate string,
/// in source order. Returns an empty vec when no marker is present.
pub fn extract_boxed_answers(text: &str) -> Vec<String> {
    boxed_regex()
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// Token-exhaustion heuristic: exactly one candidate and it is empty, read as
/// a generation that emitted an opening marker and was cut off before any
/// content.
pub fn is_token_exhausted(answers: &[String]) -> bool {
    answers.len() == 1 && answers[0].is_empty()
}
