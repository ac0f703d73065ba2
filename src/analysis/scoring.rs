//! Correctness scoring of extracted answer candidates

/// Normalize an answer for comparison: lowercase, then remove every
/// whitespace character (not just leading/trailing).
pub fn normalize_answer(answer: &str) -> String {
    answer
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Correctness verdict: true iff at least one normalized generated candidate
/// exactly equals at least one normalized ground-truth candidate. Either
/// sequence empty means false.
pub fn answers_match(generated: &[String], ground_truth: &[String]) -> bool {
    if generated.is_empty() || ground_truth.is_empty() {
        return false;
    }

    let truth_normalized: Vec<String> = ground_truth.iter().map(|a| normalize_answer(a)).collect();

    generated
        .iter()
        .map(|a| normalize_answer(a))
        .any(|gen| truth_normalized.iter().any(|gt| *gt == gen))
}
