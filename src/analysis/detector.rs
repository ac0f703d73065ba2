//! Phrase-based backtracking detection

use crate::lexicon::Lexicon;

/// Find every lexicon phrase occurring in the text.
///
/// Case-insensitive literal substring scan, in lexicon order, at most one
/// entry per phrase regardless of occurrence count. No tokenizing and no word
/// boundaries: a phrase matching inside a larger word still counts. Existing
/// detection counts depend on this substring semantics.
pub fn detect_backtracking<'l>(lexicon: &'l Lexicon, text: &str) -> Vec<&'l str> {
    if text.is_empty() {
        return Vec::new();
    }

    let haystack = text.to_lowercase();
    lexicon
        .phrases()
        .iter()
        .filter(|phrase| haystack.contains(phrase.as_str()))
        .map(|phrase| phrase.as_str())
        .collect()
}
