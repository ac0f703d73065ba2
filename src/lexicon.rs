//! Backtracking phrase lexicon
//!
//! Six categories of literal trigger phrases indicative of self-correction in
//! reasoning text. Categories exist for maintainability only; detection runs
//! against the flattened union.

use std::collections::{BTreeMap, HashSet};

/// Expressions of realizing an outright mistake
const MISTAKE_PHRASES: &[&str] = &[
    "i made a mistake",
    "let me recalculate",
    "that's not right",
    "i need to correct",
    "let's try again",
    "i think i went wrong",
    "let's try another approach",
    "actually, i should",
    "wait, that's incorrect",
    "let me rethink",
    "on second thought",
    "i need to backtrack",
    "let me restart",
    "i made an error",
];

/// Interjections that precede a correction
const CORRECTION_PHRASES: &[&str] = &[
    "hmm, that's not",
    "hmm, that doesn't",
    "hmm, this doesn't",
    "wait, that's not",
    "wait, that doesn't",
    "wait, this doesn't",
    "actually, that's not",
    "actually, that doesn't",
    "actually, this doesn't",
    "oh, that's not",
    "oh, that doesn't",
    "oh, this doesn't",
];

/// Explicit reconsideration of an earlier step
const RECONSIDERATION_PHRASES: &[&str] = &[
    "let me reconsider",
    "let me think again",
    "on second thought",
    "let's reconsider",
    "let's think again",
    "thinking again",
    "reconsidering",
    "rethinking",
];

/// Admissions of a computational slip
const MISCALCULATION_PHRASES: &[&str] = &[
    "i made a calculation error",
    "i made a computational error",
    "i made an arithmetic error",
    "i miscalculated",
    "i miscounted",
    "i misunderstood",
    "i misinterpreted",
];

/// Expressions of doubt about the current line of reasoning
const DOUBT_PHRASES: &[&str] = &[
    "i'm not sure if",
    "i'm not convinced",
    "i'm skeptical",
    "i'm doubtful",
    "i'm uncertain",
    "i'm not confident",
    "i'm hesitant",
    "i'm not sure about",
    "i'm not certain",
];

/// Announcements of redoing a calculation
const MATH_CORRECTION_PHRASES: &[&str] = &[
    "let me redo this calculation",
    "let me recalculate",
    "i need to redo",
    "i should redo",
    "i'll redo",
    "i must redo",
    "let me solve this again",
    "let me solve this differently",
    "let me approach this differently",
    "let me try a different approach",
];

/// A named set of literal trigger phrases, all lowercase
#[derive(Debug, Clone)]
pub struct PhraseCategory {
    pub name: String,
    pub phrases: Vec<String>,
}

impl PhraseCategory {
    pub fn new(name: impl Into<String>, phrases: &[&str]) -> Self {
        Self {
            name: name.into(),
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Immutable phrase lexicon: categories plus their flattened union.
///
/// The union preserves first-occurrence order and drops phrases that appear
/// in more than one category, so each phrase is scanned at most once.
#[derive(Debug, Clone)]
pub struct Lexicon {
    categories: Vec<PhraseCategory>,
    union: Vec<String>,
}

impl Lexicon {
    /// The built-in six-category lexicon
    pub fn builtin() -> Self {
        Self::from_categories(builtin_categories())
    }

    /// Built-in categories extended with user-supplied ones.
    ///
    /// Extra phrases are lowercased on ingestion; a `BTreeMap` keeps the
    /// category order deterministic.
    pub fn with_extra(extra: &BTreeMap<String, Vec<String>>) -> Self {
        let mut categories = builtin_categories();
        for (name, phrases) in extra {
            categories.push(PhraseCategory {
                name: name.clone(),
                phrases: phrases.iter().map(|p| p.to_lowercase()).collect(),
            });
        }
        Self::from_categories(categories)
    }

    /// Build a lexicon from explicit categories
    pub fn from_categories(categories: Vec<PhraseCategory>) -> Self {
        let mut seen = HashSet::new();
        let mut union = Vec::new();
        for category in &categories {
            for phrase in &category.phrases {
                let phrase = phrase.to_lowercase();
                if seen.insert(phrase.clone()) {
                    union.push(phrase);
                }
            }
        }
        Self { categories, union }
    }

    /// The flattened, deduplicated detection set
    pub fn phrases(&self) -> &[String] {
        &self.union
    }

    pub fn categories(&self) -> &[PhraseCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.union.len()
    }

    pub fn is_empty(&self) -> bool {
        self.union.is_empty()
    }
}

fn builtin_categories() -> Vec<PhraseCategory> {
    vec![
        PhraseCategory::new("mistake", MISTAKE_PHRASES),
        PhraseCategory::new("correction", CORRECTION_PHRASES),
        PhraseCategory::new("reconsideration", RECONSIDERATION_PHRASES),
        PhraseCategory::new("miscalculation", MISCALCULATION_PHRASES),
        PhraseCategory::new("doubt", DOUBT_PHRASES),
        PhraseCategory::new("math_correction", MATH_CORRECTION_PHRASES),
    ]
}
