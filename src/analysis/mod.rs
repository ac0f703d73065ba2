//! Transcript analysis: backtracking detection, answer extraction,
//! correctness scoring, and aggregate statistics

pub mod analyzer;
pub mod detector;
pub mod extract;
pub mod scoring;

pub use analyzer::{analyze, AnalysisReport, BacktrackingSample, ProblemRef, THINK_CLOSE_TAG};
pub use detector::detect_backtracking;
pub use extract::{extract_boxed_answers, is_token_exhausted};
pub use scoring::{answers_match, normalize_answer};
