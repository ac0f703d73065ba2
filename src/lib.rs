//! CoT Backtracking Analysis & Dataset Curation
//!
//! Analyzes chain-of-thought reasoning transcripts produced by a language
//! model solving math problems:
//!
//! - scores correctness against ground truth via boxed-answer extraction,
//! - detects self-correction ("backtracking") language by literal phrase
//!   matching against a fixed lexicon,
//! - aggregates accuracy statistics by problem level and type,
//! - curates a deterministic balanced dataset contrasting backtracking and
//!   non-backtracking solutions.
//!
//! # Example
//!
//! ```no_run
//! use cot_analysis::{
//!     analysis::analyze,
//!     lexicon::Lexicon,
//!     records::load_records_from_file,
//!     reporting::print_console_report,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lexicon = Lexicon::builtin();
//!     let records = load_records_from_file("results.json")?;
//!     let report = analyze(&lexicon, &records);
//!     print_console_report(&report, 8);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod credentials;
pub mod curation;
pub mod lexicon;
pub mod records;
pub mod reporting;

pub use config::Config;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::analysis::{
        analyze, answers_match, detect_backtracking, extract_boxed_answers, is_token_exhausted,
        AnalysisReport, BacktrackingSample, ProblemRef, THINK_CLOSE_TAG,
    };
    pub use crate::config::Config;
    pub use crate::credentials::ensure_env;
    pub use crate::curation::{curate_balanced_dataset, CurateError, CurationStats};
    pub use crate::lexicon::{Lexicon, PhraseCategory};
    pub use crate::records::{load_records_from_file, LoadError, Record};
    pub use crate::reporting::{print_console_report, print_curation_stats, JsonSummary};
}
