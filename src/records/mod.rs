//! Record model for model-generated solution attempts

pub mod loader;

pub use loader::{load_records_from_file, load_records_from_str, LoadError};

use serde::{Deserialize, Deserializer, Serialize};

/// One model-generated solution attempt.
///
/// Created by an external generation process and consumed read-only, except
/// for the two computed flags added during analysis and curation. Missing
/// input fields fall back to documented defaults rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Problem identifier; any JSON scalar is accepted and kept as a string
    #[serde(default = "default_unknown", deserialize_with = "scalar_as_string")]
    pub problem_id: String,

    /// Difficulty level (categorical)
    #[serde(default = "default_unknown")]
    pub problem_level: String,

    /// Problem type (categorical)
    #[serde(default = "default_unknown")]
    pub problem_type: String,

    /// Generated chain-of-thought solution text
    #[serde(default)]
    pub generated_cot: String,

    /// Ground-truth solution text
    #[serde(default)]
    pub ground_truth_solution: String,

    /// Correctness verdict, set during curation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,

    /// Positional backtracking-membership tag, set during curation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_backtracking: Option<bool>,
}

fn default_unknown() -> String {
    "Unknown".to_string()
}

/// Accept any JSON scalar as an identifier and render it as a string.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(default_unknown()),
        other => Err(serde::de::Error::custom(format!(
            "problem_id must be a scalar, got {}",
            other
        ))),
    }
}
