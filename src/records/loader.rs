//! Record loading from JSON result files

use std::path::Path;

use super::Record;

/// Error type for record loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Load records from a JSON file containing an array of solution attempts.
///
/// Malformed files are fatal; individual records with missing fields are
/// tolerated via the documented defaults.
pub fn load_records_from_file(path: impl AsRef<Path>) -> Result<Vec<Record>, LoadError> {
    let content = std::fs::read_to_string(path)?;
    load_records_from_str(&content)
}

/// Load records from a JSON string
pub fn load_records_from_str(content: &str) -> Result<Vec<Record>, LoadError> {
    serde_json::from_str(content).map_err(|e| LoadError::Parse(format!("JSON parse error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_array_with_partial_records() {
        let json = r#"[
            {"problem_id": "P1", "problem_level": "Level 1", "problem_type": "Algebra",
             "generated_cot": "cot", "ground_truth_solution": "truth"},
            {"problem_id": 7}
        ]"#;

        let records = load_records_from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].problem_id, "P1");
        assert_eq!(records[0].problem_level, "Level 1");
        assert_eq!(records[1].problem_id, "7");
        assert_eq!(records[1].problem_level, "Unknown");
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        assert!(matches!(
            load_records_from_str("not json"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(matches!(
            load_records_from_file("/nonexistent/results.json"),
            Err(LoadError::Io(_))
        ));
    }
}
