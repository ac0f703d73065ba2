//! Aggregate analysis over a collection of solution attempts

use std::collections::HashMap;

use serde::Serialize;

use crate::lexicon::Lexicon;
use crate::records::Record;

use super::detector::detect_backtracking;
use super::extract::{extract_boxed_answers, is_token_exhausted};
use super::scoring::answers_match;

/// Literal marker closing the reasoning segment of a generated solution
pub const THINK_CLOSE_TAG: &str = "</think>";

/// Reference to a problem in a breakdown list
#[derive(Debug, Clone, Serialize)]
pub struct ProblemRef {
    pub id: String,
    pub level: String,
    pub problem_type: String,
}

/// One detected-backtracking sample
#[derive(Debug, Clone, Serialize)]
pub struct BacktrackingSample {
    pub id: String,
    pub level: String,
    pub problem_type: String,
    pub phrases: Vec<String>,
    pub correct_after_backtracking: bool,
}

/// Aggregate statistics for a collection of solution attempts
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub total: usize,
    pub correct: usize,
    pub closed_think_tag: usize,
    pub token_exhausted: usize,
    pub backtracking: usize,
    pub token_exhausted_problems: Vec<ProblemRef>,
    pub backtracking_samples: Vec<BacktrackingSample>,
    pub level_distribution: HashMap<String, usize>,
    pub type_distribution: HashMap<String, usize>,
    pub level_accuracy: HashMap<String, f64>,
    pub type_accuracy: HashMap<String, f64>,
    pub percent_correct: f64,
    pub percent_closed_think_tag: f64,
    pub percent_token_exhausted: f64,
    pub percent_backtracking: f64,
}

/// Analyze a collection of records in input order.
///
/// Token-exhausted records are counted separately and score as incorrect
/// regardless of ground truth.
pub fn analyze(lexicon: &Lexicon, records: &[Record]) -> AnalysisReport {
    tracing::info!("Analyzing {} CoT solutions", records.len());

    let mut report = AnalysisReport {
        total: records.len(),
        ..Default::default()
    };

    let mut level_correct: HashMap<String, usize> = HashMap::new();
    let mut type_correct: HashMap<String, usize> = HashMap::new();

    for record in records {
        *report
            .level_distribution
            .entry(record.problem_level.clone())
            .or_insert(0) += 1;
        *report
            .type_distribution
            .entry(record.problem_type.clone())
            .or_insert(0) += 1;

        let generated = extract_boxed_answers(&record.generated_cot);
        let ground_truth = extract_boxed_answers(&record.ground_truth_solution);

        let exhausted = is_token_exhausted(&generated);
        let correct = !exhausted && answers_match(&generated, &ground_truth);

        if exhausted {
            report.token_exhausted += 1;
            report.token_exhausted_problems.push(ProblemRef {
                id: record.problem_id.clone(),
                level: record.problem_level.clone(),
                problem_type: record.problem_type.clone(),
            });
        }

        if correct {
            report.correct += 1;
            *level_correct.entry(record.problem_level.clone()).or_insert(0) += 1;
            *type_correct.entry(record.problem_type.clone()).or_insert(0) += 1;
        }

        if record.generated_cot.contains(THINK_CLOSE_TAG) {
            report.closed_think_tag += 1;
        }

        let phrases = detect_backtracking(lexicon, &record.generated_cot);
        if !phrases.is_empty() {
            report.backtracking += 1;
            report.backtracking_samples.push(BacktrackingSample {
                id: record.problem_id.clone(),
                level: record.problem_level.clone(),
                problem_type: record.problem_type.clone(),
                phrases: phrases.iter().map(|p| p.to_string()).collect(),
                correct_after_backtracking: correct,
            });
        }
    }

    report.level_accuracy = accuracy_by_stratum(&report.level_distribution, &level_correct);
    report.type_accuracy = accuracy_by_stratum(&report.type_distribution, &type_correct);

    report.percent_correct = percentage(report.correct, report.total);
    report.percent_closed_think_tag = percentage(report.closed_think_tag, report.total);
    report.percent_token_exhausted = percentage(report.token_exhausted, report.total);
    report.percent_backtracking = percentage(report.backtracking, report.total);

    report
}

fn accuracy_by_stratum(
    totals: &HashMap<String, usize>,
    correct: &HashMap<String, usize>,
) -> HashMap<String, f64> {
    totals
        .iter()
        .map(|(stratum, &total)| {
            let hits = correct.get(stratum).copied().unwrap_or(0);
            let accuracy = if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            };
            (stratum.clone(), accuracy)
        })
        .collect()
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
