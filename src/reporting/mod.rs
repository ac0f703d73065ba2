//! Console report and JSON summary output

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::analysis::AnalysisReport;
use crate::curation::CurationStats;

/// JSON summary export of an analysis run
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    pub timestamp: String,
    pub report: AnalysisReport,
}

impl JsonSummary {
    /// Wrap a report with a run timestamp
    pub fn new(report: AnalysisReport) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            report,
        }
    }

    /// Write to a JSON file
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

/// Print the formatted analysis report.
///
/// `num_samples` caps how many correctly-solved backtracking samples are
/// listed; token-exhausted problems are skipped in that listing.
pub fn print_console_report(report: &AnalysisReport, num_samples: usize) {
    println!("\n{:=<50}", "");
    println!("CHAIN-OF-THOUGHT ANALYSIS REPORT");
    println!("{:=<50}", "");

    println!("\nTotal problems analyzed: {}", report.total);

    println!("\n1. CORRECTNESS");
    println!(
        "Correct answers: {} ({:.2}%)",
        report.correct, report.percent_correct
    );

    println!("\n2. THINK TAGS");
    println!(
        "Solutions with </think> close tags: {} ({:.2}%)",
        report.closed_think_tag, report.percent_closed_think_tag
    );

    println!("\n3. TOKEN LIMITS");
    println!(
        "Problems that ran out of tokens: {} ({:.2}%)",
        report.token_exhausted, report.percent_token_exhausted
    );

    println!("\n4. BACKTRACKING");
    println!(
        "Solutions with backtracking: {} ({:.2}%)",
        report.backtracking, report.percent_backtracking
    );
    if !report.backtracking_samples.is_empty() {
        let exhausted_ids: HashSet<&str> = report
            .token_exhausted_problems
            .iter()
            .map(|p| p.id.as_str())
            .collect();

        println!("Sample of problems with backtracking:");
        let mut shown = 0;
        for sample in &report.backtracking_samples {
            if shown >= num_samples {
                break;
            }
            if sample.correct_after_backtracking && !exhausted_ids.contains(sample.id.as_str()) {
                println!(
                    "     Level: {}, Type: {}, Phrases: {}",
                    sample.level,
                    sample.problem_type,
                    sample.phrases.join(", ")
                );
                shown += 1;
            }
        }
    }

    println!("\n5. PERFORMANCE BY LEVEL");
    print_accuracy_table(&report.level_accuracy, &report.level_distribution);

    println!("\n6. PERFORMANCE BY TYPE");
    print_accuracy_table(&report.type_accuracy, &report.type_distribution);

    println!("\n{:=<50}", "");
}

fn print_accuracy_table(
    accuracy: &std::collections::HashMap<String, f64>,
    distribution: &std::collections::HashMap<String, usize>,
) {
    let mut strata: Vec<_> = accuracy.iter().collect();
    strata.sort_by(|a, b| a.0.cmp(b.0));

    for (stratum, acc) in strata {
        let count = distribution.get(stratum).copied().unwrap_or(0);
        println!("  {}: {:.2}% correct ({} problems)", stratum, acc * 100.0, count);
    }
}

/// Print the curation statistics block
pub fn print_curation_stats(stats: &CurationStats) {
    println!("\n=== Balanced Dataset Statistics ===");
    println!("{:-<50}", "");
    println!("Total samples:             {}", stats.total_samples);
    println!(
        "Backtracking selected:     {} ({} unique, pool {})",
        stats.backtracking_selected, stats.backtracking_unique, stats.backtracking_pool
    );
    println!(
        "No-backtracking selected:  {} ({} unique, pool {})",
        stats.no_backtracking_selected, stats.no_backtracking_unique, stats.no_backtracking_pool
    );
    println!("Records processed:         {}", stats.total_processed);
    println!("{:-<50}", "");
}
