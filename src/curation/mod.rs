//! Balanced dataset curation
//!
//! Builds an n-sample dataset split evenly between backtracking-correct and
//! no-backtracking solutions. Selection is deterministic for a fixed seed:
//! partitions are sorted by identifier before selection and all randomness
//! comes from one ChaCha generator created at curation start.

use std::collections::HashSet;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::analysis::{answers_match, detect_backtracking, extract_boxed_answers, is_token_exhausted};
use crate::lexicon::Lexicon;
use crate::records::Record;

/// Error type for curation
#[derive(Debug, thiserror::Error)]
pub enum CurateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Statistics summary returned alongside the persisted dataset
#[derive(Debug, Clone, Serialize)]
pub struct CurationStats {
    pub total_samples: usize,
    pub backtracking_selected: usize,
    pub no_backtracking_selected: usize,
    pub backtracking_unique: usize,
    pub no_backtracking_unique: usize,
    pub backtracking_pool: usize,
    pub no_backtracking_pool: usize,
    pub total_processed: usize,
}

/// Curate a balanced dataset from one or more record pools and persist it as
/// pretty-printed JSON at `output`.
///
/// Each selected record carries its computed `is_correct` verdict and a
/// positional `is_backtracking` membership tag assigned before the final
/// shuffle.
pub fn curate_balanced_dataset(
    lexicon: &Lexicon,
    pools: Vec<Vec<Record>>,
    output: &Path,
    size: usize,
    seed: u64,
) -> Result<CurationStats, CurateError> {
    let records: Vec<Record> = pools.into_iter().flatten().collect();
    let total_processed = records.len();
    tracing::info!("Loaded {} records across all input pools", total_processed);

    // Drop token-exhausted generations: no boxed answer at all, or a single
    // empty one.
    let completed: Vec<Record> = records
        .into_iter()
        .filter(|r| {
            let answers = extract_boxed_answers(&r.generated_cot);
            !answers.is_empty() && !is_token_exhausted(&answers)
        })
        .collect();
    tracing::info!(
        "{} completed records after token-exhaustion filter",
        completed.len()
    );

    let mut backtracking_correct: Vec<Record> = Vec::new();
    let mut no_backtracking: Vec<Record> = Vec::new();

    for mut record in completed {
        let generated = extract_boxed_answers(&record.generated_cot);
        let ground_truth = extract_boxed_answers(&record.ground_truth_solution);
        let correct = answers_match(&generated, &ground_truth);
        record.is_correct = Some(correct);

        let phrases = detect_backtracking(lexicon, &record.generated_cot);
        if phrases.is_empty() {
            no_backtracking.push(record);
        } else if correct {
            backtracking_correct.push(record);
        }
        // Backtracking but incorrect: excluded from both partitions.
    }

    tracing::info!(
        "Partitioned: {} backtracking-correct, {} no-backtracking",
        backtracking_correct.len(),
        no_backtracking.len()
    );

    let backtracking_pool = backtracking_correct.len();
    let no_backtracking_pool = no_backtracking.len();

    // Identifier order guarantees deterministic selection for a fixed seed.
    backtracking_correct.sort_by(|a, b| a.problem_id.cmp(&b.problem_id));
    no_backtracking.sort_by(|a, b| a.problem_id.cmp(&b.problem_id));

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let half = size / 2;

    let (backtracking_selection, backtracking_ids) = select_deterministic(
        &backtracking_correct,
        half,
        &HashSet::new(),
        &mut rng,
        "backtracking-correct",
    );
    let (no_backtracking_selection, _) = select_deterministic(
        &no_backtracking,
        half,
        &backtracking_ids,
        &mut rng,
        "no-backtracking",
    );

    let backtracking_selected = backtracking_selection.len();
    let no_backtracking_selected = no_backtracking_selection.len();
    let backtracking_unique = unique_ids(&backtracking_selection);
    let no_backtracking_unique = unique_ids(&no_backtracking_selection);

    // Membership tags are positional: the backtracking selection occupies the
    // leading positions. Tagging must happen before the shuffle.
    let mut dataset = backtracking_selection;
    dataset.extend(no_backtracking_selection);
    for (index, record) in dataset.iter_mut().enumerate() {
        record.is_backtracking = Some(index < backtracking_selected);
    }

    dataset.shuffle(&mut rng);

    let json = serde_json::to_string_pretty(&dataset)?;
    std::fs::write(output, json)?;

    Ok(CurationStats {
        total_samples: dataset.len(),
        backtracking_selected,
        no_backtracking_selected,
        backtracking_unique,
        no_backtracking_unique,
        backtracking_pool,
        no_backtracking_pool,
        total_processed,
    })
}

/// Select up to `target` records from an identifier-sorted pool.
///
/// First pass takes the first record for each identifier not in `exclude`.
/// If that yields fewer than `target`, tops up by seeded sampling with
/// replacement, preferring records whose identifier is outside `exclude` and
/// falling back to the whole pool when none qualify. Returns the selection
/// and the set of identifiers it uses.
fn select_deterministic(
    pool: &[Record],
    target: usize,
    exclude: &HashSet<String>,
    rng: &mut ChaCha8Rng,
    label: &str,
) -> (Vec<Record>, HashSet<String>) {
    let mut selection: Vec<Record> = Vec::with_capacity(target);
    let mut used_ids: HashSet<String> = HashSet::new();

    for record in pool {
        if selection.len() >= target {
            break;
        }
        if exclude.contains(&record.problem_id) || used_ids.contains(&record.problem_id) {
            continue;
        }
        used_ids.insert(record.problem_id.clone());
        selection.push(record.clone());
    }

    if selection.len() < target {
        if pool.is_empty() {
            tracing::warn!(
                "No {} records available; dataset will be short of target",
                label
            );
            return (selection, used_ids);
        }

        tracing::warn!(
            "Only {} unique {} records for a target of {}; sampling with replacement",
            selection.len(),
            label,
            target
        );

        let preferred: Vec<&Record> = pool
            .iter()
            .filter(|r| !exclude.contains(&r.problem_id))
            .collect();
        let replacement_pool: Vec<&Record> = if preferred.is_empty() {
            tracing::warn!(
                "All {} identifiers collide with the other partition; sampling from the full pool",
                label
            );
            pool.iter().collect()
        } else {
            preferred
        };

        while selection.len() < target {
            if let Some(record) = replacement_pool.choose(rng) {
                used_ids.insert(record.problem_id.clone());
                selection.push((*record).clone());
            }
        }
    }

    (selection, used_ids)
}

fn unique_ids(records: &[Record]) -> usize {
    records
        .iter()
        .map(|r| r.problem_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backtracking_record(id: &str) -> Record {
        Record {
            problem_id: id.to_string(),
            problem_level: "L1".to_string(),
            problem_type: "Algebra".to_string(),
            generated_cot: r"Wait, that's incorrect. The answer is \boxed{5}.".to_string(),
            ground_truth_solution: r"\boxed{5}".to_string(),
            is_correct: None,
            is_backtracking: None,
        }
    }

    fn plain_record(id: &str) -> Record {
        Record {
            problem_id: id.to_string(),
            problem_level: "L1".to_string(),
            problem_type: "Algebra".to_string(),
            generated_cot: r"The answer is \boxed{7}.".to_string(),
            ground_truth_solution: r"\boxed{7}".to_string(),
            is_correct: None,
            is_backtracking: None,
        }
    }

    #[test]
    fn test_first_unique_wins() {
        let pool = vec![
            backtracking_record("A"),
            backtracking_record("A"),
            backtracking_record("B"),
            backtracking_record("C"),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (selection, ids) =
            select_deterministic(&pool, 2, &HashSet::new(), &mut rng, "test");
        assert_eq!(selection.len(), 2);
        assert_eq!(selection[0].problem_id, "A");
        assert_eq!(selection[1].problem_id, "B");
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_exclusion_set_respected() {
        let pool = vec![
            backtracking_record("A"),
            backtracking_record("B"),
            backtracking_record("C"),
        ];
        let exclude: HashSet<String> = ["A".to_string()].into_iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (selection, _) = select_deterministic(&pool, 2, &exclude, &mut rng, "test");
        assert_eq!(selection[0].problem_id, "B");
        assert_eq!(selection[1].problem_id, "C");
    }

    #[test]
    fn test_short_pool_tops_up_with_replacement() {
        let pool = vec![backtracking_record("A"), backtracking_record("B")];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (selection, _) = select_deterministic(&pool, 5, &HashSet::new(), &mut rng, "test");
        assert_eq!(selection.len(), 5);
        // Only two distinct identifiers exist, so duplicates must appear.
        assert!(unique_ids(&selection) <= 2);
    }

    #[test]
    fn test_empty_pool_stays_short() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (selection, ids) = select_deterministic(&[], 3, &HashSet::new(), &mut rng, "test");
        assert!(selection.is_empty());
        assert!(ids.is_empty());
    }

    #[test]
    fn test_backtracking_incorrect_excluded_from_both_partitions() {
        let lexicon = Lexicon::builtin();
        let mut wrong = backtracking_record("W");
        wrong.ground_truth_solution = r"\boxed{6}".to_string();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dataset.json");

        let pools = vec![vec![
            wrong,
            backtracking_record("B1"),
            plain_record("N1"),
            plain_record("N2"),
        ]];
        let stats = curate_balanced_dataset(&lexicon, pools, &out, 2, 42).unwrap();
        assert_eq!(stats.backtracking_pool, 1);
        assert_eq!(stats.no_backtracking_pool, 2);
        assert_eq!(stats.total_processed, 4);
    }

    #[test]
    fn test_verdict_persisted_onto_records() {
        let lexicon = Lexicon::builtin();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dataset.json");

        let pools = vec![vec![backtracking_record("B1"), plain_record("N1")]];
        curate_balanced_dataset(&lexicon, pools, &out, 2, 1).unwrap();

        let written: Vec<Record> =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        for record in &written {
            assert_eq!(record.is_correct, Some(true));
            assert!(record.is_backtracking.is_some());
        }
    }

    #[test]
    fn test_token_exhausted_records_filtered() {
        let lexicon = Lexicon::builtin();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dataset.json");

        let mut truncated = plain_record("T1");
        truncated.generated_cot = r"ran out \boxed{}".to_string();
        let mut no_answer = plain_record("T2");
        no_answer.generated_cot = "never produced a box".to_string();

        let pools = vec![vec![truncated, no_answer, plain_record("N1")]];
        let stats = curate_balanced_dataset(&lexicon, pools, &out, 0, 1).unwrap();
        assert_eq!(stats.total_processed, 3);
        assert_eq!(stats.no_backtracking_pool, 1);
        assert_eq!(stats.backtracking_pool, 0);
    }
}
