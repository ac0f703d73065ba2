//! End-to-end curation tests: determinism and balance of the persisted dataset

use std::collections::HashSet;

use cot_analysis::curation::curate_balanced_dataset;
use cot_analysis::lexicon::Lexicon;
use cot_analysis::records::Record;

fn backtracking_record(id: &str) -> Record {
    Record {
        problem_id: id.to_string(),
        problem_level: "Level 3".to_string(),
        problem_type: "Algebra".to_string(),
        generated_cot: format!(
            r"Let me reconsider the factoring. The answer is \boxed{{{}}}.",
            id.len() + 3
        ),
        ground_truth_solution: format!(r"\boxed{{{}}}", id.len() + 3),
        is_correct: None,
        is_backtracking: None,
    }
}

fn plain_record(id: &str) -> Record {
    Record {
        problem_id: id.to_string(),
        problem_level: "Level 2".to_string(),
        problem_type: "Geometry".to_string(),
        generated_cot: r"The perimeter is \boxed{16}.".to_string(),
        ground_truth_solution: r"\boxed{16}".to_string(),
        is_correct: None,
        is_backtracking: None,
    }
}

fn pools() -> Vec<Vec<Record>> {
    let backtracking: Vec<Record> = (1..=6)
        .map(|i| backtracking_record(&format!("B{}", i)))
        .collect();
    let plain: Vec<Record> = (1..=6).map(|i| plain_record(&format!("N{}", i))).collect();
    vec![backtracking, plain]
}

#[test]
fn curation_is_byte_identical_for_fixed_seed() {
    let lexicon = Lexicon::builtin();
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("run1.json");
    let second = dir.path().join("run2.json");

    curate_balanced_dataset(&lexicon, pools(), &first, 10, 1234).unwrap();
    curate_balanced_dataset(&lexicon, pools(), &second, 10, 1234).unwrap();

    let bytes1 = std::fs::read(&first).unwrap();
    let bytes2 = std::fs::read(&second).unwrap();
    assert_eq!(bytes1, bytes2);
}

#[test]
fn different_seeds_still_select_same_unique_records() {
    // With ample unique records per partition, selection is order-driven;
    // only the shuffle differs between seeds.
    let lexicon = Lexicon::builtin();
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("seed1.json");
    let second = dir.path().join("seed2.json");

    curate_balanced_dataset(&lexicon, pools(), &first, 10, 1).unwrap();
    curate_balanced_dataset(&lexicon, pools(), &second, 10, 2).unwrap();

    let ids = |path: &std::path::Path| -> HashSet<String> {
        let records: Vec<Record> =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        records.into_iter().map(|r| r.problem_id).collect()
    };
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn dataset_is_balanced_with_disjoint_partitions() {
    let lexicon = Lexicon::builtin();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("balanced.json");

    let stats = curate_balanced_dataset(&lexicon, pools(), &out, 10, 7).unwrap();
    assert_eq!(stats.total_samples, 10);
    assert_eq!(stats.backtracking_selected, 5);
    assert_eq!(stats.no_backtracking_selected, 5);
    assert_eq!(stats.backtracking_unique, 5);
    assert_eq!(stats.no_backtracking_unique, 5);
    assert_eq!(stats.backtracking_pool, 6);
    assert_eq!(stats.no_backtracking_pool, 6);
    assert_eq!(stats.total_processed, 12);

    let written: Vec<Record> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written.len(), 10);

    let tagged_true: HashSet<&str> = written
        .iter()
        .filter(|r| r.is_backtracking == Some(true))
        .map(|r| r.problem_id.as_str())
        .collect();
    let tagged_false: HashSet<&str> = written
        .iter()
        .filter(|r| r.is_backtracking == Some(false))
        .map(|r| r.problem_id.as_str())
        .collect();

    assert_eq!(tagged_true.len(), 5);
    assert_eq!(tagged_false.len(), 5);
    assert!(tagged_true.iter().all(|id| id.starts_with('B')));
    assert!(tagged_false.iter().all(|id| id.starts_with('N')));
    assert!(tagged_true.is_disjoint(&tagged_false));

    // The curation verdict is persisted on every selected record.
    assert!(written.iter().all(|r| r.is_correct == Some(true)));
}

#[test]
fn small_pool_tops_up_with_replacement() {
    let lexicon = Lexicon::builtin();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("degenerate.json");

    let pools = vec![vec![
        backtracking_record("B1"),
        backtracking_record("B2"),
        plain_record("N1"),
        plain_record("N2"),
    ]];

    let stats = curate_balanced_dataset(&lexicon, pools, &out, 8, 99).unwrap();
    assert_eq!(stats.total_samples, 8);
    assert_eq!(stats.backtracking_selected, 4);
    assert_eq!(stats.no_backtracking_selected, 4);
    // Only two unique identifiers exist per partition, so replacement
    // sampling must have introduced duplicates.
    assert_eq!(stats.backtracking_unique, 2);
    assert_eq!(stats.no_backtracking_unique, 2);
}
