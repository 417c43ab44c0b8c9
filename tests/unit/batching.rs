//! Unit tests for reputation-history ID batching

use user_activity_report::client::v2::id_batches;

/// 120 user IDs must split into exactly 3 batches of at most 50
#[test]
fn test_three_batches_for_120_ids() {
    let ids: Vec<u64> = (1..=120).collect();
    let batches = id_batches(&ids);

    assert_eq!(batches.len(), 3);
    for batch in &batches {
        assert!(batch.split(';').count() <= 50);
    }
}

/// Concatenating the batches loses and duplicates nothing relative to a
/// single unbounded call
#[test]
fn test_batches_concatenate_without_loss() {
    let ids: Vec<u64> = (1000..1120).collect();
    let rejoined: Vec<u64> = id_batches(&ids)
        .iter()
        .flat_map(|batch| batch.split(';'))
        .map(|id| id.parse().unwrap())
        .collect();

    assert_eq!(rejoined, ids);
}

/// A set under the batch size stays a single batch
#[test]
fn test_small_set_single_batch() {
    let batches = id_batches(&[7, 8, 9]);
    assert_eq!(batches, vec!["7;8;9".to_string()]);
}
