use lsa_run::{stable_hash_string, RunMeta};
use tempfile::tempdir;

fn sample_meta(start_row: usize) -> RunMeta {
    RunMeta::build(
        "20250101120000",
        "items/letterstring_testlet0.csv",
        "gpt",
        vec!["gpt-4o-2024-08-06".to_string()],
        vec![5],
        false,
        start_row,
    )
    .unwrap()
}

#[test]
fn meta_id_is_stable_across_builds() {
    let first = sample_meta(0);
    let second = sample_meta(0);
    assert_eq!(first.id, second.id);
    assert_eq!(first.id.len(), 64);
}

#[test]
fn meta_id_tracks_configuration_changes() {
    assert_ne!(sample_meta(0).id, sample_meta(10).id);
}

#[test]
fn meta_id_ignores_the_creation_stamp() {
    let mut late = sample_meta(0);
    late.created_at = "20250101130000".to_string();
    assert_eq!(late.id, sample_meta(0).id);
}

#[test]
fn meta_round_trips_through_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run_meta.json");
    let meta = sample_meta(0);
    meta.write(&path).unwrap();

    let restored: RunMeta =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(meta, restored);
}

#[test]
fn stable_hash_is_deterministic() {
    let a = stable_hash_string(&("abc", 1, true)).unwrap();
    let b = stable_hash_string(&("abc", 1, true)).unwrap();
    let c = stable_hash_string(&("abc", 2, true)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}
