use std::cell::Cell;

use geozip_core::{CacheError, CacheManager, GeozipError};

fn lines() -> Vec<String> {
    vec![
        "US\t99553\tAkutan\tAlaska\tAK".to_string(),
        "".to_string(),
        "\t\ttabs only\t".to_string(),
        "Ünïcödé\tline".to_string(),
    ]
}

#[tokio::test]
async fn test_round_trip_skips_compute_on_hit() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

    let first = cache
        .get_or_compute("round_trip", || async { Ok(lines()) })
        .await
        .unwrap();
    assert_eq!(first, lines());

    let second: Vec<String> = cache
        .get_or_compute("round_trip", || async {
            Err(GeozipError::EntryNotFound("should not run".to_string()))
        })
        .await
        .unwrap();
    assert_eq!(second, lines());
}

#[tokio::test]
async fn test_hit_survives_new_manager() {
    let dir = tempfile::tempdir().unwrap();

    CacheManager::new(dir.path().to_path_buf())
        .unwrap()
        .get_or_compute("persisted", || async { Ok(lines()) })
        .await
        .unwrap();

    let counter = Cell::new(0);
    let calls = &counter;
    let restored: Vec<String> = CacheManager::new(dir.path().to_path_buf())
        .unwrap()
        .get_or_compute("persisted", move || async move {
            calls.set(calls.get() + 1);
            Ok(Vec::new())
        })
        .await
        .unwrap();

    assert_eq!(restored, lines());
    assert_eq!(counter.get(), 0);
}

#[tokio::test]
async fn test_failed_compute_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

    let err = cache
        .get_or_compute::<Vec<String>, _, _>("failing", || async {
            Err(GeozipError::EntryNotFound("US.txt".to_string()))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GeozipError::EntryNotFound(_)));
    assert!(!cache.contains("failing"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    let recovered = cache
        .get_or_compute("failing", || async { Ok(lines()) })
        .await
        .unwrap();
    assert_eq!(recovered, lines());
}

#[tokio::test]
async fn test_corrupt_entry_is_recomputed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("corrupt.json"), b"\x00\x01 not json").unwrap();
    let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

    let value = cache
        .get_or_compute("corrupt", || async { Ok(lines()) })
        .await
        .unwrap();
    assert_eq!(value, lines());

    let again: Vec<String> = cache
        .get_or_compute("corrupt", || async { Ok(Vec::new()) })
        .await
        .unwrap();
    assert_eq!(again, lines());
}

#[tokio::test]
async fn test_expired_entry_is_recomputed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("aged.json"),
        r#"{"data": ["old"], "cached_at": "2000-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    let keep_forever = CacheManager::new(dir.path().to_path_buf()).unwrap();
    let value: Vec<String> = keep_forever
        .get_or_compute("aged", || async { Ok(vec!["new".to_string()]) })
        .await
        .unwrap();
    assert_eq!(value, vec!["old"]);

    let hourly = CacheManager::new(dir.path().to_path_buf())
        .unwrap()
        .with_max_age_minutes(Some(60));
    let value: Vec<String> = hourly
        .get_or_compute("aged", || async { Ok(vec!["new".to_string()]) })
        .await
        .unwrap();
    assert_eq!(value, vec!["new"]);
}

#[tokio::test]
async fn test_invalid_key_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

    let err = cache
        .get_or_compute("../outside", || async { Ok(lines()) })
        .await
        .unwrap_err();
    assert!(matches!(err, GeozipError::Cache(CacheError::InvalidKey(_))));
}

#[tokio::test]
async fn test_different_origin_is_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

    let stored: Vec<String> = cache
        .get_or_compute_from("sourced", Some("https://a/US.zip#US.txt"), || async {
            Ok(vec!["from a".to_string()])
        })
        .await
        .unwrap();
    assert_eq!(stored, vec!["from a"]);

    let same: Vec<String> = cache
        .get_or_compute_from("sourced", Some("https://a/US.zip#US.txt"), || async {
            Ok(vec!["unused".to_string()])
        })
        .await
        .unwrap();
    assert_eq!(same, vec!["from a"]);

    let other: Vec<String> = cache
        .get_or_compute_from("sourced", Some("https://b/US.zip#US.txt"), || async {
            Ok(vec!["from b".to_string()])
        })
        .await
        .unwrap();
    assert_eq!(other, vec!["from b"]);

    // An untagged lookup does not accept a tagged entry either
    let untagged: Vec<String> = cache
        .get_or_compute("sourced", || async { Ok(vec!["untagged".to_string()]) })
        .await
        .unwrap();
    assert_eq!(untagged, vec!["untagged"]);
}
