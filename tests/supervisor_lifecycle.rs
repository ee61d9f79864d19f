// tests/supervisor_lifecycle.rs

#![cfg(unix)]

use std::time::Duration;

use binherd::errors::BinherdError;
use binherd::payload::StaticPayload;
use binherd::supervisor::{Mode, Supervisor};
use binherd_test_utils::builders::BinariesConfigBuilder;
use binherd_test_utils::fixtures::{EXIT_OK_SCRIPT, SLEEP_SCRIPT, write_script};
use binherd_test_utils::{init_tracing, with_timeout};
use tempfile::TempDir;

fn empty_payload() -> Box<StaticPayload> {
    Box::new(StaticPayload::empty())
}

/// Poll until every launched process has had its exit observed.
async fn wait_for_exits(supervisor: &Supervisor, expected: usize) {
    with_timeout(async {
        while supervisor.observed_exits() < expected {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
}

#[test]
fn test_disabled_config_fails_construction_without_side_effects() {
    init_tracing();
    let tmp = TempDir::new().unwrap();

    let cfg = BinariesConfigBuilder::new()
        .enabled(false)
        .embedded()
        .with_binary("a")
        .build();

    let result = Supervisor::with_cache_root(&cfg, empty_payload(), tmp.path());

    assert!(matches!(result, Err(BinherdError::Config(_))));
    // Rejected construction must not have created the cache directory.
    assert!(!tmp.path().join("binherd").exists());
}

#[test]
fn test_empty_startup_order_fails_construction() {
    init_tracing();
    let tmp = TempDir::new().unwrap();

    let cfg = BinariesConfigBuilder::new().embedded().build();
    let result = Supervisor::with_cache_root(&cfg, empty_payload(), tmp.path());

    assert!(matches!(result, Err(BinherdError::Config(_))));
    assert!(!tmp.path().join("binherd").exists());
}

#[test]
fn test_local_mode_resolves_bin_path_to_absolute() {
    init_tracing();
    let bin_dir = TempDir::new().unwrap();

    let cfg = BinariesConfigBuilder::new()
        .bin_path(bin_dir.path().to_str().unwrap())
        .with_binary("a")
        .build();

    let supervisor = Supervisor::new(&cfg, empty_payload()).unwrap();

    assert_eq!(supervisor.mode(), Mode::Local);
    assert!(supervisor.cache_dir().is_absolute());
    assert_eq!(supervisor.cache_dir(), bin_dir.path());
}

#[tokio::test]
async fn test_all_binaries_missing_returns_no_binaries_started() {
    init_tracing();
    let bin_dir = TempDir::new().unwrap();

    let cfg = BinariesConfigBuilder::new()
        .bin_path(bin_dir.path().to_str().unwrap())
        .with_binary("a")
        .with_binary("b")
        .build();

    let supervisor = Supervisor::new(&cfg, empty_payload()).unwrap();
    let result = supervisor.start_all().await;

    match result {
        Err(BinherdError::NoBinariesStarted { attempted }) => assert_eq!(attempted, 2),
        other => panic!("expected NoBinariesStarted, got: {other:?}"),
    }
    assert_eq!(supervisor.process_count(), 0);
}

#[tokio::test]
async fn test_missing_binary_is_skipped_and_later_names_still_launch() {
    init_tracing();
    let bin_dir = TempDir::new().unwrap();
    // "a" is deliberately absent; "b" exists and is runnable.
    write_script(bin_dir.path(), "b", EXIT_OK_SCRIPT);

    let cfg = BinariesConfigBuilder::new()
        .bin_path(bin_dir.path().to_str().unwrap())
        .with_binary("a")
        .with_binary("b")
        .build();

    let supervisor = Supervisor::new(&cfg, empty_payload()).unwrap();

    // Partial success is overall success.
    supervisor.start_all().await.unwrap();

    assert_eq!(supervisor.process_count(), 1);
    assert_eq!(supervisor.running_names(), vec!["b"]);

    wait_for_exits(&supervisor, 1).await;
}

#[tokio::test]
async fn test_launch_order_follows_startup_order() {
    init_tracing();
    let bin_dir = TempDir::new().unwrap();
    for name in ["c", "a", "b"] {
        write_script(bin_dir.path(), name, EXIT_OK_SCRIPT);
    }

    let cfg = BinariesConfigBuilder::new()
        .bin_path(bin_dir.path().to_str().unwrap())
        .with_binary("c")
        .with_binary("a")
        .with_binary("b")
        .build();

    let supervisor = Supervisor::new(&cfg, empty_payload()).unwrap();
    supervisor.start_all().await.unwrap();

    assert_eq!(supervisor.running_names(), vec!["c", "a", "b"]);
    assert_eq!(supervisor.process_count(), 3);

    wait_for_exits(&supervisor, 3).await;
}

#[tokio::test]
async fn test_cleanup_terminates_long_lived_binaries() {
    init_tracing();
    let bin_dir = TempDir::new().unwrap();
    write_script(bin_dir.path(), "one", SLEEP_SCRIPT);
    write_script(bin_dir.path(), "two", SLEEP_SCRIPT);

    let cfg = BinariesConfigBuilder::new()
        .bin_path(bin_dir.path().to_str().unwrap())
        .with_binary("one")
        .with_binary("two")
        .build();

    let supervisor = Supervisor::new(&cfg, empty_payload()).unwrap();
    supervisor.start_all().await.unwrap();
    assert_eq!(supervisor.process_count(), 2);
    assert_eq!(supervisor.observed_exits(), 0);

    supervisor.cleanup();
    wait_for_exits(&supervisor, 2).await;

    // The handle list is a launch-history snapshot, not a liveness view.
    assert_eq!(supervisor.process_count(), 2);
}

#[tokio::test]
async fn test_cleanup_is_idempotent() {
    init_tracing();
    let bin_dir = TempDir::new().unwrap();
    write_script(bin_dir.path(), "one", SLEEP_SCRIPT);

    let cfg = BinariesConfigBuilder::new()
        .bin_path(bin_dir.path().to_str().unwrap())
        .with_binary("one")
        .build();

    let supervisor = Supervisor::new(&cfg, empty_payload()).unwrap();
    supervisor.start_all().await.unwrap();

    supervisor.cleanup();
    supervisor.cleanup();

    wait_for_exits(&supervisor, 1).await;

    // Still safe after everything has exited.
    supervisor.cleanup();
}

#[tokio::test]
async fn test_cleanup_with_nothing_running_is_a_no_op() {
    init_tracing();
    let bin_dir = TempDir::new().unwrap();

    let cfg = BinariesConfigBuilder::new()
        .bin_path(bin_dir.path().to_str().unwrap())
        .with_binary("ghost")
        .build();

    let supervisor = Supervisor::new(&cfg, empty_payload()).unwrap();

    // start_all never called; cleanup must not mind.
    supervisor.cleanup();
    assert_eq!(supervisor.process_count(), 0);
}
