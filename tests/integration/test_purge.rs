//! Decision replay tests for dry-run, quarantine, and delete modes

use crate::fixtures::write_rom;
use romsweep::RemovalDecision;
use romsweep::services::purge::{PurgeMode, purge};
use tempfile::TempDir;

fn decision(rel_path: &str, size: u64) -> RemovalDecision {
    RemovalDecision {
        platform: "nes".to_string(),
        remove: rel_path.to_string(),
        keep: Some("nes/Game (USA).nes".to_string()),
        reason: "Lower region priority: Europe".to_string(),
        size,
    }
}

#[test]
fn test_dry_run_touches_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_rom(root, "nes", "Game (Europe).nes", b"europe").unwrap();

    let decisions = vec![decision("nes/Game (Europe).nes", 6)];
    let outcome = purge(root, &root.join("_quarantine"), &decisions, PurgeMode::DryRun);

    assert_eq!(outcome.removed, 0);
    assert_eq!(outcome.reclaimed_bytes, 0);
    assert!(outcome.errors.is_empty());
    assert!(root.join("nes/Game (Europe).nes").exists());
}

#[test]
fn test_quarantine_preserves_relative_path() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let quarantine = temp_dir.path().join("removed");

    write_rom(root, "nes", "Game (Europe).nes", b"europe").unwrap();

    let decisions = vec![decision("nes/Game (Europe).nes", 6)];
    let outcome = purge(root, &quarantine, &decisions, PurgeMode::Quarantine);

    assert_eq!(outcome.removed, 1);
    assert_eq!(outcome.reclaimed_bytes, 6);
    assert!(!root.join("nes/Game (Europe).nes").exists());
    assert!(quarantine.join("nes/Game (Europe).nes").exists());
}

#[test]
fn test_delete_removes_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_rom(root, "nes", "Game (Europe).nes", b"europe").unwrap();
    write_rom(root, "nes", "Game (Japan).nes", b"japan!").unwrap();

    let decisions = vec![
        decision("nes/Game (Europe).nes", 6),
        decision("nes/Game (Japan).nes", 6),
    ];
    let outcome = purge(root, &root.join("_quarantine"), &decisions, PurgeMode::Delete);

    assert_eq!(outcome.removed, 2);
    assert_eq!(outcome.reclaimed_bytes, 12);
    assert!(!root.join("nes/Game (Europe).nes").exists());
    assert!(!root.join("nes/Game (Japan).nes").exists());
}

#[test]
fn test_missing_file_is_skipped_without_error() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_rom(root, "nes", "Game (Europe).nes", b"europe").unwrap();

    let decisions = vec![
        decision("nes/Game (Europe).nes", 6),
        decision("nes/Already Gone.nes", 100),
    ];
    let outcome = purge(root, &root.join("_quarantine"), &decisions, PurgeMode::Delete);

    assert_eq!(outcome.removed, 1);
    assert_eq!(outcome.reclaimed_bytes, 6);
    assert!(outcome.errors.is_empty());
}

#[test]
fn test_keepers_survive_replay() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_rom(root, "nes", "Game (USA).nes", b"usa").unwrap();
    write_rom(root, "nes", "Game (Europe).nes", b"europe").unwrap();

    let decisions = vec![decision("nes/Game (Europe).nes", 6)];
    purge(root, &root.join("_quarantine"), &decisions, PurgeMode::Delete);

    assert!(root.join("nes/Game (USA).nes").exists());
    assert!(!root.join("nes/Game (Europe).nes").exists());
}
