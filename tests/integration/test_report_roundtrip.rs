//! CSV report round-trip tests

use romsweep::RemovalDecision;
use romsweep::io::report::{read_report, write_report};
use tempfile::TempDir;

fn sample_decisions() -> Vec<RemovalDecision> {
    vec![
        RemovalDecision {
            platform: "snes".to_string(),
            remove: "snes/Game (Europe).sfc".to_string(),
            keep: Some("snes/Game (USA).sfc".to_string()),
            reason: "Lower region priority: Europe".to_string(),
            size: 2_500_000,
        },
        RemovalDecision {
            platform: "nes".to_string(),
            remove: "nes/Game (Beta).nes".to_string(),
            keep: None,
            reason: "Bad ROM: Beta".to_string(),
            size: 40_000,
        },
    ]
}

#[test]
fn test_report_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cleanup.csv");
    let path_str = path.to_string_lossy().to_string();

    write_report(&path_str, &sample_decisions()).unwrap();
    let loaded = read_report(&path_str).unwrap();

    assert_eq!(loaded.len(), 2);

    // Rows come back sorted by platform then path
    assert_eq!(loaded[0].platform, "nes");
    assert_eq!(loaded[0].remove, "nes/Game (Beta).nes");
    assert!(loaded[0].keep.is_none());
    assert_eq!(loaded[0].reason, "Bad ROM: Beta");
    assert_eq!(loaded[0].size, 40_000);

    assert_eq!(loaded[1].platform, "snes");
    assert_eq!(
        loaded[1].keep.as_deref(),
        Some("snes/Game (USA).sfc")
    );
    assert_eq!(loaded[1].size, 2_500_000);
}

#[test]
fn test_report_handles_commas_in_reasons() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cleanup.csv");
    let path_str = path.to_string_lossy().to_string();

    let decisions = vec![RemovalDecision {
        platform: "nes".to_string(),
        remove: "nes/Game (Japan, Europe).nes".to_string(),
        keep: Some("nes/Game (USA).nes".to_string()),
        reason: "Lower region priority: Europe, Japan".to_string(),
        size: 1_000_000,
    }];

    write_report(&path_str, &decisions).unwrap();
    let loaded = read_report(&path_str).unwrap();

    assert_eq!(loaded[0].remove, "nes/Game (Japan, Europe).nes");
    assert_eq!(loaded[0].reason, "Lower region priority: Europe, Japan");
}

#[test]
fn test_empty_report_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.csv");
    let path_str = path.to_string_lossy().to_string();

    write_report(&path_str, &[]).unwrap();
    let loaded = read_report(&path_str).unwrap();

    assert!(loaded.is_empty());
}

#[test]
fn test_report_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested/dir/cleanup.csv");
    let path_str = path.to_string_lossy().to_string();

    write_report(&path_str, &sample_decisions()).unwrap();
    assert!(path.exists());
}

#[test]
fn test_read_missing_report_fails() {
    assert!(read_report("/nonexistent/cleanup.csv").is_err());
}
