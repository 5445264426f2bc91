use std::fs;
use std::path::Path;

use tempfile::TempDir;

use td_storage::{generate_filename, get_latest_file, get_latest_files, list_snapshots};

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "").expect("write file");
}

#[test]
fn latest_files_keeps_one_per_slug() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "file-a@20240101T100000.csv");
    touch(dir.path(), "file-a@20240101T110000.csv");
    touch(dir.path(), "file-b@20240101T100000.csv");
    touch(dir.path(), "other.txt");
    touch(dir.path(), "unmanaged.csv");

    let latest = get_latest_files(dir.path());
    let names: Vec<String> = latest
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();

    assert_eq!(
        names,
        vec![
            "file-a@20240101T110000.csv".to_string(),
            "file-b@20240101T100000.csv".to_string(),
        ]
    );
}

#[test]
fn latest_files_of_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("does-not-exist");
    assert!(get_latest_files(&gone).is_empty());
}

#[test]
fn latest_file_respects_pattern() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "investors-2023@20240101T100000.csv");
    touch(dir.path(), "investors-2024@20240101T100000.csv");
    touch(dir.path(), "investors-2024@20240101T110000.csv");

    let latest = get_latest_file(dir.path(), "investors-2024*.csv").unwrap();
    assert_eq!(
        latest.file_name().unwrap().to_str().unwrap(),
        "investors-2024@20240101T110000.csv"
    );

    assert_eq!(get_latest_file(dir.path(), "nonexistent*.csv"), None);
}

#[test]
fn latest_file_ignores_unmanaged_matches() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "prices.csv");
    // Matches the pattern but carries no '@': absent, not an error.
    assert_eq!(get_latest_file(dir.path(), "prices*.csv"), None);
}

#[test]
fn identical_timestamps_break_ties_deterministically() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "dup-a@20240101T100000.csv");
    touch(dir.path(), "dup-b@20240101T100000.csv");

    let latest = get_latest_file(dir.path(), "dup-*.csv").unwrap();
    assert_eq!(
        latest.file_name().unwrap().to_str().unwrap(),
        "dup-b@20240101T100000.csv"
    );
}

#[test]
fn list_snapshots_is_ascending_by_name() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "ops-2024@20250101T000000.csv");
    touch(dir.path(), "ops-2023@20240101T000000.csv");
    touch(dir.path(), "ops-notes.txt");
    touch(dir.path(), "ops-plain.csv");

    let names: Vec<String> = list_snapshots(dir.path(), "ops-*.csv")
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "ops-2023@20240101T000000.csv".to_string(),
            "ops-2024@20250101T000000.csv".to_string(),
        ]
    );
}

#[test]
fn generated_names_sort_chronologically() {
    let earlier = generate_filename("Estoque", Some("2023-12-31T23:59:59"));
    let later = generate_filename("Estoque", Some("2024-01-01T00:00:00"));
    assert!(earlier < later);
}
