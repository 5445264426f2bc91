//! Directory scanning and latest-version selection over snapshot files.
//!
//! A data directory accumulates many timestamped snapshots per logical
//! dataset. Selection never fails on malformed names: anything that does not
//! parse as `<slug>@<timestamp>.csv` is treated as a foreign file and
//! excluded from the candidate set.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::filename::split_snapshot_name;

/// Returns the newest snapshot per slug, one path per group, sorted by path.
///
/// Groups managed files by the slug segment and keeps the entry whose
/// timestamp segment is lexicographically greatest; since timestamps are
/// fixed-width this is chronological order. Two snapshots with an identical
/// timestamp should not occur but are not rejected: the lexicographically
/// greater file name wins, which keeps the result deterministic.
pub fn get_latest_files(directory: &Path) -> Vec<PathBuf> {
    let mut best: BTreeMap<String, (String, PathBuf)> = BTreeMap::new();

    for (name, path) in scan_csv_files(directory) {
        let Some((slug, timestamp)) = split_snapshot_name(&name) else {
            continue;
        };
        let candidate = (timestamp.to_string(), path);
        match best.get_mut(slug) {
            Some(current) if *current >= candidate => {}
            Some(current) => *current = candidate,
            None => {
                best.insert(slug.to_string(), candidate);
            }
        }
    }

    let mut latest: Vec<PathBuf> = best.into_values().map(|(_, path)| path).collect();
    latest.sort();
    debug!(directory = %directory.display(), groups = latest.len(), "selected latest snapshots");
    latest
}

/// Returns the newest snapshot among files matching `pattern`, or `None`.
///
/// Absence (nothing matches, or nothing that matches carries an `@`) is a
/// sentinel, not an error: a dataset that has never been downloaded is an
/// expected state. Ties on the timestamp break by greatest file name.
pub fn get_latest_file(directory: &Path, pattern: &str) -> Option<PathBuf> {
    scan_csv_files(directory)
        .into_iter()
        .filter(|(name, _)| matches_pattern(name, pattern))
        .filter_map(|(name, path)| {
            let (_, timestamp) = split_snapshot_name(&name)?;
            Some((timestamp.to_string(), name, path))
        })
        .max()
        .map(|(_, _, path)| path)
}

/// Enumerates every snapshot matching `pattern`, ascending by file name.
///
/// Ascending name order is ascending snapshot time per slug, which is the
/// concatenation order full-history loads rely on (earliest rows first).
pub fn list_snapshots(directory: &Path, pattern: &str) -> Vec<PathBuf> {
    let mut files: Vec<(String, PathBuf)> = scan_csv_files(directory)
        .into_iter()
        .filter(|(name, _)| {
            matches_pattern(name, pattern) && split_snapshot_name(name).is_some()
        })
        .collect();
    files.sort();
    files.into_iter().map(|(_, path)| path).collect()
}

/// Lists `.csv` regular files in a directory as (file name, path) pairs.
///
/// A missing or unreadable directory yields an empty listing; scan
/// anomalies never propagate as errors.
fn scan_csv_files(directory: &Path) -> Vec<(String, PathBuf)> {
    let Ok(entries) = std::fs::read_dir(directory) else {
        debug!(directory = %directory.display(), "snapshot directory not readable");
        return Vec::new();
    };

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name.to_ascii_lowercase().ends_with(".csv") {
            files.push((name.to_string(), path));
        }
    }
    files
}

/// Matches a file name against a pattern where `*` spans any run of
/// characters. Literal segments are anchored at both ends.
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    let segments: Vec<&str> = pattern.split('*').collect();
    if segments.len() == 1 {
        return name == pattern;
    }

    let Some(mut rest) = name.strip_prefix(segments[0]) else {
        return false;
    };
    let last = segments[segments.len() - 1];
    for segment in &segments[1..segments.len() - 1] {
        if segment.is_empty() {
            continue;
        }
        match rest.find(segment) {
            Some(index) => rest = &rest[index + segment.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}
