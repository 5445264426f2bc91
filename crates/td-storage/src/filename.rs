//! Snapshot filename codec.
//!
//! Every managed download is named `<slug>@<YYYYMMDDTHHMMSS>.csv`. The slug
//! is an ASCII, lowercase, hyphenated projection of the resource's human
//! name and never contains `@`; the timestamp is fixed-width with no
//! separators. That makes lexicographic comparison of two filenames of the
//! same slug agree with chronological order, so "latest" selection is a
//! plain string max.

use chrono::{Local, NaiveDateTime};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Timestamp segment layout (compact ISO 8601, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Projects a human-readable name onto an ASCII, lowercase, hyphenated slug.
///
/// The transform is a pure codepoint-level pipeline with no locale
/// dependence: NFKD-decompose, drop combining marks and any remaining
/// non-ASCII, keep only word characters, whitespace and hyphens, trim,
/// lowercase, then collapse each run of whitespace/hyphens into one hyphen.
/// Idempotent: a slug maps to itself.
pub fn slugify(value: &str) -> String {
    let filtered: String = value
        .nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .filter(char::is_ascii)
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_' || *ch == '-' || ch.is_whitespace())
        .collect();
    let lowered = filtered.trim().to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut in_separator_run = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() || ch == '-' {
            in_separator_run = true;
        } else {
            if in_separator_run {
                slug.push('-');
                in_separator_run = false;
            }
            slug.push(ch);
        }
    }
    if in_separator_run {
        slug.push('-');
    }
    slug
}

/// Derives the snapshot filename for a resource.
///
/// `last_modified` is the portal's ISO 8601 modification instant (e.g.
/// `2025-12-04T12:59:45.172801`), treated as an already-normalized local
/// instant. When it is absent or unparseable the current instant is used
/// instead; by contract the two cases are indistinguishable in the output,
/// an accepted information loss rather than an error.
pub fn generate_filename(name: &str, last_modified: Option<&str>) -> String {
    let stamp = last_modified
        .and_then(parse_iso_instant)
        .unwrap_or_else(|| Local::now().naive_local());
    format!("{}@{}.csv", slugify(name), stamp.format(TIMESTAMP_FORMAT))
}

fn parse_iso_instant(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// Splits a managed filename into its slug and timestamp segments.
///
/// Returns `None` for names that are not managed snapshots (no `.csv`
/// suffix or no `@`); such files are foreign to the data directory and are
/// skipped, never an error. The split is on the *last* `@` since a
/// well-formed slug cannot contain one.
pub fn split_snapshot_name(file_name: &str) -> Option<(&str, &str)> {
    let stem = file_name.strip_suffix(".csv")?;
    let at = stem.rfind('@')?;
    Some((&stem[..at], &stem[at + 1..]))
}
