//! Snapshot resolution: latest-only reads and full-history reconstruction.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use td_model::{Column, Table, Value};
use td_storage::{get_latest_file, list_snapshots};

use crate::error::Result;
use crate::reader::read_table;
use crate::shape::{DatasetKind, HistoryPolicy};

/// Reads the newest snapshot of `kind` in `data_dir`.
///
/// `Ok(None)` means no snapshot exists, which is an expected state on a
/// first run, not an error.
pub fn load_latest(data_dir: &Path, kind: DatasetKind) -> Result<Option<Table>> {
    match get_latest_file(data_dir, kind.glob()) {
        None => Ok(None),
        Some(path) => read_table(kind, &path).map(Some),
    }
}

/// Reconstructs the full history of `kind` from every snapshot in
/// `data_dir`, earliest snapshot's rows first.
///
/// Snapshots are read in ascending order and concatenated, then the
/// dataset's history policy is applied: investor snapshots overlap, so rows
/// are deduplicated on (investor_id, join_date) keeping the first
/// occurrence, and join dates before 2000 are discarded as data-entry
/// artifacts. Operations snapshots are assumed append-only and
/// non-overlapping; that assumption is not verified here, but per-snapshot
/// row counts are logged at debug level so an overlap is diagnosable.
pub fn load_history(data_dir: &Path, kind: DatasetKind) -> Result<Table> {
    let columns: Vec<Column> = kind.shape().fields.iter().map(|f| f.column).collect();
    let mut combined = Table::new(columns);

    for path in list_snapshots(data_dir, kind.glob()) {
        let table = read_table(kind, &path)?;
        debug!(dataset = %kind, path = %path.display(), rows = table.len(), "appending snapshot");
        combined.extend(table);
    }

    if let HistoryPolicy::FullHistory { dedup_keys, cutoff } = kind.history() {
        if !dedup_keys.is_empty() {
            dedup_rows(&mut combined, dedup_keys);
        }
        if let Some(cutoff) = cutoff {
            let before = combined.len();
            let min_date = cutoff.date();
            combined.rows.retain(|row| {
                row.get(cutoff.column)
                    .as_date()
                    .is_some_and(|date| date >= min_date)
            });
            debug!(
                dataset = %kind,
                dropped = before - combined.len(),
                "discarded rows before cutoff"
            );
        }
    }

    Ok(combined)
}

/// Drops rows whose identity key was already seen, keeping first
/// occurrences in concatenation order.
fn dedup_rows(table: &mut Table, keys: &[Column]) {
    let mut seen: HashSet<String> = HashSet::with_capacity(table.len());
    table.rows.retain(|row| {
        let mut key = String::new();
        for column in keys {
            render_key(row.get(*column), &mut key);
            key.push('\u{1f}');
        }
        seen.insert(key)
    });
}

fn render_key(value: &Value, out: &mut String) {
    use std::fmt::Write;
    // Infallible for String targets.
    let _ = match value {
        Value::Date(date) => write!(out, "d{date}"),
        Value::Float(float) => write!(out, "f{}", float.to_bits()),
        Value::Int(int) => write!(out, "i{int}"),
        Value::Text(text) => write!(out, "t{text}"),
        Value::Bond(bond) => write!(out, "b{bond}"),
        Value::Missing => write!(out, "m"),
    };
}
