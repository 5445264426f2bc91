//! Subcommand implementations.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table as DisplayTable};
use tracing::{error, info};

use td_ingest::{DatasetKind, HistoryPolicy, load_history, load_latest};
use td_model::{Table, Value};
use td_storage::{get_latest_files, split_snapshot_name};

use crate::cli::{DirArgs, ReadArgs};

fn styled_table() -> DisplayTable {
    let mut table = DisplayTable::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn run_datasets() -> Result<()> {
    let mut table = styled_table();
    table.set_header(vec!["Dataset", "Snapshot pattern", "History"]);
    for kind in DatasetKind::all() {
        let history = match kind.history() {
            HistoryPolicy::LatestOnly => "latest snapshot only",
            HistoryPolicy::FullHistory { dedup_keys, .. } if dedup_keys.is_empty() => {
                "all snapshots, concatenated"
            }
            HistoryPolicy::FullHistory { .. } => "all snapshots, deduplicated",
        };
        table.add_row(vec![kind.as_str(), kind.glob(), history]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_latest(args: &DirArgs) -> Result<()> {
    let latest = get_latest_files(&args.data_dir);
    if latest.is_empty() {
        println!("no snapshots in {}", args.data_dir.display());
        return Ok(());
    }
    let mut table = styled_table();
    table.set_header(vec!["Slug", "Timestamp", "File"]);
    for path in &latest {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        let (slug, timestamp) = split_snapshot_name(name).unwrap_or((name, ""));
        table.add_row(vec![slug, timestamp, name]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_read(args: &ReadArgs) -> Result<()> {
    let kind = args.dataset;
    let Some(table) = load_dataset(&args.dir.data_dir, kind, args.history)? else {
        println!("no {kind} snapshot found in {}", args.dir.data_dir.display());
        return Ok(());
    };

    if args.json {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer(&mut handle, &table).context("serialize table")?;
        writeln!(handle)?;
        return Ok(());
    }

    println!("{kind}: {} rows", table.len());
    print_preview(&table, args.rows);
    Ok(())
}

/// Attempts every dataset, reporting each failure without aborting the
/// batch; a broken or missing snapshot of one dataset must not block the
/// others. Returns the number of failed datasets.
pub fn run_check(args: &DirArgs) -> Result<usize> {
    let mut table = styled_table();
    table.set_header(vec!["Dataset", "Status", "Rows"]);
    let mut failures = 0usize;

    for kind in DatasetKind::all() {
        match load_dataset(&args.data_dir, *kind, false) {
            Ok(Some(loaded)) => {
                info!(dataset = %kind, rows = loaded.len(), "dataset ok");
                table.add_row(vec![
                    kind.as_str().to_string(),
                    "ok".to_string(),
                    loaded.len().to_string(),
                ]);
            }
            Ok(None) => {
                table.add_row(vec![
                    kind.as_str().to_string(),
                    "no snapshot".to_string(),
                    String::new(),
                ]);
            }
            Err(err) => {
                error!(dataset = %kind, "read failed: {err}");
                failures += 1;
                table.add_row(vec![
                    kind.as_str().to_string(),
                    "failed".to_string(),
                    String::new(),
                ]);
            }
        }
    }

    println!("{table}");
    Ok(failures)
}

/// Loads a dataset per its history policy, or per `force_history`.
fn load_dataset(
    data_dir: &Path,
    kind: DatasetKind,
    force_history: bool,
) -> td_ingest::Result<Option<Table>> {
    let full_history =
        force_history || matches!(kind.history(), HistoryPolicy::FullHistory { .. });
    if full_history {
        let table = load_history(data_dir, kind)?;
        if table.is_empty() {
            return Ok(None);
        }
        Ok(Some(table))
    } else {
        load_latest(data_dir, kind)
    }
}

fn print_preview(table: &Table, rows: usize) {
    let mut preview = styled_table();
    preview.set_header(table.columns.iter().map(|column| column.as_str()));
    for row in table.rows.iter().take(rows) {
        preview.add_row(
            table
                .columns
                .iter()
                .map(|column| render_value(row.get(*column))),
        );
    }
    println!("{preview}");
    if table.len() > rows {
        println!("... {} more rows", table.len() - rows);
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Date(date) => date.format("%Y-%m-%d").to_string(),
        Value::Float(float) => float.to_string(),
        Value::Int(int) => int.to_string(),
        Value::Text(text) => text.clone(),
        Value::Bond(bond) => bond.name().to_string(),
        Value::Missing => String::new(),
    }
}
