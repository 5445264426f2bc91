//! One generic reader behind eight dataset entry points.
//!
//! All raw exports are semicolon-delimited UTF-8 with a header row. Reading
//! is all-or-nothing per file: a malformed field or a missing header fails
//! the whole read, and there is no row-level recovery, because a partially
//! normalized table silently corrupts downstream aggregation.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use td_model::{BondRegistry, Column, Row, Table, Value};

use crate::error::{IngestError, Result};
use crate::shape::{DatasetKind, FieldKind, FieldSpec};

/// Reads one snapshot of `kind` into a canonical table, resolving bond
/// types through the process-wide registry.
pub fn read_table(kind: DatasetKind, path: &Path) -> Result<Table> {
    read_table_with_registry(kind, path, BondRegistry::global())
}

/// Reads one snapshot with an explicit bond registry (e.g. one loaded from
/// an external alias file).
pub fn read_table_with_registry(
    kind: DatasetKind,
    path: &Path,
    registry: &BondRegistry,
) -> Result<Table> {
    let shape = kind.shape();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = reader
        .headers()
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

    // Raw headers are located by name, so column order drift across years
    // is harmless; anything the shape does not map is dropped.
    let mut indices = Vec::with_capacity(shape.fields.len());
    for spec in shape.fields {
        let index = normalized
            .iter()
            .position(|header| header == spec.raw)
            .ok_or_else(|| IngestError::MissingColumn {
                path: path.to_path_buf(),
                column: spec.raw.to_string(),
            })?;
        indices.push(index);
    }

    let columns: Vec<Column> = shape.fields.iter().map(|spec| spec.column).collect();
    let mut table = Table::new(columns);

    for (record_index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let record_number = record_index + 1;

        let mut row = Row::new();
        for (spec, &index) in shape.fields.iter().zip(&indices) {
            let raw = record.get(index).unwrap_or("").trim();
            let value = parse_field(spec, raw, shape.comma_decimal, registry).map_err(
                |failure| match failure {
                    FieldFailure::UnknownBond => IngestError::UnknownBondType {
                        path: path.to_path_buf(),
                        record: record_number,
                        value: raw.to_string(),
                    },
                    FieldFailure::Invalid(message) => IngestError::InvalidField {
                        path: path.to_path_buf(),
                        record: record_number,
                        column: spec.column,
                        value: raw.to_string(),
                        message,
                    },
                },
            )?;
            row.set(spec.column, value);
        }
        table.push_row(row);
    }

    debug!(dataset = %kind, path = %path.display(), rows = table.len(), "read snapshot");
    Ok(table)
}

enum FieldFailure {
    UnknownBond,
    Invalid(String),
}

fn parse_field(
    spec: &FieldSpec,
    raw: &str,
    comma_decimal: bool,
    registry: &BondRegistry,
) -> std::result::Result<Value, FieldFailure> {
    if raw.is_empty() {
        return Ok(Value::Missing);
    }
    match spec.kind {
        FieldKind::Date => parse_day_first(raw)
            .map(Value::Date)
            .ok_or_else(|| FieldFailure::Invalid("expected DD/MM/YYYY".to_string())),
        FieldKind::MonthDate => parse_month_only(raw)
            .map(Value::Date)
            .ok_or_else(|| FieldFailure::Invalid("expected MM/YYYY".to_string())),
        FieldKind::Float => parse_decimal(raw, comma_decimal)
            .map(Value::Float)
            .map_err(FieldFailure::Invalid),
        FieldKind::Int => raw
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|error| FieldFailure::Invalid(error.to_string())),
        FieldKind::Text | FieldKind::Code => Ok(Value::Text(raw.to_string())),
        FieldKind::Bond => registry
            .resolve(raw)
            .map(Value::Bond)
            .map_err(|_| FieldFailure::UnknownBond),
    }
}

/// Day-before-month parsing; `02/01/2024` is January 2nd, even though both
/// readings would be valid dates.
fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()
}

/// `MM/YYYY`, normalized to the first day of that month.
fn parse_month_only(raw: &str) -> Option<NaiveDate> {
    let (month, year) = raw.split_once('/')?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    if year < 1000 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Parses a decimal field under the shape's convention.
///
/// With comma decimals, `.` is accepted only as a thousands separator in
/// valid grouping positions (`1.234,56`); a value written with the wrong
/// convention (`1234.56`) fails the read instead of being misread as a
/// larger number.
fn parse_decimal(raw: &str, comma_decimal: bool) -> std::result::Result<f64, String> {
    if !comma_decimal {
        return raw
            .parse::<f64>()
            .map_err(|error| error.to_string());
    }

    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (int_part, frac_part) = match unsigned.split_once(',') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut digits = String::with_capacity(unsigned.len());
    if int_part.contains('.') {
        let groups: Vec<&str> = int_part.split('.').collect();
        let grouped_ok = !groups[0].is_empty()
            && groups[0].len() <= 3
            && groups
                .iter()
                .all(|group| group.bytes().all(|b| b.is_ascii_digit()))
            && groups[1..].iter().all(|group| group.len() == 3);
        if !grouped_ok {
            return Err("not a comma-decimal number".to_string());
        }
        for group in groups {
            digits.push_str(group);
        }
    } else {
        digits.push_str(int_part);
    }

    let mut normalized = format!("{sign}{digits}");
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err("not a comma-decimal number".to_string());
        }
        normalized.push('.');
        normalized.push_str(frac);
    }
    normalized
        .parse::<f64>()
        .map_err(|error| error.to_string())
}

/// Trims surrounding whitespace and a UTF-8 BOM, and collapses interior
/// whitespace runs, so header drift in the raw exports still matches.
fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut normalized = String::with_capacity(trimmed.len());
    let mut parts = trimmed.split_whitespace();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Daily offered prices and yields per bond.
pub fn read_prices(path: &Path) -> Result<Table> {
    read_table(DatasetKind::Prices, path)
}

/// Outstanding stock per bond and month.
pub fn read_stock(path: &Path) -> Result<Table> {
    read_table(DatasetKind::Stock, path)
}

/// Investor demographics.
pub fn read_investors(path: &Path) -> Result<Table> {
    read_table(DatasetKind::Investors, path)
}

/// Individual buy/sell operations.
pub fn read_operations(path: &Path) -> Result<Table> {
    read_table(DatasetKind::Operations, path)
}

/// Primary sales.
pub fn read_sales(path: &Path) -> Result<Table> {
    read_table(DatasetKind::Sales, path)
}

/// Early redemptions bought back by the treasury.
pub fn read_buybacks(path: &Path) -> Result<Table> {
    read_table(DatasetKind::Buybacks, path)
}

/// Redemptions at maturity.
pub fn read_maturities(path: &Path) -> Result<Table> {
    read_table(DatasetKind::Maturities, path)
}

/// Semestral interest coupon payments. Structurally identical to the
/// maturities export, so this delegates to [`read_maturities`].
pub fn read_interest_coupons(path: &Path) -> Result<Table> {
    read_maturities(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_first_wins_on_ambiguous_dates() {
        let date = parse_day_first("02/01/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn month_only_is_first_of_month() {
        let date = parse_month_only("11/2021").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 11, 1).unwrap());
        assert_eq!(parse_month_only("13/2021"), None);
        assert_eq!(parse_month_only("02/01/2024"), None);
    }

    #[test]
    fn comma_decimals_parse() {
        assert_eq!(parse_decimal("0,01", true).unwrap(), 0.01);
        assert_eq!(parse_decimal("12002,50", true).unwrap(), 12002.50);
        assert_eq!(parse_decimal("1.234,56", true).unwrap(), 1234.56);
        assert_eq!(parse_decimal("-1.234.567,89", true).unwrap(), -1_234_567.89);
        assert_eq!(parse_decimal("1000", true).unwrap(), 1000.0);
    }

    #[test]
    fn wrong_decimal_convention_is_rejected() {
        assert!(parse_decimal("1234.56", true).is_err());
        assert!(parse_decimal("12.34,56", true).is_err());
        assert!(parse_decimal("1,2,3", true).is_err());
        assert!(parse_decimal("abc", true).is_err());
    }

    #[test]
    fn dot_decimals_parse_without_the_flag() {
        assert_eq!(parse_decimal("1234.56", false).unwrap(), 1234.56);
        assert!(parse_decimal("1.234,56", false).is_err());
    }

    #[test]
    fn headers_normalize_bom_and_runs() {
        assert_eq!(normalize_header("\u{feff}Tipo  Titulo "), "Tipo Titulo");
        assert_eq!(normalize_header("PU"), "PU");
    }
}
