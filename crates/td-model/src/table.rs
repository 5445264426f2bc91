use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::bond::BondType;
use crate::column::Column;

/// A typed cell in a canonical table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Date(NaiveDate),
    Float(f64),
    Int(i64),
    Text(String),
    Bond(BondType),
    Missing,
}

impl Value {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bond(&self) -> Option<BondType> {
        match self {
            Value::Bond(bond) => Some(*bond),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

/// One row: canonical column -> typed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub cells: BTreeMap<Column, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    pub fn get(&self, column: Column) -> &Value {
        self.cells.get(&column).unwrap_or(&Value::Missing)
    }

    pub fn set(&mut self, column: Column, value: Value) {
        self.cells.insert(column, value);
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered sequence of rows over a fixed column set.
///
/// Produced once per read call and owned by the caller; concatenating
/// snapshot tables of the same shape is `extend`.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends all rows of `other`, preserving concatenation order.
    pub fn extend(&mut self, other: Table) {
        self.rows.extend(other.rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cells_read_as_missing() {
        let row = Row::new();
        assert!(row.get(Column::BuyYield).is_missing());
    }

    #[test]
    fn extend_preserves_row_order() {
        let columns = vec![Column::InvestorId];
        let mut first = Table::new(columns.clone());
        let mut second = Table::new(columns.clone());
        for id in [1i64, 2] {
            let mut row = Row::new();
            row.set(Column::InvestorId, Value::Int(id));
            first.push_row(row);
        }
        let mut row = Row::new();
        row.set(Column::InvestorId, Value::Int(3));
        second.push_row(row);

        first.extend(second);
        let ids: Vec<i64> = first
            .rows
            .iter()
            .map(|row| row.get(Column::InvestorId).as_int().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn values_serialize_with_kind_tags() {
        let value = Value::Bond(BondType::Selic);
        let json = serde_json::to_string(&value).unwrap();
        assert!(json.contains("\"Bond\""));
        assert!(json.contains("Selic"));
    }
}
