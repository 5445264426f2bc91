//! Readers for the Tesouro Direto open-data CSV exports.
//!
//! Eight dataset shapes, one reading algorithm: each shape is a declarative
//! column map (`shape`), the generic reader (`reader`) parses a snapshot
//! file into a canonical [`td_model::Table`], and `history` combines many
//! snapshots of the same dataset into its logical table.

pub mod error;
pub mod history;
pub mod reader;
pub mod shape;

pub use error::{IngestError, Result};
pub use history::{load_history, load_latest};
pub use reader::{
    read_buybacks, read_interest_coupons, read_investors, read_maturities, read_operations,
    read_prices, read_sales, read_stock, read_table, read_table_with_registry,
};
pub use shape::{DatasetKind, FieldKind, FieldSpec, HistoryPolicy, ShapeSpec};
