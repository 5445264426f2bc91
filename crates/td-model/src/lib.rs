//! Canonical schema for Tesouro Direto open data.
//!
//! This crate is the fixed vocabulary shared by every dataset shape: the
//! canonical column set, the closed bond-type enumeration with its alias
//! registry, the categorical code label tables, and the typed table model
//! that readers produce.

pub mod bond;
pub mod code;
pub mod column;
pub mod error;
pub mod table;

pub use bond::{BondMeta, BondRegistry, BondType};
pub use code::CodeTable;
pub use column::Column;
pub use error::{ModelError, Result};
pub use table::{Row, Table, Value};
