//! The canonical column vocabulary.
//!
//! Every table produced by a dataset reader uses only names from this closed
//! set; the Portuguese headers of the raw exports never appear in reader
//! output. Adding a raw source field means mapping it to an existing member
//! here or extending the vocabulary explicitly.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::error::ModelError;

/// One member of the fixed logical schema shared by all dataset shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    // Prices
    ReferenceDate,
    BondType,
    MaturityDate,
    BuyYield,
    SellYield,
    BuyPrice,
    SellPrice,
    BasePrice,
    // Stock
    StockMonth,
    UnitPrice,
    Quantity,
    StockValue,
    // Investors
    InvestorId,
    JoinDate,
    MaritalStatus,
    Gender,
    Profession,
    Age,
    State,
    City,
    Country,
    AccountStatus,
    TradedLast12Months,
    // Operations
    OperationDate,
    BondValue,
    OperationValue,
    OperationType,
    Channel,
    // Sales / buybacks / maturities
    SaleDate,
    BuybackDate,
    Value,
}

impl Column {
    /// Canonical snake_case name of the column.
    pub fn as_str(self) -> &'static str {
        match self {
            Column::ReferenceDate => "reference_date",
            Column::BondType => "bond_type",
            Column::MaturityDate => "maturity_date",
            Column::BuyYield => "buy_yield",
            Column::SellYield => "sell_yield",
            Column::BuyPrice => "buy_price",
            Column::SellPrice => "sell_price",
            Column::BasePrice => "base_price",
            Column::StockMonth => "stock_month",
            Column::UnitPrice => "unit_price",
            Column::Quantity => "quantity",
            Column::StockValue => "stock_value",
            Column::InvestorId => "investor_id",
            Column::JoinDate => "join_date",
            Column::MaritalStatus => "marital_status",
            Column::Gender => "gender",
            Column::Profession => "profession",
            Column::Age => "age",
            Column::State => "state",
            Column::City => "city",
            Column::Country => "country",
            Column::AccountStatus => "account_status",
            Column::TradedLast12Months => "traded_last_12_months",
            Column::OperationDate => "operation_date",
            Column::BondValue => "bond_value",
            Column::OperationValue => "operation_value",
            Column::OperationType => "operation_type",
            Column::Channel => "channel",
            Column::SaleDate => "sale_date",
            Column::BuybackDate => "buyback_date",
            Column::Value => "value",
        }
    }

    /// All members of the vocabulary, in declaration order.
    pub fn all() -> &'static [Column] {
        &[
            Column::ReferenceDate,
            Column::BondType,
            Column::MaturityDate,
            Column::BuyYield,
            Column::SellYield,
            Column::BuyPrice,
            Column::SellPrice,
            Column::BasePrice,
            Column::StockMonth,
            Column::UnitPrice,
            Column::Quantity,
            Column::StockValue,
            Column::InvestorId,
            Column::JoinDate,
            Column::MaritalStatus,
            Column::Gender,
            Column::Profession,
            Column::Age,
            Column::State,
            Column::City,
            Column::Country,
            Column::AccountStatus,
            Column::TradedLast12Months,
            Column::OperationDate,
            Column::BondValue,
            Column::OperationValue,
            Column::OperationType,
            Column::Channel,
            Column::SaleDate,
            Column::BuybackDate,
            Column::Value,
        ]
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::all()
            .iter()
            .copied()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| ModelError::UnknownColumn {
                name: s.to_string(),
            })
    }
}

// Serialized as the canonical name so JSON output matches `as_str` exactly.
impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for column in Column::all() {
            assert_eq!(column.as_str().parse::<Column>().unwrap(), *column);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = Column::all().iter().map(|c| c.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Column::all().len());
    }

    #[test]
    fn serializes_as_the_canonical_name() {
        let json = serde_json::to_string(&Column::TradedLast12Months).unwrap();
        assert_eq!(json, "\"traded_last_12_months\"");
        let back: Column = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Column::TradedLast12Months);
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("Data Base".parse::<Column>().is_err());
        assert!("".parse::<Column>().is_err());
    }
}
