//! The dataset catalog: eight raw CSV shapes as declarative configuration.
//!
//! The readers share one algorithm; what varies per dataset is pure data:
//! the raw-header-to-canonical-column map, how each field is typed, whether
//! the file uses comma decimals, which snapshot glob selects its files and
//! whether history is reconstructed from one snapshot or all of them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use td_model::Column;

/// How a raw field is parsed into a canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Day-first `DD/MM/YYYY` date.
    Date,
    /// Month-only `MM/YYYY` date, normalized to the first of the month.
    /// Kept distinct from [`FieldKind::Date`]: a blanket day-first parser
    /// would read `11/2021` as the 11th of some month.
    MonthDate,
    /// Decimal number (comma decimal separator when the shape says so).
    Float,
    /// Integer count or identifier.
    Int,
    /// Free text.
    Text,
    /// Bond product name, normalized through the alias registry.
    Bond,
    /// Closed-set categorical code, preserved verbatim.
    Code,
}

/// One raw column and its canonical destination.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Header exactly as published in the raw export.
    pub raw: &'static str,
    pub column: Column,
    pub kind: FieldKind,
}

const fn field(raw: &'static str, column: Column, kind: FieldKind) -> FieldSpec {
    FieldSpec { raw, column, kind }
}

/// Parsing configuration for one dataset shape.
#[derive(Debug, Clone, Copy)]
pub struct ShapeSpec {
    pub fields: &'static [FieldSpec],
    /// Whether numeric fields use `,` as the decimal separator (with `.`
    /// permitted only as a thousands separator).
    pub comma_decimal: bool,
}

/// Minimum accepted date for a cutoff-filtered history column.
#[derive(Debug, Clone, Copy)]
pub struct HistoryCutoff {
    pub column: Column,
    year: i32,
    month: u32,
    day: u32,
}

impl HistoryCutoff {
    pub fn date(self) -> NaiveDate {
        // Components are compile-time constants from this module.
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .unwrap_or(NaiveDate::MIN)
    }
}

/// How snapshots of a dataset combine into its logical table.
#[derive(Debug, Clone, Copy)]
pub enum HistoryPolicy {
    /// Only the newest snapshot matters; older ones are superseded copies.
    LatestOnly,
    /// Every snapshot contributes rows; read all of them in ascending
    /// snapshot order and concatenate.
    FullHistory {
        /// Identity key for dropping rows repeated across overlapping
        /// snapshots (first occurrence wins). Empty means no dedup.
        dedup_keys: &'static [Column],
        /// Rows whose cutoff column predates this date are data-entry
        /// artifacts and are discarded.
        cutoff: Option<HistoryCutoff>,
    },
}

const PRICES: ShapeSpec = ShapeSpec {
    fields: &[
        field("Tipo Titulo", Column::BondType, FieldKind::Bond),
        field("Data Vencimento", Column::MaturityDate, FieldKind::Date),
        field("Data Base", Column::ReferenceDate, FieldKind::Date),
        field("Taxa Compra Manha", Column::BuyYield, FieldKind::Float),
        field("Taxa Venda Manha", Column::SellYield, FieldKind::Float),
        field("PU Compra Manha", Column::BuyPrice, FieldKind::Float),
        field("PU Venda Manha", Column::SellPrice, FieldKind::Float),
        field("PU Base Manha", Column::BasePrice, FieldKind::Float),
    ],
    comma_decimal: true,
};

const STOCK: ShapeSpec = ShapeSpec {
    fields: &[
        field("Tipo Titulo", Column::BondType, FieldKind::Bond),
        field("Vencimento do Titulo", Column::MaturityDate, FieldKind::Date),
        field("Mes Estoque", Column::StockMonth, FieldKind::MonthDate),
        field("PU", Column::UnitPrice, FieldKind::Float),
        field("Quantidade", Column::Quantity, FieldKind::Float),
        field("Valor Estoque", Column::StockValue, FieldKind::Float),
    ],
    comma_decimal: true,
};

const INVESTORS: ShapeSpec = ShapeSpec {
    fields: &[
        field("Codigo do Investidor", Column::InvestorId, FieldKind::Int),
        field("Data de Adesao", Column::JoinDate, FieldKind::Date),
        field("Estado Civil", Column::MaritalStatus, FieldKind::Text),
        field("Genero", Column::Gender, FieldKind::Code),
        field("Profissao", Column::Profession, FieldKind::Text),
        field("Idade", Column::Age, FieldKind::Int),
        field("UF do Investidor", Column::State, FieldKind::Text),
        field("Cidade do Investidor", Column::City, FieldKind::Text),
        field("Pais do Investidor", Column::Country, FieldKind::Text),
        field("Situacao da Conta", Column::AccountStatus, FieldKind::Code),
        field("Operou 12 Meses", Column::TradedLast12Months, FieldKind::Code),
    ],
    // The demographic export has no decimal columns at all.
    comma_decimal: false,
};

const OPERATIONS: ShapeSpec = ShapeSpec {
    fields: &[
        field("Codigo do Investidor", Column::InvestorId, FieldKind::Int),
        field("Data da Operacao", Column::OperationDate, FieldKind::Date),
        field("Tipo Titulo", Column::BondType, FieldKind::Bond),
        field("Vencimento do Titulo", Column::MaturityDate, FieldKind::Date),
        field("Quantidade", Column::Quantity, FieldKind::Float),
        field("Valor do Titulo", Column::BondValue, FieldKind::Float),
        field("Valor da Operacao", Column::OperationValue, FieldKind::Float),
        field("Tipo da Operacao", Column::OperationType, FieldKind::Code),
        field("Canal da Operacao", Column::Channel, FieldKind::Code),
    ],
    comma_decimal: true,
};

const SALES: ShapeSpec = ShapeSpec {
    fields: &[
        field("Tipo Titulo", Column::BondType, FieldKind::Bond),
        field("Vencimento do Titulo", Column::MaturityDate, FieldKind::Date),
        field("Data Venda", Column::SaleDate, FieldKind::Date),
        field("PU", Column::UnitPrice, FieldKind::Float),
        field("Quantidade", Column::Quantity, FieldKind::Float),
        field("Valor", Column::Value, FieldKind::Float),
    ],
    comma_decimal: true,
};

const BUYBACKS: ShapeSpec = ShapeSpec {
    fields: &[
        field("Tipo Titulo", Column::BondType, FieldKind::Bond),
        field("Vencimento do Titulo", Column::MaturityDate, FieldKind::Date),
        field("Data Resgate", Column::BuybackDate, FieldKind::Date),
        field("Quantidade", Column::Quantity, FieldKind::Float),
        field("Valor", Column::Value, FieldKind::Float),
    ],
    comma_decimal: true,
};

// Maturities and interest coupons share this shape row for row; only the
// source dataset label differs.
const MATURITIES: ShapeSpec = ShapeSpec {
    fields: &[
        field("Tipo Titulo", Column::BondType, FieldKind::Bond),
        field("Vencimento do Titulo", Column::MaturityDate, FieldKind::Date),
        field("Data Resgate", Column::BuybackDate, FieldKind::Date),
        field("PU", Column::UnitPrice, FieldKind::Float),
        field("Quantidade", Column::Quantity, FieldKind::Float),
        field("Valor", Column::Value, FieldKind::Float),
    ],
    comma_decimal: true,
};

const INVESTOR_JOIN_CUTOFF: HistoryCutoff = HistoryCutoff {
    column: Column::JoinDate,
    year: 2000,
    month: 1,
    day: 1,
};

/// The eight published dataset shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatasetKind {
    Prices,
    Stock,
    Investors,
    Operations,
    Sales,
    Buybacks,
    Maturities,
    InterestCoupons,
}

impl DatasetKind {
    pub fn all() -> &'static [DatasetKind] {
        &[
            DatasetKind::Prices,
            DatasetKind::Stock,
            DatasetKind::Investors,
            DatasetKind::Operations,
            DatasetKind::Sales,
            DatasetKind::Buybacks,
            DatasetKind::Maturities,
            DatasetKind::InterestCoupons,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKind::Prices => "prices",
            DatasetKind::Stock => "stock",
            DatasetKind::Investors => "investors",
            DatasetKind::Operations => "operations",
            DatasetKind::Sales => "sales",
            DatasetKind::Buybacks => "buybacks",
            DatasetKind::Maturities => "maturities",
            DatasetKind::InterestCoupons => "interest-coupons",
        }
    }

    /// Snapshot file pattern for this dataset in a data directory.
    pub fn glob(self) -> &'static str {
        match self {
            DatasetKind::Prices => "taxas-dos-titulos-ofertados*.csv",
            DatasetKind::Stock => "estoque-do-tesouro-direto*.csv",
            DatasetKind::Investors => "investidores-do-tesouro-direto-*.csv",
            DatasetKind::Operations => "operacoes-do-tesouro-direto-*.csv",
            DatasetKind::Sales => "vendas-do-tesouro-direto-*.csv",
            DatasetKind::Buybacks => "recompras-do-tesouro-direto*.csv",
            DatasetKind::Maturities => "vencimentos-do-tesouro-direto*.csv",
            DatasetKind::InterestCoupons => {
                "pagamento-de-cupom-de-juros-do-tesouro-direto*.csv"
            }
        }
    }

    pub fn shape(self) -> &'static ShapeSpec {
        match self {
            DatasetKind::Prices => &PRICES,
            DatasetKind::Stock => &STOCK,
            DatasetKind::Investors => &INVESTORS,
            DatasetKind::Operations => &OPERATIONS,
            DatasetKind::Sales => &SALES,
            DatasetKind::Buybacks => &BUYBACKS,
            // Deliberate aliasing: coupons reuse the maturities shape.
            DatasetKind::Maturities | DatasetKind::InterestCoupons => &MATURITIES,
        }
    }

    pub fn history(self) -> HistoryPolicy {
        match self {
            DatasetKind::Investors => HistoryPolicy::FullHistory {
                dedup_keys: &[Column::InvestorId, Column::JoinDate],
                cutoff: Some(INVESTOR_JOIN_CUTOFF),
            },
            // Operations snapshots are assumed append-only and
            // non-overlapping, so no dedup key applies; load_history logs
            // per-snapshot row counts to keep an overlap diagnosable.
            DatasetKind::Operations => HistoryPolicy::FullHistory {
                dedup_keys: &[],
                cutoff: None,
            },
            _ => HistoryPolicy::LatestOnly,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown dataset: {s}"))
    }
}
