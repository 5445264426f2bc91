//! Bond product families and the alias registry.
//!
//! Published files spell the same bond inconsistently across years (old
//! abbreviations like `NTN-B`, hyphenation and casing variants, the modern
//! `Tesouro ...` product names). The registry collapses every recognized
//! spelling to one canonical family; an unrecognized spelling is a hard
//! error, because downstream aggregation is keyed on this column.
//!
//! The alias table and per-family metadata are configuration, not code: they
//! live in `assets/bonds.json` and can be inspected or overridden without
//! touching reader logic.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

const BONDS_JSON: &str = include_str!("../assets/bonds.json");

/// A government bond product family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BondType {
    /// Prefixed rate (historically LTN).
    Prefixado,
    /// Prefixed rate with semestral interest (NTN-F).
    PrefixadoJuros,
    /// IPCA-indexed principal-only (NTN-B Principal).
    Ipca,
    /// IPCA-indexed with semestral interest (NTN-B).
    IpcaJuros,
    /// Selic-indexed (LFT).
    Selic,
    /// IGPM-indexed with semestral interest (NTN-C, discontinued).
    IgpmJuros,
    /// Income-plan retirement bond (RendA+).
    RendaMais,
    /// Income-plan education bond (Educa+).
    EducaMais,
}

impl BondType {
    /// Canonical product name, as used in the `bond_type` column.
    pub fn name(self) -> &'static str {
        match self {
            BondType::Prefixado => "Tesouro Prefixado",
            BondType::PrefixadoJuros => "Tesouro Prefixado com Juros Semestrais",
            BondType::Ipca => "Tesouro IPCA+",
            BondType::IpcaJuros => "Tesouro IPCA+ com Juros Semestrais",
            BondType::Selic => "Tesouro Selic",
            BondType::IgpmJuros => "Tesouro IGPM+ com Juros Semestrais",
            BondType::RendaMais => "Tesouro RendA+",
            BondType::EducaMais => "Tesouro Educa+",
        }
    }

    /// Short historical code for the family (metadata key in the registry).
    pub fn code(self) -> &'static str {
        match self {
            BondType::Prefixado => "LTN",
            BondType::PrefixadoJuros => "NTN-F",
            BondType::Ipca => "NTN-B Principal",
            BondType::IpcaJuros => "NTN-B",
            BondType::Selic => "LFT",
            BondType::IgpmJuros => "NTN-C",
            BondType::RendaMais => "RendA+",
            BondType::EducaMais => "Educa+",
        }
    }

    pub fn all() -> &'static [BondType] {
        &[
            BondType::Prefixado,
            BondType::PrefixadoJuros,
            BondType::Ipca,
            BondType::IpcaJuros,
            BondType::Selic,
            BondType::IgpmJuros,
            BondType::RendaMais,
            BondType::EducaMais,
        ]
    }

    fn from_name(name: &str) -> Option<BondType> {
        BondType::all().iter().copied().find(|b| b.name() == name)
    }

    fn from_code(code: &str) -> Option<BondType> {
        BondType::all().iter().copied().find(|b| b.code() == code)
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-family metadata carried in the registry asset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BondMeta {
    /// Year the family was first offered.
    #[serde(rename = "start-year")]
    pub start_year: u16,
}

/// On-disk shape of `bonds.json`.
#[derive(Debug, Deserialize)]
struct BondFile {
    #[allow(dead_code)]
    description: String,
    aliases: BTreeMap<String, String>,
    metadata: BTreeMap<String, BondMeta>,
}

/// Immutable alias + metadata registry, loaded once per process.
#[derive(Debug, Clone)]
pub struct BondRegistry {
    aliases: BTreeMap<String, BondType>,
    metadata: BTreeMap<BondType, BondMeta>,
}

impl BondRegistry {
    /// The process-wide registry backed by the embedded asset.
    ///
    /// The embedded asset is validated by tests, so this cannot fail at
    /// runtime.
    pub fn global() -> &'static BondRegistry {
        static REGISTRY: OnceLock<BondRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            BondRegistry::from_json(BONDS_JSON, Path::new("assets/bonds.json"))
                .unwrap_or_else(|error| panic!("embedded bond registry is invalid: {error}"))
        })
    }

    /// Loads a registry from an external JSON file (same shape as the
    /// embedded asset), for deployments that need to extend the alias table
    /// without rebuilding.
    pub fn from_path(path: &Path) -> Result<BondRegistry, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::RegistryIo {
            path: path.to_path_buf(),
            source,
        })?;
        BondRegistry::from_json(&raw, path)
    }

    fn from_json(raw: &str, path: &Path) -> Result<BondRegistry, ModelError> {
        let file: BondFile =
            serde_json::from_str(raw).map_err(|source| ModelError::RegistryJson {
                path: path.to_path_buf(),
                source,
            })?;

        let mut aliases = BTreeMap::new();
        for (alias, label) in &file.aliases {
            let bond =
                BondType::from_name(label).ok_or_else(|| ModelError::UnknownBondLabel {
                    alias: alias.clone(),
                    label: label.clone(),
                })?;
            aliases.insert(alias.trim().to_lowercase(), bond);
        }

        let mut metadata = BTreeMap::new();
        for (code, meta) in &file.metadata {
            let bond = BondType::from_code(code).ok_or_else(|| ModelError::UnknownBondLabel {
                alias: code.clone(),
                label: code.clone(),
            })?;
            metadata.insert(bond, *meta);
        }

        Ok(BondRegistry { aliases, metadata })
    }

    /// Resolves any recognized spelling (case-insensitive) to its family.
    ///
    /// Unrecognized spellings fail loudly; an unnormalized value here would
    /// corrupt every aggregation keyed on bond type downstream.
    pub fn resolve(&self, raw: &str) -> Result<BondType, ModelError> {
        let key = raw.trim().to_lowercase();
        self.aliases
            .get(&key)
            .copied()
            .ok_or_else(|| ModelError::UnknownBondType {
                value: raw.trim().to_string(),
            })
    }

    /// Metadata for a family, if the registry carries it.
    pub fn metadata(&self, bond: BondType) -> Option<BondMeta> {
        self.metadata.get(&bond).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_registry_loads() {
        let registry = BondRegistry::global();
        for bond in BondType::all() {
            assert!(
                registry.metadata(*bond).is_some(),
                "missing metadata for {bond}"
            );
        }
    }

    #[test]
    fn canonical_names_resolve_to_themselves() {
        let registry = BondRegistry::global();
        for bond in BondType::all() {
            assert_eq!(registry.resolve(bond.name()).unwrap(), *bond);
        }
    }

    #[test]
    fn historical_spellings_collapse() {
        let registry = BondRegistry::global();
        assert_eq!(registry.resolve("LFT").unwrap(), BondType::Selic);
        assert_eq!(registry.resolve("ntn-b").unwrap(), BondType::IpcaJuros);
        assert_eq!(registry.resolve("NTNB Principal").unwrap(), BondType::Ipca);
        assert_eq!(
            registry.resolve("  tesouro prefixado  ").unwrap(),
            BondType::Prefixado
        );
        assert_eq!(
            registry
                .resolve("Tesouro RendA+ Aposentadoria Extra")
                .unwrap(),
            BondType::RendaMais
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = BondRegistry::global();
        assert_eq!(
            registry.resolve("TESOURO SELIC").unwrap(),
            registry.resolve("tesouro selic").unwrap()
        );
    }

    #[test]
    fn unknown_spelling_is_an_error() {
        let registry = BondRegistry::global();
        let error = registry.resolve("Tesouro Desconhecido").unwrap_err();
        assert!(matches!(error, ModelError::UnknownBondType { .. }));
    }

    #[test]
    fn start_years_are_plausible() {
        let registry = BondRegistry::global();
        let selic = registry.metadata(BondType::Selic).unwrap();
        assert_eq!(selic.start_year, 2002);
        let renda = registry.metadata(BondType::RendaMais).unwrap();
        assert!(renda.start_year >= 2023);
    }
}
