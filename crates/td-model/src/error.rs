use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unknown canonical column: {name}")]
    UnknownColumn { name: String },

    #[error("unknown bond type spelling: {value:?}")]
    UnknownBondType { value: String },

    #[error("bond registry maps alias {alias:?} to unknown family {label:?}")]
    UnknownBondLabel { alias: String, label: String },

    #[error("failed to read bond registry {path}: {source}")]
    RegistryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse bond registry {path}: {source}")]
    RegistryJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
