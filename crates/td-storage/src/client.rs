//! Interface to the retrieval collaborator.
//!
//! Transport, retries and progress display live outside this workspace; the
//! core only fixes the contract: resources are listed with their portal
//! metadata, and downloads land on disk under names derived by the filename
//! codec so the snapshot resolver can order them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::filename::generate_filename;

/// One downloadable resource as advertised by the open-data portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteResource {
    /// Human-readable resource name; the slug is derived from it.
    pub name: String,
    pub url: String,
    /// Portal modification instant (ISO 8601), when the listing carries one.
    pub last_modified: Option<String>,
}

/// Fetches dataset resources from the portal. Implemented outside the core.
pub trait RetrievalClient {
    /// Lists the resources published for one dataset.
    fn list_resources(&self, dataset: &str) -> anyhow::Result<Vec<RemoteResource>>;

    /// Streams one resource to `dest`, returning the written path.
    ///
    /// Implementations are expected to write to the path produced by
    /// [`destination_path`] and to skip the download when that snapshot
    /// already exists.
    fn fetch(&self, resource: &RemoteResource, dest: &Path) -> anyhow::Result<PathBuf>;
}

/// Snapshot path a resource download should land on.
pub fn destination_path(data_dir: &Path, resource: &RemoteResource) -> PathBuf {
    data_dir.join(generate_filename(
        &resource.name,
        resource.last_modified.as_deref(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_follows_the_codec() {
        let resource = RemoteResource {
            name: "Vendas do Tesouro Direto".to_string(),
            url: "https://example.invalid/vendas.csv".to_string(),
            last_modified: Some("2024-06-30T08:15:00.000000".to_string()),
        };
        let path = destination_path(Path::new("/data"), &resource);
        assert_eq!(
            path,
            Path::new("/data/vendas-do-tesouro-direto@20240630T081500.csv")
        );
    }
}
