//! Snapshot file naming and latest-version resolution.
//!
//! Raw downloads are versioned on disk as `<slug>@<YYYYMMDDTHHMMSS>.csv`.
//! This crate owns both directions of that convention: deriving names for
//! new downloads and selecting or enumerating existing snapshots.

pub mod client;
pub mod filename;
pub mod snapshot;

pub use client::{RemoteResource, RetrievalClient, destination_path};
pub use filename::{TIMESTAMP_FORMAT, generate_filename, slugify, split_snapshot_name};
pub use snapshot::{get_latest_file, get_latest_files, list_snapshots, matches_pattern};
