//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Where promotions are persisted.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Path of the JSON file backing the storage medium
    #[arg(
        long,
        global = true,
        env = "PHARMAPLUS_STORAGE_PATH",
        default_value = "pharmaplus-storage.json"
    )]
    /// Path of the JSON file backing the storage medium.
    pub storage_path: PathBuf,
}
