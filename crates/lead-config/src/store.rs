//! Submission store configuration.

use std::path::PathBuf;

use lead_core::enums::Category;
use serde::{Deserialize, Serialize};

/// Which persistence engine backs the submission lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// One pretty-printed JSON array file per category.
    #[default]
    Json,
    /// A single embedded libSQL database file.
    Libsql,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_database_file() -> String {
    "leaddesk.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory holding the JSON files or the database file.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Database file name inside `data_dir` (libsql backend only).
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
            database_file: default_database_file(),
        }
    }
}

impl StoreConfig {
    /// JSON array file for a category.
    #[must_use]
    pub fn category_path(&self, category: Category) -> PathBuf {
        self.data_dir.join(category.file_name())
    }

    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }
}
