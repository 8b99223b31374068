//! # lead-store
//!
//! Durable append-and-read access to the submission lists.
//!
//! Two backends share one interface:
//! - [`JsonFileStore`]: one pretty-printed JSON array file per category
//!   (`submissions.json`, `contact-submissions.json`), newest first.
//! - [`LibsqlStore`]: a single embedded libSQL database file.
//!
//! [`Stores`] opens whichever backend the configuration selects and routes a
//! [`Category`] to its list.

mod database;
pub mod error;
mod json_file;

use std::sync::Arc;

use lead_config::{StoreBackend, StoreConfig};
use lead_core::enums::{Category, SubmissionStatus};
use lead_core::submission::Submission;

pub use database::LibsqlStore;
pub use error::StoreError;
pub use json_file::JsonFileStore;

/// One category's submission list on either backend.
pub enum SubmissionStore {
    Json(JsonFileStore),
    Libsql {
        db: Arc<LibsqlStore>,
        category: Category,
    },
}

impl SubmissionStore {
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Json(store) => store.category(),
            Self::Libsql { category, .. } => *category,
        }
    }

    /// Make sure the backing list exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file or directory cannot be created.
    pub async fn ensure_store(&self) -> Result<(), StoreError> {
        match self {
            Self::Json(store) => store.ensure_store().await,
            // The table is created by migrations on open.
            Self::Libsql { .. } => Ok(()),
        }
    }

    /// Store a new record at the front of the list.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId` if the id is taken, or a backend
    /// error.
    pub async fn append(&self, record: Submission) -> Result<(), StoreError> {
        match self {
            Self::Json(store) => store.append(record).await,
            Self::Libsql { db, category } => db.append(*category, &record).await,
        }
    }

    /// Every record, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the list cannot be read or parsed.
    pub async fn read_all(&self) -> Result<Vec<Submission>, StoreError> {
        match self {
            Self::Json(store) => store.read_all().await,
            Self::Libsql { db, category } => db.read_all(*category).await,
        }
    }

    /// Apply a status transition to one record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::InvalidTransition`, or
    /// a backend error.
    pub async fn update_status(
        &self,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<Submission, StoreError> {
        match self {
            Self::Json(store) => store.update_status(id, status).await,
            Self::Libsql { db, category } => db.update_status(*category, id, status).await,
        }
    }
}

/// The general and contact lists, opened from configuration.
pub struct Stores {
    backend: StoreBackend,
    general: SubmissionStore,
    contact: SubmissionStore,
}

impl Stores {
    /// Open the configured backend and ensure both lists exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data directory, files or database cannot
    /// be created.
    pub async fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let stores = match config.backend {
            StoreBackend::Json => Self {
                backend: config.backend,
                general: SubmissionStore::Json(JsonFileStore::new(
                    Category::General,
                    config.category_path(Category::General),
                )),
                contact: SubmissionStore::Json(JsonFileStore::new(
                    Category::Contact,
                    config.category_path(Category::Contact),
                )),
            },
            StoreBackend::Libsql => {
                tokio::fs::create_dir_all(&config.data_dir)
                    .await
                    .map_err(|e| StoreError::Io {
                        path: config.data_dir.clone(),
                        source: e,
                    })?;
                let path = config.database_path();
                let db = Arc::new(LibsqlStore::open_local(&path.to_string_lossy()).await?);
                Self::libsql(db)
            }
        };

        stores.general.ensure_store().await?;
        stores.contact.ensure_store().await?;
        tracing::info!(
            backend = ?stores.backend,
            data_dir = %config.data_dir.display(),
            "submission stores ready"
        );
        Ok(stores)
    }

    /// Route both categories to one shared database.
    #[must_use]
    pub fn libsql(db: Arc<LibsqlStore>) -> Self {
        Self {
            backend: StoreBackend::Libsql,
            general: SubmissionStore::Libsql {
                db: Arc::clone(&db),
                category: Category::General,
            },
            contact: SubmissionStore::Libsql {
                db,
                category: Category::Contact,
            },
        }
    }

    #[must_use]
    pub const fn backend(&self) -> StoreBackend {
        self.backend
    }

    #[must_use]
    pub const fn get(&self, category: Category) -> &SubmissionStore {
        match category {
            Category::General => &self.general,
            Category::Contact => &self.contact,
        }
    }
}
