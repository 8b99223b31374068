//! JSON-array file backend.
//!
//! Each category lives in one pretty-printed JSON array, newest record first.
//! Writers are serialized by an in-process mutex and every rewrite goes
//! through a temp file in the same directory followed by a rename, so readers
//! never observe a half-written array.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use lead_core::enums::{Category, SubmissionStatus};
use lead_core::submission::Submission;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// A submission list backed by a single JSON file.
pub struct JsonFileStore {
    category: Category,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(category: Category, path: impl Into<PathBuf>) -> Self {
        Self {
            category,
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Create the containing directory and an empty array file if missing.
    ///
    /// Never overwrites an existing file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory or file cannot be created.
    pub async fn ensure_store(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| StoreError::io(dir, e))?;
        }

        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(mut file) => {
                use tokio::io::AsyncWriteExt;
                file.write_all(b"[]")
                    .await
                    .map_err(|e| StoreError::io(&self.path, e))?;
                file.flush()
                    .await
                    .map_err(|e| StoreError::io(&self.path, e))?;
                tracing::debug!(path = %self.path.display(), "created empty submission store");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    /// Read the full array, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read and
    /// `StoreError::Parse` if it is not a JSON array of submissions.
    pub async fn read_all(&self) -> Result<Vec<Submission>, StoreError> {
        self.ensure_store().await?;
        self.read_file().await
    }

    /// Insert `record` at the front of the array and write it back.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId` if the id is already stored, or an
    /// I/O or parse error. A file that fails to parse is left untouched.
    pub async fn append(&self, record: Submission) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.ensure_store().await?;

        let mut records = self.read_file().await?;
        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId {
                category: self.category,
                id: record.id,
            });
        }

        let id = record.id.clone();
        records.insert(0, record);
        self.write_file(&records).await?;

        tracing::debug!(
            category = %self.category,
            id = %id,
            total = records.len(),
            "appended submission"
        );
        Ok(())
    }

    /// Move a stored record to `status` if the state machine allows it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id and
    /// `StoreError::InvalidTransition` for a disallowed change.
    pub async fn update_status(
        &self,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<Submission, StoreError> {
        let _guard = self.write_lock.lock().await;
        self.ensure_store().await?;

        let mut records = self.read_file().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound {
                category: self.category,
                id: id.to_string(),
            })?;

        if !record.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                id: id.to_string(),
                from: record.status,
                to: status,
            });
        }

        let from = record.status;
        record.status = status;
        let updated = record.clone();
        self.write_file(&records).await?;

        tracing::info!(
            category = %self.category,
            id,
            %from,
            to = %status,
            "submission status changed"
        );
        Ok(updated)
    }

    async fn read_file(&self) -> Result<Vec<Submission>, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_file(&self, records: &[Submission]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.temp_path();

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::io(&self.path, e));
        }
        Ok(())
    }

    /// Sibling temp file, so the rename stays on one filesystem.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "submissions".into(), |n| n.to_string_lossy().into_owned());
        self.path
            .with_file_name(format!(".{name}.{}.tmp", std::process::id()))
    }
}
