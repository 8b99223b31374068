//! Embedded libSQL backend.
//!
//! All categories share one `submissions` table. Insertion order is kept in
//! the `seq` column so reads come back newest first, matching the JSON file
//! backend.

use lead_core::enums::{Category, SubmissionStatus};
use lead_core::submission::Submission;
use libsql::Builder;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::error::StoreError;

const MIGRATION_001: &str = r"
CREATE TABLE IF NOT EXISTS submissions (
    seq          INTEGER PRIMARY KEY AUTOINCREMENT,
    category     TEXT NOT NULL,
    id           TEXT NOT NULL,
    submitted_at TEXT NOT NULL,
    status       TEXT NOT NULL DEFAULT 'new'
                 CHECK (status IN ('new', 'contacted', 'closed')),
    payload      TEXT NOT NULL DEFAULT '{}',
    UNIQUE (category, id)
);

CREATE INDEX IF NOT EXISTS idx_submissions_category_seq
    ON submissions (category, seq DESC);
";

/// Handle to the embedded submissions database.
pub struct LibsqlStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    write_lock: Mutex<()>,
}

impl LibsqlStore {
    /// Open a local database at `path` (or `":memory:"`), running migrations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations
    /// fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let store = Self {
            db,
            conn,
            write_lock: Mutex::new(()),
        };
        store.run_migrations().await?;
        tracing::info!(path, "opened submissions database");
        Ok(store)
    }

    /// Access the underlying connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| StoreError::Migration(format!("001_submissions: {e}")))?;
        Ok(())
    }

    /// Insert a record. The unique `(category, id)` key rejects duplicates.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId` if the id already exists in
    /// `category`.
    pub async fn append(&self, category: Category, record: &Submission) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&record.fields)?;

        let _guard = self.write_lock.lock().await;
        let changed = self
            .conn
            .execute(
                "INSERT INTO submissions (category, id, submitted_at, status, payload)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (category, id) DO NOTHING",
                libsql::params![
                    category.as_str(),
                    record.id.as_str(),
                    record.submitted_at.as_str(),
                    record.status.as_str(),
                    payload
                ],
            )
            .await?;

        if changed == 0 {
            return Err(StoreError::DuplicateId {
                category,
                id: record.id.clone(),
            });
        }

        tracing::debug!(%category, id = %record.id, "inserted submission");
        Ok(())
    }

    /// All records of a category, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or a row is malformed.
    pub async fn read_all(&self, category: Category) -> Result<Vec<Submission>, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, submitted_at, status, payload FROM submissions
                 WHERE category = ?1 ORDER BY seq DESC",
                [category.as_str()],
            )
            .await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_submission(&row)?);
        }
        Ok(records)
    }

    /// Look up one record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no record matches.
    pub async fn get(&self, category: Category, id: &str) -> Result<Submission, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, submitted_at, status, payload FROM submissions
                 WHERE category = ?1 AND id = ?2",
                libsql::params![category.as_str(), id],
            )
            .await?;

        let row = rows.next().await?.ok_or_else(|| StoreError::NotFound {
            category,
            id: id.to_string(),
        })?;
        row_to_submission(&row)
    }

    /// Move a stored record to `status` if the state machine allows it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id and
    /// `StoreError::InvalidTransition` for a disallowed change.
    pub async fn update_status(
        &self,
        category: Category,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<Submission, StoreError> {
        let _guard = self.write_lock.lock().await;
        let current = self.get(category, id).await?;

        if !current.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                id: id.to_string(),
                from: current.status,
                to: status,
            });
        }

        self.conn
            .execute(
                "UPDATE submissions SET status = ?1 WHERE category = ?2 AND id = ?3",
                libsql::params![status.as_str(), category.as_str(), id],
            )
            .await?;

        tracing::info!(
            %category,
            id,
            from = %current.status,
            to = %status,
            "submission status changed"
        );
        Ok(Submission { status, ..current })
    }

    /// Number of records in a category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn count(&self, category: Category) -> Result<u64, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT COUNT(*) FROM submissions WHERE category = ?1",
                [category.as_str()],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::InvalidState("COUNT returned no row".into()))?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count).map_err(|e| StoreError::InvalidState(format!("negative count: {e}")))
    }
}

fn row_to_submission(row: &libsql::Row) -> Result<Submission, StoreError> {
    let id = row.get::<String>(0)?;
    let submitted_at = row.get::<String>(1)?;
    let status_raw = row.get::<String>(2)?;
    let payload_raw = row.get::<String>(3)?;

    let status: SubmissionStatus = status_raw
        .parse()
        .map_err(|e| StoreError::InvalidState(format!("submission {id}: {e}")))?;

    let fields = match serde_json::from_str::<Value>(&payload_raw) {
        Ok(Value::Object(map)) => map,
        Ok(Value::Null) => Map::new(),
        Ok(other) => {
            return Err(StoreError::InvalidState(format!(
                "submission {id}: payload is not an object: {other}"
            )));
        }
        Err(e) => {
            return Err(StoreError::InvalidState(format!(
                "submission {id}: invalid payload JSON: {e}"
            )));
        }
    };

    Ok(Submission {
        id,
        submitted_at,
        status,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> LibsqlStore {
        LibsqlStore::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                ["submissions"],
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        assert_eq!(db.count(Category::General).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn bad_status_row_is_invalid_state() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO submissions (category, id, submitted_at, status, payload)
                 VALUES ('general', 'x', '2026-01-01T00:00:00Z', 'new', '[1,2]')",
                (),
            )
            .await
            .unwrap();
        let result = db.read_all(Category::General).await;
        assert!(matches!(result, Err(StoreError::InvalidState(_))));
    }
}
