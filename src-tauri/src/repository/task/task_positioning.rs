//! Task Positioning Operations
//!
//! Sort-order management within a bucket. The invariant: a bucket's
//! tasks, ordered by `sort_order`, read 1..N with no gaps, incomplete
//! run first and completed tail after it. Reorder commits from the
//! frontend maintain this themselves; `reindex_bucket` restores it after
//! deletions and cross-bucket moves.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult};

/// Trait for task positioning operations
#[async_trait]
pub trait TaskPositioningOperations {
    /// Order for a task appended to a bucket (used in create)
    async fn next_order(&self, bucket: &str) -> DomainResult<i32>;

    /// Rewrite a bucket's sort orders to contiguous 1..N
    async fn reindex_bucket(&self, bucket: &str) -> DomainResult<()>;
}

#[async_trait]
impl TaskPositioningOperations for super::task_repo::TaskRepository {
    async fn next_order(&self, bucket: &str) -> DomainResult<i32> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.query_row(
            "SELECT COALESCE(MAX(sort_order), 0) + 1 FROM tasks WHERE bucket = ?",
            params![bucket],
            |row| row.get(0),
        )
        .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn reindex_bucket(&self, bucket: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        // Current visual order: incomplete before completed, then by
        // existing position, id as the stable tie-break
        let mut ids = Vec::new();
        {
            let mut stmt = conn
                .prepare("SELECT id FROM tasks WHERE bucket = ? ORDER BY completed, sort_order, id")
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            let mut rows = stmt
                .query(params![bucket])
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            while let Some(row) = rows.next().map_err(|e| DomainError::Internal(e.to_string()))? {
                let id: u32 = row.get(0).map_err(|e| DomainError::Internal(e.to_string()))?;
                ids.push(id);
            }
        }

        for (index, id) in ids.iter().enumerate() {
            conn.execute(
                "UPDATE tasks SET sort_order = ? WHERE id = ?",
                params![index as i32 + 1, *id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }

        Ok(())
    }
}
