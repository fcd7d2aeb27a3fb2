//! Task Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Task CRUD plus the bucket queries the
//! board views are built from. Sort-order management lives in
//! `task_positioning`.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection};
use tokio::sync::Mutex;

use super::super::db::DbState;
use super::super::traits::Repository;
use crate::domain::{DomainError, DomainResult, Task};

pub(super) const TASK_COLUMNS: &str =
    "id, title, bucket, completed, sort_order, checkpoints, postpone_count, created_at, completed_at";

/// SQLite implementation of the Task repository
#[derive(Clone)]
pub struct TaskRepository {
    pub(super) conn: Arc<Mutex<Option<Connection>>>,
}

impl TaskRepository {
    pub fn new(db: &DbState) -> Self {
        Self {
            conn: db.conn.clone(),
        }
    }

    /// All tasks of one bucket, completed included, in stable visual
    /// order (sort_order, then id for ties).
    pub async fn list_by_bucket(&self, bucket: &str) -> DomainResult<Vec<Task>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM tasks WHERE bucket = ? ORDER BY sort_order, id",
                TASK_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let mut rows = stmt
            .query(params![bucket])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().map_err(|e| DomainError::Internal(e.to_string()))? {
            tasks.push(row_to_task(row)?);
        }
        Ok(tasks)
    }

    /// Tasks across an inclusive day range. Bucket keys sort
    /// lexicographically in date order; the backlog never matches.
    pub async fn list_by_range(&self, start: &str, end: &str) -> DomainResult<Vec<Task>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM tasks WHERE bucket >= ? AND bucket <= ? AND bucket != 'backlog' ORDER BY bucket, sort_order, id",
                TASK_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let mut rows = stmt
            .query(params![start, end])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().map_err(|e| DomainError::Internal(e.to_string()))? {
            tasks.push(row_to_task(row)?);
        }
        Ok(tasks)
    }
}

#[async_trait]
impl Repository<Task> for TaskRepository {
    async fn create(&self, entity: &Task) -> DomainResult<Task> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let checkpoints = serde_json::to_string(&entity.checkpoints)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        conn.execute(
            "INSERT INTO tasks (title, bucket, completed, sort_order, checkpoints, postpone_count, created_at, completed_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.title,
                entity.bucket,
                entity.completed as i32,
                entity.sort_order,
                checkpoints,
                entity.postpone_count,
                entity.created_at,
                entity.completed_at,
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Task>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS))
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let mut rows = stmt
            .query(params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        match rows.next().map_err(|e| DomainError::Internal(e.to_string()))? {
            Some(row) => Ok(Some(row_to_task(row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Task>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM tasks ORDER BY bucket, sort_order, id",
                TASK_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let mut rows = stmt
            .query([])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().map_err(|e| DomainError::Internal(e.to_string()))? {
            tasks.push(row_to_task(row)?);
        }
        Ok(tasks)
    }

    async fn update(&self, entity: &Task) -> DomainResult<Task> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let checkpoints = serde_json::to_string(&entity.checkpoints)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let changed = conn
            .execute(
                "UPDATE tasks SET title = ?, bucket = ?, completed = ?, sort_order = ?, checkpoints = ?, postpone_count = ?, completed_at = ? WHERE id = ?",
                params![
                    entity.title,
                    entity.bucket,
                    entity.completed as i32,
                    entity.sort_order,
                    checkpoints,
                    entity.postpone_count,
                    entity.completed_at,
                    entity.id,
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("Task {} not found", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute("DELETE FROM tasks WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}

/// Convert a database row to Task
pub(super) fn row_to_task(row: &rusqlite::Row<'_>) -> DomainResult<Task> {
    let checkpoints: String = row.get(5).unwrap_or_else(|_| "[]".to_string());
    Ok(Task {
        id: row
            .get(0)
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        title: row
            .get(1)
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        bucket: row
            .get(2)
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        completed: row.get::<_, i32>(3).unwrap_or(0) != 0,
        sort_order: row.get(4).unwrap_or(0),
        checkpoints: serde_json::from_str(&checkpoints).unwrap_or_default(),
        postpone_count: row.get(6).unwrap_or(0),
        created_at: row.get::<_, Option<i64>>(7).ok().flatten(),
        completed_at: row.get::<_, Option<i64>>(8).ok().flatten(),
    })
}
