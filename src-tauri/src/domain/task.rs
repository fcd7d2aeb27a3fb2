//! Task Entity
//!
//! A task belongs to exactly one date bucket (a calendar day, or the
//! backlog) and holds a 1-based integer sort order within it. The bucket
//! key and sort order together define where the task appears on the
//! board; everything else is payload.

use serde::{Deserialize, Serialize};

use super::bucket;
use super::entity::{DomainError, DomainResult, Entity};

/// A sub-step of a task. Opaque to ordering; stored as a JSON column and
/// passed through to the frontend untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (assigned by the database)
    pub id: u32,
    pub title: String,
    /// Date bucket key: `YYYY-MM-DD` or [`bucket::BACKLOG`]
    pub bucket: String,
    pub completed: bool,
    /// 1-based position within the bucket
    pub sort_order: i32,
    pub checkpoints: Vec<Checkpoint>,
    /// How many times the task has been pushed to a later day
    pub postpone_count: i32,
    pub created_at: Option<i64>,
    pub completed_at: Option<i64>,
}

impl Task {
    /// New task at the given position of a bucket.
    pub fn new(id: u32, title: String, bucket: String, sort_order: i32) -> Self {
        Self {
            id,
            title,
            bucket,
            completed: false,
            sort_order,
            checkpoints: Vec::new(),
            postpone_count: 0,
            created_at: None,
            completed_at: None,
        }
    }

    pub fn is_backlog(&self) -> bool {
        self.bucket == bucket::BACKLOG
    }

    /// A task cannot be completed while checkpoints remain open.
    pub fn ensure_completable(&self) -> DomainResult<()> {
        let open = self.checkpoints.iter().filter(|c| !c.done).count();
        if open > 0 {
            return Err(DomainError::Conflict(format!(
                "task {} has {} unfinished checkpoint(s)",
                self.id, open
            )));
        }
        Ok(())
    }
}

impl Entity for Task {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new(1, "Write report".to_string(), "2026-08-24".to_string(), 3);
        assert_eq!(task.id(), 1);
        assert_eq!(task.sort_order, 3);
        assert!(!task.completed);
        assert!(!task.is_backlog());
        assert!(task.checkpoints.is_empty());
    }

    #[test]
    fn test_backlog_task() {
        let task = Task::new(2, "Someday".to_string(), bucket::BACKLOG.to_string(), 1);
        assert!(task.is_backlog());
    }

    #[test]
    fn test_completion_blocked_by_open_checkpoints() {
        let mut task = Task::new(1, "Ship it".to_string(), "2026-08-24".to_string(), 1);
        task.checkpoints = vec![
            Checkpoint { id: 1, text: "draft".to_string(), done: true },
            Checkpoint { id: 2, text: "review".to_string(), done: false },
        ];
        assert!(matches!(
            task.ensure_completable(),
            Err(DomainError::Conflict(_))
        ));

        task.checkpoints[1].done = true;
        assert!(task.ensure_completable().is_ok());
    }

    #[test]
    fn test_ipc_field_names_are_camel_case() {
        let task = Task::new(1, "x".to_string(), "2026-08-24".to_string(), 1);
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("sortOrder").is_some());
        assert!(json.get("postponeCount").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
