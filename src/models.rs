//! Frontend Models
//!
//! Data structures matching backend entities.

use serde::{Deserialize, Serialize};

/// Bucket key for unscheduled tasks (matches backend)
pub const BACKLOG_BUCKET: &str = "backlog";

/// Sub-step inside a task (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub title: String,
    /// Day key "YYYY-MM-DD", or "backlog" for unscheduled tasks
    pub bucket: String,
    pub completed: bool,
    pub sort_order: i32,
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
    #[serde(default)]
    pub postpone_count: i32,
    pub created_at: Option<i64>,
    pub completed_at: Option<i64>,
}

impl Task {
    /// "done/total" progress, None when the task has no checkpoints
    pub fn checkpoint_progress(&self) -> Option<String> {
        if self.checkpoints.is_empty() {
            return None;
        }
        let done = self.checkpoints.iter().filter(|c| c.done).count();
        Some(format!("{}/{}", done, self.checkpoints.len()))
    }
}
