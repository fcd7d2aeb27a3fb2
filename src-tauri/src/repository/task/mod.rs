//! Task repository
//!
//! Core CRUD in `task_repo`, sort-order management in `task_positioning`.

mod task_repo;
mod task_positioning;

pub use task_positioning::TaskPositioningOperations;
pub use task_repo::TaskRepository;
