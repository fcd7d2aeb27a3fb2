//! Repository Layer
//!
//! Data access abstractions and the SQLite implementation.

mod traits;
mod db;
mod task;

#[cfg(test)]
mod tests;

pub use traits::Repository;
pub use db::{init_db, DbState};
pub use task::{TaskPositioningOperations, TaskRepository};
