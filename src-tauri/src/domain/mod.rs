//! Domain Layer
//!
//! Core entities and business rules. No dependency on the storage or
//! command layers (serde only, for IPC serialization).

mod entity;
mod task;
pub mod bucket;

pub use entity::{DomainError, DomainResult, Entity};
pub use task::{Checkpoint, Task};
