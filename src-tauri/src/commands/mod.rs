//! Tauri command handlers

mod task_cmd;

pub use task_cmd::*;
