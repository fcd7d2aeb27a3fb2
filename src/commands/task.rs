//! Task Commands
//!
//! Frontend bindings for task-related backend commands.

use wasm_bindgen::prelude::*;
use serde::Serialize;
use crate::models::{Checkpoint, Task};
use super::{invoke, reject_to_string};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
pub struct CreateTaskArgs<'a> {
    pub title: &'a str,
    pub bucket: Option<&'a str>,
}

#[derive(Serialize)]
struct IdArgs {
    id: u32,
}

#[derive(Serialize)]
struct DateArgs<'a> {
    date: &'a str,
}

#[derive(Serialize)]
struct RangeArgs<'a> {
    start: &'a str,
    end: &'a str,
}

/// Partial update; absent fields keep their current value.
#[derive(Serialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskArgs {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postpone_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoints: Option<Vec<Checkpoint>>,
}

// ========================
// Commands
// ========================

pub async fn create_task(title: &str, bucket: Option<&str>) -> Result<Task, String> {
    let js_args = serde_wasm_bindgen::to_value(&CreateTaskArgs { title, bucket })
        .map_err(|e| e.to_string())?;
    let result = invoke("create_task", js_args).await.map_err(reject_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn list_tasks_for_date(date: &str) -> Result<Vec<Task>, String> {
    let js_args = serde_wasm_bindgen::to_value(&DateArgs { date }).map_err(|e| e.to_string())?;
    let result = invoke("list_tasks_for_date", js_args).await.map_err(reject_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn list_tasks_for_range(start: &str, end: &str) -> Result<Vec<Task>, String> {
    let js_args = serde_wasm_bindgen::to_value(&RangeArgs { start, end }).map_err(|e| e.to_string())?;
    let result = invoke("list_tasks_for_range", js_args).await.map_err(reject_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn list_backlog_tasks() -> Result<Vec<Task>, String> {
    let result = invoke("list_backlog_tasks", JsValue::NULL).await.map_err(reject_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn update_task(args: &UpdateTaskArgs) -> Result<Task, String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke("update_task", js_args).await.map_err(reject_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn toggle_task(id: u32) -> Result<Task, String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    let result = invoke("toggle_task", js_args).await.map_err(reject_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn delete_task(id: u32) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    invoke("delete_task", js_args).await.map_err(reject_to_string)?;
    Ok(())
}

pub async fn move_task_to_tomorrow(id: u32) -> Result<Task, String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    let result = invoke("move_task_to_tomorrow", js_args).await.map_err(reject_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn move_task_to_yesterday(id: u32) -> Result<Task, String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    let result = invoke("move_task_to_yesterday", js_args).await.map_err(reject_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
