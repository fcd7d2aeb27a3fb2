//! Tauri Commands for Task CRUD + Scheduling
//!
//! Exposes Task operations to the frontend via Tauri IPC. Mutations emit
//! `tasks-changed` with the list of affected buckets so other views can
//! refresh.

use tauri::{AppHandle, Emitter, State};

use crate::domain::{bucket, Checkpoint, Task};
use crate::repository::{Repository, TaskPositioningOperations};
use crate::AppState;

fn notify_changed(app_handle: &AppHandle, buckets: Vec<String>) {
    if let Err(e) = app_handle.emit("tasks-changed", buckets) {
        tracing::warn!("Failed to emit tasks-changed: {}", e);
    }
}

/// Create a new task, appended at the end of its bucket
#[tauri::command]
pub async fn create_task(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    title: String,
    bucket: Option<String>,
) -> Result<Task, String> {
    let repo = &state.task_repo;

    let target = bucket.unwrap_or_else(|| crate::domain::bucket::BACKLOG.to_string());
    crate::domain::bucket::validate(&target).map_err(|e| e.to_string())?;

    let title = title.trim().to_string();
    if title.is_empty() {
        return Err("Task title cannot be empty".to_string());
    }

    let order = repo.next_order(&target).await.map_err(|e| e.to_string())?;
    let mut task = Task::new(0, title, target.clone(), order);
    task.created_at = Some(chrono::Utc::now().timestamp());

    let created = repo.create(&task).await.map_err(|e| e.to_string())?;
    notify_changed(&app_handle, vec![target]);
    Ok(created)
}

/// Get task by ID
#[tauri::command]
pub async fn get_task(state: State<'_, AppState>, id: u32) -> Result<Option<Task>, String> {
    state.task_repo.find_by_id(id).await.map_err(|e| e.to_string())
}

/// List tasks scheduled for one day, in visual order
#[tauri::command]
pub async fn list_tasks_for_date(
    state: State<'_, AppState>,
    date: String,
) -> Result<Vec<Task>, String> {
    bucket::validate(&date).map_err(|e| e.to_string())?;
    state
        .task_repo
        .list_by_bucket(&date)
        .await
        .map_err(|e| e.to_string())
}

/// List tasks across an inclusive date range (backlog excluded)
#[tauri::command]
pub async fn list_tasks_for_range(
    state: State<'_, AppState>,
    start: String,
    end: String,
) -> Result<Vec<Task>, String> {
    if bucket::parse_day(&start).is_none() || bucket::parse_day(&end).is_none() {
        return Err(format!("not a date range: {}..{}", start, end));
    }
    state
        .task_repo
        .list_by_range(&start, &end)
        .await
        .map_err(|e| e.to_string())
}

/// List unscheduled tasks
#[tauri::command]
pub async fn list_backlog_tasks(state: State<'_, AppState>) -> Result<Vec<Task>, String> {
    state
        .task_repo
        .list_by_bucket(bucket::BACKLOG)
        .await
        .map_err(|e| e.to_string())
}

/// Update task fields (partial). Completing a task stamps completed_at;
/// reopening clears it. Moving between buckets reindexes the source.
#[tauri::command]
pub async fn update_task(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    id: u32,
    title: Option<String>,
    completed: Option<bool>,
    bucket: Option<String>,
    sort_order: Option<i32>,
    postpone_count: Option<i32>,
    checkpoints: Option<Vec<Checkpoint>>,
) -> Result<Task, String> {
    let repo = &state.task_repo;

    let existing = repo
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Task {} not found", id))?;

    if let Some(ref b) = bucket {
        crate::domain::bucket::validate(b).map_err(|e| e.to_string())?;
    }

    let new_completed = completed.unwrap_or(existing.completed);
    let completed_at = match (existing.completed, new_completed) {
        (false, true) => Some(chrono::Utc::now().timestamp()),
        (true, false) => None,
        _ => existing.completed_at,
    };

    let source_bucket = existing.bucket.clone();
    let updated = Task {
        id: existing.id,
        title: title.unwrap_or(existing.title),
        bucket: bucket.unwrap_or(existing.bucket),
        completed: new_completed,
        sort_order: sort_order.unwrap_or(existing.sort_order),
        checkpoints: checkpoints.unwrap_or(existing.checkpoints),
        postpone_count: postpone_count.unwrap_or(existing.postpone_count),
        created_at: existing.created_at,
        completed_at,
    };

    let saved = repo.update(&updated).await.map_err(|e| e.to_string())?;

    let mut affected = vec![saved.bucket.clone()];
    if source_bucket != saved.bucket {
        repo.reindex_bucket(&source_bucket)
            .await
            .map_err(|e| e.to_string())?;
        affected.push(source_bucket);
    }
    notify_changed(&app_handle, affected);
    Ok(saved)
}

/// Toggle task completion. Completing is refused while checkpoints
/// remain open.
#[tauri::command]
pub async fn toggle_task(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    id: u32,
) -> Result<Task, String> {
    let repo = &state.task_repo;

    let mut task = repo
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Task {} not found", id))?;

    if !task.completed {
        task.ensure_completable().map_err(|e| e.to_string())?;
    }

    task.completed = !task.completed;
    task.completed_at = if task.completed {
        Some(chrono::Utc::now().timestamp())
    } else {
        None
    };

    let saved = repo.update(&task).await.map_err(|e| e.to_string())?;

    // Completed tasks sink below the incomplete run
    repo.reindex_bucket(&saved.bucket)
        .await
        .map_err(|e| e.to_string())?;

    notify_changed(&app_handle, vec![saved.bucket.clone()]);
    Ok(saved)
}

/// Delete task and close the gap it leaves
#[tauri::command]
pub async fn delete_task(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    id: u32,
) -> Result<(), String> {
    let repo = &state.task_repo;

    let existing = repo
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Task {} not found", id))?;

    repo.delete(id).await.map_err(|e| e.to_string())?;
    repo.reindex_bucket(&existing.bucket)
        .await
        .map_err(|e| e.to_string())?;

    notify_changed(&app_handle, vec![existing.bucket]);
    Ok(())
}

/// Push a task to the next day, counting the postponement
#[tauri::command]
pub async fn move_task_to_tomorrow(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    id: u32,
) -> Result<Task, String> {
    shift_task_day(&app_handle, &state, id, 1).await
}

/// Pull a task back to the previous day
#[tauri::command]
pub async fn move_task_to_yesterday(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    id: u32,
) -> Result<Task, String> {
    shift_task_day(&app_handle, &state, id, -1).await
}

async fn shift_task_day(
    app_handle: &AppHandle,
    state: &State<'_, AppState>,
    id: u32,
    direction: i32,
) -> Result<Task, String> {
    let repo = &state.task_repo;

    let mut task = repo
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Task {} not found", id))?;

    if task.is_backlog() {
        return Err("Backlog tasks have no day to shift from".to_string());
    }

    let source = task.bucket.clone();
    let target = if direction > 0 {
        bucket::next_day(&source)
    } else {
        bucket::prev_day(&source)
    }
    .ok_or_else(|| format!("not a day bucket: {}", source))?;

    task.bucket = target.clone();
    task.sort_order = repo.next_order(&target).await.map_err(|e| e.to_string())?;
    task.postpone_count = (task.postpone_count + direction).max(0);

    let saved = repo.update(&task).await.map_err(|e| e.to_string())?;
    repo.reindex_bucket(&source)
        .await
        .map_err(|e| e.to_string())?;

    notify_changed(app_handle, vec![source, target]);
    Ok(saved)
}
