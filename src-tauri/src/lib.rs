//! PlanWeek Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Tauri command handlers

use std::path::PathBuf;

use tauri::{Emitter, Manager};

mod domain;
mod repository;
mod commands;

use repository::{init_db, DbState, TaskRepository};

/// Application state shared across commands
pub struct AppState {
    pub task_repo: TaskRepository,
}

/// Get database path from app handle
fn get_db_path(app_handle: &tauri::AppHandle) -> Result<PathBuf, String> {
    let app_dir = app_handle
        .path()
        .app_data_dir()
        .map_err(|e| format!("Failed to resolve app data dir: {}", e))?;
    std::fs::create_dir_all(&app_dir)
        .map_err(|e| format!("Failed to create app data dir: {}", e))?;
    Ok(app_dir.join("planweek.db"))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle()
                .plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {
                    // Focus the existing window when a new instance tries to start
                    #[cfg(desktop)]
                    if let Some(window) = _app.get_webview_window("main") {
                        let _ = window.set_focus();
                    }
                }))?;

            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "info".into()),
                )
                .init();

            let app_handle = app.handle().clone();
            let db_path = get_db_path(&app_handle)?;

            // Create initial empty DbState (managed)
            let db_state = DbState::new();

            // Manage state IMMEDIATELY so the window comes up before the
            // database is ready
            app.manage(AppState {
                task_repo: TaskRepository::new(&db_state),
            });

            // Initialize database asynchronously in background
            tauri::async_runtime::spawn(async move {
                tracing::info!("Background DB initialization starting");

                match init_db(&db_path) {
                    Ok(conn) => {
                        db_state.set(conn).await;
                        tracing::info!("Database initialized at {}", db_path.display());

                        // Emit event to notify frontend
                        if let Err(e) = app_handle.emit("db-initialized", ()) {
                            tracing::error!("Failed to emit db-initialized: {}", e);
                        }
                    }
                    Err(e) => {
                        tracing::error!("DB init failed: {}", e);
                    }
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::create_task,
            commands::get_task,
            commands::list_tasks_for_date,
            commands::list_tasks_for_range,
            commands::list_backlog_tasks,
            commands::update_task,
            commands::toggle_task,
            commands::delete_task,
            commands::move_task_to_tomorrow,
            commands::move_task_to_yesterday,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_log_filter_parses_default_directive() {
        // Matches the fallback directive used in setup
        assert!(tracing_subscriber::EnvFilter::try_new("info").is_ok());
    }
}
