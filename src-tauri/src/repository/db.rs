//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations. The connection slot
//! starts empty so the window can come up while the database initializes
//! in the background; repositories report "not initialized" until the
//! slot is filled.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

/// Shared connection slot handed to every repository.
#[derive(Clone)]
pub struct DbState {
    pub(crate) conn: Arc<Mutex<Option<Connection>>>,
}

impl DbState {
    pub fn new() -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /// Install the initialized connection.
    pub async fn set(&self, conn: Connection) {
        *self.conn.lock().await = Some(conn);
    }
}

impl Default for DbState {
    fn default() -> Self {
        Self::new()
    }
}

/// Open the database at `db_path` (`:memory:` for tests) and run
/// migrations.
pub fn init_db(db_path: &Path) -> Result<Connection, String> {
    let conn = Connection::open(db_path).map_err(|e| format!("Failed to open db: {}", e))?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            bucket TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            sort_order INTEGER NOT NULL DEFAULT 0,
            checkpoints TEXT NOT NULL DEFAULT '[]',
            created_at INTEGER,
            completed_at INTEGER
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    // Added after the first release: postpone tracking
    if !column_exists(conn, "tasks", "postpone_count") {
        conn.execute(
            "ALTER TABLE tasks ADD COLUMN postpone_count INTEGER NOT NULL DEFAULT 0",
            [],
        )
        .map_err(|e| format!("Failed to add postpone_count: {}", e))?;
    }

    // Bucket listings are the hot query
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_bucket ON tasks(bucket)",
        [],
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
