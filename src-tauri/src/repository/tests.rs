//! Repository Integration Tests
//!
//! TaskRepository against an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::domain::{bucket, Task};
    use crate::repository::{init_db, DbState, Repository, TaskPositioningOperations, TaskRepository};

    async fn setup_test_repo() -> TaskRepository {
        let conn = init_db(&PathBuf::from(":memory:")).expect("Failed to init test DB");
        let db_state = DbState::new();
        db_state.set(conn).await;
        TaskRepository::new(&db_state)
    }

    fn task(title: &str, bucket: &str, order: i32) -> Task {
        Task::new(0, title.to_string(), bucket.to_string(), order)
    }

    #[tokio::test]
    async fn test_create_task() {
        let repo = setup_test_repo().await;

        let created = repo
            .create(&task("Write report", "2026-08-24", 1))
            .await
            .expect("Failed to create");

        assert!(created.id > 0);
        assert_eq!(created.title, "Write report");
        assert_eq!(created.bucket, "2026-08-24");
        assert!(!created.completed);
    }

    #[tokio::test]
    async fn test_uninitialized_db_reports_error() {
        let repo = TaskRepository::new(&DbState::new());
        assert!(repo.list().await.is_err());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = setup_test_repo().await;

        let created = repo.create(&task("Find me", "2026-08-24", 1)).await.unwrap();

        let found = repo.find_by_id(created.id).await.expect("Find failed");
        assert_eq!(found.unwrap().title, "Find me");

        let missing = repo.find_by_id(9999).await.expect("Find failed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_by_bucket_is_sorted() {
        let repo = setup_test_repo().await;

        repo.create(&task("Second", "2026-08-24", 2)).await.unwrap();
        repo.create(&task("First", "2026-08-24", 1)).await.unwrap();
        repo.create(&task("Elsewhere", "2026-08-25", 1)).await.unwrap();

        let tasks = repo.list_by_bucket("2026-08-24").await.expect("List failed");
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_list_by_range_excludes_backlog() {
        let repo = setup_test_repo().await;

        repo.create(&task("Mon", "2026-08-24", 1)).await.unwrap();
        repo.create(&task("Sun", "2026-08-30", 1)).await.unwrap();
        repo.create(&task("Next week", "2026-08-31", 1)).await.unwrap();
        repo.create(&task("Someday", bucket::BACKLOG, 1)).await.unwrap();

        let tasks = repo
            .list_by_range("2026-08-24", "2026-08-30")
            .await
            .expect("Range failed");
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Mon", "Sun"]);
    }

    #[tokio::test]
    async fn test_update_task() {
        let repo = setup_test_repo().await;

        let mut created = repo.create(&task("Original", "2026-08-24", 1)).await.unwrap();
        created.title = "Updated".to_string();
        created.bucket = "2026-08-25".to_string();
        created.sort_order = 4;

        let updated = repo.update(&created).await.expect("Update failed");
        assert_eq!(updated.title, "Updated");

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.bucket, "2026-08-25");
        assert_eq!(found.sort_order, 4);
    }

    #[tokio::test]
    async fn test_update_missing_task_is_not_found() {
        let repo = setup_test_repo().await;
        let ghost = Task::new(42, "Ghost".to_string(), "2026-08-24".to_string(), 1);
        assert!(repo.update(&ghost).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_task() {
        let repo = setup_test_repo().await;

        let created = repo.create(&task("To delete", "2026-08-24", 1)).await.unwrap();
        repo.delete(created.id).await.expect("Delete failed");

        let found = repo.find_by_id(created.id).await.expect("Find failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_next_order_appends() {
        let repo = setup_test_repo().await;

        assert_eq!(repo.next_order("2026-08-24").await.unwrap(), 1);
        repo.create(&task("A", "2026-08-24", 1)).await.unwrap();
        repo.create(&task("B", "2026-08-24", 2)).await.unwrap();
        assert_eq!(repo.next_order("2026-08-24").await.unwrap(), 3);
        assert_eq!(repo.next_order("2026-08-25").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_reindex_closes_gaps() {
        let repo = setup_test_repo().await;

        let a = repo.create(&task("A", "2026-08-24", 1)).await.unwrap();
        repo.create(&task("B", "2026-08-24", 2)).await.unwrap();
        repo.create(&task("C", "2026-08-24", 3)).await.unwrap();

        repo.delete(a.id).await.unwrap();
        repo.reindex_bucket("2026-08-24").await.expect("Reindex failed");

        let tasks = repo.list_by_bucket("2026-08-24").await.unwrap();
        let orders: Vec<i32> = tasks.iter().map(|t| t.sort_order).collect();
        assert_eq!(orders, vec![1, 2]);
        assert_eq!(tasks[0].title, "B");
    }

    #[tokio::test]
    async fn test_reindex_keeps_completed_after_incomplete() {
        let repo = setup_test_repo().await;

        let mut done = repo.create(&task("Done", "2026-08-24", 1)).await.unwrap();
        repo.create(&task("Open", "2026-08-24", 2)).await.unwrap();
        done.completed = true;
        repo.update(&done).await.unwrap();

        repo.reindex_bucket("2026-08-24").await.unwrap();

        let tasks = repo.list_by_bucket("2026-08-24").await.unwrap();
        assert_eq!(tasks[0].title, "Open");
        assert_eq!(tasks[0].sort_order, 1);
        assert_eq!(tasks[1].title, "Done");
        assert_eq!(tasks[1].sort_order, 2);
    }

    #[tokio::test]
    async fn test_checkpoints_round_trip_through_json_column() {
        let repo = setup_test_repo().await;

        let mut t = task("With steps", "2026-08-24", 1);
        t.checkpoints = vec![crate::domain::Checkpoint {
            id: 1,
            text: "part one".to_string(),
            done: false,
        }];
        let created = repo.create(&t).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.checkpoints.len(), 1);
        assert_eq!(found.checkpoints[0].text, "part one");
    }
}
