/// Task model and database operations
///
/// Tasks are the core entity of the application: a title, a two-state
/// status, and the id of the user who owns them. Every query that serves a
/// page filters by owner; the status strings are the Portuguese labels the
/// application has always shown its users.
///
/// # State Machine
///
/// ```text
/// Pendente ⇄ Concluída      (toggled by the owner, an involution)
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id         INTEGER PRIMARY KEY AUTOINCREMENT,
///     title      TEXT NOT NULL,
///     status     TEXT NOT NULL DEFAULT 'Pendente',
///     user_id    INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tarefas_shared::models::task::{CreateTask, Task, TaskStatus};
/// use tarefas_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(
///     &pool,
///     CreateTask {
///         title: "Buy milk".to_string(),
///         user_id: 1,
///     },
/// )
/// .await?;
/// assert_eq!(task.status, TaskStatus::Pending);
///
/// Task::set_status(&pool, task.id, task.status.toggled()).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;

/// Task completion status
///
/// Stored and displayed as the Portuguese labels "Pendente" / "Concluída".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum TaskStatus {
    /// Task has not been completed yet (the status every task starts with)
    #[sqlx(rename = "Pendente")]
    #[serde(rename = "Pendente")]
    Pending,

    /// Task has been completed
    #[sqlx(rename = "Concluída")]
    #[serde(rename = "Concluída")]
    Done,
}

impl TaskStatus {
    /// Converts status to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pendente",
            TaskStatus::Done => "Concluída",
        }
    }

    /// Returns the other status
    ///
    /// Toggling twice returns a task to its original status.
    pub fn toggled(&self) -> TaskStatus {
        match self {
            TaskStatus::Pending => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Pending,
        }
    }
}

/// Task model representing one to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id (SQLite rowid)
    pub id: i64,

    /// Task title
    pub title: String,

    /// Current completion status
    pub status: TaskStatus,

    /// Id of the owning user; immutable after creation
    pub user_id: i64,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// There is deliberately no status field: every task starts as Pending no
/// matter what the caller submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title (required, non-empty at the boundary)
    pub title: String,

    /// Id of the owning user
    pub user_id: i64,
}

impl Task {
    /// Creates a new task owned by `data.user_id`, always starting as Pending
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist (foreign key violation)
    /// or the database is unreachable.
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, user_id)
            VALUES (?, ?)
            RETURNING id, title, status, user_id, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by a user, in insertion order
    pub async fn list_by_owner(
        pool: &SqlitePool,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, status, user_id, created_at
            FROM tasks
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by id
    ///
    /// Returns `None` for an unknown id; the web boundary maps that to a
    /// not-found response. Callers must check `user_id` against the current
    /// user before mutating.
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, status, user_id, created_at
            FROM tasks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Persists a status change
    ///
    /// Returns true if the task existed and was updated. Last write wins
    /// under concurrent toggles; no locking.
    pub async fn set_status(
        pool: &SqlitePool,
        id: i64,
        status: TaskStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a task permanently
    ///
    /// Hard delete: no soft-delete flag, no audit trail. Returns true if a
    /// row was removed.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
