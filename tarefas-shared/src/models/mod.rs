/// Database models
///
/// This module contains the two persisted entities and their queries.
///
/// # Models
///
/// - `user`: registered accounts (email is the unique login key)
/// - `task`: to-do items, each owned by exactly one user
///
/// # Example
///
/// ```no_run
/// use tarefas_shared::models::user::{CreateUser, User};
/// use tarefas_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         name: "Alice".to_string(),
///         email: "alice@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
