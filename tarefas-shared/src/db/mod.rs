/// Database layer
///
/// This module provides the SQLite connection pool and embedded migrations.
///
/// # Modules
///
/// - `pool`: connection pool management with first-run file creation
/// - `migrations`: embedded migration runner (schema created if absent)
///
/// # Example
///
/// ```no_run
/// use tarefas_shared::db::migrations::run_migrations;
/// use tarefas_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite://tarefas.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
