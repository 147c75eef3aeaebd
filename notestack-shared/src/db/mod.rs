/// Database layer for NoteStack
///
/// This module provides database connection pooling and migrations.
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a process-wide shared handle
/// - `migrations`: Database migration runner
///
/// # Example
///
/// ```no_run
/// use notestack_shared::db::pool::{init_shared_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = init_shared_pool(config).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
