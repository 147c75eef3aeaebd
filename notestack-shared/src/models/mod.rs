/// Database models for NoteStack
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts with per-tenant roles
/// - `tenant`: The multi-tenancy isolation boundary, with plan state
/// - `note`: Tenant-owned notes
///
/// # Example
///
/// ```no_run
/// use notestack_shared::models::tenant::{Tenant, CreateTenant, TenantPlan};
/// use notestack_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let tenant = Tenant::create(&pool, CreateTenant {
///     name: "Acme".to_string(),
///     slug: "acme-x7k2p".to_string(),
///     plan: TenantPlan::Free,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod note;
pub mod tenant;
pub mod user;
