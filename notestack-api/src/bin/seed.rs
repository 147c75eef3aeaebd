//! Development seed fixtures
//!
//! Upserts two FREE tenants (`acme`, `globex`) and an ADMIN + MEMBER user
//! for each, all with the password `password`. Safe to re-run: tenants are
//! keyed by slug and users by email; the user upsert is the one path that
//! overwrites role/password on an existing account.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://... cargo run -p notestack-api --bin seed
//! ```

use notestack_shared::{
    auth::password::hash_password,
    db::{
        migrations::run_migrations,
        pool::{create_pool, DatabaseConfig},
    },
    models::{
        tenant::{CreateTenant, Tenant, TenantPlan},
        user::{CreateUser, User, UserRole},
    },
};
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn seed_tenant(
    pool: &PgPool,
    name: &str,
    slug: &str,
    password_hash: &str,
) -> anyhow::Result<()> {
    let tenant = Tenant::upsert_by_slug(
        pool,
        CreateTenant {
            name: name.to_string(),
            slug: slug.to_string(),
            plan: TenantPlan::Free,
        },
    )
    .await?;

    for (local_part, role) in [("admin", UserRole::Admin), ("user", UserRole::Member)] {
        User::upsert_by_email(
            pool,
            CreateUser {
                email: format!("{}@{}.test", local_part, slug),
                password_hash: password_hash.to_string(),
                role,
                tenant_id: tenant.id,
            },
        )
        .await?;
    }

    tracing::info!(slug = %tenant.slug, "Seeded tenant with admin and member users");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info,notestack_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Only the database is needed here; no point requiring the full config
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    let pool = create_pool(DatabaseConfig {
        url: database_url,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let password_hash = hash_password("password")?;

    seed_tenant(&pool, "Acme", "acme", &password_hash).await?;
    seed_tenant(&pool, "Globex", "globex", &password_hash).await?;

    tracing::info!("Seed complete: tenants and users");

    pool.close().await;
    Ok(())
}
