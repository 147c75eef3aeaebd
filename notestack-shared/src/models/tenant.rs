/// Tenant model and database operations
///
/// This module provides the Tenant model for multi-tenant isolation.
/// Every user and note belongs to exactly one tenant.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tenants (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     slug VARCHAR(255) NOT NULL UNIQUE,
///     plan VARCHAR(50) NOT NULL DEFAULT 'FREE',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT tenants_plan_check CHECK (plan IN ('FREE', 'PRO'))
/// );
/// ```
///
/// The slug is a URL-safe unique identifier generated at signup and never
/// changed afterwards. The plan only moves in one direction: FREE to PRO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Billing plan types
///
/// FREE tenants are capped at 3 notes; PRO tenants are uncapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenantPlan {
    /// Free plan (at most 3 notes)
    #[serde(rename = "FREE")]
    Free,

    /// Professional plan (unlimited notes)
    #[serde(rename = "PRO")]
    Pro,
}

impl TenantPlan {
    /// Converts plan to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantPlan::Free => "FREE",
            TenantPlan::Pro => "PRO",
        }
    }

    /// Parses plan from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "FREE" => Some(TenantPlan::Free),
            "PRO" => Some(TenantPlan::Pro),
            _ => None,
        }
    }
}

/// Tenant model representing an organization/account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tenant {
    /// Unique tenant ID (UUID v4)
    pub id: Uuid,

    /// Organization/account name
    pub name: String,

    /// URL-safe unique identifier, immutable once assigned
    pub slug: String,

    /// Current billing plan ("FREE" or "PRO")
    pub plan: String,

    /// When the tenant was created
    pub created_at: DateTime<Utc>,

    /// When the tenant was last updated
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    /// Gets the parsed plan enum
    pub fn get_plan(&self) -> Option<TenantPlan> {
        TenantPlan::from_str(&self.plan)
    }
}

/// Input for creating a new tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    /// Organization/account name
    pub name: String,

    /// Pre-generated unique slug (see the `slug` module)
    pub slug: String,

    /// Initial billing plan
    pub plan: TenantPlan,
}

impl Tenant {
    /// Creates a new tenant in the database
    ///
    /// # Errors
    ///
    /// Returns an error on slug collision (unique constraint) or if the
    /// database connection fails.
    pub async fn create(pool: &PgPool, data: CreateTenant) -> Result<Self, sqlx::Error> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (name, slug, plan)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, plan, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.slug)
        .bind(data.plan.as_str())
        .fetch_one(pool)
        .await?;

        Ok(tenant)
    }

    /// Finds a tenant by ID
    ///
    /// # Returns
    ///
    /// The tenant if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, name, slug, plan, created_at, updated_at
            FROM tenants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(tenant)
    }

    /// Finds a tenant by slug
    ///
    /// # Returns
    ///
    /// The tenant if found, None otherwise
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, name, slug, plan, created_at, updated_at
            FROM tenants
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(tenant)
    }

    /// Checks whether a slug is already taken
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tenants WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Updates a tenant's plan
    ///
    /// # Returns
    ///
    /// The updated tenant if found, None if the tenant doesn't exist
    pub async fn update_plan(
        pool: &PgPool,
        id: Uuid,
        plan: TenantPlan,
    ) -> Result<Option<Self>, sqlx::Error> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            UPDATE tenants
            SET plan = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, plan, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(plan.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(tenant)
    }

    /// Inserts or updates a tenant by slug
    ///
    /// Seed-only path: existing tenants keep their id and slug; name and
    /// plan are overwritten.
    pub async fn upsert_by_slug(pool: &PgPool, data: CreateTenant) -> Result<Self, sqlx::Error> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (name, slug, plan)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug)
            DO UPDATE SET name = EXCLUDED.name, plan = EXCLUDED.plan, updated_at = NOW()
            RETURNING id, name, slug, plan, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.slug)
        .bind(data.plan.as_str())
        .fetch_one(pool)
        .await?;

        Ok(tenant)
    }

    /// Deletes a tenant by ID
    ///
    /// Cascades to all users and notes owned by the tenant. Used by test
    /// teardown; there is no public API for this.
    ///
    /// # Returns
    ///
    /// True if the tenant was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_plan_as_str() {
        assert_eq!(TenantPlan::Free.as_str(), "FREE");
        assert_eq!(TenantPlan::Pro.as_str(), "PRO");
    }

    #[test]
    fn test_tenant_plan_from_str() {
        assert_eq!(TenantPlan::from_str("FREE"), Some(TenantPlan::Free));
        assert_eq!(TenantPlan::from_str("PRO"), Some(TenantPlan::Pro));
        assert_eq!(TenantPlan::from_str("free"), None);
        assert_eq!(TenantPlan::from_str("enterprise"), None);
    }

    #[test]
    fn test_tenant_plan_serde_wire_form() {
        assert_eq!(serde_json::to_string(&TenantPlan::Free).unwrap(), "\"FREE\"");
        assert_eq!(serde_json::to_string(&TenantPlan::Pro).unwrap(), "\"PRO\"");

        let parsed: TenantPlan = serde_json::from_str("\"PRO\"").unwrap();
        assert_eq!(parsed, TenantPlan::Pro);
    }

    // Integration tests for database operations live in the API crate's
    // tests/ directory against a live database.
}
