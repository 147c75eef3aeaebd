/// User model and database operations
///
/// This module provides the User model and the operations the auth flows
/// need. Every user belongs to exactly one tenant and carries a role that
/// the authorization guard checks per request.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     role VARCHAR(50) NOT NULL DEFAULT 'MEMBER',
///     tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_role_check CHECK (role IN ('ADMIN', 'MEMBER'))
/// );
/// ```
///
/// Users are created at signup (role ADMIN) or by the seed binary
/// (ADMIN/MEMBER). Outside the seed path a user record is never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Per-tenant user roles
///
/// ADMIN can upgrade the tenant's plan; MEMBER can only work with notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Can manage the tenant (plan upgrade) in addition to notes
    #[serde(rename = "ADMIN")]
    Admin,

    /// Can create and manage notes within the tenant
    #[serde(rename = "MEMBER")]
    Member,
}

impl UserRole {
    /// Converts role to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Member => "MEMBER",
        }
    }

    /// Parses role from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(UserRole::Admin),
            "MEMBER" => Some(UserRole::Member),
            _ => None,
        }
    }
}

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Role within the owning tenant ("ADMIN" or "MEMBER")
    pub role: String,

    /// The tenant this user belongs to
    pub tenant_id: Uuid,

    /// When the user account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Gets the parsed role enum
    pub fn get_role(&self) -> Option<UserRole> {
        UserRole::from_str(&self.role)
    }
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT a plaintext password!)
    pub password_hash: String,

    /// Role within the tenant
    pub role: UserRole,

    /// Owning tenant
    pub tenant_id: Uuid,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// violation) or the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role, tenant_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, role, tenant_id, created_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role.as_str())
        .bind(data.tenant_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, tenant_id, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Inserts or updates a user by email
    ///
    /// Seed-only path, and the one place a user record is mutated: an
    /// existing user's role, password hash, and tenant are overwritten.
    pub async fn upsert_by_email(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role, tenant_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email)
            DO UPDATE SET password_hash = EXCLUDED.password_hash,
                          role = EXCLUDED.role,
                          tenant_id = EXCLUDED.tenant_id
            RETURNING id, email, password_hash, role, tenant_id, created_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role.as_str())
        .bind(data.tenant_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_as_str() {
        assert_eq!(UserRole::Admin.as_str(), "ADMIN");
        assert_eq!(UserRole::Member.as_str(), "MEMBER");
    }

    #[test]
    fn test_user_role_from_str() {
        assert_eq!(UserRole::from_str("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_str("MEMBER"), Some(UserRole::Member));
        assert_eq!(UserRole::from_str("admin"), None);
        assert_eq!(UserRole::from_str("owner"), None);
    }

    #[test]
    fn test_user_role_serde_wire_form() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");

        let parsed: UserRole = serde_json::from_str("\"MEMBER\"").unwrap();
        assert_eq!(parsed, UserRole::Member);
    }

    #[test]
    fn test_get_role_parses_stored_value() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: "ADMIN".to_string(),
            tenant_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        assert_eq!(user.get_role(), Some(UserRole::Admin));
    }
}
