/// Note model and database operations
///
/// This module provides the Note model and its tenant-scoped CRUD
/// operations. Every query here takes the tenant id from the caller's
/// verified claims; a note belonging to another tenant is indistinguishable
/// from a note that does not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notes (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     content TEXT NOT NULL,
///     tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use notestack_shared::models::note::{Note, CreateNote};
/// use notestack_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(tenant_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let note = Note::create(&pool, CreateNote {
///     tenant_id,
///     title: "Standup".to_string(),
///     content: "Ship the upgrade flow".to_string(),
/// }).await?;
///
/// let notes = Note::list_for_tenant(&pool, tenant_id).await?;
/// assert!(notes.iter().any(|n| n.id == note.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Note model, owned by exactly one tenant and never reassigned
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Unique note ID (UUID v4)
    pub id: Uuid,

    /// Note title
    pub title: String,

    /// Note body
    pub content: String,

    /// Owning tenant
    pub tenant_id: Uuid,

    /// When the note was created (server-set)
    pub created_at: DateTime<Utc>,

    /// When the note was last updated (server-set, refreshed on update)
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNote {
    /// Owning tenant (from verified claims, never client input)
    pub tenant_id: Uuid,

    /// Note title
    pub title: String,

    /// Note body
    pub content: String,
}

/// Input for updating an existing note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNote {
    /// New title
    pub title: String,

    /// New body
    pub content: String,
}

impl Note {
    /// Creates a new note with server-set timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if the tenant does not exist (foreign key) or the
    /// database connection fails.
    pub async fn create(pool: &PgPool, data: CreateNote) -> Result<Self, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (title, content, tenant_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, tenant_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.content)
        .bind(data.tenant_id)
        .fetch_one(pool)
        .await?;

        Ok(note)
    }

    /// Finds a note by ID within a tenant
    ///
    /// # Returns
    ///
    /// The note if it exists and belongs to `tenant_id`, None otherwise.
    /// A cross-tenant id yields None, same as a nonexistent one.
    pub async fn find_for_tenant(
        pool: &PgPool,
        id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, title, content, tenant_id, created_at, updated_at
            FROM notes
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Lists all notes for a tenant, most recently updated first
    pub async fn list_for_tenant(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, title, content, tenant_id, created_at, updated_at
            FROM notes
            WHERE tenant_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(pool)
        .await?;

        Ok(notes)
    }

    /// Overwrites a note's title and content, refreshing updated_at
    ///
    /// # Returns
    ///
    /// The updated note, or None if no note with this id exists in the
    /// tenant.
    pub async fn update_for_tenant(
        pool: &PgPool,
        id: Uuid,
        tenant_id: Uuid,
        data: UpdateNote,
    ) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = $3, content = $4, updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING id, title, content, tenant_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(data.title)
        .bind(data.content)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Deletes a note within a tenant
    ///
    /// # Returns
    ///
    /// True if a note was deleted, false if no note with this id exists in
    /// the tenant.
    pub async fn delete_for_tenant(
        pool: &PgPool,
        id: Uuid,
        tenant_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts notes owned by a tenant
    pub async fn count_for_tenant(pool: &PgPool, tenant_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
