/// Tenant-scoped note CRUD endpoints
///
/// All routes here sit behind the authorization guard; every query is
/// scoped to the tenant id from the caller's verified claims. A note owned
/// by another tenant is reported as 404, identical to a nonexistent one.
///
/// # Endpoints
///
/// - `POST /notes` - Create (plan-limit checked)
/// - `GET /notes` - List, most recently updated first
/// - `GET /notes/:id` - Fetch one
/// - `PUT /notes/:id` - Overwrite title/content
/// - `DELETE /notes/:id` - Delete

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use notestack_shared::{
    auth::middleware::AuthContext,
    models::note::{CreateNote, Note, UpdateNote},
    plan::PlanEnforcer,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Create note request
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,

    /// Note body
    pub content: String,
}

/// Update note request
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    /// New title
    pub title: String,

    /// New body
    pub content: String,
}

/// Note wire form (camelCase for the browser client)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    /// Note ID
    pub id: Uuid,

    /// Note title
    pub title: String,

    /// Note body
    pub content: String,

    /// Owning tenant
    pub tenant_id: Uuid,

    /// Created timestamp (server-set)
    pub created_at: DateTime<Utc>,

    /// Updated timestamp (server-set)
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            tenant_id: note.tenant_id,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// Delete note response
#[derive(Debug, Serialize)]
pub struct DeleteNoteResponse {
    /// Confirmation message
    pub message: String,
}

/// Create note
///
/// Checks the tenant's plan limit first: FREE tenants are capped at 3
/// notes and get a 403 with an upgrade message at the cap.
///
/// # Errors
///
/// - `401 Unauthorized`: missing/invalid token (guard)
/// - `403 Forbidden`: plan limit reached (`plan_limit_reached`)
/// - `404 Not Found`: token references a deleted tenant
pub async fn create_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    let enforcer = PlanEnforcer::new(state.db.clone());
    enforcer.check_note_create(auth.tenant_id).await?;

    let note = Note::create(
        &state.db,
        CreateNote {
            tenant_id: auth.tenant_id,
            title: req.title,
            content: req.content,
        },
    )
    .await?;

    Ok(Json(note.into()))
}

/// List notes for the caller's tenant, most recently updated first
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    let notes = Note::list_for_tenant(&state.db, auth.tenant_id).await?;

    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// Fetch a single note
///
/// # Errors
///
/// - `404 Not Found`: no such note in the caller's tenant
pub async fn get_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NoteResponse>> {
    let note = Note::find_for_tenant(&state.db, id, auth.tenant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(note.into()))
}

/// Overwrite a note's title and content
///
/// Refreshes updated_at on success.
///
/// # Errors
///
/// - `404 Not Found`: no such note in the caller's tenant
pub async fn update_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    let note = Note::update_for_tenant(
        &state.db,
        id,
        auth.tenant_id,
        UpdateNote {
            title: req.title,
            content: req.content,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(note.into()))
}

/// Delete a note
///
/// # Errors
///
/// - `404 Not Found`: no such note in the caller's tenant
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteNoteResponse>> {
    let deleted = Note::delete_for_tenant(&state.db, id, auth.tenant_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Note not found".to_string()));
    }

    Ok(Json(DeleteNoteResponse {
        message: "Note deleted".to_string(),
    }))
}
