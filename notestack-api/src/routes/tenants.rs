/// Tenant plan upgrade endpoint
///
/// # Endpoint
///
/// - `POST /tenants/:slug/upgrade` - Flip the tenant's plan FREE -> PRO
///
/// The route sits behind the ADMIN-only guard. An admin may only upgrade
/// their own tenant; the slug is resolved and then checked against the
/// caller's tenant id from verified claims. Upgrading an already-PRO tenant
/// is a no-op success. There is no billing integration and no downgrade
/// path.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use notestack_shared::{
    auth::middleware::AuthContext,
    models::tenant::{Tenant, TenantPlan},
};
use serde::Serialize;

/// Upgrade response
#[derive(Debug, Serialize)]
pub struct UpgradeResponse {
    /// Confirmation message
    pub message: String,
}

/// Upgrade a tenant to the PRO plan
///
/// # Errors
///
/// - `401 Unauthorized`: missing/invalid token (guard)
/// - `403 Forbidden`: caller is not ADMIN (guard) or targets another tenant
/// - `404 Not Found`: no tenant with this slug
pub async fn upgrade(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
) -> ApiResult<Json<UpgradeResponse>> {
    let tenant = Tenant::find_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tenant not found".to_string()))?;

    if tenant.id != auth.tenant_id {
        return Err(ApiError::Forbidden("Forbidden".to_string()));
    }

    if tenant.get_plan() == Some(TenantPlan::Pro) {
        return Ok(Json(UpgradeResponse {
            message: "Already on Pro".to_string(),
        }));
    }

    Tenant::update_plan(&state.db, tenant.id, TenantPlan::Pro)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tenant not found".to_string()))?;

    tracing::info!(tenant_id = %tenant.id, slug = %tenant.slug, "Tenant upgraded to Pro");

    Ok(Json(UpgradeResponse {
        message: "Upgraded to Pro. Note limits lifted.".to_string(),
    }))
}
