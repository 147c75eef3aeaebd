/// Health check and service root endpoints
///
/// # Endpoints
///
/// ```text
/// GET /health  -> {"status": "ok"}
/// GET /        -> {"service": "notestack-api", "status": "ok"}
/// ```
///
/// Both are public and side-effect free. The root route exists so the
/// service root answers instead of a 404.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Service root response
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    /// Service name
    pub service: String,

    /// Service status
    pub status: String,
}

/// Health check handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Service root handler
pub async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        service: "notestack-api".to_string(),
        status: "ok".to_string(),
    })
}
