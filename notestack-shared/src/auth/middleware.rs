/// Authorization guard middleware for Axum
///
/// This module provides the single authorization chokepoint for the API:
/// a middleware that validates the bearer token, decodes the caller's
/// identity claims, optionally enforces a required-role list, and attaches
/// an [`AuthContext`] to the request for downstream handlers.
///
/// The guard is constructed once per required-role set via [`require_auth`]
/// and composed into the router ahead of each protected route group.
///
/// # Request Extensions
///
/// After successful authentication the middleware adds:
/// - `AuthContext`: user_id, tenant_id, and role from verified claims
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use notestack_shared::auth::middleware::{require_auth, AuthContext};
/// use notestack_shared::models::user::UserRole;
///
/// async fn protected(Extension(auth): Extension<AuthContext>) -> String {
///     format!("tenant {}", auth.tenant_id)
/// }
///
/// let app: Router = Router::new()
///     .route("/notes", get(protected))
///     .layer(middleware::from_fn(require_auth("your-jwt-secret", &[])));
///
/// // Admin-only group:
/// let _ = require_auth("your-jwt-secret", &[UserRole::Admin]);
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};
use crate::models::user::UserRole;

/// Authentication context added to request extensions
///
/// Handlers extract it with Axum's `Extension` extractor. Every
/// tenant-scoped query must filter by `tenant_id` taken from here, never
/// from client input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// The caller's tenant
    pub tenant_id: Uuid,

    /// The caller's role within the tenant
    pub role: UserRole,
}

impl AuthContext {
    /// Creates an auth context from verified JWT claims
    pub fn from_claims(claims: &super::jwt::Claims) -> Self {
        Self {
            user_id: claims.sub,
            tenant_id: claims.tenant_id,
            role: claims.role,
        }
    }
}

/// Error type for the authorization guard
#[derive(Debug)]
pub enum AuthError {
    /// Missing or non-Bearer authorization header
    MissingToken,

    /// Token validation failed (bad signature, expired, malformed)
    InvalidToken(String),

    /// Token is valid but the role is not in the required-role list
    InsufficientRole,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            AuthError::InsufficientRole => (
                StatusCode::FORBIDDEN,
                "forbidden",
                "Forbidden".to_string(),
            ),
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}

/// Authorization guard middleware
///
/// Validates the bearer token from the `Authorization` header, checks the
/// role against `required_roles` (empty list = any authenticated caller),
/// and injects [`AuthContext`] into request extensions.
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - The Authorization header is absent or not a Bearer token
/// - The token signature, issuer, or expiry check fails
///
/// Returns 403 Forbidden if the token is valid but the role is not in the
/// required list. There is no token refresh: expired tokens fail and the
/// caller must log in again.
pub async fn auth_middleware(
    secret: String,
    required_roles: Vec<UserRole>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingToken)?;

    let claims = validate_token(token, &secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        _ => AuthError::InvalidToken("Invalid token".to_string()),
    })?;

    if !required_roles.is_empty() && !required_roles.contains(&claims.role) {
        return Err(AuthError::InsufficientRole);
    }

    let auth_context = AuthContext::from_claims(&claims);
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

/// Creates an authorization guard closure for a required-role set
///
/// Captures the JWT secret and role list; the returned closure is
/// compatible with `axum::middleware::from_fn`. Construct one guard per
/// role set and reuse it across routes.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::post, Router};
/// use notestack_shared::auth::middleware::require_auth;
/// use notestack_shared::models::user::UserRole;
///
/// let admin_only: Router = Router::new()
///     .route("/tenants/:slug/upgrade", post(|| async { "OK" }))
///     .layer(middleware::from_fn(require_auth("secret", &[UserRole::Admin])));
/// ```
pub fn require_auth(
    secret: impl Into<String>,
    required_roles: &[UserRole],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>,
> + Clone {
    let secret = secret.into();
    let required_roles = required_roles.to_vec();
    move |req, next| {
        let secret = secret.clone();
        let required_roles = required_roles.clone();
        Box::pin(auth_middleware(secret, required_roles, req, next))
    }
}
