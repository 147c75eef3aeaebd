/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Signup (creates a tenant and its first ADMIN user)
/// - Login (issues a 1-hour bearer token)
///
/// # Endpoints
///
/// - `POST /signup` - Register a new account and tenant
/// - `POST /login` - Authenticate and get a token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
};
use axum::extract::State;
use axum::Json;
use notestack_shared::{
    auth::{jwt, password},
    models::{
        tenant::{CreateTenant, Tenant, TenantPlan},
        user::{CreateUser, User, UserRole},
    },
    slug,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Optional account/tenant name; the slug base falls back to the email
    /// local-part when absent
    pub name: Option<String>,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (stored only as an Argon2id hash)
    pub password: String,
}

/// Signup response
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    /// Confirmation message; signup does not auto-login
    pub message: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Tenant info returned alongside the token
///
/// Both fields degrade to null when the tenant lookup fails during login;
/// a broken tenant read must never block token issuance.
#[derive(Debug, Serialize)]
pub struct TenantInfo {
    /// Tenant slug
    pub slug: Option<String>,

    /// Tenant plan
    pub plan: Option<TenantPlan>,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token (1-hour lifetime)
    pub token: String,

    /// The caller's tenant info
    pub tenant: TenantInfo,
}

/// Signup endpoint
///
/// Creates a tenant with a generated unique slug and a first user with role
/// ADMIN. Returns confirmation only; the caller logs in separately.
///
/// # Endpoint
///
/// ```text
/// POST /signup
/// Content-Type: application/json
///
/// {
///   "name": "Acme",
///   "email": "a@acme.test",
///   "password": "secret1"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing or malformed fields
/// - `409 Conflict`: email already registered
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<Json<SignupResponse>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let existing = User::find_by_email(&state.db, &req.email).await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Email already in use".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let slug = slug::generate_unique_slug(&state.db, req.name.as_deref(), &req.email).await?;
    let tenant_name = match req.name {
        Some(ref n) if !n.trim().is_empty() => n.clone(),
        _ => slug
            .rsplit_once('-')
            .map(|(base, _)| base.to_string())
            .unwrap_or_else(|| slug.clone()),
    };

    let tenant = Tenant::create(
        &state.db,
        CreateTenant {
            name: tenant_name,
            slug,
            plan: TenantPlan::Free,
        },
    )
    .await?;

    // A racing signup with the same email still surfaces as 409 via the
    // unique-constraint mapping in ApiError.
    User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            role: UserRole::Admin,
            tenant_id: tenant.id,
        },
    )
    .await?;

    tracing::info!(tenant_id = %tenant.id, slug = %tenant.slug, "New tenant signed up");

    Ok(Json(SignupResponse {
        message: "User created".to_string(),
    }))
}

/// Login endpoint
///
/// Authenticates a user and returns a bearer token plus the tenant's
/// current slug and plan. The error body is identical for an unknown email
/// and a wrong password.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "email": "a@acme.test",
///   "password": "secret1"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "token": "eyJ...",
///   "tenant": { "slug": "acme-x7k2p", "plan": "FREE" }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing fields
/// - `401 Unauthorized`: invalid credentials
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    // Identical error for unknown email and wrong password
    let invalid_credentials = || ApiError::Unauthorized("Invalid credentials".to_string());

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(invalid_credentials());
    }

    let role = user.get_role().unwrap_or(UserRole::Member);
    let claims = jwt::Claims::new(user.id, user.tenant_id, role);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    // Tenant info is best-effort: lookup failure degrades to nulls rather
    // than blocking the login.
    let tenant = match Tenant::find_by_id(&state.db, user.tenant_id).await {
        Ok(Some(t)) => TenantInfo {
            slug: Some(t.slug.clone()),
            plan: t.get_plan(),
        },
        Ok(None) => TenantInfo { slug: None, plan: None },
        Err(e) => {
            tracing::warn!(tenant_id = %user.tenant_id, error = %e, "Tenant lookup failed during login");
            TenantInfo { slug: None, plan: None }
        }
    };

    Ok(Json(LoginResponse { token, tenant }))
}
