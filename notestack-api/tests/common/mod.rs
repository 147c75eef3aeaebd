/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - Test tenant/user creation
/// - JWT token generation
/// - Request/response helpers
///
/// Tests require a running PostgreSQL database reachable via DATABASE_URL.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use notestack_api::app::{build_router, AppState};
use notestack_api::config::Config;
use notestack_shared::auth::jwt::{create_token, Claims};
use notestack_shared::auth::password::hash_password;
use notestack_shared::models::tenant::{CreateTenant, Tenant, TenantPlan};
use notestack_shared::models::user::{CreateUser, User, UserRole};
use serde_json::Value;
use sqlx::PgPool;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub tenant: Tenant,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context with a fresh FREE tenant and ADMIN user
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_role(UserRole::Admin).await
    }

    /// Creates a test context whose user has the given role
    pub async fn with_role(role: UserRole) -> anyhow::Result<Self> {
        // Tests only need DATABASE_URL; default the JWT secret if unset
        if std::env::var("JWT_SECRET").is_err() {
            std::env::set_var("JWT_SECRET", "integration-test-secret-0123456789abcdef");
        }
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Migrations path is relative to this crate's Cargo.toml
        sqlx::migrate!("../migrations").run(&db).await?;

        let unique = Uuid::new_v4().simple().to_string();
        let tenant = Tenant::create(
            &db,
            CreateTenant {
                name: format!("Test Tenant {}", unique),
                slug: format!("test-{}", &unique[..12]),
                plan: TenantPlan::Free,
            },
        )
        .await?;

        let user = User::create(
            &db,
            CreateUser {
                email: format!("test-{}@example.com", unique),
                password_hash: hash_password("password")?,
                role,
                tenant_id: tenant.id,
            },
        )
        .await?;

        let claims = Claims::new(user.id, tenant.id, role);
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            tenant,
            user,
            jwt_token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Sends a request with this context's bearer token
    pub async fn request(
        &mut self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let auth = self.auth_header();
        self.request_with_auth(method, uri, body, Some(&auth)).await
    }

    /// Sends a request with an explicit (or no) Authorization header
    pub async fn request_with_auth(
        &mut self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        auth_header: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(auth) = auth_header {
            builder = builder.header("authorization", auth);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.app.call(request).await.unwrap()
    }

    /// Cleans up test data (cascades to users and notes)
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        Tenant::delete(&self.db, self.tenant.id).await?;
        Ok(())
    }
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Asserts a status and returns the parsed body
pub async fn expect_status(response: Response<Body>, expected: StatusCode) -> Value {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8_lossy(&body);
    assert_eq!(status, expected, "Unexpected status, body: {}", body_str);
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}
