/// Integration tests for the NoteStack API
///
/// These tests verify the full system works end-to-end against a live
/// database:
/// - Signup and login flows
/// - Tenant-scoped note CRUD
/// - Cross-tenant isolation
/// - Free-plan limit and the Pro upgrade path
/// - Authorization guard behavior

mod common;

use axum::http::StatusCode;
use common::{body_json, expect_status, TestContext};
use notestack_shared::models::user::UserRole;
use serde_json::json;

/// Health endpoint answers without auth
#[tokio::test]
async fn test_health_check() {
    let mut ctx = TestContext::new().await.unwrap();

    let response = ctx
        .request_with_auth("GET", "/health", None, None)
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["status"], "ok");

    ctx.cleanup().await.unwrap();
}

/// Service root names the service
#[tokio::test]
async fn test_service_root() {
    let mut ctx = TestContext::new().await.unwrap();

    let response = ctx.request_with_auth("GET", "/", None, None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["service"], "notestack-api");

    ctx.cleanup().await.unwrap();
}

/// Signup creates a tenant; a second signup with the same email conflicts
#[tokio::test]
async fn test_signup_and_duplicate_email() {
    let mut ctx = TestContext::new().await.unwrap();
    let email = format!("signup-{}@acme.test", uuid::Uuid::new_v4().simple());

    let response = ctx
        .request_with_auth(
            "POST",
            "/signup",
            Some(json!({"name": "Acme", "email": email, "password": "secret1"})),
            None,
        )
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "User created");

    // Same email again
    let response = ctx
        .request_with_auth(
            "POST",
            "/signup",
            Some(json!({"name": "Acme", "email": email, "password": "secret1"})),
            None,
        )
        .await;
    expect_status(response, StatusCode::CONFLICT).await;

    ctx.cleanup().await.unwrap();
}

/// Missing fields and malformed JSON both yield 400
#[tokio::test]
async fn test_signup_missing_fields() {
    let mut ctx = TestContext::new().await.unwrap();

    let response = ctx
        .request_with_auth("POST", "/signup", Some(json!({"email": "a@b.test"})), None)
        .await;
    expect_status(response, StatusCode::BAD_REQUEST).await;

    // Syntactically invalid body
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/signup")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::Service::call(&mut ctx.app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    ctx.cleanup().await.unwrap();
}

/// Login returns a usable token and the tenant's slug and plan; unknown
/// email and wrong password produce the same error shape
#[tokio::test]
async fn test_login_flow() {
    let mut ctx = TestContext::new().await.unwrap();
    let email = format!("login-{}@acme.test", uuid::Uuid::new_v4().simple());

    let response = ctx
        .request_with_auth(
            "POST",
            "/signup",
            Some(json!({"name": "Acme", "email": email, "password": "secret1"})),
            None,
        )
        .await;
    expect_status(response, StatusCode::OK).await;

    let response = ctx
        .request_with_auth(
            "POST",
            "/login",
            Some(json!({"email": email, "password": "secret1"})),
            None,
        )
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert!(body["token"].is_string());
    assert_eq!(body["tenant"]["plan"], "FREE");
    assert!(body["tenant"]["slug"].is_string());

    // The issued token works against a protected route
    let token = body["token"].as_str().unwrap().to_string();
    let auth = format!("Bearer {}", token);
    let response = ctx
        .request_with_auth("GET", "/notes", None, Some(&auth))
        .await;
    expect_status(response, StatusCode::OK).await;

    // Wrong password and unknown email: identical error shape
    let response = ctx
        .request_with_auth(
            "POST",
            "/login",
            Some(json!({"email": email, "password": "wrong"})),
            None,
        )
        .await;
    let wrong_password = expect_status(response, StatusCode::UNAUTHORIZED).await;

    let response = ctx
        .request_with_auth(
            "POST",
            "/login",
            Some(json!({"email": "nobody@nowhere.test", "password": "secret1"})),
            None,
        )
        .await;
    let unknown_email = expect_status(response, StatusCode::UNAUTHORIZED).await;

    assert_eq!(wrong_password, unknown_email);

    ctx.cleanup().await.unwrap();
}

/// Create, fetch, update, list, and delete a note within one tenant
#[tokio::test]
async fn test_note_crud_roundtrip() {
    let mut ctx = TestContext::new().await.unwrap();

    let response = ctx
        .request("POST", "/notes", Some(json!({"title": "A", "content": "B"})))
        .await;
    let created = expect_status(response, StatusCode::OK).await;
    assert_eq!(created["title"], "A");
    assert_eq!(created["content"], "B");
    assert!(created["id"].is_string());
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let id = created["id"].as_str().unwrap().to_string();

    // Fetch returns the identical record
    let response = ctx.request("GET", &format!("/notes/{}", id), None).await;
    let fetched = expect_status(response, StatusCode::OK).await;
    assert_eq!(fetched["title"], "A");
    assert_eq!(fetched["content"], "B");
    assert_eq!(fetched["id"], created["id"]);

    // Update refreshes updated_at strictly past created_at
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let response = ctx
        .request(
            "PUT",
            &format!("/notes/{}", id),
            Some(json!({"title": "A2", "content": "B2"})),
        )
        .await;
    let updated = expect_status(response, StatusCode::OK).await;
    assert_eq!(updated["title"], "A2");
    assert_eq!(updated["content"], "B2");
    assert!(
        updated["updatedAt"].as_str().unwrap() > updated["createdAt"].as_str().unwrap(),
        "updatedAt should be strictly later than createdAt"
    );

    // List puts the most recently updated note first
    let response = ctx
        .request("POST", "/notes", Some(json!({"title": "C", "content": "D"})))
        .await;
    expect_status(response, StatusCode::OK).await;

    let response = ctx.request("GET", "/notes", None).await;
    let list = expect_status(response, StatusCode::OK).await;
    let notes = list.as_array().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["title"], "C");

    // Delete, then fetch is 404
    let response = ctx.request("DELETE", &format!("/notes/{}", id), None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Note deleted");

    let response = ctx.request("GET", &format!("/notes/{}", id), None).await;
    expect_status(response, StatusCode::NOT_FOUND).await;

    ctx.cleanup().await.unwrap();
}

/// A token for tenant A never reaches tenant B's notes, even with the id
#[tokio::test]
async fn test_cross_tenant_isolation() {
    let mut ctx_a = TestContext::new().await.unwrap();
    let mut ctx_b = TestContext::new().await.unwrap();

    let response = ctx_b
        .request("POST", "/notes", Some(json!({"title": "secret", "content": "b-only"})))
        .await;
    let note_b = expect_status(response, StatusCode::OK).await;
    let id = note_b["id"].as_str().unwrap().to_string();

    // Read, update, and delete across tenants all report 404
    let response = ctx_a.request("GET", &format!("/notes/{}", id), None).await;
    expect_status(response, StatusCode::NOT_FOUND).await;

    let response = ctx_a
        .request(
            "PUT",
            &format!("/notes/{}", id),
            Some(json!({"title": "stolen", "content": "x"})),
        )
        .await;
    expect_status(response, StatusCode::NOT_FOUND).await;

    let response = ctx_a.request("DELETE", &format!("/notes/{}", id), None).await;
    expect_status(response, StatusCode::NOT_FOUND).await;

    // B still sees its note untouched
    let response = ctx_b.request("GET", &format!("/notes/{}", id), None).await;
    let fetched = expect_status(response, StatusCode::OK).await;
    assert_eq!(fetched["title"], "secret");

    ctx_a.cleanup().await.unwrap();
    ctx_b.cleanup().await.unwrap();
}

/// A FREE tenant creates exactly 3 notes; the 4th hits the plan limit;
/// after the upgrade, creation resumes and the upgrade is idempotent
#[tokio::test]
async fn test_free_plan_limit_and_upgrade() {
    let mut ctx = TestContext::new().await.unwrap();

    for i in 0..3 {
        let response = ctx
            .request(
                "POST",
                "/notes",
                Some(json!({"title": format!("note-{}", i), "content": "x"})),
            )
            .await;
        expect_status(response, StatusCode::OK).await;
    }

    // 4th create: distinguishable plan-limit error
    let response = ctx
        .request("POST", "/notes", Some(json!({"title": "note-3", "content": "x"})))
        .await;
    let body = expect_status(response, StatusCode::FORBIDDEN).await;
    assert_eq!(body["error"], "plan_limit_reached");
    assert!(body["message"].as_str().unwrap().contains("Upgrade to Pro"));

    // ADMIN upgrades their own tenant by slug
    let slug = ctx.tenant.slug.clone();
    let response = ctx
        .request("POST", &format!("/tenants/{}/upgrade", slug), None)
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert!(body["message"].as_str().unwrap().contains("Upgraded to Pro"));

    // Creation past the old cap now succeeds
    let response = ctx
        .request("POST", "/notes", Some(json!({"title": "note-3", "content": "x"})))
        .await;
    expect_status(response, StatusCode::OK).await;

    // Second upgrade is a no-op success
    let response = ctx
        .request("POST", &format!("/tenants/{}/upgrade", slug), None)
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Already on Pro");

    ctx.cleanup().await.unwrap();
}

/// Protected routes require a valid bearer token
#[tokio::test]
async fn test_authentication_required() {
    let mut ctx = TestContext::new().await.unwrap();

    let response = ctx.request_with_auth("GET", "/notes", None, None).await;
    expect_status(response, StatusCode::UNAUTHORIZED).await;

    let response = ctx
        .request_with_auth("GET", "/notes", None, Some("Bearer garbage.token.here"))
        .await;
    expect_status(response, StatusCode::UNAUTHORIZED).await;

    let response = ctx
        .request_with_auth("GET", "/notes", None, Some("Basic dXNlcjpwYXNz"))
        .await;
    expect_status(response, StatusCode::UNAUTHORIZED).await;

    ctx.cleanup().await.unwrap();
}

/// The upgrade route is ADMIN-only and scoped to the caller's own tenant
#[tokio::test]
async fn test_upgrade_authorization() {
    let mut member_ctx = TestContext::with_role(UserRole::Member).await.unwrap();
    let slug = member_ctx.tenant.slug.clone();

    // MEMBER role: guard rejects before the handler runs
    let response = member_ctx
        .request("POST", &format!("/tenants/{}/upgrade", slug), None)
        .await;
    expect_status(response, StatusCode::FORBIDDEN).await;

    // ADMIN of another tenant: slug resolves, ownership check rejects
    let mut admin_ctx = TestContext::new().await.unwrap();
    let response = admin_ctx
        .request("POST", &format!("/tenants/{}/upgrade", slug), None)
        .await;
    expect_status(response, StatusCode::FORBIDDEN).await;

    // Unknown slug: 404
    let response = admin_ctx
        .request("POST", "/tenants/no-such-slug-000/upgrade", None)
        .await;
    expect_status(response, StatusCode::NOT_FOUND).await;

    member_ctx.cleanup().await.unwrap();
    admin_ctx.cleanup().await.unwrap();
}

/// End-to-end scenario: signup, login, 3 notes, limit, upgrade, 4th note
#[tokio::test]
async fn test_signup_to_upgrade_scenario() {
    let mut ctx = TestContext::new().await.unwrap();
    let email = format!("scenario-{}@acme.test", uuid::Uuid::new_v4().simple());

    let response = ctx
        .request_with_auth(
            "POST",
            "/signup",
            Some(json!({"name": "Acme", "email": email, "password": "secret1"})),
            None,
        )
        .await;
    expect_status(response, StatusCode::OK).await;

    let response = ctx
        .request_with_auth(
            "POST",
            "/login",
            Some(json!({"email": email, "password": "secret1"})),
            None,
        )
        .await;
    let login = expect_status(response, StatusCode::OK).await;
    assert_eq!(login["tenant"]["plan"], "FREE");
    let slug = login["tenant"]["slug"].as_str().unwrap().to_string();
    let auth = format!("Bearer {}", login["token"].as_str().unwrap());

    for _ in 0..3 {
        let response = ctx
            .request_with_auth(
                "POST",
                "/notes",
                Some(json!({"title": "t", "content": "c"})),
                Some(&auth),
            )
            .await;
        expect_status(response, StatusCode::OK).await;
    }

    let response = ctx
        .request_with_auth(
            "POST",
            "/notes",
            Some(json!({"title": "t", "content": "c"})),
            Some(&auth),
        )
        .await;
    let body = expect_status(response, StatusCode::FORBIDDEN).await;
    assert_eq!(body["error"], "plan_limit_reached");

    let response = ctx
        .request_with_auth("POST", &format!("/tenants/{}/upgrade", slug), None, Some(&auth))
        .await;
    expect_status(response, StatusCode::OK).await;

    let response = ctx
        .request_with_auth(
            "POST",
            "/notes",
            Some(json!({"title": "t", "content": "c"})),
            Some(&auth),
        )
        .await;
    expect_status(response, StatusCode::OK).await;

    let response = ctx
        .request_with_auth("GET", "/notes", None, Some(&auth))
        .await;
    let notes = body_json(response).await;
    assert_eq!(notes.as_array().unwrap().len(), 4);

    ctx.cleanup().await.unwrap();
}
