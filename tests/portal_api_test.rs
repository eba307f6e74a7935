//! HTTP surface, driven through the router with `oneshot`.

mod support;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use cx_portal::{
    app::build_router,
    db::PortalRepository,
    models::auth::{NewUser, Role},
    services::session::Session,
};
use support::{portal, Portal};

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "email": email, "password": password }).to_string()))
        .unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(app, login_request(email, password)).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

async fn setup() -> (Portal, Router) {
    let p = portal().await;
    let app = build_router(p.state.clone());
    (p, app)
}

#[tokio::test]
async fn health_check() {
    let (_p, app) = setup().await;

    let response = app.oneshot(get("/api/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_trims_the_email_and_returns_a_token() {
    let (_p, app) = setup().await;

    let (status, body) = send(&app, login_request("  a@acme.com ", "pw1")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn login_failures_share_one_generic_message() {
    let (_p, app) = setup().await;

    let (wrong_status, wrong_body) = send(&app, login_request("a@acme.com", "wrong")).await;
    let (unknown_status, unknown_body) = send(&app, login_request("ghost@acme.com", "pw1")).await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"], "Invalid credentials. Please try again.");
}

#[tokio::test]
async fn login_with_empty_fields_is_a_validation_error() {
    let (_p, app) = setup().await;

    let (status, body) = send(&app, login_request("a@acme.com", "")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn error_messages_follow_accept_language() {
    let (_p, app) = setup().await;
    let mut request = login_request("a@acme.com", "wrong");
    request
        .headers_mut()
        .insert(header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9".parse().unwrap());

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Credenciais inválidas. Tente novamente.");
}

#[tokio::test]
async fn me_returns_user_and_tenant_without_the_hash() {
    let (p, app) = setup().await;
    let token = login(&app, "a@acme.com", "pw1").await;

    let (status, body) = send(&app, get("/api/users/me", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "a@acme.com");
    assert_eq!(body["user"]["role"], "financeiro");
    assert!(body["user"].get("passwordHash").is_none());
    assert_eq!(body["tenant"]["id"], p.acme_id);
    assert_eq!(body["tenant"]["name"], "Acme");
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let (_p, app) = setup().await;

    let (missing, _) = send(&app, get("/api/dashboards", None)).await;
    let (garbage, _) = send(&app, get("/api/dashboards", Some("not-a-token"))).await;

    assert_eq!(missing, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_list_follows_tenant_and_role() {
    let (p, app) = setup().await;
    let finance = login(&app, "a@acme.com", "pw1").await;
    let hr = login(&app, "rh@acme.com", "pw2").await;

    let (status, body) = send(&app, get("/api/dashboards", Some(&finance))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], p.sales.id);
    assert_eq!(body[0]["type"], "financeiro");
    assert_eq!(body[0]["embedUrl"], p.sales.embed_url);

    let (_, body) = send(&app, get("/api/dashboards", Some(&hr))).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], p.hr.id);
}

#[tokio::test]
async fn empty_workspace_is_an_empty_list() {
    let (p, app) = setup().await;
    let password_hash = p.state.auth_service.hash_password("pw3").await.unwrap();
    p.repo
        .create_user(NewUser {
            email: "ops@acme.com".into(),
            password_hash,
            tenant_id: p.acme_id,
            role: Role::from("operacional"),
        })
        .await
        .unwrap();
    let token = login(&app, "ops@acme.com", "pw3").await;

    let (status, body) = send(&app, get("/api/dashboards", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn opening_a_dashboard_by_id() {
    let (p, app) = setup().await;
    let token = login(&app, "a@acme.com", "pw1").await;

    let (status, body) = send(&app, get(&format!("/api/dashboards/{}", p.sales.id), Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sales");

    // Another tenant's dashboard looks exactly like a missing one
    let (cross_status, cross_body) =
        send(&app, get(&format!("/api/dashboards/{}", p.beta_fin.id), Some(&token))).await;
    let (missing_status, missing_body) = send(&app, get("/api/dashboards/9999", Some(&token))).await;

    assert_eq!(cross_status, StatusCode::NOT_FOUND);
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(cross_body, missing_body);

    let (status, _) = send(&app, get(&format!("/api/dashboards/{}", p.hr.id), Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_user_session_is_rejected() {
    let (p, app) = setup().await;
    // Token válido de um usuário que não existe mais no cadastro
    let token = p
        .state
        .auth_service
        .issue_token(&Session::Authenticated {
            email: "removed@acme.com".into(),
        })
        .unwrap();

    let (status, body) = send(&app, get("/api/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Your session has ended. Please sign in again.");
}

fn logout_request(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/api/auth/logout");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn logout_is_idempotent() {
    let (_p, app) = setup().await;
    let token = login(&app, "a@acme.com", "pw1").await;

    let (first, _) = send(&app, logout_request(Some(&token))).await;
    let (again, _) = send(&app, logout_request(Some(&token))).await;
    let (without_token, _) = send(&app, logout_request(None)).await;
    let (garbage, _) = send(&app, logout_request(Some("not-a-token"))).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(again, StatusCode::NO_CONTENT);
    assert_eq!(without_token, StatusCode::NO_CONTENT);
    assert_eq!(garbage, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn token_stops_working_after_logout() {
    let (_p, app) = setup().await;
    let token = login(&app, "a@acme.com", "pw1").await;
    let other_login = login(&app, "a@acme.com", "pw1").await;

    let (status, _) = send(&app, get("/api/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, logout_request(Some(&token))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (me, _) = send(&app, get("/api/users/me", Some(&token))).await;
    let (list, _) = send(&app, get("/api/dashboards", Some(&token))).await;
    assert_eq!(me, StatusCode::UNAUTHORIZED);
    assert_eq!(list, StatusCode::UNAUTHORIZED);

    // Só o token encerrado perde o acesso
    let (status, _) = send(&app, get("/api/users/me", Some(&other_login))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_accepts_emails_stored_without_an_at_sign() {
    let (p, app) = setup().await;
    let password_hash = p.state.auth_service.hash_password("pw").await.unwrap();
    p.repo
        .create_user(NewUser {
            email: "admin".into(),
            password_hash,
            tenant_id: p.acme_id,
            role: Role::from("admin"),
        })
        .await
        .unwrap();

    let (status, body) = send(&app, login_request(" admin ", "pw")).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");

    let token = body["token"].as_str().unwrap();
    let (status, body) = send(&app, get("/api/users/me", Some(token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "admin");
}

#[tokio::test]
async fn login_with_blank_email_is_a_validation_error() {
    let (_p, app) = setup().await;

    let (status, body) = send(&app, login_request("   ", "pw1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn openapi_document_lists_the_routes() {
    let (_p, app) = setup().await;

    let (status, body) = send(&app, get("/api-docs/openapi.json", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/auth/login"].is_object());
    assert!(body["paths"]["/api/dashboards/{id}"].is_object());
}
