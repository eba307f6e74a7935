// src/app.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::{config::AppState, docs, handlers, middleware::auth::session_guard};

/// Monta todas as rotas da API.
pub fn build_router(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout));

    // Define as rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/", get(handlers::dashboard::list_dashboards))
        .route("/{id}", get(handlers::dashboard::get_dashboard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/dashboards", dashboard_routes)
        .with_state(app_state)
}
