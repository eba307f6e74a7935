// src/handlers/dashboard.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::dashboard::Dashboard,
};

// GET /api/dashboards
#[utoipa::path(
    get,
    path = "/api/dashboards",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboards liberados para o perfil do usuário (pode ser vazio)", body = Vec<Dashboard>),
        (status = 401, description = "Não autorizado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_dashboards(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let dashboards = app_state
        .dashboard_service
        .dashboards_for(user.tenant_id, &user.role)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(dashboards)))
}

// GET /api/dashboards/{id}
#[utoipa::path(
    get,
    path = "/api/dashboards/{id}",
    tag = "Dashboard",
    params(
        ("id" = i64, Path, description = "ID do dashboard")
    ),
    responses(
        (status = 200, description = "Dashboard com o link de embed", body = Dashboard),
        (status = 401, description = "Não autorizado"),
        (status = 404, description = "Não existe ou não está liberado para o usuário")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = app_state
        .dashboard_service
        .open_dashboard(&user, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(dashboard)))
}
