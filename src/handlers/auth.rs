// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{AuthResponse, LoginUserPayload, MeResponse},
    services::session::Session,
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Sessão aberta", body = AuthResponse),
        (status = 400, description = "Campos inválidos"),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = payload.normalized();
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let user = app_state
        .auth_service
        .authenticate(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale))?
        .ok_or_else(|| AppError::InvalidCredentials.to_api_error(&locale))?;

    let mut session = Session::default();
    session.login(&user);

    let token = app_state
        .auth_service
        .issue_token(&session)
        .map_err(|e| e.to_api_error(&locale))?;

    tracing::info!(user_id = user.id, tenant_id = user.tenant_id, "Login realizado.");

    Ok((StatusCode::OK, Json(AuthResponse { token })))
}

// POST /api/auth/logout
// Idempotente: sem token, com token inválido ou já encerrado responde igual.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 204, description = "Sessão encerrada; o token deixa de valer"),
        (status = 500, description = "Falha ao registrar o encerramento")
    ),
    security(
        (),
        ("api_jwt" = [])
    )
)]
pub async fn logout(
    State(app_state): State<AppState>,
    locale: Locale,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<StatusCode, ApiError> {
    if let Some(TypedHeader(Authorization(bearer))) = bearer {
        app_state
            .auth_service
            .end_session(bearer.token())
            .await
            .map_err(|e| e.to_api_error(&locale))?;
    }

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário da sessão e o seu cliente", body = MeResponse),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let tenant = app_state
        .tenant_service
        .find_tenant(user.tenant_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?
        .ok_or_else(|| AppError::TenantNotFound.to_api_error(&locale))?;

    Ok(Json(MeResponse { user, tenant }))
}
