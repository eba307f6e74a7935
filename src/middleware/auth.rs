// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::User,
    services::session::Session,
};

/// Abre a sessão do cliente a partir do Bearer token (ou Anônima, sem token).
async fn session_from_bearer(
    app_state: &AppState,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Session, AppError> {
    match bearer {
        Some(TypedHeader(Authorization(bearer))) => app_state.auth_service.open_session(bearer.token()).await,
        None => Ok(Session::default()),
    }
}

// O middleware em si: toda rota protegida revalida o usuário no banco.
pub async fn session_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let mut session = session_from_bearer(&app_state, bearer)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    if !session.is_authenticated() {
        return Err(AppError::InvalidToken.to_api_error(&locale));
    }

    let user = session
        .current_user(app_state.repo.as_ref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    match user {
        Some(user) => {
            // Insere o usuário nos "extensions" da requisição
            request.extensions_mut().insert(AuthenticatedUser(user));
            Ok(next.run(request).await)
        }
        // current_user já devolveu a sessão para Anônima
        None => Err(AppError::SessionExpired.to_api_error(&locale)),
    }
}

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(user.clone());
        }

        let locale = Locale::from_request_parts(parts, state)
            .await
            .unwrap_or_default();
        Err(AppError::InvalidToken.to_api_error(&locale))
    }
}
