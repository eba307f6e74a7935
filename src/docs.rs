// src/docs.rs

use axum::Json;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,

        // --- Users ---
        handlers::auth::get_me,

        // --- Dashboard ---
        handlers::dashboard::list_dashboards,
        handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,

            // --- Tenancy ---
            models::tenancy::Tenant,

            // --- Dashboard ---
            models::dashboard::Dashboard,
            models::dashboard::DashboardPermission,
        )
    ),
    tags(
        (name = "Auth", description = "Login e Logout"),
        (name = "Users", description = "Dados do Usuário e do Cliente"),
        (name = "Dashboard", description = "Dashboards liberados por perfil")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
