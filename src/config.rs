// src/config.rs

use anyhow::Context;
use std::{env, str::FromStr, sync::Arc};

use crate::{
    common::error::AppError,
    db::{self, InMemoryPortalRepository, PgPortalRepository, PortalRepository},
    models::tenancy::AdminSeed,
    services::{
        auth::AuthService, dashboard_service::DashboardService, tenancy_service::TenantService,
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Sem URL o servidor usa o repositório em memória.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub session_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
    pub db_max_connections: u32,
    pub admin_seed: Option<AdminSeed>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let admin_seed = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminSeed {
                tenant_name: env::var("ADMIN_TENANT_NAME").unwrap_or_else(|_| "Empresa Admin".into()),
                email: email.trim().to_string(),
                password,
                role: env::var("ADMIN_ROLE").unwrap_or_else(|_| "admin".into()),
            }),
            _ => None,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            jwt_secret,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            session_ttl: chrono::Duration::hours(parse_var("SESSION_TTL_HOURS", 168)?),
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            admin_seed,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} inválida: {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn PortalRepository>,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub tenant_service: TenantService,
}

impl AppState {
    // Conecta no armazenamento configurado e monta os serviços
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let repo: Arc<dyn PortalRepository> = match &settings.database_url {
            Some(url) => {
                let pool = db::connect(url, settings.db_max_connections).await?;
                db::migrate(&pool).await?;
                Arc::new(PgPortalRepository::new(pool))
            }
            None => {
                tracing::warn!(
                    "⚠️ DATABASE_URL não encontrada. Usando repositório em memória (os dados somem ao reiniciar)."
                );
                Arc::new(InMemoryPortalRepository::new())
            }
        };

        Ok(Self::with_repository(repo, settings)?)
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_repository(repo: Arc<dyn PortalRepository>, settings: &Settings) -> Result<Self, AppError> {
        let auth_service = AuthService::new(
            repo.clone(),
            settings.jwt_secret.clone(),
            settings.session_ttl,
            settings.bcrypt_cost,
        )?;
        let dashboard_service = DashboardService::new(repo.clone());
        let tenant_service = TenantService::new(repo.clone(), auth_service.clone());

        Ok(Self {
            repo,
            auth_service,
            dashboard_service,
            tenant_service,
        })
    }
}
