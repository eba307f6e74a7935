// src/db/repository.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    models::{
        auth::{NewUser, Role, User},
        dashboard::{Dashboard, DashboardPermission, NewDashboard},
        tenancy::Tenant,
    },
};

/// Acesso aos dados do portal: clientes, usuários, dashboards, permissões
/// e as sessões encerradas por logout.
///
/// Toda leitura é um filtro simples por igualdade. Falha do armazenamento
/// volta como `Err` e nunca como "não encontrado".
#[async_trait]
pub trait PortalRepository: Send + Sync {
    // Busca um usuário pelo seu e-mail (comparação exata)
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_tenant(&self, id: i64) -> Result<Option<Tenant>, AppError>;

    /// Busca por id, sem checar cliente nem perfil.
    async fn find_dashboard(&self, id: i64) -> Result<Option<Dashboard>, AppError>;

    /// Dashboards distintos do cliente com ao menos uma permissão para `role`, ordenados por id.
    async fn dashboards_for(&self, tenant_id: i64, role: &Role) -> Result<Vec<Dashboard>, AppError>;

    async fn is_dashboard_granted(&self, dashboard_id: i64, role: &Role) -> Result<bool, AppError>;

    async fn has_tenants(&self) -> Result<bool, AppError>;

    async fn create_tenant(&self, name: &str) -> Result<Tenant, AppError>;

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn create_dashboard(&self, new_dashboard: NewDashboard) -> Result<Dashboard, AppError>;

    async fn grant_dashboard(
        &self,
        dashboard_id: i64,
        role: &Role,
    ) -> Result<DashboardPermission, AppError>;

    /// Cria o cliente e o seu primeiro usuário de forma atômica.
    async fn create_tenant_with_user(
        &self,
        tenant_name: &str,
        email: &str,
        password_hash: &str,
        role: &Role,
    ) -> Result<(Tenant, User), AppError>;

    /// Marca a sessão como encerrada até `expires_at` (o vencimento do token).
    /// Repetir o mesmo id não é erro.
    async fn revoke_session(&self, session_id: &str, expires_at: DateTime<Utc>) -> Result<(), AppError>;

    async fn is_session_revoked(&self, session_id: &str) -> Result<bool, AppError>;
}
