// src/db/unavailable_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    db::repository::PortalRepository,
    models::{
        auth::{NewUser, Role, User},
        dashboard::{Dashboard, DashboardPermission, NewDashboard},
        tenancy::Tenant,
    },
};

/// Repositório cujo banco está fora do ar: toda operação falha com
/// `DatabaseError`, como uma pool sem conexão disponível.
pub struct UnavailablePortalRepository;

fn unavailable<T>() -> Result<T, AppError> {
    Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl PortalRepository for UnavailablePortalRepository {
    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>, AppError> {
        unavailable()
    }

    async fn find_tenant(&self, _id: i64) -> Result<Option<Tenant>, AppError> {
        unavailable()
    }

    async fn find_dashboard(&self, _id: i64) -> Result<Option<Dashboard>, AppError> {
        unavailable()
    }

    async fn dashboards_for(&self, _tenant_id: i64, _role: &Role) -> Result<Vec<Dashboard>, AppError> {
        unavailable()
    }

    async fn is_dashboard_granted(&self, _dashboard_id: i64, _role: &Role) -> Result<bool, AppError> {
        unavailable()
    }

    async fn has_tenants(&self) -> Result<bool, AppError> {
        unavailable()
    }

    async fn create_tenant(&self, _name: &str) -> Result<Tenant, AppError> {
        unavailable()
    }

    async fn create_user(&self, _new_user: NewUser) -> Result<User, AppError> {
        unavailable()
    }

    async fn create_dashboard(&self, _new_dashboard: NewDashboard) -> Result<Dashboard, AppError> {
        unavailable()
    }

    async fn grant_dashboard(
        &self,
        _dashboard_id: i64,
        _role: &Role,
    ) -> Result<DashboardPermission, AppError> {
        unavailable()
    }

    async fn create_tenant_with_user(
        &self,
        _tenant_name: &str,
        _email: &str,
        _password_hash: &str,
        _role: &Role,
    ) -> Result<(Tenant, User), AppError> {
        unavailable()
    }

    async fn revoke_session(&self, _session_id: &str, _expires_at: DateTime<Utc>) -> Result<(), AppError> {
        unavailable()
    }

    async fn is_session_revoked(&self, _session_id: &str) -> Result<bool, AppError> {
        unavailable()
    }
}
