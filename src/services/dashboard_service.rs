// src/services/dashboard_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::PortalRepository,
    models::{
        auth::{Role, User},
        dashboard::Dashboard,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    repo: Arc<dyn PortalRepository>,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn PortalRepository>) -> Self {
        Self { repo }
    }

    /// Dashboards que `role` pode abrir dentro do cliente `tenant_id`.
    /// Lista vazia não é erro.
    pub async fn dashboards_for(&self, tenant_id: i64, role: &Role) -> Result<Vec<Dashboard>, AppError> {
        self.repo.dashboards_for(tenant_id, role).await
    }

    /// Busca crua por id: não confere cliente nem perfil.
    pub async fn find_dashboard(&self, id: i64) -> Result<Option<Dashboard>, AppError> {
        self.repo.find_dashboard(id).await
    }

    /// Abre um dashboard para o usuário: precisa ser do mesmo cliente e
    /// liberado para o perfil dele. Qualquer recusa responde "não encontrado".
    pub async fn open_dashboard(&self, user: &User, id: i64) -> Result<Dashboard, AppError> {
        let dashboard = self
            .find_dashboard(id)
            .await?
            .ok_or(AppError::DashboardNotFound)?;

        if dashboard.tenant_id != user.tenant_id {
            tracing::warn!(
                user_id = user.id,
                dashboard_id = id,
                "Acesso a dashboard de outro cliente recusado."
            );
            return Err(AppError::DashboardNotFound);
        }

        if !self.repo.is_dashboard_granted(id, &user.role).await? {
            tracing::warn!(
                user_id = user.id,
                dashboard_id = id,
                role = %user.role,
                "Dashboard não liberado para o perfil."
            );
            return Err(AppError::DashboardNotFound);
        }

        Ok(dashboard)
    }
}
