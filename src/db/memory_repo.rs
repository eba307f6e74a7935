// src/db/memory_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::repository::PortalRepository,
    models::{
        auth::{NewUser, Role, User},
        dashboard::{Dashboard, DashboardPermission, NewDashboard},
        tenancy::Tenant,
    },
};

/// Repositório em memória, com as mesmas regras do esquema SQL
/// (chaves estrangeiras e e-mail único).
///
/// Usado nos testes e quando o servidor sobe sem `DATABASE_URL`.
/// Os dados somem quando o processo termina.
#[derive(Default)]
pub struct InMemoryPortalRepository {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    tenants: BTreeMap<i64, Tenant>,
    users: BTreeMap<i64, User>,
    dashboards: BTreeMap<i64, Dashboard>,
    permissions: Vec<DashboardPermission>,
    revoked_sessions: BTreeMap<String, DateTime<Utc>>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn insert_tenant(&mut self, name: &str) -> Tenant {
        let tenant = Tenant {
            id: self.next_id(),
            name: name.to_string(),
        };
        self.tenants.insert(tenant.id, tenant.clone());
        tenant
    }

    fn insert_user(&mut self, new_user: NewUser) -> Result<User, AppError> {
        if !self.tenants.contains_key(&new_user.tenant_id) {
            return Err(AppError::TenantNotFound);
        }
        if self.users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::EmailAlreadyExists);
        }

        let user = User {
            id: self.next_id(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            tenant_id: new_user.tenant_id,
            role: new_user.role,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn is_granted(&self, dashboard_id: i64, role: &Role) -> bool {
        self.permissions
            .iter()
            .any(|p| p.dashboard_id == dashboard_id && &p.role == role)
    }
}

impl InMemoryPortalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PortalRepository for InMemoryPortalRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_tenant(&self, id: i64) -> Result<Option<Tenant>, AppError> {
        Ok(self.tables.read().await.tenants.get(&id).cloned())
    }

    async fn find_dashboard(&self, id: i64) -> Result<Option<Dashboard>, AppError> {
        Ok(self.tables.read().await.dashboards.get(&id).cloned())
    }

    async fn dashboards_for(&self, tenant_id: i64, role: &Role) -> Result<Vec<Dashboard>, AppError> {
        let tables = self.tables.read().await;

        // BTreeMap já entrega cada dashboard uma vez, em ordem de id
        let dashboards = tables
            .dashboards
            .values()
            .filter(|d| d.tenant_id == tenant_id && tables.is_granted(d.id, role))
            .cloned()
            .collect();

        Ok(dashboards)
    }

    async fn is_dashboard_granted(&self, dashboard_id: i64, role: &Role) -> Result<bool, AppError> {
        Ok(self.tables.read().await.is_granted(dashboard_id, role))
    }

    async fn has_tenants(&self) -> Result<bool, AppError> {
        Ok(!self.tables.read().await.tenants.is_empty())
    }

    async fn create_tenant(&self, name: &str) -> Result<Tenant, AppError> {
        Ok(self.tables.write().await.insert_tenant(name))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        self.tables.write().await.insert_user(new_user)
    }

    async fn create_dashboard(&self, new_dashboard: NewDashboard) -> Result<Dashboard, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.tenants.contains_key(&new_dashboard.tenant_id) {
            return Err(AppError::TenantNotFound);
        }

        let dashboard = Dashboard {
            id: tables.next_id(),
            tenant_id: new_dashboard.tenant_id,
            name: new_dashboard.name,
            kind: new_dashboard.kind,
            embed_url: new_dashboard.embed_url,
        };
        tables.dashboards.insert(dashboard.id, dashboard.clone());
        Ok(dashboard)
    }

    async fn grant_dashboard(
        &self,
        dashboard_id: i64,
        role: &Role,
    ) -> Result<DashboardPermission, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.dashboards.contains_key(&dashboard_id) {
            return Err(AppError::DashboardNotFound);
        }

        let permission = DashboardPermission {
            id: tables.next_id(),
            dashboard_id,
            role: role.clone(),
        };
        tables.permissions.push(permission.clone());
        Ok(permission)
    }

    async fn create_tenant_with_user(
        &self,
        tenant_name: &str,
        email: &str,
        password_hash: &str,
        role: &Role,
    ) -> Result<(Tenant, User), AppError> {
        let mut tables = self.tables.write().await;

        // Checa o e-mail antes de criar o cliente, para não deixar cliente órfão
        if tables.users.values().any(|u| u.email == email) {
            return Err(AppError::EmailAlreadyExists);
        }

        let tenant = tables.insert_tenant(tenant_name);
        let user = tables.insert_user(NewUser {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            tenant_id: tenant.id,
            role: role.clone(),
        })?;

        Ok((tenant, user))
    }

    async fn revoke_session(&self, session_id: &str, expires_at: DateTime<Utc>) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        tables.revoked_sessions.retain(|_, expires| *expires >= now);
        tables
            .revoked_sessions
            .entry(session_id.to_string())
            .or_insert(expires_at);
        Ok(())
    }

    async fn is_session_revoked(&self, session_id: &str) -> Result<bool, AppError> {
        Ok(self.tables.read().await.revoked_sessions.contains_key(session_id))
    }
}
