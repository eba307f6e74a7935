// src/db/pg_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    db::repository::PortalRepository,
    models::{
        auth::{NewUser, Role, User},
        dashboard::{Dashboard, DashboardPermission, NewDashboard},
        tenancy::Tenant,
    },
};

// O repositório do portal sobre o Postgres
#[derive(Clone)]
pub struct PgPortalRepository {
    pool: PgPool,
}

impl PgPortalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_tenant<'e, E>(executor: E, name: &str) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenant = sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(tenant)
    }

    async fn insert_user<'e, E>(
        executor: E,
        email: &str,
        password_hash: &str,
        tenant_id: i64,
        role: &Role,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, tenant_id, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, tenant_id, role
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(tenant_id)
        .bind(role.as_str())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Converte erro de violação de chave em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::TenantNotFound;
                }
            }
            e.into()
        })
    }
}

#[async_trait]
impl PortalRepository for PgPortalRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, tenant_id, role FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_tenant(&self, id: i64) -> Result<Option<Tenant>, AppError> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT id, name FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tenant)
    }

    async fn find_dashboard(&self, id: i64) -> Result<Option<Dashboard>, AppError> {
        let dashboard = sqlx::query_as::<_, Dashboard>(
            "SELECT id, tenant_id, name, type, embed_url FROM dashboards WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(dashboard)
    }

    async fn dashboards_for(&self, tenant_id: i64, role: &Role) -> Result<Vec<Dashboard>, AppError> {
        // DISTINCT: um dashboard pode ter várias linhas de permissão
        let dashboards = sqlx::query_as::<_, Dashboard>(
            r#"
            SELECT DISTINCT d.id, d.tenant_id, d.name, d.type, d.embed_url
            FROM dashboards d
            JOIN dashboard_permissions p ON p.dashboard_id = d.id
            WHERE d.tenant_id = $1
              AND p.role = $2
            ORDER BY d.id
            "#,
        )
        .bind(tenant_id)
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(dashboards)
    }

    async fn is_dashboard_granted(&self, dashboard_id: i64, role: &Role) -> Result<bool, AppError> {
        let granted = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM dashboard_permissions
                WHERE dashboard_id = $1 AND role = $2
            )
            "#,
        )
        .bind(dashboard_id)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(granted)
    }

    async fn has_tenants(&self) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM tenants)")
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn create_tenant(&self, name: &str) -> Result<Tenant, AppError> {
        Self::insert_tenant(&self.pool, name).await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        Self::insert_user(
            &self.pool,
            &new_user.email,
            &new_user.password_hash,
            new_user.tenant_id,
            &new_user.role,
        )
        .await
    }

    async fn create_dashboard(&self, new_dashboard: NewDashboard) -> Result<Dashboard, AppError> {
        sqlx::query_as::<_, Dashboard>(
            r#"
            INSERT INTO dashboards (tenant_id, name, type, embed_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, tenant_id, name, type, embed_url
            "#,
        )
        .bind(new_dashboard.tenant_id)
        .bind(&new_dashboard.name)
        .bind(&new_dashboard.kind)
        .bind(&new_dashboard.embed_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::TenantNotFound;
                }
            }
            e.into()
        })
    }

    async fn grant_dashboard(
        &self,
        dashboard_id: i64,
        role: &Role,
    ) -> Result<DashboardPermission, AppError> {
        sqlx::query_as::<_, DashboardPermission>(
            r#"
            INSERT INTO dashboard_permissions (dashboard_id, role)
            VALUES ($1, $2)
            RETURNING id, dashboard_id, role
            "#,
        )
        .bind(dashboard_id)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::DashboardNotFound;
                }
            }
            e.into()
        })
    }

    async fn create_tenant_with_user(
        &self,
        tenant_name: &str,
        email: &str,
        password_hash: &str,
        role: &Role,
    ) -> Result<(Tenant, User), AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        let tenant = Self::insert_tenant(&mut *tx, tenant_name).await?;

        // Se falhar aqui, o tx sofre rollback automático ao sair do escopo (drop)
        let user = Self::insert_user(&mut *tx, email, password_hash, tenant.id, role).await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        Ok((tenant, user))
    }

    async fn revoke_session(&self, session_id: &str, expires_at: DateTime<Utc>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // Aproveita para limpar as sessões cujo token já venceu
        sqlx::query("DELETE FROM revoked_sessions WHERE expires_at < NOW()")
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO revoked_sessions (session_id, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (session_id) DO NOTHING
            "#,
        )
        .bind(session_id)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn is_session_revoked(&self, session_id: &str) -> Result<bool, AppError> {
        let revoked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM revoked_sessions WHERE session_id = $1)",
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(revoked)
    }
}
