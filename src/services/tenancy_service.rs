// src/services/tenancy_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::PortalRepository,
    models::{
        auth::{Role, User},
        tenancy::{AdminSeed, Tenant},
    },
    services::auth::AuthService,
};

#[derive(Clone)]
pub struct TenantService {
    repo: Arc<dyn PortalRepository>,
    auth_service: AuthService,
}

impl TenantService {
    pub fn new(repo: Arc<dyn PortalRepository>, auth_service: AuthService) -> Self {
        Self { repo, auth_service }
    }

    pub async fn find_tenant(&self, id: i64) -> Result<Option<Tenant>, AppError> {
        self.repo.find_tenant(id).await
    }

    /// Cria o primeiro cliente e o seu administrador.
    ///
    /// Se já existe algum cliente, não faz nada e devolve `None`
    /// (evita duplicidade ao rodar o seed de novo).
    pub async fn bootstrap_admin(&self, seed: &AdminSeed) -> Result<Option<(Tenant, User)>, AppError> {
        if self.repo.has_tenants().await? {
            tracing::info!("Já existem dados no banco. Seed do administrador ignorado.");
            return Ok(None);
        }

        let password_hash = self.auth_service.hash_password(&seed.password).await?;

        let (tenant, user) = self
            .repo
            .create_tenant_with_user(
                &seed.tenant_name,
                &seed.email,
                &password_hash,
                &Role::new(seed.role.as_str()),
            )
            .await?;

        tracing::info!(
            tenant_id = tenant.id,
            user_id = user.id,
            "Cliente '{}' e usuário '{}' criados.",
            tenant.name,
            user.email
        );

        Ok(Some((tenant, user)))
    }
}
