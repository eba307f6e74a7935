//src/bin/seed_admin.rs
//
// Cria o primeiro cliente (tenant) e o seu usuário administrador.
// Uso: DATABASE_URL=... JWT_SECRET=... ADMIN_EMAIL=... ADMIN_PASSWORD=... seed-admin

use anyhow::{bail, Context};

use cx_portal::config::{AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let settings = Settings::from_env()?;

    if settings.database_url.is_none() {
        bail!("DATABASE_URL deve ser definida: o seed em memória não sobrevive ao processo.");
    }

    let seed = settings
        .admin_seed
        .clone()
        .context("ADMIN_EMAIL e ADMIN_PASSWORD devem ser definidos")?;

    let app_state = AppState::new(&settings).await?;

    match app_state.tenant_service.bootstrap_admin(&seed).await? {
        Some((tenant, user)) => {
            tracing::info!("Sucesso! Cliente '{}' e Usuário '{}' criados.", tenant.name, user.email);
            tracing::info!("Agora você pode fazer login no sistema.");
        }
        None => {
            tracing::info!("Já existem dados no banco. Operação cancelada para evitar duplicidade.");
        }
    }

    Ok(())
}
