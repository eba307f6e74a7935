//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use cx_portal::{
    app::build_router,
    config::{AppState, Settings},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings).await?;

    // Seed opcional do primeiro administrador (ADMIN_EMAIL / ADMIN_PASSWORD)
    if let Some(seed) = &settings.admin_seed {
        app_state.tenant_service.bootstrap_admin(seed).await?;
    }

    let app = build_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
