pub mod memory_repo;
pub mod pg_repo;
pub mod repository;
#[cfg(test)]
pub(crate) mod unavailable_repo;

pub use memory_repo::InMemoryPortalRepository;
pub use pg_repo::PgPortalRepository;
pub use repository::PortalRepository;

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Abre a pool do Postgres. Cada operação pega uma conexão só pelo tempo da consulta.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(pool)
}

/// Cria as tabelas do portal (migrations/).
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");
    Ok(())
}
