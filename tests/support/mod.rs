//! Shared fixtures: an in-memory portal with the Acme/Beta tenants.

#![allow(dead_code)]

use std::sync::Arc;

use cx_portal::{
    config::{AppState, Settings},
    db::{InMemoryPortalRepository, PortalRepository},
    models::{
        auth::{NewUser, Role},
        dashboard::{Dashboard, NewDashboard},
    },
};

pub fn test_settings() -> Settings {
    Settings {
        database_url: None,
        jwt_secret: "integration-test-secret".into(),
        bind_addr: "127.0.0.1:0".into(),
        session_ttl: chrono::Duration::hours(1),
        bcrypt_cost: 4,
        db_max_connections: 1,
        admin_seed: None,
    }
}

pub struct Portal {
    pub repo: Arc<InMemoryPortalRepository>,
    pub state: AppState,
    pub acme_id: i64,
    pub beta_id: i64,
    pub sales: Dashboard,
    pub hr: Dashboard,
    pub beta_fin: Dashboard,
    pub ungranted: Dashboard,
}

async fn dashboard(repo: &InMemoryPortalRepository, tenant_id: i64, name: &str, kind: &str) -> Dashboard {
    repo.create_dashboard(NewDashboard {
        tenant_id,
        name: name.into(),
        kind: kind.into(),
        embed_url: format!("https://bi.example.com/embed/{name}"),
    })
    .await
    .unwrap()
}

/// Tenant "Acme":
///   user a@acme.com / pw1 / financeiro
///   user rh@acme.com / pw2 / rh
///   dashboard Sales (financeiro), HR (rh), Draft (no grants)
/// Tenant "Beta":
///   dashboard Beta-Fin (financeiro)
pub async fn portal() -> Portal {
    let repo = Arc::new(InMemoryPortalRepository::new());
    let state = AppState::with_repository(repo.clone(), &test_settings()).unwrap();

    let acme = repo.create_tenant("Acme").await.unwrap();
    let beta = repo.create_tenant("Beta").await.unwrap();

    for (email, password, role) in [("a@acme.com", "pw1", "financeiro"), ("rh@acme.com", "pw2", "rh")] {
        let password_hash = state.auth_service.hash_password(password).await.unwrap();
        repo.create_user(NewUser {
            email: email.into(),
            password_hash,
            tenant_id: acme.id,
            role: Role::from(role),
        })
        .await
        .unwrap();
    }

    let sales = dashboard(&repo, acme.id, "Sales", "financeiro").await;
    let hr = dashboard(&repo, acme.id, "HR", "rh").await;
    let ungranted = dashboard(&repo, acme.id, "Draft", "operacional").await;
    let beta_fin = dashboard(&repo, beta.id, "Beta-Fin", "financeiro").await;

    repo.grant_dashboard(sales.id, &Role::from("financeiro")).await.unwrap();
    repo.grant_dashboard(hr.id, &Role::from("rh")).await.unwrap();
    repo.grant_dashboard(beta_fin.id, &Role::from("financeiro")).await.unwrap();

    Portal {
        repo,
        state,
        acme_id: acme.id,
        beta_id: beta.id,
        sales,
        hr,
        beta_fin,
        ungranted,
    }
}
