// src/models/dashboard.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::auth::Role;

// 1. Dashboard externo (embed)
// O link_embed é opaco: vai direto para o iframe do frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[schema(example = 10)]
    pub id: i64,

    #[schema(example = 1)]
    pub tenant_id: i64,

    #[schema(example = "Vendas")]
    pub name: String,

    // Categoria livre, usada só para agrupamento visual
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    #[schema(example = "financeiro")]
    pub kind: String,

    #[schema(example = "https://app.powerbi.com/view?r=abc")]
    pub embed_url: String,
}

// 2. Permissão: libera um dashboard para um perfil
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPermission {
    pub id: i64,
    pub dashboard_id: i64,
    pub role: Role,
}

// 3. Payload interno de criação
#[derive(Debug, Clone)]
pub struct NewDashboard {
    pub tenant_id: i64,
    pub name: String,
    pub kind: String,
    pub embed_url: String,
}
