// src/models/tenancy.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// ---
// Tenant (O "Cliente")
// ---
// A organização cliente; unidade de isolamento dos dados
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Acme Ltda")]
    pub name: String,
}

// ---
// Dados do primeiro administrador (bootstrap)
// ---
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub tenant_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}
