// src/models/auth.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::tenancy::Tenant;

// ---
// Perfil (Role)
// ---
/// Rótulo livre de perfil ("admin", "gestor", "financeiro"...).
///
/// A comparação é exata e sensível a maiúsculas: "Admin" e "admin" são
/// perfis diferentes. Não existe hierarquia entre perfis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(transparent)]
#[sqlx(transparent)]
#[schema(value_type = String, example = "financeiro")]
pub struct Role(String);

impl Role {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Role {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "ana@acme.com")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    #[schema(example = 1)]
    pub tenant_id: i64,

    pub role: Role,
}

// Dados para criação de um usuário (apenas pelo caminho de seed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub tenant_id: i64,
    pub role: Role,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    // O e-mail é comparado exatamente como foi cadastrado, sem checar formato
    #[validate(length(min = 1, message = "Please fill in all fields."))]
    #[schema(example = "ana@acme.com")]
    pub email: String,

    #[validate(length(min = 1, message = "Please fill in all fields."))]
    #[schema(example = "s3nh4-f0rte")]
    pub password: String,
}

impl LoginUserPayload {
    /// Remove espaços nas pontas do e-mail. A senha é usada como veio.
    pub fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Resposta de /me: o usuário e o cliente (tenant) dono dele
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user: User,
    pub tenant: Tenant,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (e-mail do usuário)
    pub jti: String, // Id da sessão, usado para encerrá-la no logout
    pub exp: i64,    // Expiration time (quando o token expira)
    pub iat: i64,    // Issued At (quando o token foi criado)
}
