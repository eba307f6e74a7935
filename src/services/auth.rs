// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PortalRepository,
    models::auth::{Claims, User},
    services::session::Session,
};

// Senha usada só para gerar o hash "isca" do caminho de e-mail desconhecido
const DUMMY_PASSWORD: &str = "cx-portal-timing-equalizer";

#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn PortalRepository>,
    jwt_secret: String,
    session_ttl: chrono::Duration,
    bcrypt_cost: u32,
    dummy_hash: Arc<str>,
}

impl AuthService {
    pub fn new(
        repo: Arc<dyn PortalRepository>,
        jwt_secret: String,
        session_ttl: chrono::Duration,
        bcrypt_cost: u32,
    ) -> Result<Self, AppError> {
        let dummy_hash = hash(DUMMY_PASSWORD, bcrypt_cost)?;

        Ok(Self {
            repo,
            jwt_secret,
            session_ttl,
            bcrypt_cost,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Confere e-mail e senha. Devolve o usuário ou `None`.
    ///
    /// E-mail desconhecido e senha errada dão o mesmo `None`, e os dois
    /// caminhos pagam uma verificação bcrypt. Erro do banco sobe como `Err`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, AppError> {
        let user = self.repo.find_user_by_email(email).await?;

        let stored_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };
        let password_clone = password.to_owned();

        // Executa a verificação em um thread separado
        let verified = tokio::task::spawn_blocking(move || verify(&password_clone, &stored_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?;

        let is_password_valid = match verified {
            Ok(valid) => valid,
            Err(e) => {
                // Hash gravado fora do formato bcrypt nunca confere
                tracing::warn!("Hash de senha ilegível no cadastro: {}", e);
                false
            }
        };

        Ok(user.filter(|_| is_password_valid))
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;

        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        Ok(hashed)
    }

    /// Assina a sessão autenticada num JWT (o "armazenamento" do cliente).
    /// Cada token recebe um id de sessão próprio (`jti`).
    pub fn issue_token(&self, session: &Session) -> Result<String, AppError> {
        let email = session.email().ok_or(AppError::InvalidToken)?;

        let now = Utc::now();
        let expires_at = now + self.session_ttl;

        let claims = Claims {
            sub: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    /// Abre a sessão de um token.
    ///
    /// Token inválido, vencido, adulterado ou encerrado por logout vira sessão
    /// anônima. Falha ao consultar as sessões encerradas sobe como `Err`.
    pub async fn open_session(&self, token: &str) -> Result<Session, AppError> {
        let Some(claims) = self.decode_claims(token) else {
            return Ok(Session::Anonymous);
        };

        if self.repo.is_session_revoked(&claims.jti).await? {
            tracing::debug!("Token de sessão já encerrado por logout.");
            return Ok(Session::Anonymous);
        }

        Ok(Session::Authenticated { email: claims.sub })
    }

    /// Encerra a sessão do token no servidor: o mesmo token deixa de abrir
    /// sessão. Token que já não abre sessão não muda nada.
    pub async fn end_session(&self, token: &str) -> Result<(), AppError> {
        let Some(claims) = self.decode_claims(token) else {
            return Ok(());
        };

        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| anyhow::anyhow!("Vencimento do token fora do intervalo: {}", claims.exp))?;

        self.repo.revoke_session(&claims.jti, expires_at).await?;
        tracing::info!("Logout realizado.");
        Ok(())
    }

    fn decode_claims(&self, token: &str) -> Option<Claims> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        );

        match decoded {
            Ok(token_data) => Some(token_data.claims),
            Err(e) => {
                tracing::debug!("Token de sessão rejeitado: {}", e);
                None
            }
        }
    }
}
