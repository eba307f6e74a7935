// src/services/session.rs

use crate::{
    common::error::AppError,
    db::PortalRepository,
    models::auth::User,
};

/// A sessão de um cliente (navegador).
///
/// Guarda só o e-mail do usuário, nunca o registro inteiro: a identidade é
/// relida do banco a cada acesso protegido (`current_user`). Cada requisição
/// carrega a sua própria sessão; não existe estado global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { email: String },
}

impl Session {
    pub fn login(&mut self, user: &User) {
        *self = Session::Authenticated {
            email: user.email.clone(),
        };
    }

    // Sempre limpa; chamar numa sessão anônima não faz nada
    pub fn logout(&mut self) {
        *self = Session::Anonymous;
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Session::Authenticated { email } => Some(email),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.email().is_some()
    }

    /// Relê o usuário da sessão no repositório.
    ///
    /// Se o usuário não existe mais, a sessão volta para `Anonymous` e o
    /// retorno é `None`. Erro do banco é propagado sem mexer na sessão.
    pub async fn current_user(&mut self, repo: &dyn PortalRepository) -> Result<Option<User>, AppError> {
        let Some(email) = self.email() else {
            return Ok(None);
        };

        match repo.find_user_by_email(email).await? {
            Some(user) => Ok(Some(user)),
            None => {
                tracing::info!("Usuário da sessão não existe mais; sessão encerrada.");
                self.logout();
                Ok(None)
            }
        }
    }
}
