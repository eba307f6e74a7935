// src/common/i18n.rs

/// Idiomas com catálogo próprio. O primeiro é o padrão.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "pt"];

pub const DEFAULT_LANGUAGE: &str = "en";

/// Busca a mensagem pública de `key` no idioma pedido.
/// Idioma desconhecido cai no inglês.
pub fn translate(key: &str, lang: &str) -> &'static str {
    match (lang, key) {
        ("pt", "auth.invalid_credentials") => "Credenciais inválidas. Tente novamente.",
        ("pt", "auth.session_required") => "Token de autenticação inválido ou ausente.",
        ("pt", "auth.session_expired") => "Sua sessão terminou. Entre novamente.",
        ("pt", "dashboard.not_found") => "Workspace não encontrado.",
        ("pt", "tenant.not_found") => "Organização não encontrada.",
        ("pt", "user.email_taken") => "Este e-mail já está em uso.",
        ("pt", "validation.failed") => "Um ou mais campos são inválidos.",
        ("pt", _) => "Ocorreu um erro inesperado.",

        (_, "auth.invalid_credentials") => "Invalid credentials. Please try again.",
        (_, "auth.session_required") => "Authentication token is invalid or missing.",
        (_, "auth.session_expired") => "Your session has ended. Please sign in again.",
        (_, "dashboard.not_found") => "Workspace not found.",
        (_, "tenant.not_found") => "Organization not found.",
        (_, "user.email_taken") => "This e-mail is already in use.",
        (_, "validation.failed") => "One or more fields are invalid.",
        _ => "An unexpected error occurred.",
    }
}
