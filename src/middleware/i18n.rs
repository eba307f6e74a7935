// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::i18n::{DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};

// Nosso extrator de idioma
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANGUAGE.to_string())
    }
}

impl Locale {
    /// Escolhe o primeiro idioma suportado do cabeçalho Accept-Language.
    pub fn from_header(value: Option<&str>) -> Self {
        value
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .into_iter()
                    // "pt-BR" -> "pt"
                    .map(|tag| tag.split('-').next().unwrap_or(&tag).to_lowercase())
                    .find(|lang| SUPPORTED_LANGUAGES.contains(&lang.as_str()))
            })
            .map(Locale)
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        Ok(Locale::from_header(header_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_language_prefix() {
        assert_eq!(Locale::from_header(Some("pt-BR,pt;q=0.9,en;q=0.8")).0, "pt");
    }

    #[test]
    fn skips_unsupported_languages() {
        assert_eq!(Locale::from_header(Some("fr-FR, pt;q=0.5")).0, "pt");
    }

    #[test]
    fn missing_header_is_english() {
        assert_eq!(Locale::from_header(None), Locale::default());
        assert_eq!(Locale::from_header(Some("de")).0, "en");
    }
}
