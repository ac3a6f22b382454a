//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject values that would forge unusable ingresses (empty names, bad auth URL)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ForgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system; the forge itself never validates

use thiserror::Error;
use url::Url;

use crate::config::schema::ForgeConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("auth.url '{url}' is not a valid URL: {reason}")]
    InvalidAuthUrl { url: String, reason: String },

    #[error("auth.url '{0}' must use http or https")]
    UnsupportedAuthScheme(String),

    #[error("auth.url '{0}' must not end with '/'")]
    AuthUrlTrailingSlash(String),
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &ForgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let required = [
        ("ingress.base_domain", &config.ingress.base_domain),
        ("ingress.certificate_name", &config.ingress.certificate_name),
        ("backend.instance_port", &config.backend.instance_port),
        ("backend.gui_port", &config.backend.gui_port),
        ("backend.mydrive_port", &config.backend.mydrive_port),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty(field));
        }
    }

    if let Some(service_name) = &config.backend.service_name {
        if service_name.trim().is_empty() {
            errors.push(ValidationError::Empty("backend.service_name"));
        }
    }

    if let Some(auth_url) = &config.auth.url {
        validate_auth_url(auth_url, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// "/auth" and "/start" are appended verbatim, so a trailing slash would double up.
fn validate_auth_url(raw: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(raw) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedAuthScheme(raw.to_string()));
            }
            if raw.ends_with('/') {
                errors.push(ValidationError::AuthUrlTrailingSlash(raw.to_string()));
            }
        }
        Err(e) => errors.push(ValidationError::InvalidAuthUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ForgeConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ForgeConfig::default();
        config.ingress.base_domain = String::new();
        config.ingress.certificate_name = "  ".into();
        config.backend.service_name = Some(String::new());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::Empty("ingress.base_domain"),
                ValidationError::Empty("ingress.certificate_name"),
                ValidationError::Empty("backend.service_name"),
            ]
        );
    }

    #[test]
    fn test_auth_url_checks() {
        let mut config = ForgeConfig::default();

        config.auth.url = Some("https://auth.example.com".into());
        assert!(validate_config(&config).is_ok());

        config.auth.url = Some("auth.example.com".into());
        assert!(matches!(
            validate_config(&config).unwrap_err()[0],
            ValidationError::InvalidAuthUrl { .. }
        ));

        config.auth.url = Some("ftp://auth.example.com".into());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::UnsupportedAuthScheme("ftp://auth.example.com".into())]
        );

        config.auth.url = Some("https://auth.example.com/".into());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::AuthUrlTrailingSlash("https://auth.example.com/".into())]
        );
    }
}
