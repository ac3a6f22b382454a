//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for ingress forging.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::forge::{ForgeOptions, INGRESS_DEFAULT_CERTIFICATE_NAME};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ForgeConfig {
    /// Hostname and TLS settings.
    pub ingress: IngressConfig,

    /// Authentication proxy settings.
    pub auth: AuthConfig,

    /// Backend service references.
    pub backend: BackendConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Hostname and TLS configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct IngressConfig {
    /// Base domain; exam and exercise instances get a subdomain of it.
    pub base_domain: String,

    /// Secret holding the TLS certificate for the forged hosts.
    pub certificate_name: String,
}

impl Default for IngressConfig {
    fn default() -> Self {
        Self {
            base_domain: "crownlabs.example.com".to_string(),
            certificate_name: INGRESS_DEFAULT_CERTIFICATE_NAME.to_string(),
        }
    }
}

/// Authentication proxy configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Externally reachable base URL of the oauth2-proxy instance
    /// (e.g., "https://auth.example.com"). Unset disables authentication.
    pub url: Option<String>,
}

/// Backend service configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Service name override; the instance name is used when unset.
    pub service_name: Option<String>,

    /// Port name targeted by the instance ingress.
    pub instance_port: String,

    /// Port name targeted by the GUI ingress.
    pub gui_port: String,

    /// Port name targeted by the "MyDrive" ingress.
    pub mydrive_port: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            service_name: None,
            instance_port: "http".to_string(),
            gui_port: "gui".to_string(),
            mydrive_port: "mydrive".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON instead of human-readable text.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl From<&ForgeConfig> for ForgeOptions {
    fn from(config: &ForgeConfig) -> Self {
        Self {
            base_domain: config.ingress.base_domain.clone(),
            certificate_name: config.ingress.certificate_name.clone(),
            auth_url: config.auth.url.clone(),
            service_name: config.backend.service_name.clone(),
            instance_port: config.backend.instance_port.clone(),
            gui_port: config.backend.gui_port.clone(),
            mydrive_port: config.backend.mydrive_port.clone(),
        }
    }
}
