//! Ingress forging for per-instance virtual environments.
//!
//! Derives hostnames, paths, ingress-nginx annotations and `Ingress`
//! resources exposing instance GUIs and drives.

pub mod config;
pub mod forge;
pub mod observability;

pub use config::ForgeConfig;
pub use forge::{EnvironmentMode, ForgeOptions, IngressKind, InstanceRef};
