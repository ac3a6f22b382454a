//! Ingress forging subsystem.
//!
//! # Data Flow
//! ```text
//! Instance (uid, name, mode) + ForgeOptions
//!     → hostname.rs (base domain + mode → host)
//!     → paths.rs (uid + sub-resource → path)
//!     → annotations.rs (existing set + kind → nginx annotations)
//!     → spec.rs (host, path, certificate, service → IngressSpec)
//!     → ingress.rs (assemble the full Ingress object)
//! ```
//!
//! # Design Decisions
//! - Every function is pure: same input always yields the same output
//! - Nothing fails: inputs are plain strings, well-formedness is the caller's job
//! - Annotation sets are copied, never mutated in place
//! - All sub-resources of an instance live under one path prefix

pub mod annotations;
pub mod hostname;
pub mod ingress;
pub mod paths;
pub mod spec;

pub use annotations::AnnotationSet;
pub use hostname::EnvironmentMode;
pub use ingress::{ForgeOptions, IngressKind, InstanceRef};

/// Prefix prepended to the path of every ingress targeting an instance or its sub-resources.
pub const INGRESS_INSTANCE_PREFIX: &str = "/instance";

/// Suffix of the name of the ingress targeting the environment GUI.
pub const INGRESS_GUI_NAME_SUFFIX: &str = "gui";

/// Suffix of the name of the ingress targeting the environment "MyDrive".
pub const INGRESS_MYDRIVE_NAME_SUFFIX: &str = "mydrive";

/// Name of the secret holding the shared ingress certificate.
pub const INGRESS_DEFAULT_CERTIFICATE_NAME: &str = "crownlabs-ingress-secret";

/// Path suffix of the websocketed VNC endpoint.
pub const INGRESS_VNC_GUI_PATH_SUFFIX: &str = "vnc";

/// Path suffix of the "MyDrive" endpoint.
pub const INGRESS_MYDRIVE_PATH_SUFFIX: &str = "mydrive";

/// Endpoint of the websocketed VNC server.
pub const WEBSOCKIFY_REWRITE_ENDPOINT: &str = "/websockify";
