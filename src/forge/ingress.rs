//! Full ingress assembly.
//!
//! Combines the hostname, path, annotation and spec builders into the
//! `Ingress` object a controller submits for one instance sub-resource.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::annotations::{self, AnnotationSet};
use super::hostname::{host_name, EnvironmentMode};
use super::paths;
use super::spec::ingress_spec;
use super::{INGRESS_DEFAULT_CERTIFICATE_NAME, INGRESS_GUI_NAME_SUFFIX, INGRESS_MYDRIVE_NAME_SUFFIX};

/// Standard label naming the tool managing the resource.
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";
/// Standard label naming the instance the resource belongs to.
pub const LABEL_INSTANCE: &str = "app.kubernetes.io/instance";
/// Standard label naming the component the resource exposes.
pub const LABEL_COMPONENT: &str = "app.kubernetes.io/component";
/// Value of [`LABEL_MANAGED_BY`] on forged ingresses.
pub const MANAGED_BY: &str = "instance-ingress";

/// Sub-resource of an instance exposed through its own ingress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngressKind {
    /// The instance itself.
    Instance,
    /// The websocketed VNC GUI.
    Gui,
    /// The "MyDrive" file browser.
    MyDrive,
}

#[derive(Debug, Error)]
#[error("unknown ingress kind: {0} (expected instance, gui or mydrive)")]
pub struct UnknownIngressKind(pub String);

impl IngressKind {
    /// Lowercase name, also used as the component label value.
    pub fn as_str(self) -> &'static str {
        match self {
            IngressKind::Instance => "instance",
            IngressKind::Gui => "gui",
            IngressKind::MyDrive => "mydrive",
        }
    }

    /// Suffix appended to the instance name, if any.
    pub fn name_suffix(self) -> Option<&'static str> {
        match self {
            IngressKind::Instance => None,
            IngressKind::Gui => Some(INGRESS_GUI_NAME_SUFFIX),
            IngressKind::MyDrive => Some(INGRESS_MYDRIVE_NAME_SUFFIX),
        }
    }

    /// Path of this sub-resource for the given instance UID.
    pub fn path(self, uid: &str) -> String {
        match self {
            IngressKind::Instance => paths::instance_path(uid),
            IngressKind::Gui => paths::gui_vnc_path(uid),
            IngressKind::MyDrive => paths::mydrive_path(uid),
        }
    }

    /// Kind-specific annotations merged into `existing`.
    pub fn annotations(self, existing: Option<&AnnotationSet>) -> AnnotationSet {
        match self {
            IngressKind::Instance => existing.cloned().unwrap_or_default(),
            IngressKind::Gui => annotations::gui_annotations(existing),
            IngressKind::MyDrive => annotations::mydrive_annotations(existing),
        }
    }
}

impl FromStr for IngressKind {
    type Err = UnknownIngressKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "instance" => Ok(IngressKind::Instance),
            "gui" => Ok(IngressKind::Gui),
            "mydrive" => Ok(IngressKind::MyDrive),
            _ => Err(UnknownIngressKind(s.to_string())),
        }
    }
}

impl fmt::Display for IngressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the instance an ingress is forged for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRef {
    pub name: String,
    pub namespace: String,
    /// Opaque unique identifier, used only to build paths.
    pub uid: String,
    #[serde(default)]
    pub mode: EnvironmentMode,
}

/// Deployment-wide settings shared by every forged ingress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeOptions {
    pub base_domain: String,
    pub certificate_name: String,
    /// Base URL of the authentication proxy; `None` leaves ingresses open.
    pub auth_url: Option<String>,
    /// Backend service; defaults to the instance name when `None`.
    pub service_name: Option<String>,
    pub instance_port: String,
    pub gui_port: String,
    pub mydrive_port: String,
}

impl Default for ForgeOptions {
    fn default() -> Self {
        Self {
            base_domain: "crownlabs.example.com".to_string(),
            certificate_name: INGRESS_DEFAULT_CERTIFICATE_NAME.to_string(),
            auth_url: None,
            service_name: None,
            instance_port: "http".to_string(),
            gui_port: "gui".to_string(),
            mydrive_port: "mydrive".to_string(),
        }
    }
}

impl ForgeOptions {
    /// Service port name targeted by the given kind.
    pub fn port_for(&self, kind: IngressKind) -> &str {
        match kind {
            IngressKind::Instance => &self.instance_port,
            IngressKind::Gui => &self.gui_port,
            IngressKind::MyDrive => &self.mydrive_port,
        }
    }
}

/// Name of the ingress exposing `kind` for the named instance.
pub fn ingress_name(instance_name: &str, kind: IngressKind) -> String {
    match kind.name_suffix() {
        Some(suffix) => format!("{}-{}", instance_name, suffix),
        None => instance_name.to_string(),
    }
}

/// Externally reachable URL of the given sub-resource.
pub fn instance_url(instance: &InstanceRef, kind: IngressKind, options: &ForgeOptions) -> String {
    format!(
        "https://{}{}/",
        host_name(&options.base_domain, instance.mode),
        kind.path(&instance.uid)
    )
}

/// Forges the complete ingress for one instance sub-resource.
///
/// `existing` holds annotations already present on the object (if any);
/// they are preserved unless overwritten by the kind or authentication
/// annotations.
pub fn forge_ingress(
    instance: &InstanceRef,
    kind: IngressKind,
    options: &ForgeOptions,
    existing: Option<&AnnotationSet>,
) -> Ingress {
    let host = host_name(&options.base_domain, instance.mode);
    let path = kind.path(&instance.uid);
    let service_name = options.service_name.as_deref().unwrap_or(&instance.name);

    let mut annotations = kind.annotations(existing);
    if let Some(auth_url) = options.auth_url.as_deref() {
        annotations = annotations::authentication_annotations(Some(&annotations), auth_url);
    }

    let labels = BTreeMap::from([
        (LABEL_MANAGED_BY.to_string(), MANAGED_BY.to_string()),
        (LABEL_INSTANCE.to_string(), instance.name.clone()),
        (LABEL_COMPONENT.to_string(), kind.as_str().to_string()),
    ]);

    let name = ingress_name(&instance.name, kind);
    tracing::debug!(
        name = %name,
        namespace = %instance.namespace,
        host = %host,
        path = %path,
        kind = %kind,
        authenticated = options.auth_url.is_some(),
        "Forged ingress"
    );

    Ingress {
        metadata: ObjectMeta {
            name: Some(name),
            namespace: Some(instance.namespace.clone()),
            labels: Some(labels),
            annotations: Some(annotations),
            ..Default::default()
        },
        spec: Some(ingress_spec(
            &host,
            &path,
            &options.certificate_name,
            service_name,
            options.port_for(kind),
        )),
        status: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::annotations::{AUTH_SIGNIN, AUTH_URL, PROXY_BODY_SIZE, REWRITE_TARGET};

    fn instance(mode: EnvironmentMode) -> InstanceRef {
        InstanceRef {
            name: "kali-vm".into(),
            namespace: "tenant-alice".into(),
            uid: "0b6c7f".into(),
            mode,
        }
    }

    #[test]
    fn test_ingress_names() {
        assert_eq!(ingress_name("kali-vm", IngressKind::Instance), "kali-vm");
        assert_eq!(ingress_name("kali-vm", IngressKind::Gui), "kali-vm-gui");
        assert_eq!(ingress_name("kali-vm", IngressKind::MyDrive), "kali-vm-mydrive");
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("gui".parse::<IngressKind>().unwrap(), IngressKind::Gui);
        assert_eq!("MyDrive".parse::<IngressKind>().unwrap(), IngressKind::MyDrive);
        assert!("desktop".parse::<IngressKind>().is_err());
    }

    #[test]
    fn test_forge_gui_ingress() {
        let options = ForgeOptions::default();
        let ingress = forge_ingress(&instance(EnvironmentMode::Exam), IngressKind::Gui, &options, None);

        assert_eq!(ingress.metadata.name.as_deref(), Some("kali-vm-gui"));
        assert_eq!(ingress.metadata.namespace.as_deref(), Some("tenant-alice"));

        let annotations = ingress.metadata.annotations.as_ref().unwrap();
        assert_eq!(annotations[REWRITE_TARGET], "/websockify");
        assert!(!annotations.contains_key(AUTH_URL));

        let labels = ingress.metadata.labels.as_ref().unwrap();
        assert_eq!(labels[LABEL_COMPONENT], "gui");
        assert_eq!(labels[LABEL_INSTANCE], "kali-vm");

        let spec = ingress.spec.as_ref().unwrap();
        let rule = &spec.rules.as_ref().unwrap()[0];
        assert_eq!(rule.host.as_deref(), Some("exam.crownlabs.example.com"));
        let path = &rule.http.as_ref().unwrap().paths[0];
        assert_eq!(path.path.as_deref(), Some("/instance/0b6c7f/vnc"));
        let service = path.backend.service.as_ref().unwrap();
        assert_eq!(service.name, "kali-vm");
        assert_eq!(service.port.as_ref().unwrap().name.as_deref(), Some("gui"));
        assert_eq!(
            spec.tls.as_ref().unwrap()[0].secret_name.as_deref(),
            Some("crownlabs-ingress-secret")
        );
    }

    #[test]
    fn test_forge_with_authentication_and_existing_annotations() {
        let options = ForgeOptions {
            auth_url: Some("https://auth.example.com".into()),
            service_name: Some("shared-svc".into()),
            ..Default::default()
        };
        let existing = AnnotationSet::from([("owner".to_string(), "controller".to_string())]);
        let ingress = forge_ingress(
            &instance(EnvironmentMode::Standard),
            IngressKind::MyDrive,
            &options,
            Some(&existing),
        );

        let annotations = ingress.metadata.annotations.unwrap();
        assert_eq!(annotations["owner"], "controller");
        assert_eq!(annotations[PROXY_BODY_SIZE], "0");
        assert_eq!(annotations[AUTH_URL], "https://auth.example.com/auth");
        assert_eq!(annotations[AUTH_SIGNIN], "https://auth.example.com/start?rd=$escaped_request_uri");

        let rules = ingress.spec.unwrap().rules.unwrap();
        let rule = &rules[0];
        let service = rule.http.as_ref().unwrap().paths[0].backend.service.clone().unwrap();
        assert_eq!(service.name, "shared-svc");
        assert_eq!(rule.host.as_deref(), Some("crownlabs.example.com"));
    }

    #[test]
    fn test_instance_kind_keeps_existing_annotations_only() {
        let options = ForgeOptions::default();
        let ingress = forge_ingress(&instance(EnvironmentMode::Standard), IngressKind::Instance, &options, None);
        assert!(ingress.metadata.annotations.unwrap().is_empty());
    }

    #[test]
    fn test_forge_is_deterministic() {
        let options = ForgeOptions::default();
        let a = forge_ingress(&instance(EnvironmentMode::Exercise), IngressKind::Gui, &options, None);
        let b = forge_ingress(&instance(EnvironmentMode::Exercise), IngressKind::Gui, &options, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_instance_url() {
        let options = ForgeOptions::default();
        assert_eq!(
            instance_url(&instance(EnvironmentMode::Exercise), IngressKind::MyDrive, &options),
            "https://exercise.crownlabs.example.com/instance/0b6c7f/mydrive/"
        );
    }
}
