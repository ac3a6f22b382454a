//! Ingress spec construction.
//!
//! Builds the routing rule of an ingress: one TLS binding and one rule
//! with a single prefix-matched path. Inputs are taken as-is; nothing is
//! validated or defaulted here.

use k8s_openapi::api::networking::v1::{
    HTTPIngressPath, HTTPIngressRuleValue, IngressBackend, IngressRule, IngressServiceBackend,
    IngressSpec, IngressTLS, ServiceBackendPort,
};

/// Path matching mode used for every forged path.
pub const PATH_TYPE_PREFIX: &str = "Prefix";

/// Forges the specification of an ingress routing `host` + `path` to the
/// named port of `service_name`, terminating TLS with `certificate_name`.
pub fn ingress_spec(
    host: &str,
    path: &str,
    certificate_name: &str,
    service_name: &str,
    service_port: &str,
) -> IngressSpec {
    IngressSpec {
        tls: Some(vec![IngressTLS {
            hosts: Some(vec![host.to_string()]),
            secret_name: Some(certificate_name.to_string()),
        }]),
        rules: Some(vec![IngressRule {
            host: Some(host.to_string()),
            http: Some(HTTPIngressRuleValue {
                paths: vec![HTTPIngressPath {
                    path: Some(path.to_string()),
                    path_type: PATH_TYPE_PREFIX.to_string(),
                    backend: IngressBackend {
                        service: Some(IngressServiceBackend {
                            name: service_name.to_string(),
                            port: Some(ServiceBackendPort {
                                name: Some(service_port.to_string()),
                                number: None,
                            }),
                        }),
                        resource: None,
                    },
                }],
            }),
        }]),
        ..Default::default()
    }
}
