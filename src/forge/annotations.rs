//! Reverse-proxy annotation composition.
//!
//! # Responsibilities
//! - Add the ingress-nginx annotations required by each ingress kind
//! - Add the annotations gating an ingress behind the authentication proxy
//!
//! # Design Decisions
//! - Composers take `Option<&AnnotationSet>` (as found in `ObjectMeta`) and
//!   return a fresh set; an absent input is an empty set
//! - Additive and idempotent: existing unrelated keys are preserved, keys
//!   set here are overwritten with the same values on every call
//! - The three composers write disjoint keys, except the timeouts shared by
//!   GUI and MyDrive, which are never applied to the same ingress

use std::collections::BTreeMap;

use super::WEBSOCKIFY_REWRITE_ENDPOINT;

/// Annotations attached to an ingress resource.
pub type AnnotationSet = BTreeMap<String, String>;

/// Prefix shared by every annotation interpreted by ingress-nginx.
pub const NGINX_ANNOTATION_PREFIX: &str = "nginx.ingress.kubernetes.io/";

pub const REWRITE_TARGET: &str = "nginx.ingress.kubernetes.io/rewrite-target";
pub const PROXY_READ_TIMEOUT: &str = "nginx.ingress.kubernetes.io/proxy-read-timeout";
pub const PROXY_SEND_TIMEOUT: &str = "nginx.ingress.kubernetes.io/proxy-send-timeout";
pub const PROXY_BODY_SIZE: &str = "nginx.ingress.kubernetes.io/proxy-body-size";
pub const PROXY_MAX_TEMP_FILE_SIZE: &str = "nginx.ingress.kubernetes.io/proxy-max-temp-file-size";
pub const AUTH_URL: &str = "nginx.ingress.kubernetes.io/auth-url";
pub const AUTH_SIGNIN: &str = "nginx.ingress.kubernetes.io/auth-signin";

/// Upstream timeout for interactive GUI sessions, in seconds.
const GUI_PROXY_TIMEOUT_SECS: &str = "3600";

/// Upstream timeout for file transfers, in seconds.
const MYDRIVE_PROXY_TIMEOUT_SECS: &str = "600";

/// "0" disables the limit.
const UNLIMITED: &str = "0";

fn merged<'a>(
    annotations: Option<&AnnotationSet>,
    entries: impl IntoIterator<Item = (&'a str, String)>,
) -> AnnotationSet {
    let mut out = annotations.cloned().unwrap_or_default();
    for (key, value) in entries {
        out.insert(key.to_string(), value);
    }
    out
}

/// Annotations for the ingress targeting the websocketed VNC GUI.
pub fn gui_annotations(annotations: Option<&AnnotationSet>) -> AnnotationSet {
    merged(
        annotations,
        [
            (REWRITE_TARGET, WEBSOCKIFY_REWRITE_ENDPOINT.to_string()),
            (PROXY_READ_TIMEOUT, GUI_PROXY_TIMEOUT_SECS.to_string()),
            (PROXY_SEND_TIMEOUT, GUI_PROXY_TIMEOUT_SECS.to_string()),
        ],
    )
}

/// Annotations for the ingress targeting "MyDrive".
///
/// Body and temp file sizes are unlimited so that large uploads and
/// downloads go through.
pub fn mydrive_annotations(annotations: Option<&AnnotationSet>) -> AnnotationSet {
    merged(
        annotations,
        [
            (PROXY_BODY_SIZE, UNLIMITED.to_string()),
            (PROXY_MAX_TEMP_FILE_SIZE, UNLIMITED.to_string()),
            (PROXY_READ_TIMEOUT, MYDRIVE_PROXY_TIMEOUT_SECS.to_string()),
            (PROXY_SEND_TIMEOUT, MYDRIVE_PROXY_TIMEOUT_SECS.to_string()),
        ],
    )
}

/// Annotations enabling authentication in front of an ingress.
///
/// `auth_url` is the externally reachable base URL of an oauth2-proxy
/// instance. Unauthenticated requests are redirected to its signin
/// endpoint, carrying the original URI for the post-login redirect.
pub fn authentication_annotations(annotations: Option<&AnnotationSet>, auth_url: &str) -> AnnotationSet {
    merged(
        annotations,
        [
            (AUTH_URL, format!("{}/auth", auth_url)),
            (AUTH_SIGNIN, format!("{}/start?rd=$escaped_request_uri", auth_url)),
        ],
    )
}
