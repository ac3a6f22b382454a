//! Ingress path construction.
//!
//! Every path is built by [`join_path`]: empty segments are skipped, the
//! rest are joined with `/`, and trailing separators are trimmed from the
//! result. An empty instance UID therefore collapses instead of leaving a
//! dangling or doubled separator.

use super::{INGRESS_INSTANCE_PREFIX, INGRESS_MYDRIVE_PATH_SUFFIX, INGRESS_VNC_GUI_PATH_SUFFIX};

/// Joins path segments and normalizes the trailing separator.
pub fn join_path(segments: &[&str]) -> String {
    let joined = segments
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    joined.trim_end_matches('/').to_string()
}

/// Path of the ingress targeting the instance.
pub fn instance_path(uid: &str) -> String {
    join_path(&[INGRESS_INSTANCE_PREFIX, uid])
}

/// Path of the ingress targeting the websocketed VNC GUI.
pub fn gui_vnc_path(uid: &str) -> String {
    join_path(&[INGRESS_INSTANCE_PREFIX, uid, INGRESS_VNC_GUI_PATH_SUFFIX])
}

/// Path of the ingress targeting the "MyDrive" file browser.
pub fn mydrive_path(uid: &str) -> String {
    join_path(&[INGRESS_INSTANCE_PREFIX, uid, INGRESS_MYDRIVE_PATH_SUFFIX])
}
