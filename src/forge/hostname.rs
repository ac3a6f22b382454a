//! Hostname resolution.
//!
//! # Responsibilities
//! - Map (base domain, environment mode) to the externally visible host
//! - Parse mode strings leniently
//!
//! # Design Decisions
//! - Only the exact values `Standard`, `Exam` and `Exercise` are recognized
//! - Unknown mode strings resolve to `Standard` (no prefix), never to an error
//! - The match over modes is exhaustive; the fallback lives in parsing only
//! - Parsing is silent; callers that care use [`EnvironmentMode::parse_known`]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating context of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum EnvironmentMode {
    /// Regular usage.
    #[default]
    Standard,
    /// Instance used during an exam.
    Exam,
    /// Instance used during an exercise.
    Exercise,
}

impl EnvironmentMode {
    /// Subdomain label prepended to the base domain, if any.
    pub fn subdomain(self) -> Option<&'static str> {
        match self {
            EnvironmentMode::Standard => None,
            EnvironmentMode::Exam => Some("exam"),
            EnvironmentMode::Exercise => Some("exercise"),
        }
    }

    /// Canonical value, as stored on the instance resource.
    pub fn as_str(self) -> &'static str {
        match self {
            EnvironmentMode::Standard => "Standard",
            EnvironmentMode::Exam => "Exam",
            EnvironmentMode::Exercise => "Exercise",
        }
    }

    /// Exact, case-sensitive match on the canonical values.
    pub fn parse_known(value: &str) -> Option<Self> {
        match value {
            "Standard" => Some(EnvironmentMode::Standard),
            "Exam" => Some(EnvironmentMode::Exam),
            "Exercise" => Some(EnvironmentMode::Exercise),
            _ => None,
        }
    }
}

impl From<&str> for EnvironmentMode {
    /// Anything unrecognized (including "" and other casings) is `Standard`.
    fn from(value: &str) -> Self {
        EnvironmentMode::parse_known(value).unwrap_or_default()
    }
}

impl From<String> for EnvironmentMode {
    fn from(value: String) -> Self {
        EnvironmentMode::from(value.as_str())
    }
}

impl fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the hostname for the given base domain and mode.
pub fn host_name(base_domain: &str, mode: EnvironmentMode) -> String {
    match mode.subdomain() {
        Some(label) => format!("{}.{}", label, base_domain),
        None => base_domain.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_name_per_mode() {
        let base = "crownlabs.example.com";
        assert_eq!(host_name(base, EnvironmentMode::Standard), base);
        assert_eq!(host_name(base, EnvironmentMode::Exam), "exam.crownlabs.example.com");
        assert_eq!(host_name(base, EnvironmentMode::Exercise), "exercise.crownlabs.example.com");
    }

    #[test]
    fn test_unrecognized_mode_falls_back_to_base() {
        for raw in ["", "Lab", "exams", "unknown"] {
            let mode = EnvironmentMode::from(raw);
            assert_eq!(mode, EnvironmentMode::Standard);
            assert_eq!(host_name("a.example.com", mode), "a.example.com");
        }
    }

    #[test]
    fn test_only_exact_mode_values_are_recognized() {
        assert_eq!(EnvironmentMode::from("Exam"), EnvironmentMode::Exam);
        assert_eq!(EnvironmentMode::from("Exercise"), EnvironmentMode::Exercise);

        for raw in ["exam", "EXAM", " Exam", "exercise", "EXERCISE"] {
            assert_eq!(EnvironmentMode::from(raw), EnvironmentMode::Standard);
            assert_eq!(EnvironmentMode::parse_known(raw), None);
        }
        assert_eq!(host_name("d.example.com", EnvironmentMode::from("exam")), "d.example.com");
        assert_eq!(host_name("d.example.com", EnvironmentMode::from("EXAM")), "d.example.com");
    }

    #[test]
    fn test_mode_deserializes_leniently() {
        let mode: EnvironmentMode = serde_json::from_str("\"Exam\"").unwrap();
        assert_eq!(mode, EnvironmentMode::Exam);

        let mode: EnvironmentMode = serde_json::from_str("\"Quiz\"").unwrap();
        assert_eq!(mode, EnvironmentMode::Standard);

        assert_eq!(serde_json::to_string(&EnvironmentMode::Exercise).unwrap(), "\"Exercise\"");
    }

    #[test]
    fn test_empty_base_domain() {
        assert_eq!(host_name("", EnvironmentMode::Standard), "");
        assert_eq!(host_name("", EnvironmentMode::Exam), "exam.");
    }
}
