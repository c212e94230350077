use indexmap::IndexMap;
use serde::Deserialize;

/// Problem mapping configuration
///
/// ```toml
/// [problems.rules.not-found]
/// title = "No such booking"
///
/// [problems.rules.over-booked]
/// type = "urn:problem:over-booked"
/// title = "Fully booked"
/// status = 409
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemsConfig {
    /// Overrides keyed by error-kind name, applied in file order
    #[serde(default)]
    pub rules: IndexMap<String, RuleOverrideConfig>,
}

/// Static replacements for the fields of one kind's mapping rule
///
/// Unset fields keep the built-in rule's behavior.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOverrideConfig {
    #[serde(default, rename = "type")]
    pub type_uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    /// Fixed detail text, replacing the error's own message
    #[serde(default)]
    pub detail: Option<String>,
}
