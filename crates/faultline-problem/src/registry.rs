//! Kind-indexed rule registry
//!
//! Built once at startup and never mutated afterwards, so it can be shared
//! across request handlers without locking.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use faultline_config::{ProblemsConfig, RuleOverrideConfig};
use faultline_core::kind::INTERNAL;
use faultline_core::{ErrorKind, ProblemDetail};
use http::StatusCode;

use crate::catalog::KindCatalog;
use crate::defaults;
use crate::error::ConfigurationError;
use crate::rule::{MappingRule, RuleSpec};

/// Statuses a problem may carry
const HTTP_STATUS_RANGE: RangeInclusive<u16> = 100..=599;

/// Mapping rules indexed by the kind they were declared for
#[derive(Debug, Default)]
pub struct Registry {
    rules: HashMap<&'static str, MappingRule>,
}

impl Registry {
    /// Index `rules` by kind
    ///
    /// A registry without a rule for the root kind is accepted, but every
    /// unmatched error will then go through the dispatcher's fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateRule`] when two rules share a kind
    pub fn from_rules(rules: impl IntoIterator<Item = MappingRule>) -> Result<Self, ConfigurationError> {
        let mut index = HashMap::new();

        for rule in rules {
            let kind = rule.kind().name();
            if index.insert(kind, rule).is_some() {
                return Err(ConfigurationError::DuplicateRule { kind });
            }
        }

        if !index.contains_key(INTERNAL.name()) {
            tracing::warn!(
                root = INTERNAL.name(),
                "problem registry has no rule for the root kind; unmatched errors will use the built-in fallback"
            );
        }

        tracing::debug!(rules = index.len(), "problem registry built");

        Ok(Self { rules: index })
    }

    /// Registry holding the built-in rules
    ///
    /// # Errors
    ///
    /// Fails only if a built-in rule cannot be resolved
    pub fn standard() -> Result<Self, ConfigurationError> {
        Self::from_rules(defaults::rules()?)
    }

    /// Built-in rules with `[problems.rules.*]` overrides applied
    ///
    /// An override for a kind without a built-in rule adds a plain rule for it.
    ///
    /// # Errors
    ///
    /// Returns an error if an override names a kind missing from `catalog`
    /// or carries an invalid status
    pub fn from_config(config: &ProblemsConfig, catalog: &KindCatalog) -> Result<Self, ConfigurationError> {
        Self::from_specs(defaults::specs(), config, catalog)
    }

    /// `specs` with `[problems.rules.*]` overrides applied
    ///
    /// Lets callers that raise their own kinds ship default rules for them
    /// next to the built-in ones.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::from_config`], plus
    /// [`ConfigurationError::DuplicateRule`] when two specs share a kind
    pub fn from_specs(
        mut specs: Vec<RuleSpec>,
        config: &ProblemsConfig,
        catalog: &KindCatalog,
    ) -> Result<Self, ConfigurationError> {
        for (name, rule_override) in &config.rules {
            let kind = catalog
                .get(name)
                .ok_or_else(|| ConfigurationError::UnknownKind { name: name.clone() })?;

            match specs.iter().position(|spec| spec.kind() == kind) {
                Some(index) => {
                    let spec = specs.swap_remove(index);
                    specs.push(apply_override(spec, name, rule_override)?);
                }
                None => {
                    let spec = RuleSpec::new(kind).with_factory(ProblemDetail::new);
                    specs.push(apply_override(spec, name, rule_override)?);
                }
            }

            tracing::debug!(kind = name.as_str(), "applied problem rule override");
        }

        let rules = specs.into_iter().map(RuleSpec::resolve).collect::<Result<Vec<_>, _>>()?;
        Self::from_rules(rules)
    }

    /// Rule declared for exactly `kind`, without walking parents
    pub fn get(&self, kind: &ErrorKind) -> Option<&MappingRule> {
        self.rules.get(kind.name())
    }

    /// Names of all kinds with a rule
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn apply_override(
    mut spec: RuleSpec,
    name: &str,
    rule_override: &RuleOverrideConfig,
) -> Result<RuleSpec, ConfigurationError> {
    if let Some(type_uri) = &rule_override.type_uri {
        spec = spec.with_type(type_uri.clone());
    }
    if let Some(title) = &rule_override.title {
        spec = spec.with_title(title.clone());
    }
    if let Some(status) = rule_override.status {
        let invalid = || ConfigurationError::InvalidStatus {
            kind: name.to_owned(),
            status,
        };
        // from_u16 accepts anything up to 999
        if !HTTP_STATUS_RANGE.contains(&status) {
            return Err(invalid());
        }
        spec = spec.with_status(StatusCode::from_u16(status).map_err(|_| invalid())?);
    }
    if let Some(detail) = &rule_override.detail {
        spec = spec.with_detail(detail.clone());
    }
    Ok(spec)
}
