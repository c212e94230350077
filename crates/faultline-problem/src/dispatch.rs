use faultline_core::{ErrorKind, Fault, ProblemDetail};

use crate::defaults;
use crate::error::ConfigurationError;
use crate::registry::Registry;
use crate::rule::MappingRule;

/// Picks the most specific rule for an error and applies it
///
/// The lookup walks from the error's own kind towards the root and takes the
/// first kind with a registered rule. When nothing on the way matches, a
/// built-in internal-error rule is used so dispatch always yields a problem.
#[derive(Debug)]
pub struct Dispatcher {
    registry: Registry,
    fallback: MappingRule,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            fallback: defaults::fallback(),
        }
    }

    /// Dispatcher over the built-in rules
    ///
    /// # Errors
    ///
    /// Fails only if a built-in rule cannot be resolved
    pub fn standard() -> Result<Self, ConfigurationError> {
        Registry::standard().map(Self::new)
    }

    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Rule for the nearest kind in `kind`'s lineage that has one
    pub fn rule_for(&self, kind: &ErrorKind) -> &MappingRule {
        if let Some(rule) = kind.lineage().find_map(|k| self.registry.get(k)) {
            return rule;
        }

        tracing::warn!(
            kind = kind.name(),
            "no problem mapping found for error kind or any of its parents, using fallback"
        );
        &self.fallback
    }

    /// Convert `fault` into a problem
    pub fn dispatch(&self, fault: &dyn Fault) -> ProblemDetail {
        let rule = self.rule_for(fault.kind());
        let problem = rule.map(fault);

        tracing::debug!(
            kind = fault.kind().name(),
            rule = rule.kind().name(),
            status = problem.status.as_u16(),
            "mapped error to problem"
        );

        problem
    }
}
