//! Built-in mapping rules

use faultline_core::kind::{BUSINESS, INTERNAL, NOT_FOUND, VALIDATION};
use faultline_core::{Fault, ProblemDetail, ValidationError};
use http::StatusCode;

use crate::error::ConfigurationError;
use crate::rule::{DEFAULT_TITLE, DEFAULT_TYPE, MappingRule, RuleSpec};

/// Detail shown for unexpected errors instead of their message
pub const UNEXPECTED_ERROR_DETAIL: &str =
    "An unexpected error has occurred! We apologize any inconvenience. Please try again later.";

pub const BAD_REQUEST_TYPE: &str = "urn:problem:bad-request";
pub const NOT_FOUND_TYPE: &str = "urn:problem:not-found";
pub const VALIDATION_ERROR_TYPE: &str = "urn:problem:validation-error";

/// Extension member listing the names of fields that failed validation
pub const FAILED_VALIDATION: &str = "failedValidation";

/// Root rule: anything unclassified, without leaking the error's message
pub fn internal() -> RuleSpec {
    RuleSpec::new(&INTERNAL)
        .with_factory(ProblemDetail::new)
        .with_type(DEFAULT_TYPE)
        .with_title(DEFAULT_TITLE)
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        .with_detail(UNEXPECTED_ERROR_DETAIL)
}

/// Domain rule violations; the message is safe to show
pub fn business() -> RuleSpec {
    RuleSpec::new(&BUSINESS)
        .with_factory(ProblemDetail::new)
        .with_type(BAD_REQUEST_TYPE)
        .with_title("Bad Request")
        .with_status(StatusCode::BAD_REQUEST)
}

pub fn not_found() -> RuleSpec {
    RuleSpec::new(&NOT_FOUND)
        .with_factory(ProblemDetail::new)
        .with_type(NOT_FOUND_TYPE)
        .with_title("Resource not found")
        .with_status(StatusCode::NOT_FOUND)
}

/// Failed input constraints, listing the offending field names
pub fn validation() -> RuleSpec {
    RuleSpec::new(&VALIDATION)
        .with_factory(ProblemDetail::validation)
        .with_type(VALIDATION_ERROR_TYPE)
        .with_title("A validation failed")
        .with_status(StatusCode::NOT_ACCEPTABLE)
        .with_detail_fn(validation_detail)
        .with_extra_fn(failed_fields)
}

fn validation_detail(fault: &dyn Fault) -> String {
    match fault.downcast_ref::<ValidationError>() {
        Some(err) => format!("Validation failed for {} fields", err.len()),
        None => fault.message(),
    }
}

fn failed_fields(fault: &dyn Fault, problem: &mut ProblemDetail) {
    let fields: Vec<String> = fault
        .downcast_ref::<ValidationError>()
        .map(|err| err.fields().map(str::to_owned).collect())
        .unwrap_or_default();
    problem.set_extension(FAILED_VALIDATION, fields);
}

/// Specs for every built-in rule, root first
pub fn specs() -> Vec<RuleSpec> {
    vec![internal(), business(), not_found(), validation()]
}

/// Resolved built-in rules
///
/// # Errors
///
/// Fails only if a built-in spec is missing its factory
pub fn rules() -> Result<Vec<MappingRule>, ConfigurationError> {
    specs().into_iter().map(RuleSpec::resolve).collect()
}

/// Rule used when no registered rule applies to a kind
pub(crate) fn fallback() -> MappingRule {
    internal().into_rule(ProblemDetail::new)
}

#[cfg(test)]
mod tests {
    use faultline_core::StandardFault;

    use super::*;

    #[test]
    fn builtin_rules_resolve() {
        let rules = rules().unwrap();
        let kinds: Vec<_> = rules.iter().map(|r| r.kind().name()).collect();
        assert_eq!(kinds, ["internal", "business", "not-found", "validation"]);
    }

    #[test]
    fn validation_rule_lists_failed_fields() {
        let rule = validation().resolve().unwrap();
        let fault = ValidationError::new().with_violation("numberOfSeats", "must be at most 20");

        let problem = rule.map(&fault);
        assert_eq!(problem.detail, "Validation failed for 1 fields");
        assert_eq!(problem.status, StatusCode::NOT_ACCEPTABLE);
        assert_eq!(
            problem.extension(FAILED_VALIDATION),
            Some(&serde_json::json!(["numberOfSeats"]))
        );
    }

    #[test]
    fn validation_rule_tolerates_other_error_types() {
        let rule = validation().resolve().unwrap();
        let fault = StandardFault::InvalidArgument("seats".to_owned());

        let problem = rule.map(&fault);
        assert_eq!(problem.detail, "invalid argument: seats");
        assert_eq!(problem.extension(FAILED_VALIDATION), Some(&serde_json::json!([])));
    }

    #[test]
    fn fallback_matches_internal_rule() {
        let fault = StandardFault::Internal(anyhow::anyhow!("secret"));
        let from_fallback = fallback().map(&fault);
        let from_internal = internal().resolve().unwrap().map(&fault);

        assert_eq!(from_fallback.type_uri, from_internal.type_uri);
        assert_eq!(from_fallback.title, from_internal.title);
        assert_eq!(from_fallback.status, from_internal.status);
        assert_eq!(from_fallback.detail, UNEXPECTED_ERROR_DETAIL);
    }
}
