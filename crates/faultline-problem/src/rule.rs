//! Mapping rules
//!
//! A [`RuleSpec`] names an error kind and any subset of field overrides.
//! [`RuleSpec::resolve`] fills every unset field with its default and yields an
//! immutable [`MappingRule`] that turns an error into a [`ProblemDetail`].

use std::fmt;
use std::sync::Arc;

use faultline_core::{ErrorKind, Fault, ProblemDetail};
use http::StatusCode;
use uuid::Uuid;

use crate::error::ConfigurationError;

/// Problem type used when a rule sets none
pub const DEFAULT_TYPE: &str = "urn:problem:internal-server-error";

/// Title used when a rule sets none
pub const DEFAULT_TITLE: &str = "An internal server error occurred";

/// Status used when a rule sets none
pub const DEFAULT_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Constructs the empty result value a rule fills in
pub type ProblemFactory = fn() -> ProblemDetail;

/// Computes a text field from the error
pub type TextFn = Arc<dyn Fn(&dyn Fault) -> String + Send + Sync>;

/// Computes the status from the error
pub type StatusFn = Arc<dyn Fn(&dyn Fault) -> StatusCode + Send + Sync>;

/// Adds kind-specific members after the base fields are set
pub type ExtraFn = Arc<dyn Fn(&dyn Fault, &mut ProblemDetail) + Send + Sync>;

/// Fresh occurrence identifier: `urn:uuid:` followed by a random v4 UUID
pub fn new_instance_urn() -> String {
    format!("urn:uuid:{}", Uuid::new_v4())
}

fn constant_text(value: String) -> TextFn {
    Arc::new(move |_: &dyn Fault| value.clone())
}

/// Unresolved description of a mapping rule
///
/// For type, title and status either a fixed value or a function may be set;
/// whichever setter ran last wins.
#[derive(Clone)]
#[must_use]
pub struct RuleSpec {
    kind: &'static ErrorKind,
    factory: Option<ProblemFactory>,
    type_uri: Option<String>,
    title: Option<String>,
    status: Option<StatusCode>,
    type_fn: Option<TextFn>,
    title_fn: Option<TextFn>,
    status_fn: Option<StatusFn>,
    detail_fn: Option<TextFn>,
    instance_fn: Option<TextFn>,
    extra_fn: Option<ExtraFn>,
}

impl RuleSpec {
    pub const fn new(kind: &'static ErrorKind) -> Self {
        Self {
            kind,
            factory: None,
            type_uri: None,
            title: None,
            status: None,
            type_fn: None,
            title_fn: None,
            status_fn: None,
            detail_fn: None,
            instance_fn: None,
            extra_fn: None,
        }
    }

    pub const fn kind(&self) -> &'static ErrorKind {
        self.kind
    }

    /// Constructor for the result value, e.g. [`ProblemDetail::new`]
    pub fn with_factory(mut self, factory: ProblemFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn with_type(mut self, type_uri: impl Into<String>) -> Self {
        self.type_uri = Some(type_uri.into());
        self.type_fn = None;
        self
    }

    /// Static summary of the problem category; must not carry per-occurrence data
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.title_fn = None;
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self.status_fn = None;
        self
    }

    pub fn with_type_fn(mut self, f: impl Fn(&dyn Fault) -> String + Send + Sync + 'static) -> Self {
        self.type_fn = Some(Arc::new(f));
        self
    }

    pub fn with_title_fn(mut self, f: impl Fn(&dyn Fault) -> String + Send + Sync + 'static) -> Self {
        self.title_fn = Some(Arc::new(f));
        self
    }

    pub fn with_status_fn(mut self, f: impl Fn(&dyn Fault) -> StatusCode + Send + Sync + 'static) -> Self {
        self.status_fn = Some(Arc::new(f));
        self
    }

    pub fn with_detail_fn(mut self, f: impl Fn(&dyn Fault) -> String + Send + Sync + 'static) -> Self {
        self.detail_fn = Some(Arc::new(f));
        self
    }

    /// Fixed detail text, hiding the error's own message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail_fn = Some(constant_text(detail.into()));
        self
    }

    /// Per-occurrence identifier, e.g. a correlation id from the request
    pub fn with_instance_fn(mut self, f: impl Fn(&dyn Fault) -> String + Send + Sync + 'static) -> Self {
        self.instance_fn = Some(Arc::new(f));
        self
    }

    pub fn with_extra_fn(mut self, f: impl Fn(&dyn Fault, &mut ProblemDetail) + Send + Sync + 'static) -> Self {
        self.extra_fn = Some(Arc::new(f));
        self
    }

    /// Fill unset fields with defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingFactory`] when no factory was set
    pub fn resolve(self) -> Result<MappingRule, ConfigurationError> {
        let Some(factory) = self.factory else {
            return Err(ConfigurationError::MissingFactory { kind: self.kind.name() });
        };
        Ok(self.into_rule(factory))
    }

    pub(crate) fn into_rule(self, factory: ProblemFactory) -> MappingRule {
        let type_fn = self
            .type_fn
            .unwrap_or_else(|| constant_text(self.type_uri.unwrap_or_else(|| DEFAULT_TYPE.to_owned())));
        let title_fn = self
            .title_fn
            .unwrap_or_else(|| constant_text(self.title.unwrap_or_else(|| DEFAULT_TITLE.to_owned())));
        let status_fn = self.status_fn.unwrap_or_else(|| {
            let status = self.status.unwrap_or(DEFAULT_STATUS);
            Arc::new(move |_: &dyn Fault| status)
        });
        let detail_fn = self.detail_fn.unwrap_or_else(|| Arc::new(|fault: &dyn Fault| fault.message()));
        let instance_fn = self.instance_fn.unwrap_or_else(|| Arc::new(|_: &dyn Fault| new_instance_urn()));

        MappingRule {
            kind: self.kind,
            factory,
            type_fn,
            title_fn,
            status_fn,
            detail_fn,
            instance_fn,
            extra_fn: self.extra_fn,
        }
    }
}

impl fmt::Debug for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSpec")
            .field("kind", &self.kind.name())
            .field("has_factory", &self.factory.is_some())
            .field("type_uri", &self.type_uri)
            .field("title", &self.title)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Fully resolved, immutable mapping from one error kind to a problem
#[derive(Clone)]
pub struct MappingRule {
    kind: &'static ErrorKind,
    factory: ProblemFactory,
    type_fn: TextFn,
    title_fn: TextFn,
    status_fn: StatusFn,
    detail_fn: TextFn,
    instance_fn: TextFn,
    extra_fn: Option<ExtraFn>,
}

impl MappingRule {
    /// Kind this rule was declared for
    pub const fn kind(&self) -> &'static ErrorKind {
        self.kind
    }

    /// Build a fresh problem for `fault`
    ///
    /// Pure apart from the instance identifier, which is new on every call
    /// unless the rule supplies its own.
    pub fn map(&self, fault: &dyn Fault) -> ProblemDetail {
        let mut problem = (self.factory)();
        problem.type_uri = (self.type_fn)(fault);
        problem.title = (self.title_fn)(fault);
        problem.detail = (self.detail_fn)(fault);
        problem.status = (self.status_fn)(fault);
        problem.instance = (self.instance_fn)(fault);

        // Extra members may rely on the base fields being final
        if let Some(extra) = &self.extra_fn {
            extra(fault, &mut problem);
        }

        problem
    }
}

impl fmt::Debug for MappingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingRule")
            .field("kind", &self.kind.name())
            .field("has_extra", &self.extra_fn.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use faultline_core::kind::{BUSINESS, INTERNAL, NOT_FOUND, VALIDATION};
    use faultline_core::{StandardFault, ValidationError};

    use super::*;

    fn not_found(message: &str) -> StandardFault {
        StandardFault::NotFound(message.to_owned())
    }

    #[test]
    fn resolve_without_factory_fails() {
        let err = RuleSpec::new(&NOT_FOUND).with_status(StatusCode::NOT_FOUND).resolve().unwrap_err();
        assert_eq!(err, ConfigurationError::MissingFactory { kind: "not-found" });
        assert!(err.to_string().contains("missing factory"));
    }

    #[test]
    fn unset_fields_resolve_to_defaults() {
        let rule = RuleSpec::new(&INTERNAL).with_factory(ProblemDetail::new).resolve().unwrap();
        let problem = rule.map(&not_found("db connection refused"));

        assert_eq!(problem.type_uri, DEFAULT_TYPE);
        assert_eq!(problem.title, DEFAULT_TITLE);
        assert_eq!(problem.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(problem.detail, "db connection refused");
        assert!(problem.extensions.is_empty());
    }

    #[test]
    fn default_instance_is_a_fresh_uuid_urn() {
        let rule = RuleSpec::new(&BUSINESS).with_factory(ProblemDetail::new).resolve().unwrap();
        let fault = not_found("x");

        let first = rule.map(&fault).instance;
        let second = rule.map(&fault).instance;

        for instance in [&first, &second] {
            let uuid = instance.strip_prefix("urn:uuid:").unwrap();
            assert!(Uuid::parse_str(uuid).is_ok(), "not a uuid: {uuid}");
        }
        assert_ne!(first, second);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let rule = RuleSpec::new(&NOT_FOUND)
            .with_factory(ProblemDetail::new)
            .with_type("urn:problem:not-found")
            .with_title("Resource not found")
            .with_status(StatusCode::NOT_FOUND)
            .with_instance_fn(|_| "urn:correlation:abc".to_owned())
            .resolve()
            .unwrap();

        let problem = rule.map(&not_found("The element of id 404 could not be found"));
        assert_eq!(problem.type_uri, "urn:problem:not-found");
        assert_eq!(problem.title, "Resource not found");
        assert_eq!(problem.status, StatusCode::NOT_FOUND);
        assert_eq!(problem.detail, "The element of id 404 could not be found");
        assert_eq!(problem.instance, "urn:correlation:abc");
    }

    #[test]
    fn last_setter_wins_between_value_and_function() {
        let rule = RuleSpec::new(&BUSINESS)
            .with_factory(ProblemDetail::new)
            .with_status(StatusCode::BAD_REQUEST)
            .with_status_fn(|_| StatusCode::CONFLICT)
            .with_title_fn(|fault| format!("Failed: {}", fault.kind()))
            .with_title("Bad Request")
            .resolve()
            .unwrap();

        let problem = rule.map(&not_found("x"));
        assert_eq!(problem.status, StatusCode::CONFLICT);
        assert_eq!(problem.title, "Bad Request");
    }

    #[test]
    fn functions_see_the_error() {
        let rule = RuleSpec::new(&BUSINESS)
            .with_factory(ProblemDetail::new)
            .with_type_fn(|fault| format!("urn:problem:{}", fault.kind()))
            .with_detail_fn(|fault| fault.message().to_uppercase())
            .resolve()
            .unwrap();

        let problem = rule.map(&not_found("gone"));
        assert_eq!(problem.type_uri, "urn:problem:not-found");
        assert_eq!(problem.detail, "GONE");
    }

    #[test]
    fn fixed_detail_hides_message() {
        let rule = RuleSpec::new(&INTERNAL)
            .with_factory(ProblemDetail::new)
            .with_detail("Something went wrong")
            .resolve()
            .unwrap();

        let fault = StandardFault::Internal(anyhow::anyhow!("password=hunter2"));
        assert_eq!(rule.map(&fault).detail, "Something went wrong");
    }

    #[test]
    fn extra_runs_after_base_fields() {
        let rule = RuleSpec::new(&VALIDATION)
            .with_factory(ProblemDetail::validation)
            .with_status(StatusCode::NOT_ACCEPTABLE)
            .with_extra_fn(|_, problem| {
                let echoed = problem.status.as_u16();
                problem.set_extension("echoedStatus", echoed);
            })
            .resolve()
            .unwrap();

        let fault = ValidationError::new().with_violation("email", "must contain '@'");
        let problem = rule.map(&fault);

        assert_eq!(problem.schema, "ValidationProblemDetails");
        assert_eq!(problem.extension("echoedStatus"), Some(&serde_json::json!(406)));
    }

    #[test]
    fn factory_selects_result_shape() {
        let rule = RuleSpec::new(&VALIDATION)
            .with_factory(ProblemDetail::validation)
            .resolve()
            .unwrap();

        assert_eq!(rule.map(&ValidationError::new()).schema, "ValidationProblemDetails");
        assert_eq!(rule.kind(), &VALIDATION);
    }
}
