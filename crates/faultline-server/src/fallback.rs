use faultline_core::kind::{BUSINESS, NOT_FOUND};
use faultline_core::{ErrorKind, Fault, ProblemDetail};
use faultline_problem::{ProblemError, RuleSpec};
use http::{Method, StatusCode, Uri};
use thiserror::Error;

/// Request for a path no route serves
pub static UNKNOWN_ROUTE: ErrorKind = ErrorKind::child("unknown-route", &NOT_FOUND);

/// Request for a served path with a method it does not accept
pub static METHOD_NOT_ALLOWED: ErrorKind = ErrorKind::child("method-not-allowed", &BUSINESS);

pub const METHOD_NOT_ALLOWED_TYPE: &str = "urn:problem:method-not-allowed";

/// Kinds raised by the router itself
pub static KINDS: [&ErrorKind; 2] = [&UNKNOWN_ROUTE, &METHOD_NOT_ALLOWED];

#[derive(Debug, Error)]
#[error("No route for {method} {path}")]
pub struct UnknownRoute {
    method: Method,
    path: String,
}

impl Fault for UnknownRoute {
    fn kind(&self) -> &'static ErrorKind {
        &UNKNOWN_ROUTE
    }
}

#[derive(Debug, Error)]
#[error("Method {method} not allowed for {path}")]
pub struct MethodNotAllowed {
    method: Method,
    path: String,
}

impl Fault for MethodNotAllowed {
    fn kind(&self) -> &'static ErrorKind {
        &METHOD_NOT_ALLOWED
    }
}

/// Default rule for [`METHOD_NOT_ALLOWED`]
pub fn method_not_allowed_rule() -> RuleSpec {
    RuleSpec::new(&METHOD_NOT_ALLOWED)
        .with_factory(ProblemDetail::new)
        .with_type(METHOD_NOT_ALLOWED_TYPE)
        .with_title("Method Not Allowed")
        .with_status(StatusCode::METHOD_NOT_ALLOWED)
}

/// Router fallback
pub async fn unknown_route(method: Method, uri: Uri) -> ProblemError {
    UnknownRoute {
        method,
        path: uri.path().to_owned(),
    }
    .into()
}

/// Fallback for routes that exist under other methods
pub async fn method_not_allowed(method: Method, uri: Uri) -> ProblemError {
    MethodNotAllowed {
        method,
        path: uri.path().to_owned(),
    }
    .into()
}
