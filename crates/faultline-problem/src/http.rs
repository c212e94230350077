//! axum integration
//!
//! Handlers return `Result<_, ProblemError>`. The error travels to
//! [`problem_middleware`] in the response extensions, where the shared
//! [`Dispatcher`] turns it into an `application/problem+json` response.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use faultline_core::kind::BUSINESS;
use faultline_core::{Fault, StandardFault};
use tracing::Level;

use crate::dispatch::Dispatcher;

/// Error returned from handlers, rendered by [`problem_middleware`]
#[derive(Clone)]
pub struct ProblemError(Arc<dyn Fault>);

impl ProblemError {
    pub fn new(fault: impl Fault) -> Self {
        Self(Arc::new(fault))
    }

    pub fn fault(&self) -> &dyn Fault {
        self.0.as_ref()
    }
}

impl<E: Fault> From<E> for ProblemError {
    fn from(fault: E) -> Self {
        Self::new(fault)
    }
}

impl fmt::Debug for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemError")
            .field("kind", &self.0.kind().name())
            .field("message", &self.0.message())
            .finish()
    }
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl IntoResponse for ProblemError {
    fn into_response(self) -> Response {
        // Placeholder until the middleware replaces it
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Replace responses carrying a [`ProblemError`] with the mapped problem
pub async fn problem_middleware(
    State(dispatcher): State<Arc<Dispatcher>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ProblemError>() {
        Some(error) => render(&dispatcher, error.fault()),
        None => response,
    }
}

/// Map `fault` and build the HTTP response
pub fn render(dispatcher: &Dispatcher, fault: &dyn Fault) -> Response {
    let problem = dispatcher.dispatch(fault);
    let kind = fault.kind().name();
    let status = problem.status.as_u16();

    let level = log_level(fault, problem.status);
    if level == Level::ERROR {
        tracing::error!(kind, instance = %problem.instance, error = %fault, "request failed");
    } else if level == Level::INFO {
        tracing::info!(kind, instance = %problem.instance, status, "request rejected");
    } else {
        tracing::debug!(kind, instance = %problem.instance, status, "request rejected");
    }

    problem.into_response()
}

/// Server errors are logged as errors, business outcomes only at debug
fn log_level(fault: &dyn Fault, status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if fault.is_a(&BUSINESS) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Wrap an extractor rejection so it is mapped like any other error
pub fn invalid_argument(rejection: impl fmt::Display) -> ProblemError {
    StandardFault::InvalidArgument(rejection.to_string()).into()
}

/// Turn a caught panic payload into an error
pub fn panic_fault(payload: &(dyn Any + Send)) -> StandardFault {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_owned());

    StandardFault::Panic(message)
}

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer::custom`
pub fn panic_responder(
    dispatcher: Arc<Dispatcher>,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    move |payload| render(&dispatcher, &panic_fault(payload.as_ref()))
}
