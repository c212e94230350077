//! Error to problem-detail mapping
//!
//! Rules are declared per [`ErrorKind`](faultline_core::ErrorKind), collected
//! in a [`Registry`] and applied by a [`Dispatcher`], which picks the rule of
//! the nearest kind in the error's lineage.

#![allow(clippy::must_use_candidate)]

mod catalog;
pub mod defaults;
mod dispatch;
mod error;
#[cfg(feature = "http")]
pub mod http;
mod registry;
mod rule;

pub use catalog::KindCatalog;
pub use dispatch::Dispatcher;
pub use error::ConfigurationError;
pub use registry::Registry;
pub use rule::{
    DEFAULT_STATUS, DEFAULT_TITLE, DEFAULT_TYPE, ExtraFn, MappingRule, ProblemFactory, RuleSpec, StatusFn, TextFn,
    new_instance_urn,
};

#[cfg(feature = "http")]
pub use self::http::{ProblemError, invalid_argument, panic_fault, panic_responder, problem_middleware, render};
