//! Shared error vocabulary for Faultline
//!
//! Defines the error-kind hierarchy, the [`Fault`] trait every mappable error
//! implements, the built-in errors, and the RFC 7807 [`ProblemDetail`] value.

#![allow(clippy::must_use_candidate)]

pub mod fault;
pub mod kind;
pub mod problem;
pub mod validation;

pub use fault::{Fault, StandardFault};
pub use kind::ErrorKind;
pub use problem::{
    APPLICATION_PROBLEM_JSON, PROBLEM_DETAILS_SCHEMA, ProblemDetail, VALIDATION_PROBLEM_DETAILS_SCHEMA,
};
pub use validation::{FieldViolation, ValidationError};
