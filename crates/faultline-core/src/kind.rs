//! Error-kind hierarchy
//!
//! Every kind names its parent explicitly, so the hierarchy is a tree of
//! `'static` values rooted at [`INTERNAL`]. Lookups walk parent pointers;
//! there is no runtime type inspection.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Upper bound on the length of a kind's ancestor chain
///
/// Statics may reference each other in a loop, so walks stop here instead of
/// trusting the chain to terminate.
pub const MAX_KIND_DEPTH: usize = 32;

/// Universal root: unclassified, unexpected failures
pub static INTERNAL: ErrorKind = ErrorKind::root("internal");

/// Expected violations of a domain rule
pub static BUSINESS: ErrorKind = ErrorKind::child("business", &INTERNAL);

/// A requested entity does not exist
pub static NOT_FOUND: ErrorKind = ErrorKind::child("not-found", &BUSINESS);

/// Input failed constraint checks before reaching the domain
pub static VALIDATION: ErrorKind = ErrorKind::child("validation", &INTERNAL);

/// A request argument could not be interpreted at all
pub static INVALID_ARGUMENT: ErrorKind = ErrorKind::child("invalid-argument", &INTERNAL);

/// A handler panicked
pub static PANIC: ErrorKind = ErrorKind::child("panic", &INTERNAL);

/// Kinds defined by this crate, root first
pub static BUILTIN: [&ErrorKind; 6] = [&INTERNAL, &BUSINESS, &NOT_FOUND, &VALIDATION, &INVALID_ARGUMENT, &PANIC];

/// A category of failure with an explicit parent
///
/// Kinds are identified by name: two kinds with the same name are the same
/// kind, wherever they are declared.
#[derive(Debug)]
pub struct ErrorKind {
    name: &'static str,
    parent: Option<&'static ErrorKind>,
}

impl ErrorKind {
    /// Declare a root kind (no parent)
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// Declare a kind below `parent`
    pub const fn child(name: &'static str, parent: &'static Self) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn parent(&self) -> Option<&'static Self> {
        self.parent
    }

    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// This kind followed by each ancestor, most specific first
    pub fn lineage(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |kind| kind.parent).take(MAX_KIND_DEPTH)
    }

    /// Whether this kind is `ancestor` or lies below it
    pub fn is_a(&self, ancestor: &Self) -> bool {
        self.lineage().any(|kind| kind == ancestor)
    }
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ErrorKind {}

impl Hash for ErrorKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
