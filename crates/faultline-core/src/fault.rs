use thiserror::Error;

use crate::kind::{self, ErrorKind};

/// An error that can be classified into a problem detail
///
/// Implemented by each crate's error type. The mapping layer only ever sees
/// `&dyn Fault`: the kind selects the rule, the message feeds the default
/// detail. Rules that need more than that downcast to the concrete type.
pub trait Fault: std::error::Error + Send + Sync + 'static {
    /// Most specific kind of this error
    fn kind(&self) -> &'static ErrorKind;

    /// Human-readable message for this occurrence
    fn message(&self) -> String {
        self.to_string()
    }
}

impl dyn Fault {
    /// Downcast to a concrete error type
    pub fn downcast_ref<E: Fault>(&self) -> Option<&E> {
        let error: &(dyn std::error::Error + 'static) = self;
        error.downcast_ref::<E>()
    }

    /// Whether this error's kind is `ancestor` or lies below it
    pub fn is_a(&self, ancestor: &ErrorKind) -> bool {
        self.kind().is_a(ancestor)
    }
}

/// Errors raised outside any domain crate
#[derive(Debug, Error)]
pub enum StandardFault {
    /// A requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// A request argument could not be interpreted
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A handler panicked
    #[error("handler panicked: {0}")]
    Panic(String),

    /// Anything else
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl Fault for StandardFault {
    fn kind(&self) -> &'static ErrorKind {
        match self {
            Self::NotFound(_) => &kind::NOT_FOUND,
            Self::InvalidArgument(_) => &kind::INVALID_ARGUMENT,
            Self::Panic(_) => &kind::PANIC,
            Self::Internal(_) => &kind::INTERNAL,
        }
    }
}
