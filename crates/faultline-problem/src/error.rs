use thiserror::Error;

/// Mapping configuration that cannot produce a usable registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A rule was resolved without a way to construct its result value
    #[error("missing factory: rule for kind '{kind}' cannot construct its problem value")]
    MissingFactory { kind: &'static str },

    /// Two rules were declared for the same kind
    #[error("duplicate mapping rule for kind '{kind}'")]
    DuplicateRule { kind: &'static str },

    /// Two distinct kinds share a name
    #[error("kind name '{name}' is declared more than once")]
    DuplicateKind { name: &'static str },

    /// Configuration refers to a kind nobody registered
    #[error("unknown error kind '{name}'")]
    UnknownKind { name: String },

    /// Configured status is not a valid HTTP status code
    #[error("invalid status {status} for kind '{kind}'")]
    InvalidStatus { kind: String, status: u16 },
}
