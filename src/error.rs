//! Error type shared by the registry, the point codec and the function contract.

use thiserror::Error;

/// Errors raised by this crate.
///
/// All of them are synchronous and local: nothing here is transient, so none of
/// them should be retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Variable name is empty or is not of the form `[a-zA-Z][a-zA-Z0-9_]*`.
    #[error("invalid variable name: {0:?}")]
    InvalidName(String),

    /// Variable index is negative or too large.
    #[error("invalid variable index: {0}")]
    InvalidIndex(i64),

    /// Operand is not compatible with the operation.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: &'static str, actual: String },

    /// Vectorized point whose variable and value sides have different shapes.
    #[error("shape mismatch: {vars} variable(s) paired with {values} value(s)")]
    ShapeMismatch { vars: usize, values: usize },

    /// Fold over an empty sequence of cofactors.
    #[error("reduction over an empty sequence")]
    EmptyReduction,

    /// Invalid argument, e.g. a negative repetition count.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Representation does not provide the named capability.
    #[error("not implemented: {0}")]
    Unimplemented(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
