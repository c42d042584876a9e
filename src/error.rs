use thiserror::Error;

use crate::operator::OperatorKind;

/// Result type used across the optimizer.
///
/// Typed failures are raised as [`OptError`] and can be recovered from the returned
/// [`anyhow::Error`] with `downcast_ref::<OptError>()`.
pub type OptResult<T> = anyhow::Result<T>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptError {
    /// A plan node was built with a number of inputs its operator does not accept.
    #[error("{operator} expects {expected} input(s), got {actual}")]
    Arity {
        operator: OperatorKind,
        expected: usize,
        actual: usize,
    },
    /// An operator outside the closed operator set was encountered.
    #[error("unhandled operator: {label}")]
    UnhandledVariant { label: String },
}
