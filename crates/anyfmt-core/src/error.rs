//! Render failures.

use thiserror::Error;

use crate::value::ValueKind;

/// Errors raised by a single render call.
///
/// Output already appended to a caller-supplied buffer before the failure
/// is left in place and carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A directive asked for a value kind other than the one stored in the
    /// argument it consumed.
    #[error("argument {index}: expected {expected}, found {found}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        found: ValueKind,
    },
    /// A `%` at byte `offset` was followed by a directive but no argument
    /// was left to consume. Only raised under [`Exhausted::Error`].
    ///
    /// [`Exhausted::Error`]: crate::Exhausted::Error
    #[error("directive at byte {offset} has no argument left to consume")]
    ArgumentUnderflow { offset: usize },
}

impl FormatError {
    /// Short machine-readable name, stable across releases.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::ArgumentUnderflow { .. } => "argument_underflow",
        }
    }
}
