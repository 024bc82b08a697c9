//! Error types for the Valor core types.

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or parsing core types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Text does not name any supported instrument kind.
    #[error("Invalid instrument kind: '{value}'")]
    InvalidKind {
        /// The text that failed to parse.
        value: String,
    },

    /// A calculation input was built without one of its fields.
    #[error("Missing calculation input field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// Invalid dividend record.
    #[error("Invalid dividend: {amount} - {reason}")]
    InvalidDividend {
        /// The rejected amount.
        amount: Decimal,
        /// Reason for invalidity.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid kind error.
    #[must_use]
    pub fn invalid_kind(value: impl Into<String>) -> Self {
        Self::InvalidKind {
            value: value.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}
