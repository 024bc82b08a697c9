//! Engine error types.

use thiserror::Error;

use valor_config::ConfigError;
use valor_core::CoreError;

/// Engine result type.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The built-in switch has no formula for this kind.
    #[error("unsupported instrument kind: {kind}")]
    UnsupportedKind {
        /// Name of the kind that could not be dispatched.
        kind: String,
    },

    /// A registry-backed strategy was requested without a registry.
    #[error("dispatch strategy '{strategy}' requires a valuation registry")]
    RegistryUnavailable {
        /// The strategy that was requested.
        strategy: String,
    },

    /// Core type error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Creates an unsupported kind error.
    #[must_use]
    pub fn unsupported_kind(kind: impl std::fmt::Display) -> Self {
        Self::UnsupportedKind {
            kind: kind.to_string(),
        }
    }
}
