//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Unknown instrument kind on the command line.
    #[error("Invalid instrument kind: {0}. Use one of option, future, forward, swap, warrant, all.")]
    InvalidKind(String),

    /// Unknown dispatch strategy on the command line.
    #[error("Invalid dispatch strategy: {0}. Use registry, builtin or layered.")]
    InvalidDispatch(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] valor_config::ConfigError),

    /// Pricing error.
    #[error("Pricing error: {0}")]
    Engine(#[from] valor_engine::EngineError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
