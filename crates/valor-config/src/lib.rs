//! Valor Configuration Layer
//!
//! This crate provides the settings that shape how the Valor engine dispatches
//! and reports valuations.
//!
//! # Features
//!
//! - **Dispatch Strategy**: registry lookup, built-in switch, or registry with
//!   switch fallback
//! - **Registry Seeding**: whether the standard formulas are preloaded
//! - **Price Precision**: optional rounding of reported prices
//! - **Loading**: TOML and JSON, from strings or files
//!
//! # Example
//!
//! ```rust
//! use valor_config::{DispatchStrategy, EngineConfig, Validate};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     name = "desk"
//!     dispatch = "builtin"
//!     price_precision = 4
//! "#).unwrap();
//!
//! assert_eq!(config.dispatch, DispatchStrategy::Builtin);
//! assert_eq!(config.price_precision, Some(4));
//! assert!(config.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod engine;
mod error;

pub use engine::{ConfigFormat, DispatchStrategy, EngineConfig};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
