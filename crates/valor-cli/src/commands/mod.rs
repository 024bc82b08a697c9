//! CLI command implementations.

pub mod config;
pub mod kinds;
pub mod price;

pub use config::ConfigArgs;
pub use price::PriceArgs;

use std::path::Path;

use valor_config::{DispatchStrategy, EngineConfig};
use valor_core::InstrumentKind;

use crate::error::{CliError, CliResult};

/// Loads the engine configuration from a file, or the defaults.
pub fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    match path {
        Some(path) => Ok(EngineConfig::load(path)?),
        None => Ok(EngineConfig::default()),
    }
}

/// Parses a dispatch strategy name.
pub fn parse_dispatch(s: &str) -> CliResult<DispatchStrategy> {
    DispatchStrategy::parse(s).ok_or_else(|| CliError::InvalidDispatch(s.to_string()))
}

/// Parses a kind name, or `all` for every kind in canonical order.
pub fn parse_kinds(s: &str) -> CliResult<Vec<InstrumentKind>> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(InstrumentKind::ALL.to_vec());
    }
    InstrumentKind::parse(s)
        .map(|kind| vec![kind])
        .map_err(|_| CliError::InvalidKind(s.to_string()))
}
