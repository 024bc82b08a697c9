//! Engine configuration types.
//!
//! This module defines how the pricing engine resolves valuation formulas
//! and how it reports prices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Largest scale a `rust_decimal::Decimal` can carry.
const MAX_PRICE_PRECISION: u32 = 28;

// =============================================================================
// DISPATCH STRATEGY
// =============================================================================

/// How an instrument resolves its valuation formula.
///
/// The two lookups have different failure policies: the registry returns
/// zero for a kind with no registered formula, the built-in switch fails
/// with an unsupported-kind error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStrategy {
    /// Registry lookup only. Unregistered kinds price at zero.
    Registry,
    /// Built-in switch only. Registry overrides are ignored.
    Builtin,
    /// Registry override when present, built-in switch otherwise.
    #[default]
    Layered,
}

impl DispatchStrategy {
    /// All strategies.
    pub const ALL: [DispatchStrategy; 3] = [
        DispatchStrategy::Registry,
        DispatchStrategy::Builtin,
        DispatchStrategy::Layered,
    ];

    /// Returns the string identifier for this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::Builtin => "builtin",
            Self::Layered => "layered",
        }
    }

    /// Parses a strategy from its string identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "registry" => Some(Self::Registry),
            "builtin" => Some(Self::Builtin),
            "layered" => Some(Self::Layered),
            _ => None,
        }
    }

    /// Returns true if this strategy consults a valuation registry.
    pub fn uses_registry(&self) -> bool {
        matches!(self, Self::Registry | Self::Layered)
    }
}

impl fmt::Display for DispatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// CONFIG FORMAT
// =============================================================================

/// Serialized configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl ConfigFormat {
    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

// =============================================================================
// ENGINE CONFIGURATION
// =============================================================================

/// Configuration for a pricing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Configuration name/identifier.
    #[serde(default = "default_name")]
    pub name: String,

    /// Description of this configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Formula resolution strategy for every instrument.
    #[serde(default)]
    pub dispatch: DispatchStrategy,

    /// Seed the registry with the standard formula for each kind.
    #[serde(default = "default_preload")]
    pub preload_standard_formulas: bool,

    /// Round reported prices to this many decimal places.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_precision: Option<u32>,
}

fn default_name() -> String {
    "default".to_string()
}

fn default_preload() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(default_name())
    }
}

impl EngineConfig {
    /// Creates a configuration with the given name and default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            dispatch: DispatchStrategy::default(),
            preload_standard_formulas: default_preload(),
            price_precision: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the dispatch strategy.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: DispatchStrategy) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Sets whether the standard formulas are preloaded.
    #[must_use]
    pub fn with_standard_formulas(mut self, preload: bool) -> Self {
        self.preload_standard_formulas = preload;
        self
    }

    /// Sets the reported price precision.
    #[must_use]
    pub fn with_price_precision(mut self, precision: u32) -> Self {
        self.price_precision = Some(precision);
        self
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Parses a configuration from TOML.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parses a configuration in the given format.
    pub fn from_str_with_format(s: &str, format: ConfigFormat) -> ConfigResult<Self> {
        match format {
            ConfigFormat::Toml => Self::from_toml_str(s),
            ConfigFormat::Json => Self::from_json_str(s),
        }
    }

    /// Loads and validates a configuration file.
    ///
    /// The format is chosen from the file extension (`.toml` or `.json`).
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_str_with_format(&contents, format)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        if let Some(precision) = self.price_precision {
            if precision > MAX_PRICE_PRECISION {
                errors.push(ValidationError::with_rule(
                    "price_precision",
                    format!("Price precision {precision} exceeds maximum of {MAX_PRICE_PRECISION}"),
                    "max_precision",
                ));
            }
        }

        errors
    }
}
