//! Instrument kinds supported by the valuation engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Instrument categories that can be valued.
///
/// The set is closed: every kind has exactly one standard valuation formula.
/// Parsing is case-insensitive on the canonical names.
///
/// # Example
///
/// ```rust
/// use valor_core::InstrumentKind;
///
/// assert_eq!(InstrumentKind::parse("swap").unwrap(), InstrumentKind::Swap);
/// assert_eq!(InstrumentKind::parse("WARRANT").unwrap(), InstrumentKind::Warrant);
/// assert!(InstrumentKind::parse("bond").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum InstrumentKind {
    /// Option on an underlying
    Option,
    /// Exchange-traded future
    Future,
    /// OTC forward contract
    Forward,
    /// Fixed/floating interest rate swap
    Swap,
    /// Warrant issued on an underlying
    Warrant,
}

impl InstrumentKind {
    /// All kinds in canonical order.
    pub const ALL: [InstrumentKind; 5] = [
        InstrumentKind::Option,
        InstrumentKind::Future,
        InstrumentKind::Forward,
        InstrumentKind::Swap,
        InstrumentKind::Warrant,
    ];

    /// Parses a kind from its name, ignoring case.
    ///
    /// The text is uppercased and compared against the canonical names.
    /// Surrounding whitespace is not stripped.
    pub fn parse(text: &str) -> CoreResult<Self> {
        match text.to_uppercase().as_str() {
            "OPTION" => Ok(InstrumentKind::Option),
            "FUTURE" => Ok(InstrumentKind::Future),
            "FORWARD" => Ok(InstrumentKind::Forward),
            "SWAP" => Ok(InstrumentKind::Swap),
            "WARRANT" => Ok(InstrumentKind::Warrant),
            _ => Err(CoreError::invalid_kind(text)),
        }
    }

    /// Returns the canonical uppercase name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentKind::Option => "OPTION",
            InstrumentKind::Future => "FUTURE",
            InstrumentKind::Forward => "FORWARD",
            InstrumentKind::Swap => "SWAP",
            InstrumentKind::Warrant => "WARRANT",
        }
    }

    /// Returns the lowercase identifier, as used in serialized form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::Option => "option",
            InstrumentKind::Future => "future",
            InstrumentKind::Forward => "forward",
            InstrumentKind::Swap => "swap",
            InstrumentKind::Warrant => "warrant",
        }
    }
}

impl FromStr for InstrumentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
