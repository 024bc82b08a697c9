//! # Valor Core
//!
//! Core types and error definitions for the Valor instrument valuation engine.
//!
//! This crate provides the building blocks shared by every other Valor crate:
//!
//! - **Types**: [`CalculationInput`], the market/contract snapshot every
//!   valuation formula reads, and [`InstrumentKind`], the closed set of
//!   instrument categories used as a dispatch key
//! - **Reference data**: [`Dividend`] records
//! - **Errors**: [`CoreError`] and the [`CoreResult`] alias
//!
//! ## Example
//!
//! ```rust
//! use valor_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let kind: InstrumentKind = "Option".parse().unwrap();
//! assert_eq!(kind, InstrumentKind::Option);
//!
//! let input = CalculationInput::builder()
//!     .spot_price(dec!(100))
//!     .strike_price(dec!(95))
//!     .volatility(dec!(0.2))
//!     .time_to_expiry(dec!(0.25))
//!     .risk_free_rate(dec!(0.05))
//!     .fixed_rate(dec!(0.03))
//!     .floating_rate(dec!(0.02))
//!     .notional(dec!(1000000))
//!     .build()
//!     .unwrap();
//! assert_eq!(input.spot_price(), dec!(100));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{CalculationInput, CalculationInputBuilder, Dividend, InstrumentKind};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{CalculationInput, CalculationInputBuilder, Dividend, InstrumentKind};
