//! Domain types for instrument valuation.
//!
//! - [`CalculationInput`]: Eight-field market/contract snapshot
//! - [`InstrumentKind`]: Supported instrument categories
//! - [`Dividend`]: Dated dividend amount

mod dividend;
mod input;
mod kind;

pub use dividend::Dividend;
pub use input::{CalculationInput, CalculationInputBuilder};
pub use kind::InstrumentKind;
