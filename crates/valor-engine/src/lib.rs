//! # Valor Engine
//!
//! Instrument valuation with a pluggable formula registry and change
//! notification.
//!
//! - [`formulas`]: the standard formula per instrument kind and the
//!   built-in switch over them
//! - [`ValuationRegistry`]: a runtime-mutable map from key to valuation
//!   function that yields zero for unknown keys
//! - [`PricedInstrument`]: an instrument bound to one kind that reprices on
//!   demand and notifies its [`Observer`]s
//! - [`PricingService`]: one instrument per kind wired from an
//!   [`EngineConfig`](valor_config::EngineConfig)
//!
//! ## Dispatch
//!
//! How an instrument resolves its formula is chosen by
//! [`DispatchStrategy`](valor_config::DispatchStrategy):
//!
//! | Strategy | Registered | Not registered |
//! |---|---|---|
//! | `registry` | registered function | zero |
//! | `builtin` | built-in switch | built-in switch |
//! | `layered` | registered function | built-in switch |
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use valor_core::{CalculationInput, InstrumentKind};
//! use valor_engine::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let instrument = PricedInstrument::builtin(InstrumentKind::Swap);
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&calls);
//! instrument.subscribe(observer_fn(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     Ok(())
//! }));
//!
//! let input = CalculationInput::new(
//!     dec!(100), dec!(95), dec!(0.2), dec!(0.25),
//!     dec!(0.05), dec!(0.03), dec!(0.02), dec!(1000000),
//! );
//! assert_eq!(instrument.recalculate(&input).unwrap(), dec!(2500));
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod formulas;
pub mod instrument;
pub mod notifier;
pub mod registry;
pub mod service;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::instrument::{PricedInstrument, Recalculation, SharedRegistry};
    pub use crate::notifier::{
        observer_fn, ChangeNotifier, NotificationReport, Observer, ObserverError,
    };
    pub use crate::registry::{InstrumentRegistry, Valuation, ValuationRegistry};
    pub use crate::service::PricingService;
}

pub use error::{EngineError, EngineResult};
pub use formulas::{builtin_value, formula_for, Formula};
pub use instrument::{PricedInstrument, Recalculation, SharedRegistry};
pub use notifier::{observer_fn, ChangeNotifier, FnObserver, NotificationReport, Observer, ObserverError};
pub use registry::{InstrumentRegistry, Valuation, ValuationRegistry};
pub use service::PricingService;
