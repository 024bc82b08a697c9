//! Pluggable valuation registry.
//!
//! A [`ValuationRegistry`] maps a key to a valuation function. Lookups never
//! fail: applying a key with no registered function yields zero, so callers
//! may probe keys they have not registered.
//!
//! # Example
//!
//! ```rust
//! use valor_core::{CalculationInput, InstrumentKind};
//! use valor_engine::ValuationRegistry;
//! use rust_decimal::Decimal;
//! use rust_decimal_macros::dec;
//!
//! let mut registry = ValuationRegistry::<InstrumentKind, CalculationInput>::new();
//! registry.register(InstrumentKind::Swap, |input: &CalculationInput| input.notional());
//!
//! let input = CalculationInput::new(
//!     dec!(100), dec!(95), dec!(0.2), dec!(0.25),
//!     dec!(0.05), dec!(0.03), dec!(0.02), dec!(1000000),
//! );
//! assert_eq!(registry.apply(&InstrumentKind::Swap, &input), dec!(1000000));
//! assert_eq!(registry.apply(&InstrumentKind::Option, &input), Decimal::ZERO);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use valor_core::{CalculationInput, InstrumentKind};

use crate::formulas;

/// A shareable valuation function.
pub type Valuation<R> = Arc<dyn Fn(&R) -> Decimal + Send + Sync>;

/// Registry for the engine's own key and input types.
pub type InstrumentRegistry = ValuationRegistry<InstrumentKind, CalculationInput>;

/// Mutable mapping from a key to a valuation function.
pub struct ValuationRegistry<K, R> {
    strategies: HashMap<K, Valuation<R>>,
}

impl<K, R> ValuationRegistry<K, R>
where
    K: Eq + Hash + fmt::Debug,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registers a function for `key`, replacing any previous one.
    pub fn register<F>(&mut self, key: K, valuation: F)
    where
        F: Fn(&R) -> Decimal + Send + Sync + 'static,
    {
        self.register_shared(key, Arc::new(valuation));
    }

    /// Registers an already shared function for `key`.
    pub fn register_shared(&mut self, key: K, valuation: Valuation<R>) {
        debug!(key = ?key, "registering valuation");
        self.strategies.insert(key, valuation);
    }

    /// Removes the function for `key`, if any.
    pub fn unregister(&mut self, key: &K) {
        if self.strategies.remove(key).is_some() {
            debug!(key = ?key, "unregistered valuation");
        }
    }

    /// Removes every registered function.
    pub fn clear(&mut self) {
        debug!(count = self.strategies.len(), "clearing valuation registry");
        self.strategies.clear();
    }

    /// Applies the function registered for `key`.
    ///
    /// Returns zero if nothing is registered for `key`.
    pub fn apply(&self, key: &K, input: &R) -> Decimal {
        match self.strategies.get(key) {
            Some(valuation) => valuation(input),
            None => Decimal::ZERO,
        }
    }

    /// Returns a handle to the function registered for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Valuation<R>> {
        self.strategies.get(key).cloned()
    }

    /// Returns true if a function is registered for `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.strategies.contains_key(key)
    }

    /// Read access to the current registrations.
    #[must_use]
    pub fn strategies(&self) -> &HashMap<K, Valuation<R>> {
        &self.strategies
    }

    /// Returns all registered keys.
    #[must_use]
    pub fn keys(&self) -> Vec<&K> {
        self.strategies.keys().collect()
    }

    /// Returns the number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl<K, R> Default for ValuationRegistry<K, R>
where
    K: Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, R> Clone for ValuationRegistry<K, R>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            strategies: self.strategies.clone(),
        }
    }
}

impl<K: fmt::Debug, R> fmt::Debug for ValuationRegistry<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuationRegistry")
            .field("keys", &self.strategies.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ValuationRegistry<InstrumentKind, CalculationInput> {
    /// Creates a registry holding the standard formula for every kind.
    #[must_use]
    pub fn with_standard_formulas() -> Self {
        let mut registry = Self::new();
        for kind in InstrumentKind::ALL {
            if let Some(formula) = formulas::formula_for(kind) {
                registry.register(kind, formula);
            }
        }
        registry
    }
}
