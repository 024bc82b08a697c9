//! Pricing service.
//!
//! [`PricingService`] owns a valuation registry and one [`PricedInstrument`]
//! per [`InstrumentKind`], all wired from an [`EngineConfig`].
//!
//! # Example
//!
//! ```rust
//! use valor_core::{CalculationInput, InstrumentKind};
//! use valor_engine::PricingService;
//! use rust_decimal_macros::dec;
//!
//! let service = PricingService::default();
//! let input = CalculationInput::new(
//!     dec!(100), dec!(95), dec!(0.2), dec!(0.25),
//!     dec!(0.05), dec!(0.03), dec!(0.02), dec!(1000000),
//! );
//!
//! let price = service.recalculate(InstrumentKind::Forward, &input).unwrap();
//! assert_eq!(price, dec!(101.25));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::info;

use valor_config::{EngineConfig, Validate};
use valor_core::{CalculationInput, InstrumentKind};

use crate::error::{EngineError, EngineResult};
use crate::instrument::{PricedInstrument, SharedRegistry};
use crate::notifier::Observer;
use crate::registry::InstrumentRegistry;

/// Owns a registry and the instruments that dispatch through it.
#[derive(Debug)]
pub struct PricingService {
    config: EngineConfig,
    registry: SharedRegistry,
    instruments: BTreeMap<InstrumentKind, PricedInstrument>,
}

impl PricingService {
    /// Creates a service from a configuration.
    ///
    /// The registry is seeded with the standard formulas when the
    /// configuration asks for it.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Config` if the configuration is invalid.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let registry = if config.preload_standard_formulas {
            InstrumentRegistry::with_standard_formulas()
        } else {
            InstrumentRegistry::new()
        };
        Self::with_registry(config, registry)
    }

    /// Creates a service around a caller-supplied registry.
    ///
    /// `preload_standard_formulas` is ignored; the registry is used as given.
    pub fn with_registry(config: EngineConfig, registry: InstrumentRegistry) -> EngineResult<Self> {
        config.validate_or_error()?;
        Ok(Self::assemble(config, registry))
    }

    fn assemble(config: EngineConfig, registry: InstrumentRegistry) -> Self {
        let registry: SharedRegistry = Arc::new(RwLock::new(registry));
        let instruments = InstrumentKind::ALL
            .into_iter()
            .map(|kind| {
                let instrument =
                    PricedInstrument::with_registry(kind, config.dispatch, Arc::clone(&registry));
                let instrument = match config.price_precision {
                    Some(precision) => instrument.with_price_precision(precision),
                    None => instrument,
                };
                (kind, instrument)
            })
            .collect();

        info!(
            config = %config.name,
            dispatch = %config.dispatch,
            registered = registry.read().len(),
            "pricing service ready"
        );

        Self {
            config,
            registry,
            instruments,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared handle to the registry.
    pub fn registry(&self) -> SharedRegistry {
        Arc::clone(&self.registry)
    }

    /// The instrument for a kind.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnsupportedKind` if the service holds no
    /// instrument for the kind.
    pub fn instrument(&self, kind: InstrumentKind) -> EngineResult<&PricedInstrument> {
        self.instruments
            .get(&kind)
            .ok_or_else(|| EngineError::unsupported_kind(kind))
    }

    /// Recalculates the instrument for `kind` and notifies its subscribers.
    pub fn recalculate(&self, kind: InstrumentKind, input: &CalculationInput) -> EngineResult<Decimal> {
        self.instrument(kind)?.recalculate(input)
    }

    /// Recalculates the instrument whose kind is named by `kind`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Core` if `kind` is not a valid kind name.
    pub fn recalculate_named(&self, kind: &str, input: &CalculationInput) -> EngineResult<Decimal> {
        let kind = InstrumentKind::parse(kind)?;
        self.recalculate(kind, input)
    }

    /// Recalculates every kind in canonical order.
    pub fn price_all(&self, input: &CalculationInput) -> EngineResult<Vec<(InstrumentKind, Decimal)>> {
        InstrumentKind::ALL
            .iter()
            .map(|&kind| Ok((kind, self.recalculate(kind, input)?)))
            .collect()
    }

    // =========================================================================
    // Registry management
    // =========================================================================

    /// Registers or replaces the valuation for `kind`.
    pub fn register<F>(&self, kind: InstrumentKind, valuation: F)
    where
        F: Fn(&CalculationInput) -> Decimal + Send + Sync + 'static,
    {
        self.registry.write().register(kind, valuation);
    }

    /// Removes the valuation for `kind`, if any.
    pub fn unregister(&self, kind: InstrumentKind) {
        self.registry.write().unregister(&kind);
    }

    /// Removes every registered valuation.
    pub fn clear_registry(&self) {
        self.registry.write().clear();
    }

    /// Applies the registered valuation for `kind`, or zero if none.
    ///
    /// Does not notify subscribers.
    pub fn apply(&self, kind: InstrumentKind, input: &CalculationInput) -> Decimal {
        let valuation = self.registry.read().get(&kind);
        valuation.map_or(Decimal::ZERO, |v| v(input))
    }

    /// Kinds with a registered valuation, in canonical order.
    pub fn registered_kinds(&self) -> Vec<InstrumentKind> {
        let registry = self.registry.read();
        InstrumentKind::ALL
            .into_iter()
            .filter(|kind| registry.contains(kind))
            .collect()
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Subscribes an observer to recalculations of `kind`.
    pub fn subscribe(&self, kind: InstrumentKind, observer: Arc<dyn Observer>) -> EngineResult<()> {
        self.instrument(kind)?.subscribe(observer);
        Ok(())
    }

    /// Unsubscribes an observer from `kind`. Returns true if it was subscribed.
    pub fn unsubscribe(&self, kind: InstrumentKind, observer: &Arc<dyn Observer>) -> EngineResult<bool> {
        Ok(self.instrument(kind)?.unsubscribe(observer))
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::assemble(
            EngineConfig::default(),
            InstrumentRegistry::with_standard_formulas(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::observer_fn;
    use parking_lot::Mutex;
    use rust_decimal_macros::dec;
    use valor_config::DispatchStrategy;

    fn reference_input() -> CalculationInput {
        CalculationInput::new(
            dec!(100),
            dec!(95),
            dec!(0.2),
            dec!(0.25),
            dec!(0.05),
            dec!(0.03),
            dec!(0.02),
            dec!(1000000),
        )
    }

    #[test]
    fn test_default_service_prices_every_kind() {
        let service = PricingService::default();
        let prices = service.price_all(&reference_input()).unwrap();

        assert_eq!(prices.len(), 5);
        assert_eq!(prices[0], (InstrumentKind::Option, dec!(5.005)));
        assert_eq!(prices[2], (InstrumentKind::Forward, dec!(101.25)));
        assert_eq!(prices[3], (InstrumentKind::Swap, dec!(2500)));
        assert_eq!(prices[4], (InstrumentKind::Warrant, dec!(4.75)));
        assert_eq!(service.config().dispatch, DispatchStrategy::Layered);
    }

    #[test]
    fn test_registry_strategy_without_preload_prices_zero() {
        let config = EngineConfig::new("lenient")
            .with_dispatch(DispatchStrategy::Registry)
            .with_standard_formulas(false);
        let service = PricingService::new(config).unwrap();

        assert!(service.registered_kinds().is_empty());
        for kind in InstrumentKind::ALL {
            assert_eq!(service.recalculate(kind, &reference_input()).unwrap(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_register_override() {
        let service = PricingService::new(EngineConfig::default()).unwrap();
        service.register(InstrumentKind::Warrant, |input: &CalculationInput| {
            input.spot_price() - input.strike_price()
        });

        assert_eq!(
            service.recalculate(InstrumentKind::Warrant, &reference_input()).unwrap(),
            dec!(5)
        );

        service.unregister(InstrumentKind::Warrant);
        // Layered falls back to the built-in switch
        assert_eq!(
            service.recalculate(InstrumentKind::Warrant, &reference_input()).unwrap(),
            dec!(4.75)
        );
        assert_eq!(service.apply(InstrumentKind::Warrant, &reference_input()), Decimal::ZERO);
    }

    #[test]
    fn test_clear_registry() {
        let service = PricingService::new(EngineConfig::default()).unwrap();
        assert_eq!(service.registered_kinds(), InstrumentKind::ALL.to_vec());

        service.clear_registry();
        assert!(service.registered_kinds().is_empty());
        assert_eq!(service.registry().read().len(), 0);
    }

    #[test]
    fn test_default_matches_default_config() {
        let from_default = PricingService::default();
        let from_config = PricingService::new(EngineConfig::default()).unwrap();

        assert_eq!(from_default.config(), from_config.config());
        assert_eq!(from_default.registered_kinds(), from_config.registered_kinds());
        assert_eq!(
            from_default.price_all(&reference_input()).unwrap(),
            from_config.price_all(&reference_input()).unwrap()
        );
    }

    #[test]
    fn test_recalculate_by_name() {
        let service = PricingService::default();
        assert_eq!(
            service.recalculate_named("Swap", &reference_input()).unwrap(),
            dec!(2500)
        );

        let err = service.recalculate_named("bond", &reference_input()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(valor_core::CoreError::InvalidKind { ref value }) if value == "bond"
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::new("bad").with_price_precision(40);
        let err = PricingService::new(config).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_price_precision_applied_to_every_instrument() {
        let config = EngineConfig::new("rounded").with_price_precision(1);
        let service = PricingService::new(config).unwrap();

        assert_eq!(
            service.recalculate(InstrumentKind::Future, &reference_input()).unwrap(),
            dec!(101.3)
        );
        assert_eq!(
            service.recalculate(InstrumentKind::Warrant, &reference_input()).unwrap(),
            dec!(4.8)
        );
    }

    #[test]
    fn test_subscriptions_are_per_kind() {
        let service = PricingService::default();
        let log = Arc::new(Mutex::new(Vec::new()));
        let observer = {
            let log = Arc::clone(&log);
            observer_fn(move || {
                log.lock().push("swap");
                Ok(())
            })
        };
        service.subscribe(InstrumentKind::Swap, Arc::clone(&observer)).unwrap();

        service.recalculate(InstrumentKind::Option, &reference_input()).unwrap();
        assert!(log.lock().is_empty());

        service.recalculate(InstrumentKind::Swap, &reference_input()).unwrap();
        assert_eq!(log.lock().len(), 1);

        assert!(service.unsubscribe(InstrumentKind::Swap, &observer).unwrap());
        service.recalculate(InstrumentKind::Swap, &reference_input()).unwrap();
        assert_eq!(log.lock().len(), 1);
    }
}
