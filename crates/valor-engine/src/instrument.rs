//! Recalculating instruments.
//!
//! A [`PricedInstrument`] is bound to one [`InstrumentKind`] for its whole
//! life. Each call to [`recalculate`](PricedInstrument::recalculate) resolves
//! the valuation formula through the configured [`DispatchStrategy`], prices
//! the input, then notifies every subscriber before returning the price.

use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use valor_config::DispatchStrategy;
use valor_core::{CalculationInput, InstrumentKind};

use crate::error::{EngineError, EngineResult};
use crate::formulas;
use crate::notifier::{ChangeNotifier, NotificationReport, Observer};
use crate::registry::{InstrumentRegistry, Valuation};

/// Registry handle shared between the instruments of one service.
pub type SharedRegistry = Arc<RwLock<InstrumentRegistry>>;

/// Result of a recalculation together with its notification outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recalculation {
    /// Computed price.
    pub price: Decimal,
    /// What happened when subscribers were notified.
    pub notifications: NotificationReport,
}

/// An instrument that can be repriced on demand and observed.
#[derive(Debug)]
pub struct PricedInstrument {
    kind: InstrumentKind,
    dispatch: DispatchStrategy,
    registry: Option<SharedRegistry>,
    price_precision: Option<u32>,
    notifier: ChangeNotifier,
}

impl PricedInstrument {
    /// Creates an instrument.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::RegistryUnavailable` if the strategy consults a
    /// registry and none is given.
    pub fn new(
        kind: InstrumentKind,
        dispatch: DispatchStrategy,
        registry: Option<SharedRegistry>,
    ) -> EngineResult<Self> {
        match registry {
            Some(registry) => Ok(Self::with_registry(kind, dispatch, registry)),
            None if dispatch.uses_registry() => Err(EngineError::RegistryUnavailable {
                strategy: dispatch.to_string(),
            }),
            None => Ok(Self::builtin(kind)),
        }
    }

    /// Creates an instrument bound to a shared registry.
    pub fn with_registry(
        kind: InstrumentKind,
        dispatch: DispatchStrategy,
        registry: SharedRegistry,
    ) -> Self {
        Self {
            kind,
            dispatch,
            registry: Some(registry),
            price_precision: None,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Creates an instrument that always uses the built-in switch.
    pub fn builtin(kind: InstrumentKind) -> Self {
        Self {
            kind,
            dispatch: DispatchStrategy::Builtin,
            registry: None,
            price_precision: None,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Rounds reported prices to `precision` decimal places.
    #[must_use]
    pub fn with_price_precision(mut self, precision: u32) -> Self {
        self.price_precision = Some(precision);
        self
    }

    /// The instrument kind.
    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// The dispatch strategy.
    pub fn dispatch(&self) -> DispatchStrategy {
        self.dispatch
    }

    /// The subscriber list.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Subscribes an observer to recalculations of this instrument.
    pub fn subscribe(&self, observer: Arc<dyn Observer>) {
        self.notifier.subscribe(observer);
    }

    /// Unsubscribes an observer. Returns true if it was subscribed.
    pub fn unsubscribe(&self, observer: &Arc<dyn Observer>) -> bool {
        self.notifier.unsubscribe(observer)
    }

    /// Prices the input and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnsupportedKind` if the built-in switch is used
    /// and has no formula for this kind. Subscribers are not notified then.
    pub fn recalculate(&self, input: &CalculationInput) -> EngineResult<Decimal> {
        self.recalculate_with_report(input).map(|r| r.price)
    }

    /// Prices the input, notifies subscribers and reports both outcomes.
    pub fn recalculate_with_report(&self, input: &CalculationInput) -> EngineResult<Recalculation> {
        let mut price = self.evaluate(input)?;
        if let Some(precision) = self.price_precision {
            price = price.round_dp(precision);
        }

        debug!(
            kind = %self.kind,
            strategy = %self.dispatch,
            price = %price,
            "recalculated instrument"
        );

        let notifications = self.notifier.notify_all();
        Ok(Recalculation {
            price,
            notifications,
        })
    }

    fn evaluate(&self, input: &CalculationInput) -> EngineResult<Decimal> {
        match self.dispatch {
            DispatchStrategy::Builtin => formulas::builtin_value(self.kind, input),
            DispatchStrategy::Registry => match self.registered() {
                Some(valuation) => Ok(valuation(input)),
                None => {
                    warn!(kind = %self.kind, "no registered valuation, pricing at zero");
                    Ok(Decimal::ZERO)
                }
            },
            DispatchStrategy::Layered => match self.registered() {
                Some(valuation) => Ok(valuation(input)),
                None => formulas::builtin_value(self.kind, input),
            },
        }
    }

    /// Looks up the registered valuation without holding the lock while it runs.
    fn registered(&self) -> Option<Valuation<CalculationInput>> {
        self.registry
            .as_ref()
            .and_then(|registry| registry.read().get(&self.kind))
    }
}
