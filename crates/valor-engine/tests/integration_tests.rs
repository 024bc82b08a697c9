//! Integration tests for valor-engine.
//!
//! End-to-end pricing through [`PricingService`] built from configuration
//! text, with observers attached.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use valor_config::{DispatchStrategy, EngineConfig};
use valor_core::{CalculationInput, InstrumentKind};
use valor_engine::formulas;
use valor_engine::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// The reference market snapshot.
fn reference_input() -> CalculationInput {
    CalculationInput::builder()
        .spot_price(dec!(100))
        .strike_price(dec!(95))
        .volatility(dec!(0.2))
        .time_to_expiry(dec!(0.25))
        .risk_free_rate(dec!(0.05))
        .fixed_rate(dec!(0.03))
        .floating_rate(dec!(0.02))
        .notional(dec!(1000000))
        .build()
        .unwrap()
}

fn counting_observer() -> (Arc<AtomicUsize>, Arc<dyn Observer>) {
    let count = Arc::new(AtomicUsize::new(0));
    let observer = {
        let count = Arc::clone(&count);
        observer_fn(move || {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    };
    (count, observer)
}

// =============================================================================
// REFERENCE SCENARIO
// =============================================================================

#[test]
fn test_reference_scenario_under_every_strategy() {
    for strategy in DispatchStrategy::ALL {
        let config = EngineConfig::new("reference").with_dispatch(strategy);
        let service = PricingService::new(config).unwrap();
        let input = reference_input();

        assert_eq!(service.recalculate(InstrumentKind::Option, &input).unwrap(), dec!(5.005));
        assert_eq!(service.recalculate(InstrumentKind::Forward, &input).unwrap(), dec!(101.25));
        assert_eq!(service.recalculate(InstrumentKind::Swap, &input).unwrap(), dec!(2500));
        assert_eq!(service.recalculate(InstrumentKind::Warrant, &input).unwrap(), dec!(4.75));

        let future = service.recalculate(InstrumentKind::Future, &input).unwrap();
        assert!((future - dec!(101.2578)).abs() < dec!(0.0001), "{strategy}: {future}");
    }
}

#[test]
fn test_service_from_toml() {
    let config = EngineConfig::from_toml_str(
        r#"
        name = "desk"
        dispatch = "registry"
        preload_standard_formulas = false
        price_precision = 2
        "#,
    )
    .unwrap();
    let service = PricingService::new(config).unwrap();

    // Nothing registered: lenient pricing at zero
    let prices = service.price_all(&reference_input()).unwrap();
    assert!(prices.iter().all(|(_, price)| *price == Decimal::ZERO));

    service.register(InstrumentKind::Future, formulas::future_value);
    assert_eq!(
        service.recalculate(InstrumentKind::Future, &reference_input()).unwrap(),
        dec!(101.26)
    );
}

#[test]
fn test_price_all_in_canonical_order() {
    let service = PricingService::default();
    let kinds: Vec<_> = service
        .price_all(&reference_input())
        .unwrap()
        .into_iter()
        .map(|(kind, _)| kind)
        .collect();
    assert_eq!(kinds, InstrumentKind::ALL.to_vec());
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[test]
fn test_every_observer_notified_once_per_recalculation() {
    let service = PricingService::default();
    let (first_count, first) = counting_observer();
    let (second_count, second) = counting_observer();
    service.subscribe(InstrumentKind::Option, first).unwrap();
    service.subscribe(InstrumentKind::Option, second).unwrap();

    for _ in 0..3 {
        service.recalculate(InstrumentKind::Option, &reference_input()).unwrap();
    }

    assert_eq!(first_count.load(Ordering::SeqCst), 3);
    assert_eq!(second_count.load(Ordering::SeqCst), 3);
}

#[test]
fn test_observers_see_recalculations_in_order() {
    let service = PricingService::default();
    let log = Arc::new(Mutex::new(Vec::new()));
    for name in ["risk", "blotter", "audit"] {
        let log = Arc::clone(&log);
        service
            .subscribe(
                InstrumentKind::Forward,
                observer_fn(move || {
                    log.lock().push(name);
                    Ok(())
                }),
            )
            .unwrap();
    }

    service.recalculate(InstrumentKind::Forward, &reference_input()).unwrap();
    assert_eq!(*log.lock(), vec!["risk", "blotter", "audit"]);
}

#[test]
fn test_failing_observer_reported_not_fatal() {
    let service = PricingService::default();
    let (count, healthy) = counting_observer();
    service
        .subscribe(
            InstrumentKind::Swap,
            observer_fn(|| Err(ObserverError::new("downstream unavailable"))),
        )
        .unwrap();
    service.subscribe(InstrumentKind::Swap, healthy).unwrap();

    let outcome = service
        .instrument(InstrumentKind::Swap)
        .unwrap()
        .recalculate_with_report(&reference_input())
        .unwrap();

    assert_eq!(outcome.price, dec!(2500));
    assert_eq!(outcome.notifications.delivered, 1);
    assert!(!outcome.notifications.is_clean());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

// =============================================================================
// CONCURRENCY
// =============================================================================

#[test]
fn test_concurrent_recalculation_and_registration() {
    let service = Arc::new(PricingService::default());
    let (count, observer) = counting_observer();
    service.subscribe(InstrumentKind::Warrant, observer).unwrap();

    let pricers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for _ in 0..50 {
                    let price = service
                        .recalculate(InstrumentKind::Warrant, &reference_input())
                        .unwrap();
                    assert!(price == dec!(4.75) || price == dec!(7));
                }
            })
        })
        .collect();

    let writer = {
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for i in 0..50 {
                if i % 2 == 0 {
                    service.register(InstrumentKind::Warrant, |_: &CalculationInput| dec!(7));
                } else {
                    service.unregister(InstrumentKind::Warrant);
                }
            }
        })
    };

    for handle in pricers {
        handle.join().unwrap();
    }
    writer.join().unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 200);
}
