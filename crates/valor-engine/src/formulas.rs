//! Standard valuation formulas.
//!
//! One pure function per [`InstrumentKind`]. All arithmetic is decimal except
//! the exponential in [`future_value`], which is evaluated in `f64` and brought
//! back to decimal before the final multiplication.
//!
//! | Kind | Value |
//! |---|---|
//! | Option | `max(0, S - K) + σ·T·0.1` |
//! | Future | `S·exp(r·T)` |
//! | Forward | `S·(1 + r·T)` |
//! | Swap | `N·(fixed - floating)·T` |
//! | Warrant | `max(0, S - K)·0.95` |
//!
//! Arithmetic saturates at the bounds of `Decimal` instead of panicking.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use valor_core::{CalculationInput, InstrumentKind};

use crate::error::{EngineError, EngineResult};

/// A standard valuation formula.
pub type Formula = fn(&CalculationInput) -> Decimal;

/// Intrinsic value `max(0, spot - strike)`.
fn intrinsic_value(input: &CalculationInput) -> Decimal {
    input
        .spot_price()
        .saturating_sub(input.strike_price())
        .max(Decimal::ZERO)
}

/// Option value: intrinsic value plus a linear time value.
pub fn option_value(input: &CalculationInput) -> Decimal {
    let time_value = input
        .volatility()
        .saturating_mul(input.time_to_expiry())
        .saturating_mul(dec!(0.1));
    intrinsic_value(input).saturating_add(time_value)
}

/// Future value: spot grown at the continuously compounded risk-free rate.
pub fn future_value(input: &CalculationInput) -> Decimal {
    let exponent = input.risk_free_rate().saturating_mul(input.time_to_expiry());
    input.spot_price().saturating_mul(exp_decimal(exponent))
}

/// Forward value: spot grown at simple interest.
pub fn forward_value(input: &CalculationInput) -> Decimal {
    let rate_component = Decimal::ONE
        .saturating_add(input.risk_free_rate().saturating_mul(input.time_to_expiry()));
    input.spot_price().saturating_mul(rate_component)
}

/// Swap value: notional times the fixed/floating rate differential over the term.
pub fn swap_value(input: &CalculationInput) -> Decimal {
    let rate_diff = input.fixed_rate().saturating_sub(input.floating_rate());
    input
        .notional()
        .saturating_mul(rate_diff)
        .saturating_mul(input.time_to_expiry())
}

/// Warrant value: intrinsic value with a 5% dilution haircut.
pub fn warrant_value(input: &CalculationInput) -> Decimal {
    intrinsic_value(input).saturating_mul(dec!(0.95))
}

/// `exp(x)` evaluated in `f64`.
///
/// The result is converted through its shortest round-trip decimal text, so
/// `exp(0)` is exactly one and no binary noise leaks into the decimal digits.
#[inline]
fn exp_decimal(exponent: Decimal) -> Decimal {
    let factor = exponent.to_f64().unwrap_or(0.0).exp();
    factor
        .to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_f64(factor))
        .unwrap_or(if factor > 1.0 {
            Decimal::MAX
        } else {
            Decimal::ZERO
        })
}

/// Returns the standard formula for a kind.
///
/// This is the built-in switch. `None` means the kind has no standard formula.
pub fn formula_for(kind: InstrumentKind) -> Option<Formula> {
    match kind {
        InstrumentKind::Option => Some(option_value),
        InstrumentKind::Future => Some(future_value),
        InstrumentKind::Forward => Some(forward_value),
        InstrumentKind::Swap => Some(swap_value),
        InstrumentKind::Warrant => Some(warrant_value),
        _ => None,
    }
}

/// Values an instrument with the built-in switch.
///
/// # Errors
///
/// Returns `EngineError::UnsupportedKind` if the kind has no standard formula.
pub fn builtin_value(kind: InstrumentKind, input: &CalculationInput) -> EngineResult<Decimal> {
    formula_for(kind)
        .map(|formula| formula(input))
        .ok_or_else(|| EngineError::unsupported_kind(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

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

    fn with_spot_strike(spot: Decimal, strike: Decimal) -> CalculationInput {
        let base = reference_input();
        CalculationInput::new(
            spot,
            strike,
            base.volatility(),
            base.time_to_expiry(),
            base.risk_free_rate(),
            base.fixed_rate(),
            base.floating_rate(),
            base.notional(),
        )
    }

    #[test]
    fn test_option_reference_value() {
        assert_eq!(option_value(&reference_input()), dec!(5.005));
    }

    #[test]
    fn test_option_out_of_the_money_keeps_time_value() {
        let input = with_spot_strike(dec!(90), dec!(95));
        assert_eq!(option_value(&input), dec!(0.005));
    }

    #[test]
    fn test_future_reference_value() {
        let value = future_value(&reference_input());
        let expected = 100.0 * 0.0125_f64.exp();
        assert_relative_eq!(value.to_f64().unwrap(), expected, epsilon = 1e-10);
        assert!((value - dec!(101.2578)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_future_zero_rate_equals_spot() {
        let input = CalculationInput::new(
            dec!(123.45),
            dec!(0),
            dec!(0),
            dec!(0.5),
            dec!(0),
            dec!(0),
            dec!(0),
            dec!(0),
        );
        assert_eq!(future_value(&input), dec!(123.45));
    }

    #[test]
    fn test_forward_reference_value() {
        assert_eq!(forward_value(&reference_input()), dec!(101.25));
    }

    #[test]
    fn test_swap_reference_value() {
        assert_eq!(swap_value(&reference_input()), dec!(2500));
    }

    #[test]
    fn test_swap_negative_when_floating_exceeds_fixed() {
        let base = reference_input();
        let input = CalculationInput::new(
            base.spot_price(),
            base.strike_price(),
            base.volatility(),
            dec!(1),
            base.risk_free_rate(),
            dec!(0.02),
            dec!(0.03),
            dec!(1000),
        );
        assert_eq!(swap_value(&input), dec!(-10));
    }

    #[test]
    fn test_warrant_reference_value() {
        assert_eq!(warrant_value(&reference_input()), dec!(4.75));
    }

    #[test]
    fn test_warrant_floors_at_zero() {
        let input = with_spot_strike(dec!(50), dec!(95));
        assert_eq!(warrant_value(&input), Decimal::ZERO);
    }

    #[test]
    fn test_exp_decimal() {
        assert_eq!(exp_decimal(Decimal::ZERO), Decimal::ONE);
        assert_eq!(exp_decimal(dec!(1000)), Decimal::MAX);
        assert_eq!(exp_decimal(dec!(-1000)), Decimal::ZERO);
    }

    #[test]
    fn test_saturation_does_not_panic() {
        let input = CalculationInput::new(
            Decimal::MAX,
            Decimal::MIN,
            Decimal::MAX,
            Decimal::MAX,
            dec!(1),
            Decimal::MAX,
            Decimal::MIN,
            Decimal::MAX,
        );
        for kind in InstrumentKind::ALL {
            let value = builtin_value(kind, &input).unwrap();
            assert!(value >= Decimal::ZERO, "{kind} priced at {value}");
        }
    }

    #[test]
    fn test_formula_for_every_kind() {
        let input = reference_input();
        for kind in InstrumentKind::ALL {
            let formula = formula_for(kind).unwrap();
            assert_eq!(formula(&input), builtin_value(kind, &input).unwrap());
        }
    }
}
