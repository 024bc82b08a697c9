//! Market and contract inputs for a single valuation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Snapshot of market and contract parameters read by the valuation formulas.
///
/// Each formula reads only the fields it needs; none of the eight fields is
/// used by every formula. The value is immutable once built and is passed to
/// the engine by reference for each pricing request.
///
/// # Example
///
/// ```rust
/// use valor_core::CalculationInput;
/// use rust_decimal_macros::dec;
///
/// let input = CalculationInput::new(
///     dec!(100),     // spot
///     dec!(95),      // strike
///     dec!(0.2),     // volatility
///     dec!(0.25),    // time to expiry (years)
///     dec!(0.05),    // risk-free rate
///     dec!(0.03),    // fixed rate
///     dec!(0.02),    // floating rate
///     dec!(1000000), // notional
/// );
/// assert_eq!(input.strike_price(), dec!(95));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalculationInput {
    spot_price: Decimal,
    strike_price: Decimal,
    volatility: Decimal,
    time_to_expiry: Decimal,
    risk_free_rate: Decimal,
    fixed_rate: Decimal,
    floating_rate: Decimal,
    notional: Decimal,
}

impl CalculationInput {
    /// Creates an input from all eight fields, in declaration order.
    #[must_use]
    pub fn new(
        spot_price: Decimal,
        strike_price: Decimal,
        volatility: Decimal,
        time_to_expiry: Decimal,
        risk_free_rate: Decimal,
        fixed_rate: Decimal,
        floating_rate: Decimal,
        notional: Decimal,
    ) -> Self {
        Self {
            spot_price,
            strike_price,
            volatility,
            time_to_expiry,
            risk_free_rate,
            fixed_rate,
            floating_rate,
            notional,
        }
    }

    /// Returns a builder that requires every field to be set.
    #[must_use]
    pub fn builder() -> CalculationInputBuilder {
        CalculationInputBuilder::new()
    }

    /// Spot price of the underlying.
    #[must_use]
    pub fn spot_price(&self) -> Decimal {
        self.spot_price
    }

    /// Strike price.
    #[must_use]
    pub fn strike_price(&self) -> Decimal {
        self.strike_price
    }

    /// Volatility of the underlying, as a decimal (0.2 = 20%).
    #[must_use]
    pub fn volatility(&self) -> Decimal {
        self.volatility
    }

    /// Time to expiry in years.
    #[must_use]
    pub fn time_to_expiry(&self) -> Decimal {
        self.time_to_expiry
    }

    /// Continuously compounded risk-free rate.
    #[must_use]
    pub fn risk_free_rate(&self) -> Decimal {
        self.risk_free_rate
    }

    /// Fixed leg rate.
    #[must_use]
    pub fn fixed_rate(&self) -> Decimal {
        self.fixed_rate
    }

    /// Floating leg rate.
    #[must_use]
    pub fn floating_rate(&self) -> Decimal {
        self.floating_rate
    }

    /// Contract notional.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.notional
    }
}

/// Builder for [`CalculationInput`].
///
/// Every field is mandatory; [`build`](Self::build) reports the first field
/// (in declaration order) that was never set.
#[derive(Debug, Clone, Default)]
pub struct CalculationInputBuilder {
    spot_price: Option<Decimal>,
    strike_price: Option<Decimal>,
    volatility: Option<Decimal>,
    time_to_expiry: Option<Decimal>,
    risk_free_rate: Option<Decimal>,
    fixed_rate: Option<Decimal>,
    floating_rate: Option<Decimal>,
    notional: Option<Decimal>,
}

impl CalculationInputBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spot price.
    #[must_use]
    pub fn spot_price(mut self, value: Decimal) -> Self {
        self.spot_price = Some(value);
        self
    }

    /// Sets the strike price.
    #[must_use]
    pub fn strike_price(mut self, value: Decimal) -> Self {
        self.strike_price = Some(value);
        self
    }

    /// Sets the volatility.
    #[must_use]
    pub fn volatility(mut self, value: Decimal) -> Self {
        self.volatility = Some(value);
        self
    }

    /// Sets the time to expiry in years.
    #[must_use]
    pub fn time_to_expiry(mut self, value: Decimal) -> Self {
        self.time_to_expiry = Some(value);
        self
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn risk_free_rate(mut self, value: Decimal) -> Self {
        self.risk_free_rate = Some(value);
        self
    }

    /// Sets the fixed leg rate.
    #[must_use]
    pub fn fixed_rate(mut self, value: Decimal) -> Self {
        self.fixed_rate = Some(value);
        self
    }

    /// Sets the floating leg rate.
    #[must_use]
    pub fn floating_rate(mut self, value: Decimal) -> Self {
        self.floating_rate = Some(value);
        self
    }

    /// Sets the notional.
    #[must_use]
    pub fn notional(mut self, value: Decimal) -> Self {
        self.notional = Some(value);
        self
    }

    /// Builds the input.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingField` naming the first unset field.
    pub fn build(self) -> CoreResult<CalculationInput> {
        Ok(CalculationInput {
            spot_price: self.spot_price.ok_or(CoreError::missing_field("spot_price"))?,
            strike_price: self
                .strike_price
                .ok_or(CoreError::missing_field("strike_price"))?,
            volatility: self.volatility.ok_or(CoreError::missing_field("volatility"))?,
            time_to_expiry: self
                .time_to_expiry
                .ok_or(CoreError::missing_field("time_to_expiry"))?,
            risk_free_rate: self
                .risk_free_rate
                .ok_or(CoreError::missing_field("risk_free_rate"))?,
            fixed_rate: self.fixed_rate.ok_or(CoreError::missing_field("fixed_rate"))?,
            floating_rate: self
                .floating_rate
                .ok_or(CoreError::missing_field("floating_rate"))?,
            notional: self.notional.ok_or(CoreError::missing_field("notional"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn full_builder() -> CalculationInputBuilder {
        CalculationInput::builder()
            .spot_price(dec!(100))
            .strike_price(dec!(95))
            .volatility(dec!(0.2))
            .time_to_expiry(dec!(0.25))
            .risk_free_rate(dec!(0.05))
            .fixed_rate(dec!(0.03))
            .floating_rate(dec!(0.02))
            .notional(dec!(1000000))
    }

    #[test]
    fn test_builder_matches_positional_constructor() {
        let built = full_builder().build().unwrap();
        let direct = CalculationInput::new(
            dec!(100),
            dec!(95),
            dec!(0.2),
            dec!(0.25),
            dec!(0.05),
            dec!(0.03),
            dec!(0.02),
            dec!(1000000),
        );
        assert_eq!(built, direct);
    }

    #[test]
    fn test_accessors() {
        let input = full_builder().build().unwrap();
        assert_eq!(input.spot_price(), dec!(100));
        assert_eq!(input.strike_price(), dec!(95));
        assert_eq!(input.volatility(), dec!(0.2));
        assert_eq!(input.time_to_expiry(), dec!(0.25));
        assert_eq!(input.risk_free_rate(), dec!(0.05));
        assert_eq!(input.fixed_rate(), dec!(0.03));
        assert_eq!(input.floating_rate(), dec!(0.02));
        assert_eq!(input.notional(), dec!(1000000));
    }

    #[test]
    fn test_builder_reports_missing_field() {
        let err = CalculationInput::builder()
            .spot_price(dec!(100))
            .build()
            .unwrap_err();
        assert_eq!(err, CoreError::missing_field("strike_price"));

        let err = CalculationInputBuilder {
            notional: None,
            ..full_builder()
        }
        .build()
        .unwrap_err();
        assert_eq!(err, CoreError::missing_field("notional"));
    }

    #[test]
    fn test_serde_round_trip() {
        let input = full_builder().build().unwrap();
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("spot_price"));
        let parsed: CalculationInput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, input);
    }
}
