//! Dividend records.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A dividend paid on an underlying at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dividend {
    date_time: NaiveDateTime,
    amount: Decimal,
}

impl Dividend {
    /// Creates a dividend record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDividend` if the amount is negative.
    pub fn new(date_time: NaiveDateTime, amount: Decimal) -> CoreResult<Self> {
        if amount < Decimal::ZERO {
            return Err(CoreError::InvalidDividend {
                amount,
                reason: "Dividend amount cannot be negative".into(),
            });
        }
        Ok(Self { date_time, amount })
    }

    /// Payment timestamp.
    #[must_use]
    pub fn date_time(&self) -> NaiveDateTime {
        self.date_time
    }

    /// Amount paid per unit of underlying.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl PartialOrd for Dividend {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dividend {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date_time
            .cmp(&other.date_time)
            .then_with(|| self.amount.cmp(&other.amount))
    }
}

impl fmt::Display for Dividend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.amount, self.date_time)
    }
}
