use crate::error::AwamuError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive amount charged in a single payment.
///
/// Wraps `rust_decimal::Decimal` so that a zero or negative charge can never
/// reach a gateway.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, AwamuError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(AwamuError::validation(
                "amount",
                "amount must be greater than zero",
            ))
        }
    }

    /// Builds an amount from whole currency units.
    pub fn from_units(units: u64) -> Result<Self, AwamuError> {
        Self::new(Decimal::from(units))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AwamuError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
