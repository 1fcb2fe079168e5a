use crate::error::{AwamuError, Result};
use serde::Serialize;
use std::ops::RangeInclusive;

/// A purchasable item template from the goods catalog.
///
/// Prices are whole currency units. The allowed installment period is an
/// inclusive range of months and is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Good {
    label: String,
    key: String,
    price: u64,
    min_period: u32,
    max_period: u32,
}

impl Good {
    pub fn new(
        label: impl Into<String>,
        key: impl Into<String>,
        price: u64,
        min_period: u32,
        max_period: u32,
    ) -> Result<Self> {
        let key = key.into();
        if min_period == 0 {
            return Err(AwamuError::InvalidInput(format!(
                "good {key}: minimum period must be at least one month"
            )));
        }
        if min_period > max_period {
            return Err(AwamuError::InvalidInput(format!(
                "good {key}: minimum period {min_period} exceeds maximum period {max_period}"
            )));
        }
        Ok(Self {
            label: label.into(),
            key,
            price,
            min_period,
            max_period,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn min_period(&self) -> u32 {
        self.min_period
    }

    pub fn max_period(&self) -> u32 {
        self.max_period
    }

    pub fn periods(&self) -> RangeInclusive<u32> {
        self.min_period..=self.max_period
    }

    pub fn allows_period(&self, months: u32) -> bool {
        self.periods().contains(&months)
    }
}
