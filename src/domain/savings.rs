use crate::error::{AwamuError, Result};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Share of total savings that may be requested as emergency funds.
pub const EMERGENCY_RATE: Decimal = dec!(0.02);

pub fn emergency_eligible_amount(total_savings: Decimal) -> Decimal {
    (total_savings * EMERGENCY_RATE).floor()
}

/// Percentage of the milestone reached, clamped to `0..=100`.
pub fn progress_percent(total_savings: Decimal, milestone: Decimal) -> Result<u8> {
    if milestone <= Decimal::ZERO {
        return Err(AwamuError::InvalidInput(
            "savings milestone must be positive".to_string(),
        ));
    }
    // Overflow only happens far above the milestone.
    let percent = total_savings
        .checked_div(milestone)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map_or(dec!(100), |p| p.floor());
    let clamped = percent.clamp(Decimal::ZERO, dec!(100));
    clamped
        .to_u8()
        .ok_or_else(|| AwamuError::InvalidInput(format!("progress out of range: {clamped}")))
}

/// An approved emergency request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyWithdrawal {
    pub amount: Decimal,
    pub requested_at: DateTime<Utc>,
    pub available_again_at: DateTime<Utc>,
}

/// A customer's accumulated savings toward a milestone.
///
/// Emergency funds can be requested once per period; the flag clears itself
/// when the period has elapsed.
#[derive(Debug, Clone)]
pub struct SavingsAccount {
    total_savings: Decimal,
    milestone: Decimal,
    period: Duration,
    withdrawn_at: Option<DateTime<Utc>>,
}

impl SavingsAccount {
    pub fn new(total_savings: Decimal, milestone: Decimal, period: Duration) -> Result<Self> {
        if total_savings < Decimal::ZERO {
            return Err(AwamuError::InvalidInput(
                "total savings cannot be negative".to_string(),
            ));
        }
        if milestone <= Decimal::ZERO {
            return Err(AwamuError::InvalidInput(
                "savings milestone must be positive".to_string(),
            ));
        }
        Ok(Self {
            total_savings,
            milestone,
            period,
            withdrawn_at: None,
        })
    }

    pub fn total_savings(&self) -> Decimal {
        self.total_savings
    }

    pub fn milestone(&self) -> Decimal {
        self.milestone
    }

    pub fn eligible_amount(&self) -> Decimal {
        emergency_eligible_amount(self.total_savings)
    }

    pub fn progress_percent(&self) -> Result<u8> {
        progress_percent(self.total_savings, self.milestone)
    }

    /// A window whose end cannot be represented never closes.
    pub fn is_withdrawn(&self, now: DateTime<Utc>) -> bool {
        self.withdrawn_at.is_some_and(|at| {
            at.checked_add_signed(self.period)
                .is_none_or(|until| now < until)
        })
    }

    pub fn request_emergency(&mut self, now: DateTime<Utc>) -> Result<EmergencyWithdrawal> {
        if self.is_withdrawn(now) {
            return Err(AwamuError::EmergencyUnavailable);
        }
        let available_again_at = now.checked_add_signed(self.period).ok_or_else(|| {
            AwamuError::InvalidInput("emergency period is too long".to_string())
        })?;
        self.withdrawn_at = Some(now);
        let withdrawal = EmergencyWithdrawal {
            amount: self.eligible_amount(),
            requested_at: now,
            available_again_at,
        };
        tracing::info!(amount = %withdrawal.amount, "emergency funds requested");
        Ok(withdrawal)
    }
}
