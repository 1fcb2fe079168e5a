use super::good::Good;
use super::money::Amount;
use crate::error::{AwamuError, Result};
use serde::Serialize;
use std::fmt;

/// Service fee bands as `(inclusive upper bound of the monthly amount, fee)`.
const FEE_TIERS: [(u64, u64); 7] = [
    (1_000, 1),
    (2_000, 2),
    (3_000, 3),
    (4_000, 5),
    (6_000, 7),
    (8_000, 10),
    (10_000, 12),
];

/// Fee charged on any monthly amount above the last band.
const TOP_TIER_FEE: u64 = 15;

/// Splits `price` into equal monthly payments, rounding up.
pub fn monthly_amount(price: u64, period_months: u32) -> Result<u64> {
    if period_months == 0 {
        return Err(AwamuError::InvalidInput(
            "installment period must be at least one month".to_string(),
        ));
    }
    Ok(price.div_ceil(u64::from(period_months)))
}

/// Looks up the fixed per-installment service fee for a monthly amount.
pub fn service_fee(monthly_amount: u64) -> u64 {
    FEE_TIERS
        .iter()
        .find(|(ceiling, _)| monthly_amount <= *ceiling)
        .map_or(TOP_TIER_FEE, |(_, fee)| *fee)
}

pub fn total_monthly_payment(price: u64, period_months: u32) -> Result<u64> {
    let monthly = monthly_amount(price, period_months)?;
    with_fee(monthly, service_fee(monthly))
}

fn with_fee(monthly: u64, fee: u64) -> Result<u64> {
    monthly.checked_add(fee).ok_or_else(|| {
        AwamuError::InvalidInput(format!(
            "monthly amount {monthly} plus a fee of {fee} does not fit in a payment"
        ))
    })
}

/// A priced installment plan for one good over a chosen number of months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallmentPlan {
    pub good: Good,
    pub period_months: u32,
    pub monthly_amount: u64,
    pub service_fee: u64,
    pub total_monthly_payment: u64,
}

impl InstallmentPlan {
    pub fn quote(good: &Good, period_months: u32) -> Result<Self> {
        if !good.allows_period(period_months) {
            return Err(AwamuError::validation(
                "period",
                format!(
                    "{} allows {}-{} months, got {}",
                    good.label(),
                    good.min_period(),
                    good.max_period(),
                    period_months
                ),
            ));
        }
        let monthly = monthly_amount(good.price(), period_months)?;
        let fee = service_fee(monthly);
        Ok(Self {
            good: good.clone(),
            period_months,
            monthly_amount: monthly,
            service_fee: fee,
            total_monthly_payment: with_fee(monthly, fee)?,
        })
    }

    /// Quotes every period the good allows, shortest first.
    pub fn schedule(good: &Good) -> Result<Vec<Self>> {
        good.periods()
            .map(|months| Self::quote(good, months))
            .collect()
    }

    /// The amount charged for one installment, fee included.
    pub fn amount_due(&self) -> Result<Amount> {
        Amount::from_units(self.total_monthly_payment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlanState {
    #[default]
    Idle,
    Configured {
        good: Good,
        period_months: u32,
    },
    Started(InstallmentPlan),
}

impl fmt::Display for PlanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Configured { .. } => "configured",
            Self::Started(_) => "started",
        };
        f.write_str(name)
    }
}

/// Tracks the good and period a customer is choosing.
///
/// Starting a plan is one-way: once started, the selection is frozen.
#[derive(Debug, Default)]
pub struct PlanSelector {
    state: PlanState,
}

impl PlanSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlanState {
        &self.state
    }

    /// Chooses a good and resets the period to its minimum.
    pub fn select_good(&mut self, good: Good) -> Result<()> {
        self.ensure_not_started("select a good")?;
        let period_months = good.min_period();
        self.state = PlanState::Configured {
            good,
            period_months,
        };
        Ok(())
    }

    pub fn set_period(&mut self, months: u32) -> Result<()> {
        self.ensure_not_started("change the period")?;
        match &mut self.state {
            PlanState::Configured {
                good,
                period_months,
            } => {
                if !good.allows_period(months) {
                    return Err(AwamuError::validation(
                        "period",
                        format!(
                            "allowed: {}-{} months",
                            good.min_period(),
                            good.max_period()
                        ),
                    ));
                }
                *period_months = months;
                Ok(())
            }
            other => Err(AwamuError::InvalidTransition {
                from: other.to_string(),
                action: "change the period",
            }),
        }
    }

    pub fn current_plan(&self) -> Result<InstallmentPlan> {
        match &self.state {
            PlanState::Configured {
                good,
                period_months,
            } => InstallmentPlan::quote(good, *period_months),
            PlanState::Started(plan) => Ok(plan.clone()),
            PlanState::Idle => Err(AwamuError::InvalidTransition {
                from: self.state.to_string(),
                action: "quote a plan",
            }),
        }
    }

    pub fn start(&mut self) -> Result<InstallmentPlan> {
        let plan = match &self.state {
            PlanState::Configured {
                good,
                period_months,
            } => InstallmentPlan::quote(good, *period_months)?,
            other => {
                return Err(AwamuError::InvalidTransition {
                    from: other.to_string(),
                    action: "start a plan",
                });
            }
        };
        tracing::info!(
            good = plan.good.key(),
            period_months = plan.period_months,
            total = plan.total_monthly_payment,
            "installment plan started"
        );
        self.state = PlanState::Started(plan.clone());
        Ok(plan)
    }

    fn ensure_not_started(&self, action: &'static str) -> Result<()> {
        if matches!(self.state, PlanState::Started(_)) {
            return Err(AwamuError::InvalidTransition {
                from: self.state.to_string(),
                action,
            });
        }
        Ok(())
    }
}
