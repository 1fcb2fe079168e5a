use crate::domain::plan::InstallmentPlan;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ScheduleRow {
    period: u32,
    monthly_amount: u64,
    service_fee: u64,
    total_monthly_payment: u64,
}

/// Writes installment plans as CSV, one row per period.
pub struct ScheduleWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ScheduleWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_plans<'a>(&mut self, plans: impl IntoIterator<Item = &'a InstallmentPlan>) -> Result<()> {
        for plan in plans {
            self.writer.serialize(ScheduleRow {
                period: plan.period_months,
                monthly_amount: plan.monthly_amount,
                service_fee: plan.service_fee,
                total_monthly_payment: plan.total_monthly_payment,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
