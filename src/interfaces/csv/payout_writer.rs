use crate::domain::breakdown::Breakdown;
use crate::domain::plan::PlanKind;
use crate::error::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;

pub const HEADER: [&str; 5] = [
    "rep",
    "plan",
    "monthly_base_salary",
    "variable_pay",
    "total_payout",
];

#[derive(Debug, Serialize)]
struct PayoutRow<'a> {
    rep: &'a str,
    plan: PlanKind,
    monthly_base_salary: String,
    variable_pay: String,
    total_payout: String,
}

/// Formats a money amount with two decimals, rounding half away from zero.
pub fn format_money(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Writes one summary row per rep to a CSV sink.
pub struct PayoutWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PayoutWriter<W> {
    /// Creates the writer and emits the header immediately, so an empty run
    /// still produces a well-formed file.
    pub fn new(sink: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        writer.write_record(HEADER)?;
        Ok(Self { writer })
    }

    pub fn write_payout(&mut self, rep: &str, breakdown: &Breakdown) -> Result<()> {
        self.writer.serialize(PayoutRow {
            rep,
            plan: breakdown.plan,
            monthly_base_salary: format_money(breakdown.monthly_base_salary),
            variable_pay: format_money(breakdown.variable_pay()),
            total_payout: format_money(breakdown.total_payout),
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
