use super::attainment::{attainment_rate, band, is_qualifying};
use crate::domain::actuals::SalesActuals;
use crate::domain::arithmetic;
use crate::domain::breakdown::{Attainment, Breakdown, LineItem, LineItemKind, Metric};
use crate::domain::plan::{AcceleratedCommissionPlan, CapStrategy, PlanKind};
use crate::domain::ports::PayoutCalculator;
use crate::error::Result;
use rust_decimal::Decimal;

impl PayoutCalculator for AcceleratedCommissionPlan {
    type Actuals = SalesActuals;

    fn calculate(&self, actuals: &SalesActuals) -> Result<Breakdown> {
        self.validate()?;
        actuals.validate()?;

        let rate = attainment_rate(actuals.total_sales, self.monthly_sales_target)?;
        let line_items = if is_qualifying(rate) {
            self.commission_items(actuals.total_sales)?
        } else {
            Vec::new()
        };

        Breakdown::new(
            PlanKind::AcceleratedCommission,
            self.monthly_base_salary(),
            vec![Attainment::new(Metric::Sales, rate)],
            line_items,
        )
    }
}

impl AcceleratedCommissionPlan {
    /// Maximum commission under a multiplier cap.
    pub fn commission_limit(&self) -> Result<Option<Decimal>> {
        match self.cap {
            CapStrategy::CommissionMultiplier { multiplier } => Ok(Some(arithmetic::mul(
                self.target_commission()?,
                multiplier,
                "commission limit",
            )?)),
            _ => Ok(None),
        }
    }

    /// Sales that count towards commission once the attainment ceiling applies.
    fn counted_sales(&self, total_sales: Decimal) -> Result<Decimal> {
        match self.cap {
            CapStrategy::AttainmentCeiling { ceiling } => Ok(total_sales.min(arithmetic::mul(
                self.monthly_sales_target,
                ceiling,
                "attainment ceiling",
            )?)),
            _ => Ok(total_sales),
        }
    }

    fn commission_items(&self, total_sales: Decimal) -> Result<Vec<LineItem>> {
        let counted = self.counted_sales(total_sales)?;
        let threshold = self.accelerator_threshold_sales()?;

        let standard_sales = band(counted, Decimal::ZERO, Some(threshold));
        let accelerated_sales = band(counted, threshold, None);
        let standard = LineItem::new(
            LineItemKind::StandardCommission,
            standard_sales,
            self.commission_rate,
            arithmetic::mul(standard_sales, self.commission_rate, "standard commission")?,
        );
        let accelerated = LineItem::new(
            LineItemKind::AcceleratedCommission,
            accelerated_sales,
            self.accelerator_rate,
            arithmetic::mul(
                accelerated_sales,
                self.accelerator_rate,
                "accelerated commission",
            )?,
        );
        let raw_commission = arithmetic::sum([standard.amount, accelerated.amount], "commission")?;

        let mut items = vec![standard, accelerated];
        if let CapStrategy::CommissionMultiplier { multiplier } = self.cap
            && let Some(limit) = self.commission_limit()?
        {
            items.push(LineItem::new(
                LineItemKind::CommissionCap,
                limit,
                multiplier,
                limit.saturating_sub(raw_commission).min(Decimal::ZERO),
            ));
        }
        Ok(items)
    }
}
