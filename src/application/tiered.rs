use super::attainment::{FULL_ATTAINMENT, attainment_rate, band, is_qualifying};
use crate::domain::actuals::SalesActuals;
use crate::domain::arithmetic;
use crate::domain::breakdown::{Attainment, Breakdown, LineItem, LineItemKind, Metric};
use crate::domain::plan::{PlanKind, TieredCommissionPlan};
use crate::domain::ports::PayoutCalculator;
use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Attainment above which sales earn the exceptional rate.
pub const EXCEPTIONAL_ATTAINMENT: Decimal = dec!(1.5);

impl PayoutCalculator for TieredCommissionPlan {
    type Actuals = SalesActuals;

    fn calculate(&self, actuals: &SalesActuals) -> Result<Breakdown> {
        self.validate()?;
        actuals.validate()?;

        let rate = attainment_rate(actuals.total_sales, self.monthly_sales_target)?;
        let line_items = if !is_qualifying(rate) {
            Vec::new()
        } else if rate <= FULL_ATTAINMENT {
            vec![self.pro_rata_commission(actuals.total_sales, rate)?]
        } else {
            self.tiered_commission(actuals.total_sales, rate)?
        };

        Breakdown::new(
            PlanKind::TieredCommission,
            self.monthly_base_salary(),
            vec![Attainment::new(Metric::Sales, rate)],
            line_items,
        )
    }
}

impl TieredCommissionPlan {
    /// Up to target the commission is scaled by attainment itself.
    fn pro_rata_commission(&self, total_sales: Decimal, rate: Decimal) -> Result<LineItem> {
        LineItem::new(
            LineItemKind::StandardCommission,
            total_sales,
            self.standard_rate,
            arithmetic::mul(total_sales, self.standard_rate, "standard commission")?,
        )
        .adjusted(Some(rate))
    }

    fn tiered_commission(&self, total_sales: Decimal, rate: Decimal) -> Result<Vec<LineItem>> {
        let target = self.monthly_sales_target;
        let exceptional_from = arithmetic::mul(target, EXCEPTIONAL_ATTAINMENT, "exceptional tier")?;

        let overachievement_sales = band(total_sales, target, Some(exceptional_from));
        let mut items = vec![
            LineItem::new(
                LineItemKind::StandardCommission,
                target,
                self.standard_rate,
                arithmetic::mul(target, self.standard_rate, "standard commission")?,
            ),
            LineItem::new(
                LineItemKind::OverachievementCommission,
                overachievement_sales,
                self.overachievement_rate,
                arithmetic::mul(
                    overachievement_sales,
                    self.overachievement_rate,
                    "overachievement commission",
                )?,
            ),
        ];

        if rate > EXCEPTIONAL_ATTAINMENT {
            let exceptional_sales = band(total_sales, exceptional_from, None);
            items.push(LineItem::new(
                LineItemKind::ExceptionalCommission,
                exceptional_sales,
                self.exceptional_rate,
                arithmetic::mul(
                    exceptional_sales,
                    self.exceptional_rate,
                    "exceptional commission",
                )?,
            ));
        }
        Ok(items)
    }
}
