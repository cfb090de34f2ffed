use super::attainment::{attainment_rate, capped_excess};
use crate::domain::actuals::LeadGenActuals;
use crate::domain::arithmetic;
use crate::domain::breakdown::{Attainment, Breakdown, LineItem, LineItemKind, Metric};
use crate::domain::plan::{LeadGenPlan, PlanKind};
use crate::domain::ports::PayoutCalculator;
use crate::error::Result;
use rust_decimal::Decimal;

impl PayoutCalculator for LeadGenPlan {
    type Actuals = LeadGenActuals;

    fn calculate(&self, actuals: &LeadGenActuals) -> Result<Breakdown> {
        self.validate()?;
        actuals.validate()?;

        let sals = Decimal::from(actuals.total_sals);
        let sqls = Decimal::from(actuals.total_sqls);
        let sal_rate = attainment_rate(sals, self.sal_target_per_month)?;
        let sql_rate = attainment_rate(sqls, self.sql_target_per_month)?;

        // Excess and revenue bonuses are not gated on attainment.
        let line_items = vec![
            self.attainment_bonus(LineItemKind::SalAttainmentBonus, sal_rate, self.sal_target_bonus)?,
            self.attainment_bonus(LineItemKind::SqlAttainmentBonus, sql_rate, self.sql_target_bonus)?,
            self.excess_bonus(
                LineItemKind::ExcessSalBonus,
                sals,
                self.sal_target_per_month,
                self.sal_excess_unit_bonus,
            )?,
            self.excess_bonus(
                LineItemKind::ExcessSqlBonus,
                sqls,
                self.sql_target_per_month,
                self.sql_excess_unit_bonus,
            )?,
            LineItem::new(
                LineItemKind::RevenueBonus,
                actuals.total_revenue_assisted,
                self.revenue_bonus_rate,
                arithmetic::mul(
                    actuals.total_revenue_assisted,
                    self.revenue_bonus_rate,
                    "revenue bonus",
                )?,
            ),
        ];

        Breakdown::new(
            PlanKind::LeadGen,
            self.monthly_base_salary(),
            vec![
                Attainment::new(Metric::Sals, sal_rate),
                Attainment::new(Metric::Sqls, sql_rate),
            ],
            line_items,
        )
    }
}

impl LeadGenPlan {
    fn attainment_bonus(
        &self,
        kind: LineItemKind,
        rate: Decimal,
        full_bonus: Decimal,
    ) -> Result<LineItem> {
        let amount = self.attainment_bonus_curve.bonus(rate, full_bonus)?;
        LineItem::new(kind, full_bonus, rate, amount).adjusted(self.lead_conversion_rate)
    }

    fn excess_bonus(
        &self,
        kind: LineItemKind,
        actual: Decimal,
        target: Decimal,
        unit_bonus: Decimal,
    ) -> Result<LineItem> {
        let excess = capped_excess(actual, target, self.excess_cap_ratio)?;
        let amount = arithmetic::mul(excess, unit_bonus, "excess bonus")?;
        let conversion = self
            .lead_conversion_rate
            .filter(|_| self.conversion_applies_to_excess);
        LineItem::new(kind, excess, unit_bonus, amount).adjusted(conversion)
    }

    /// Upper bound on an excess bonus for the given target and unit bonus.
    pub fn max_excess_bonus(&self, target: Decimal, unit_bonus: Decimal) -> Result<Decimal> {
        let cap = arithmetic::mul(target, self.excess_cap_ratio, "excess cap")?;
        arithmetic::mul(cap, unit_bonus, "excess bonus")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::AttainmentBonusCurve;
    use crate::error::CompError;
    use rust_decimal_macros::dec;

    fn actuals(sals: i64, sqls: i64, revenue: Decimal) -> LeadGenActuals {
        LeadGenActuals {
            total_sals: sals,
            total_sqls: sqls,
            total_revenue_assisted: revenue,
        }
    }

    #[test]
    fn test_full_attainment_with_capped_excess() {
        let plan = LeadGenPlan::default();
        let breakdown = plan.calculate(&actuals(25, 10, dec!(0))).unwrap();

        let sal = breakdown.line_item(LineItemKind::SalAttainmentBonus).unwrap();
        assert_eq!(sal.rate, dec!(1.25));
        assert_eq!(sal.amount, dec!(1000));

        let excess = breakdown.line_item(LineItemKind::ExcessSalBonus).unwrap();
        assert_eq!(excess.basis, dec!(5));
        assert_eq!(excess.amount, dec!(250));
    }

    #[test]
    fn test_excess_cap_ratio_is_configurable() {
        let half = LeadGenPlan::default();
        let full = LeadGenPlan {
            excess_cap_ratio: dec!(1.0),
            ..Default::default()
        };
        let actuals = actuals(60, 10, dec!(0));

        let capped_half = half.calculate(&actuals).unwrap();
        let capped_full = full.calculate(&actuals).unwrap();
        assert_eq!(capped_half.amount_of(LineItemKind::ExcessSalBonus), dec!(500));
        assert_eq!(capped_full.amount_of(LineItemKind::ExcessSalBonus), dec!(1000));
    }

    #[test]
    fn test_below_gate_still_earns_excess_and_revenue() {
        // SALs at 40%, SQLs at 150%.
        let plan = LeadGenPlan {
            sal_target_per_month: dec!(50),
            sql_target_per_month: dec!(2),
            ..Default::default()
        };
        let breakdown = plan.calculate(&actuals(20, 3, dec!(10000))).unwrap();

        assert_eq!(breakdown.amount_of(LineItemKind::SalAttainmentBonus), dec!(0));
        assert_eq!(breakdown.amount_of(LineItemKind::SqlAttainmentBonus), dec!(1000));
        assert_eq!(breakdown.amount_of(LineItemKind::ExcessSqlBonus), dec!(100));
        assert_eq!(breakdown.amount_of(LineItemKind::RevenueBonus), dec!(50));
    }

    #[test]
    fn test_both_rates_below_gate() {
        let plan = LeadGenPlan::default();
        let breakdown = plan.calculate(&actuals(8, 4, dec!(20000))).unwrap();

        assert_eq!(breakdown.amount_of(LineItemKind::SalAttainmentBonus), dec!(0));
        assert_eq!(breakdown.amount_of(LineItemKind::SqlAttainmentBonus), dec!(0));
        assert_eq!(breakdown.amount_of(LineItemKind::RevenueBonus), dec!(100));
        assert_eq!(breakdown.variable_pay(), dec!(100));
        assert!(breakdown.attainments.iter().all(|a| !a.qualified));
    }

    #[test]
    fn test_total_payout_sums_all_components() {
        let plan = LeadGenPlan {
            annual_base_salary: dec!(60000),
            ..Default::default()
        };
        let breakdown = plan.calculate(&actuals(25, 12, dec!(100000))).unwrap();

        // 1000 + 1000 + 5 * 50 + 2 * 100 + 0.5% of 100000
        assert_eq!(breakdown.monthly_base_salary, dec!(5000));
        assert_eq!(breakdown.variable_pay(), dec!(2950));
        assert_eq!(breakdown.total_payout, dec!(7950));
    }

    #[test]
    fn test_conversion_rate_scales_bonuses() {
        let plan = LeadGenPlan {
            lead_conversion_rate: Some(dec!(0.5)),
            excess_cap_ratio: dec!(1.0),
            ..Default::default()
        };
        let breakdown = plan.calculate(&actuals(25, 5, dec!(1000))).unwrap();

        let sal = breakdown.line_item(LineItemKind::SalAttainmentBonus).unwrap();
        assert_eq!(sal.amount, dec!(500));
        assert_eq!(sal.adjustment, Some(dec!(0.5)));
        assert_eq!(breakdown.amount_of(LineItemKind::SqlAttainmentBonus), dec!(250));
        assert_eq!(breakdown.amount_of(LineItemKind::ExcessSalBonus), dec!(125));
        // Revenue bonus is never conversion adjusted.
        assert_eq!(breakdown.amount_of(LineItemKind::RevenueBonus), dec!(5));
    }

    #[test]
    fn test_conversion_rate_can_skip_excess() {
        let plan = LeadGenPlan {
            lead_conversion_rate: Some(dec!(0.5)),
            conversion_applies_to_excess: false,
            ..Default::default()
        };
        let breakdown = plan.calculate(&actuals(25, 10, dec!(0))).unwrap();

        assert_eq!(breakdown.amount_of(LineItemKind::SalAttainmentBonus), dec!(500));
        let excess = breakdown.line_item(LineItemKind::ExcessSalBonus).unwrap();
        assert_eq!(excess.amount, dec!(250));
        assert_eq!(excess.adjustment, None);
    }

    #[test]
    fn test_scaled_curve_pays_above_target() {
        let plan = LeadGenPlan {
            attainment_bonus_curve: AttainmentBonusCurve::ScaledToCeiling { ceiling: dec!(1.5) },
            ..Default::default()
        };
        let breakdown = plan.calculate(&actuals(25, 20, dec!(0))).unwrap();

        assert_eq!(breakdown.amount_of(LineItemKind::SalAttainmentBonus), dec!(1250));
        assert_eq!(breakdown.amount_of(LineItemKind::SqlAttainmentBonus), dec!(1500));
    }

    #[test]
    fn test_negative_actuals_rejected() {
        let plan = LeadGenPlan::default();
        assert!(matches!(
            plan.calculate(&actuals(-1, 0, dec!(0))),
            Err(CompError::InvalidActual { .. })
        ));
        assert!(matches!(
            plan.calculate(&actuals(0, 0, dec!(-10))),
            Err(CompError::InvalidActual { .. })
        ));
    }

    #[test]
    fn test_zero_target_rejected_before_computation() {
        let plan = LeadGenPlan {
            sal_target_per_month: dec!(0),
            ..Default::default()
        };
        assert!(matches!(
            plan.calculate(&actuals(10, 10, dec!(0))),
            Err(CompError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_max_excess_bonus() {
        let plan = LeadGenPlan::default();
        assert_eq!(plan.max_excess_bonus(dec!(20), dec!(50)).unwrap(), dec!(500));
    }

    #[test]
    fn test_oversized_excess_bonus_is_an_error() {
        let plan = LeadGenPlan {
            sal_excess_unit_bonus: dec!(1000000000000),
            excess_cap_ratio: dec!(100000000000000000),
            ..Default::default()
        };
        assert!(matches!(
            plan.calculate(&actuals(i64::MAX, 0, dec!(0))),
            Err(CompError::Overflow {
                operation: "excess bonus"
            })
        ));
    }
}
