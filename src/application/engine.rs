use crate::domain::actuals::Actuals;
use crate::domain::breakdown::Breakdown;
use crate::domain::plan::PlanConfig;
use crate::domain::ports::PayoutCalculator;
use crate::error::{CompError, Result};
use tracing::debug;

/// Computes the payout of `actuals` under `plan`.
///
/// The plan and the actuals are validated before any arithmetic, so an error
/// is always one of the input errors and never a partial payout.
pub fn compute(plan: &PlanConfig, actuals: &Actuals) -> Result<Breakdown> {
    let breakdown = match (plan, actuals) {
        (PlanConfig::LeadGen(plan), Actuals::LeadGen(actuals)) => plan.calculate(actuals)?,
        (PlanConfig::AcceleratedCommission(plan), Actuals::Sales(actuals)) => {
            plan.calculate(actuals)?
        }
        (PlanConfig::TieredCommission(plan), Actuals::Sales(actuals)) => {
            plan.calculate(actuals)?
        }
        (plan, actuals) => {
            plan.validate()?;
            actuals.validate()?;
            return Err(CompError::ActualsMismatch {
                plan: plan.kind().as_str(),
                expected: match plan {
                    PlanConfig::LeadGen(_) => "lead-gen",
                    _ => "sales",
                },
                found: actuals.describe(),
            });
        }
    };

    debug!(
        plan = %breakdown.plan,
        total_payout = %breakdown.total_payout,
        "computed payout"
    );
    Ok(breakdown)
}

/// Computes payouts for many reps on the same plan.
///
/// The plan is validated once on construction; a plan that fails validation
/// never produces an engine.
#[derive(Debug, Clone)]
pub struct CompensationEngine {
    plan: PlanConfig,
}

impl CompensationEngine {
    pub fn new(plan: PlanConfig) -> Result<Self> {
        plan.validate()?;
        Ok(Self { plan })
    }

    pub fn plan(&self) -> &PlanConfig {
        &self.plan
    }

    pub fn compute(&self, actuals: &Actuals) -> Result<Breakdown> {
        compute(&self.plan, actuals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::actuals::{LeadGenActuals, SalesActuals};
    use crate::domain::breakdown::LineItemKind;
    use crate::domain::plan::{
        AcceleratedCommissionPlan, LeadGenPlan, PlanKind, TieredCommissionPlan,
    };
    use rust_decimal_macros::dec;

    #[test]
    fn test_lead_gen_example() {
        let plan = PlanConfig::LeadGen(LeadGenPlan::default());
        let actuals = Actuals::LeadGen(LeadGenActuals {
            total_sals: 25,
            total_sqls: 0,
            total_revenue_assisted: dec!(0),
        });

        let breakdown = compute(&plan, &actuals).unwrap();
        assert_eq!(breakdown.plan, PlanKind::LeadGen);
        assert_eq!(breakdown.amount_of(LineItemKind::SalAttainmentBonus), dec!(1000));
        assert_eq!(breakdown.amount_of(LineItemKind::ExcessSalBonus), dec!(250));
    }

    #[test]
    fn test_accelerated_example() {
        let plan = PlanConfig::AcceleratedCommission(AcceleratedCommissionPlan::default());
        let actuals = Actuals::Sales(SalesActuals {
            total_sales: dec!(100000),
        });

        let breakdown = compute(&plan, &actuals).unwrap();
        assert_eq!(breakdown.variable_pay(), dec!(6250));
    }

    #[test]
    fn test_tiered_example() {
        let plan = PlanConfig::TieredCommission(TieredCommissionPlan::default());
        let actuals = Actuals::Sales(SalesActuals {
            total_sales: dec!(90000),
        });

        // 90000 of 50000 is 180%: 2500 + 1875 + 15000 * 10%
        let breakdown = compute(&plan, &actuals).unwrap();
        assert_eq!(breakdown.variable_pay(), dec!(5875));
    }

    #[test]
    fn test_tiered_sub_target_example() {
        let plan = PlanConfig::TieredCommission(TieredCommissionPlan {
            monthly_sales_target: dec!(100000),
            ..Default::default()
        });
        let actuals = Actuals::Sales(SalesActuals {
            total_sales: dec!(90000),
        });

        // 90000 * 5% * 0.9
        let breakdown = compute(&plan, &actuals).unwrap();
        assert_eq!(breakdown.variable_pay(), dec!(4050));
    }

    #[test]
    fn test_mismatched_actuals() {
        let plan = PlanConfig::TieredCommission(TieredCommissionPlan::default());
        let actuals = Actuals::LeadGen(LeadGenActuals::default());

        assert!(matches!(
            compute(&plan, &actuals),
            Err(CompError::ActualsMismatch {
                plan: "tiered_commission",
                expected: "sales",
                found: "lead-gen",
            })
        ));
    }

    #[test]
    fn test_invalid_plan_reported_before_mismatch() {
        let plan = PlanConfig::LeadGen(LeadGenPlan {
            sal_target_per_month: dec!(0),
            ..Default::default()
        });
        let actuals = Actuals::Sales(SalesActuals::default());

        assert!(matches!(
            compute(&plan, &actuals),
            Err(CompError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_engine_rejects_invalid_plan() {
        let plan = PlanConfig::AcceleratedCommission(AcceleratedCommissionPlan {
            commission_rate: dec!(-0.05),
            ..Default::default()
        });
        assert!(matches!(
            CompensationEngine::new(plan),
            Err(CompError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_engine_computes_many_actuals() {
        let engine =
            CompensationEngine::new(PlanConfig::TieredCommission(TieredCommissionPlan::default()))
                .unwrap();

        let payouts: Vec<_> = [dec!(0), dec!(45000), dec!(50000)]
            .into_iter()
            .map(|total_sales| engine.compute(&Actuals::Sales(SalesActuals { total_sales })))
            .collect::<Result<_>>()
            .unwrap();

        let variable: Vec<_> = payouts.iter().map(Breakdown::variable_pay).collect();
        assert_eq!(variable, vec![dec!(0), dec!(2025), dec!(2500)]);
    }
}
