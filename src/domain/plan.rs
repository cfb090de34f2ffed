use super::arithmetic;
use crate::error::{CompError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Identifies which of the supported compensation plans a configuration describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    LeadGen,
    AcceleratedCommission,
    TieredCommission,
}

impl PlanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::LeadGen => "lead_gen",
            PlanKind::AcceleratedCommission => "accelerated_commission",
            PlanKind::TieredCommission => "tiered_commission",
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compensation plan configuration.
///
/// Serialized with an internal `plan` tag so that a plan document reads as a
/// flat JSON object, e.g. `{"plan": "tiered_commission", "standard_rate": "0.05", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "plan", rename_all = "snake_case")]
pub enum PlanConfig {
    LeadGen(LeadGenPlan),
    AcceleratedCommission(AcceleratedCommissionPlan),
    TieredCommission(TieredCommissionPlan),
}

impl PlanConfig {
    pub fn kind(&self) -> PlanKind {
        match self {
            PlanConfig::LeadGen(_) => PlanKind::LeadGen,
            PlanConfig::AcceleratedCommission(_) => PlanKind::AcceleratedCommission,
            PlanConfig::TieredCommission(_) => PlanKind::TieredCommission,
        }
    }

    /// Checks every configured field before any payout is computed.
    pub fn validate(&self) -> Result<()> {
        match self {
            PlanConfig::LeadGen(plan) => plan.validate(),
            PlanConfig::AcceleratedCommission(plan) => plan.validate(),
            PlanConfig::TieredCommission(plan) => plan.validate(),
        }
    }

    /// Returns the default plan of the given kind.
    pub fn template(kind: PlanKind) -> Self {
        match kind {
            PlanKind::LeadGen => PlanConfig::LeadGen(LeadGenPlan::default()),
            PlanKind::AcceleratedCommission => {
                PlanConfig::AcceleratedCommission(AcceleratedCommissionPlan::default())
            }
            PlanKind::TieredCommission => {
                PlanConfig::TieredCommission(TieredCommissionPlan::default())
            }
        }
    }
}

/// Shape applied to the SAL/SQL target bonuses of a lead-gen plan.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum AttainmentBonusCurve {
    /// Nothing below 50%, `bonus * rate` up to 100%, the full bonus from there on.
    #[default]
    ProRata,
    /// Nothing below 50%, otherwise `bonus * min(rate, ceiling)`.
    ScaledToCeiling { ceiling: Decimal },
}

/// Lead-generation (SDR) plan paid on SAL/SQL quotas and assisted revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadGenPlan {
    pub annual_base_salary: Decimal,
    pub sal_target_per_month: Decimal,
    pub sql_target_per_month: Decimal,
    pub sal_target_bonus: Decimal,
    pub sal_excess_unit_bonus: Decimal,
    pub sql_target_bonus: Decimal,
    pub sql_excess_unit_bonus: Decimal,
    pub revenue_bonus_rate: Decimal,
    /// Excess units are capped at this fraction of the target.
    pub excess_cap_ratio: Decimal,
    /// Quality multiplier applied to bonuses when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_conversion_rate: Option<Decimal>,
    #[serde(default = "default_true")]
    pub conversion_applies_to_excess: bool,
    #[serde(default)]
    pub attainment_bonus_curve: AttainmentBonusCurve,
}

fn default_true() -> bool {
    true
}

impl Default for LeadGenPlan {
    fn default() -> Self {
        Self {
            annual_base_salary: dec!(50000),
            sal_target_per_month: dec!(20),
            sql_target_per_month: dec!(10),
            sal_target_bonus: dec!(1000),
            sal_excess_unit_bonus: dec!(50),
            sql_target_bonus: dec!(1000),
            sql_excess_unit_bonus: dec!(100),
            revenue_bonus_rate: dec!(0.005),
            excess_cap_ratio: dec!(0.5),
            lead_conversion_rate: None,
            conversion_applies_to_excess: true,
            attainment_bonus_curve: AttainmentBonusCurve::ProRata,
        }
    }
}

impl LeadGenPlan {
    pub fn validate(&self) -> Result<()> {
        require_amount("annual_base_salary", self.annual_base_salary)?;
        require_target("sal_target_per_month", self.sal_target_per_month)?;
        require_target("sql_target_per_month", self.sql_target_per_month)?;
        require_amount("sal_target_bonus", self.sal_target_bonus)?;
        require_amount("sal_excess_unit_bonus", self.sal_excess_unit_bonus)?;
        require_amount("sql_target_bonus", self.sql_target_bonus)?;
        require_amount("sql_excess_unit_bonus", self.sql_excess_unit_bonus)?;
        require_rate("revenue_bonus_rate", self.revenue_bonus_rate)?;
        require_rate("excess_cap_ratio", self.excess_cap_ratio)?;

        if let Some(conversion) = self.lead_conversion_rate {
            require_rate("lead_conversion_rate", conversion)?;
            if conversion > Decimal::ONE {
                return Err(CompError::InvalidRate {
                    field: "lead_conversion_rate",
                    value: conversion,
                });
            }
        }

        if let AttainmentBonusCurve::ScaledToCeiling { ceiling } = self.attainment_bonus_curve
            && ceiling < Decimal::ONE
        {
            return Err(CompError::InvalidRate {
                field: "attainment_bonus_curve.ceiling",
                value: ceiling,
            });
        }

        Ok(())
    }

    pub fn monthly_base_salary(&self) -> Decimal {
        self.annual_base_salary / MONTHS_PER_YEAR
    }
}

/// How an accelerated-commission plan limits its payout.
///
/// Deserialized through [`CapStrategyRecord`]; strategy names the engine does
/// not know are kept as [`CapStrategy::Unsupported`] and rejected on validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "CapStrategyRecord", into = "CapStrategyRecord")]
pub enum CapStrategy {
    #[default]
    Uncapped,
    /// Commission may not exceed `target commission * multiplier`.
    CommissionMultiplier { multiplier: Decimal },
    /// Attainment is clamped to `ceiling` before commission is accrued.
    AttainmentCeiling { ceiling: Decimal },
    Unsupported(String),
}

/// Wire form of [`CapStrategy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapStrategyRecord {
    pub strategy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<Decimal>,
}

impl TryFrom<CapStrategyRecord> for CapStrategy {
    type Error = String;

    fn try_from(record: CapStrategyRecord) -> std::result::Result<Self, Self::Error> {
        match record.strategy.as_str() {
            "uncapped" => Ok(CapStrategy::Uncapped),
            "commission_multiplier" => record
                .multiplier
                .map(|multiplier| CapStrategy::CommissionMultiplier { multiplier })
                .ok_or_else(|| "commission_multiplier strategy requires `multiplier`".to_string()),
            "attainment_ceiling" => record
                .ceiling
                .map(|ceiling| CapStrategy::AttainmentCeiling { ceiling })
                .ok_or_else(|| "attainment_ceiling strategy requires `ceiling`".to_string()),
            _ => Ok(CapStrategy::Unsupported(record.strategy)),
        }
    }
}

impl From<CapStrategy> for CapStrategyRecord {
    fn from(strategy: CapStrategy) -> Self {
        let (strategy, multiplier, ceiling) = match strategy {
            CapStrategy::Uncapped => ("uncapped".to_string(), None, None),
            CapStrategy::CommissionMultiplier { multiplier } => {
                ("commission_multiplier".to_string(), Some(multiplier), None)
            }
            CapStrategy::AttainmentCeiling { ceiling } => {
                ("attainment_ceiling".to_string(), None, Some(ceiling))
            }
            CapStrategy::Unsupported(name) => (name, None, None),
        };
        Self {
            strategy,
            multiplier,
            ceiling,
        }
    }
}

impl CapStrategy {
    pub fn validate(&self) -> Result<()> {
        match self {
            CapStrategy::Uncapped => Ok(()),
            CapStrategy::CommissionMultiplier { multiplier } => {
                require_positive_rate("cap.multiplier", *multiplier)
            }
            CapStrategy::AttainmentCeiling { ceiling } => {
                require_positive_rate("cap.ceiling", *ceiling)
            }
            CapStrategy::Unsupported(name) => {
                Err(CompError::UnsupportedPlanCapStrategy(name.clone()))
            }
        }
    }
}

/// Account-executive plan with an accelerator above a configurable threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceleratedCommissionPlan {
    pub annual_base_salary: Decimal,
    pub commission_rate: Decimal,
    /// Attainment (>= 1.0) above which sales earn `accelerator_rate`.
    pub accelerator_threshold_ratio: Decimal,
    pub accelerator_rate: Decimal,
    pub monthly_sales_target: Decimal,
    #[serde(default)]
    pub cap: CapStrategy,
}

impl Default for AcceleratedCommissionPlan {
    fn default() -> Self {
        Self {
            annual_base_salary: dec!(70000),
            commission_rate: dec!(0.05),
            accelerator_threshold_ratio: dec!(1.5),
            accelerator_rate: dec!(0.10),
            monthly_sales_target: dec!(50000),
            cap: CapStrategy::CommissionMultiplier {
                multiplier: dec!(3),
            },
        }
    }
}

impl AcceleratedCommissionPlan {
    pub fn validate(&self) -> Result<()> {
        require_amount("annual_base_salary", self.annual_base_salary)?;
        require_rate("commission_rate", self.commission_rate)?;
        if self.accelerator_threshold_ratio < Decimal::ONE {
            return Err(CompError::InvalidRate {
                field: "accelerator_threshold_ratio",
                value: self.accelerator_threshold_ratio,
            });
        }
        require_rate("accelerator_rate", self.accelerator_rate)?;
        require_target("monthly_sales_target", self.monthly_sales_target)?;
        self.cap.validate()
    }

    pub fn monthly_base_salary(&self) -> Decimal {
        self.annual_base_salary / MONTHS_PER_YEAR
    }

    /// Commission earned at exactly 100% attainment.
    pub fn target_commission(&self) -> Result<Decimal> {
        arithmetic::mul(self.monthly_sales_target, self.commission_rate, "target commission")
    }

    /// Sales amount from which the accelerator rate applies.
    pub fn accelerator_threshold_sales(&self) -> Result<Decimal> {
        arithmetic::mul(
            self.monthly_sales_target,
            self.accelerator_threshold_ratio,
            "accelerator threshold",
        )
    }
}

/// Account-executive plan with fixed 100% / 150% commission tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredCommissionPlan {
    pub annual_base_salary: Decimal,
    pub standard_rate: Decimal,
    pub overachievement_rate: Decimal,
    pub exceptional_rate: Decimal,
    pub monthly_sales_target: Decimal,
}

impl Default for TieredCommissionPlan {
    fn default() -> Self {
        Self {
            annual_base_salary: dec!(70000),
            standard_rate: dec!(0.05),
            overachievement_rate: dec!(0.075),
            exceptional_rate: dec!(0.10),
            monthly_sales_target: dec!(50000),
        }
    }
}

impl TieredCommissionPlan {
    pub fn validate(&self) -> Result<()> {
        require_amount("annual_base_salary", self.annual_base_salary)?;
        require_rate("standard_rate", self.standard_rate)?;
        require_rate("overachievement_rate", self.overachievement_rate)?;
        require_rate("exceptional_rate", self.exceptional_rate)?;
        require_target("monthly_sales_target", self.monthly_sales_target)
    }

    pub fn monthly_base_salary(&self) -> Decimal {
        self.annual_base_salary / MONTHS_PER_YEAR
    }
}

fn require_target(field: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(CompError::InvalidTarget { field, value });
    }
    Ok(())
}

fn require_rate(field: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(CompError::InvalidRate { field, value });
    }
    Ok(())
}

fn require_positive_rate(field: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(CompError::InvalidRate { field, value });
    }
    Ok(())
}

fn require_amount(field: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(CompError::InvalidAmount { field, value });
    }
    Ok(())
}
