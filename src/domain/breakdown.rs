use super::arithmetic;
use super::plan::PlanKind;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;

/// Qualifying attainment below which target bonuses and commission pay nothing.
pub const QUALIFYING_ATTAINMENT: Decimal = rust_decimal_macros::dec!(0.5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    SalAttainmentBonus,
    SqlAttainmentBonus,
    ExcessSalBonus,
    ExcessSqlBonus,
    RevenueBonus,
    StandardCommission,
    AcceleratedCommission,
    OverachievementCommission,
    ExceptionalCommission,
    CommissionCap,
}

impl LineItemKind {
    pub fn label(self) -> &'static str {
        match self {
            LineItemKind::SalAttainmentBonus => "SAL target attainment bonus",
            LineItemKind::SqlAttainmentBonus => "SQL target attainment bonus",
            LineItemKind::ExcessSalBonus => "Excess SAL bonus",
            LineItemKind::ExcessSqlBonus => "Excess SQL bonus",
            LineItemKind::RevenueBonus => "Revenue bonus",
            LineItemKind::StandardCommission => "Standard commission",
            LineItemKind::AcceleratedCommission => "Accelerated commission",
            LineItemKind::OverachievementCommission => "Overachievement commission",
            LineItemKind::ExceptionalCommission => "Exceptional commission",
            LineItemKind::CommissionCap => "Commission cap",
        }
    }
}

/// One named component of a payout.
///
/// `basis` is what `rate` was applied to: a bonus amount for attainment
/// bonuses, a unit count for excess bonuses, a sales or revenue amount for
/// commissions, and the maximum allowed commission for a cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub kind: LineItemKind,
    pub label: &'static str,
    pub basis: Decimal,
    pub rate: Decimal,
    /// Multiplier applied on top of `rate`, such as a lead conversion rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<Decimal>,
    pub amount: Decimal,
}

impl LineItem {
    pub fn new(kind: LineItemKind, basis: Decimal, rate: Decimal, amount: Decimal) -> Self {
        Self {
            kind,
            label: kind.label(),
            basis,
            rate,
            adjustment: None,
            amount,
        }
    }

    /// Scales the amount by `factor` and records it.
    pub fn adjusted(mut self, factor: Option<Decimal>) -> Result<Self> {
        if let Some(factor) = factor {
            self.amount = arithmetic::mul(self.amount, factor, self.label)?;
            self.adjustment = Some(factor);
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Sals,
    Sqls,
    Sales,
}

/// Attainment of one quota metric, kept for gauges and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Attainment {
    pub metric: Metric,
    pub rate: Decimal,
    pub qualified: bool,
}

impl Attainment {
    pub fn new(metric: Metric, rate: Decimal) -> Self {
        Self {
            metric,
            rate,
            qualified: rate >= QUALIFYING_ATTAINMENT,
        }
    }
}

/// The complete payout of one rep for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub plan: PlanKind,
    pub monthly_base_salary: Decimal,
    pub attainments: Vec<Attainment>,
    pub line_items: Vec<LineItem>,
    pub total_payout: Decimal,
}

impl Breakdown {
    pub fn new(
        plan: PlanKind,
        monthly_base_salary: Decimal,
        attainments: Vec<Attainment>,
        line_items: Vec<LineItem>,
    ) -> Result<Self> {
        let variable = arithmetic::sum(line_items.iter().map(|item| item.amount), "variable pay")?;
        let total_payout = arithmetic::sum([monthly_base_salary, variable], "total payout")?;
        Ok(Self {
            plan,
            monthly_base_salary,
            attainments,
            line_items,
            total_payout,
        })
    }

    /// Everything paid on top of the base salary.
    pub fn variable_pay(&self) -> Decimal {
        self.total_payout - self.monthly_base_salary
    }

    pub fn line_item(&self, kind: LineItemKind) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.kind == kind)
    }

    /// Amount of the given line item, zero when it is absent.
    pub fn amount_of(&self, kind: LineItemKind) -> Decimal {
        self.line_item(kind)
            .map(|item| item.amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn attainment(&self, metric: Metric) -> Option<&Attainment> {
        self.attainments.iter().find(|a| a.metric == metric)
    }
}
