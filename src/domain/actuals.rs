use crate::error::{CompError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly performance of a lead-generation rep.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LeadGenActuals {
    pub total_sals: i64,
    pub total_sqls: i64,
    #[serde(default)]
    pub total_revenue_assisted: Decimal,
}

impl LeadGenActuals {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("total_sals", Decimal::from(self.total_sals))?;
        require_non_negative("total_sqls", Decimal::from(self.total_sqls))?;
        require_non_negative("total_revenue_assisted", self.total_revenue_assisted)
    }
}

/// Monthly closed sales of an account executive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesActuals {
    pub total_sales: Decimal,
}

impl SalesActuals {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("total_sales", self.total_sales)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actuals {
    LeadGen(LeadGenActuals),
    Sales(SalesActuals),
}

impl Actuals {
    /// Human readable name reported by [`CompError::ActualsMismatch`].
    pub fn describe(&self) -> &'static str {
        match self {
            Actuals::LeadGen(_) => "lead-gen",
            Actuals::Sales(_) => "sales",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Actuals::LeadGen(actuals) => actuals.validate(),
            Actuals::Sales(actuals) => actuals.validate(),
        }
    }
}

impl From<LeadGenActuals> for Actuals {
    fn from(actuals: LeadGenActuals) -> Self {
        Actuals::LeadGen(actuals)
    }
}

impl From<SalesActuals> for Actuals {
    fn from(actuals: SalesActuals) -> Self {
        Actuals::Sales(actuals)
    }
}

fn require_non_negative(field: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(CompError::InvalidActual { field, value });
    }
    Ok(())
}
