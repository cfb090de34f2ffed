use super::breakdown::Breakdown;
use crate::error::Result;

/// A plan that can turn a period's actuals into a payout.
///
/// Implementations validate both the plan and the actuals before computing,
/// so an `Err` never comes with a partially computed payout.
pub trait PayoutCalculator: Send + Sync {
    type Actuals;

    fn calculate(&self, actuals: &Self::Actuals) -> Result<Breakdown>;
}
