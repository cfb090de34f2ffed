//! Plan model: plan configurations, actuals, and the payout breakdown they produce.

pub mod actuals;
pub mod arithmetic;
pub mod breakdown;
pub mod plan;
pub mod ports;
