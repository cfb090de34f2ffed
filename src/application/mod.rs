//! Compensation engine.
//!
//! `engine::compute` is the single entry point: it dispatches a plan and its
//! actuals to the matching `PayoutCalculator` implementation. The calculators
//! share the attainment helpers in `attainment` and are otherwise independent.

mod accelerated;
pub mod attainment;
pub mod engine;
mod lead_gen;
pub mod tiered;
