//! Input collection and rendering around the engine: plan documents, actuals
//! CSV files and payout reports.

pub mod csv;
pub mod plan_file;
pub mod report;
