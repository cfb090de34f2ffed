use miette::Diagnostic;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CompError {
    #[error("target `{field}` must be strictly positive, got {value}")]
    #[diagnostic(
        code(compcalc::invalid_target),
        help("monthly targets are divisors of the attainment rate and cannot be zero")
    )]
    InvalidTarget { field: &'static str, value: Decimal },

    #[error("actual `{field}` must not be negative, got {value}")]
    #[diagnostic(code(compcalc::invalid_actual))]
    InvalidActual { field: &'static str, value: Decimal },

    #[error("rate or ratio `{field}` is out of range: {value}")]
    #[diagnostic(code(compcalc::invalid_rate))]
    InvalidRate { field: &'static str, value: Decimal },

    #[error("amount `{field}` must not be negative, got {value}")]
    #[diagnostic(code(compcalc::invalid_amount))]
    InvalidAmount { field: &'static str, value: Decimal },

    #[error("unsupported cap strategy `{0}`")]
    #[diagnostic(
        code(compcalc::unsupported_cap_strategy),
        help("use one of: uncapped, commission_multiplier, attainment_ceiling")
    )]
    UnsupportedPlanCapStrategy(String),

    #[error("{plan} plan expects {expected} actuals, got {found}")]
    #[diagnostic(code(compcalc::actuals_mismatch))]
    ActualsMismatch {
        plan: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("arithmetic overflow while computing {operation}")]
    #[diagnostic(
        code(compcalc::overflow),
        help("the plan or the actuals hold values too large or too small to combine")
    )]
    Overflow { operation: &'static str },

    #[error("Invalid record: {0}")]
    #[diagnostic(code(compcalc::invalid_record))]
    InvalidRecord(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompError>;
