//! Shared attainment arithmetic used by every plan calculator.

use crate::domain::arithmetic;
use crate::domain::plan::AttainmentBonusCurve;
use crate::error::{CompError, Result};
use rust_decimal::Decimal;

pub use crate::domain::breakdown::QUALIFYING_ATTAINMENT;

/// Attainment at which a target bonus pays out in full.
pub const FULL_ATTAINMENT: Decimal = Decimal::ONE;

/// Returns `actual / target`.
///
/// A non-positive target is rejected instead of yielding an infinite or
/// undefined rate, and a quotient outside the `Decimal` range is an
/// [`CompError::Overflow`].
pub fn attainment_rate(actual: Decimal, target: Decimal) -> Result<Decimal> {
    if target <= Decimal::ZERO {
        return Err(CompError::InvalidTarget {
            field: "target",
            value: target,
        });
    }
    arithmetic::div(actual, target, "attainment rate")
}

pub fn is_qualifying(rate: Decimal) -> bool {
    rate >= QUALIFYING_ATTAINMENT
}

/// Target bonus earned at `rate`.
///
/// Zero below the 50% gate, `full_bonus * rate` between 50% and 100%, and the
/// full bonus from 100% on.
pub fn pro_rata_bonus(rate: Decimal, full_bonus: Decimal) -> Result<Decimal> {
    if !is_qualifying(rate) {
        Ok(Decimal::ZERO)
    } else if rate >= FULL_ATTAINMENT {
        Ok(full_bonus)
    } else {
        arithmetic::mul(full_bonus, rate, "target bonus")
    }
}

/// Target bonus that keeps scaling past 100% until `ceiling`.
pub fn scaled_bonus(rate: Decimal, full_bonus: Decimal, ceiling: Decimal) -> Result<Decimal> {
    if !is_qualifying(rate) {
        return Ok(Decimal::ZERO);
    }
    arithmetic::mul(full_bonus, rate.min(ceiling), "target bonus")
}

impl AttainmentBonusCurve {
    pub fn bonus(&self, rate: Decimal, full_bonus: Decimal) -> Result<Decimal> {
        match self {
            AttainmentBonusCurve::ProRata => pro_rata_bonus(rate, full_bonus),
            AttainmentBonusCurve::ScaledToCeiling { ceiling } => {
                scaled_bonus(rate, full_bonus, *ceiling)
            }
        }
    }
}

/// Units above target, floored at zero and capped at `target * cap_ratio`.
pub fn capped_excess(actual: Decimal, target: Decimal, cap_ratio: Decimal) -> Result<Decimal> {
    let cap = arithmetic::mul(target, cap_ratio, "excess cap")?;
    Ok(actual.saturating_sub(target).max(Decimal::ZERO).min(cap))
}

/// Portion of `amount` that falls in `[lower, upper)`; `None` means unbounded.
pub fn band(amount: Decimal, lower: Decimal, upper: Option<Decimal>) -> Decimal {
    let top = match upper {
        Some(upper) => amount.min(upper),
        None => amount,
    };
    top.saturating_sub(lower).max(Decimal::ZERO)
}
