//! Checked money arithmetic. `Decimal` operators panic on overflow, so every
//! product, quotient and sum that depends on plan or actuals values goes
//! through here instead.

use crate::error::{CompError, Result};
use rust_decimal::Decimal;

pub fn mul(lhs: Decimal, rhs: Decimal, operation: &'static str) -> Result<Decimal> {
    lhs.checked_mul(rhs)
        .ok_or(CompError::Overflow { operation })
}

pub fn div(lhs: Decimal, rhs: Decimal, operation: &'static str) -> Result<Decimal> {
    lhs.checked_div(rhs)
        .ok_or(CompError::Overflow { operation })
}

pub fn sum<I>(values: I, operation: &'static str) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value)
            .ok_or(CompError::Overflow { operation })
    })
}
