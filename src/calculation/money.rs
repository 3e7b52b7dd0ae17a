//! Money helpers shared by the calculation rules.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Rounds an amount to cents, halves away from zero.
///
/// The result always carries exactly two decimal places, so `607.2`
/// becomes `607.20`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("253.4136").unwrap()), Decimal::from_str("253.41").unwrap());
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap()), Decimal::from_str("0.13").unwrap());
/// assert_eq!(round_money(Decimal::from_str("-0.125").unwrap()), Decimal::from_str("-0.13").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// `percent` percent of `amount`, unrounded.
///
/// Returns `InvalidInput` naming `field` when the product does not fit in a
/// `Decimal`.
pub(crate) fn percent_of(
    field: &str,
    amount: Decimal,
    percent: Decimal,
) -> EngineResult<Decimal> {
    amount
        .checked_mul(percent)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| too_large(field))
}

/// Adds amounts, reporting overflow as `InvalidInput` on `field`.
pub(crate) fn checked_sum<I>(field: &str, amounts: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).ok_or_else(|| too_large(field))
    })
}

fn too_large(field: &str) -> EngineError {
    EngineError::invalid_input(field, "amount too large")
}

pub(crate) fn ensure_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_percent(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(EngineError::invalid_input(
            field,
            format!("must be between 0 and 100, got {}", value),
        ));
    }
    Ok(())
}
