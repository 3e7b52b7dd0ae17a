//! Progressive social security contribution.
//!
//! This module computes the mandatory monthly contribution by applying the
//! marginal rate of each bracket to the slice of earnings that falls inside
//! it, as opposed to a flat rate looked up from the total.

use rust_decimal::Decimal;

use crate::config::ContributionTable;
use crate::error::EngineResult;
use crate::models::AuditStep;

use super::money::{ensure_non_negative, round_money};

/// One bracket's share of the contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSlice {
    /// Where the slice starts.
    pub lower_bound: Decimal,
    /// Where the slice ends, or `None` for the remainder above the last bracket.
    pub upper_bound: Option<Decimal>,
    /// The marginal rate applied.
    pub rate: Decimal,
    /// Earnings that fell inside the slice.
    pub taxable: Decimal,
    /// `taxable × rate`, unrounded.
    pub contribution: Decimal,
}

/// The result of the contribution calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct MandatoryDeductionResult {
    /// The contribution, rounded to cents.
    pub amount: Decimal,
    /// `amount / gross_earnings × 100`, rounded to two places. Zero for zero earnings.
    pub effective_rate: Decimal,
    /// Per-bracket breakdown in ascending order.
    pub slices: Vec<BracketSlice>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the progressive contribution owed on `gross_earnings`.
///
/// For every bracket reached, `rate × (min(gross, upper) − previous upper)`
/// is accumulated. Earnings above the last bracket are charged at the last
/// bracket's rate unless the table has `ceiling` set, in which case they are
/// not charged at all. The sum is rounded to cents once, at the end.
///
/// # Errors
///
/// Returns `InvalidInput` for negative earnings.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_mandatory_deduction;
/// use salary_engine::config::{Bracket, ContributionTable};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let table = ContributionTable::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     dec("1518.00"),
///     vec![
///         Bracket { upper_bound: dec("1518.00"), rate: dec("0.075") },
///         Bracket { upper_bound: dec("2793.88"), rate: dec("0.09") },
///         Bracket { upper_bound: dec("4190.83"), rate: dec("0.12") },
///         Bracket { upper_bound: dec("8157.41"), rate: dec("0.14") },
///     ],
/// )
/// .unwrap();
///
/// let result = compute_mandatory_deduction(dec("3000.00"), &table, 1).unwrap();
/// assert_eq!(result.amount, dec("253.41"));
/// assert_eq!(result.slices.len(), 3);
/// ```
pub fn compute_mandatory_deduction(
    gross_earnings: Decimal,
    table: &ContributionTable,
    step_number: u32,
) -> EngineResult<MandatoryDeductionResult> {
    ensure_non_negative("gross_earnings", gross_earnings)?;

    let mut slices = Vec::with_capacity(table.brackets.len() + 1);
    let mut lower = Decimal::ZERO;

    for bracket in &table.brackets {
        if gross_earnings <= lower {
            break;
        }
        let upper = gross_earnings.min(bracket.upper_bound);
        let taxable = upper - lower;
        slices.push(BracketSlice {
            lower_bound: lower,
            upper_bound: Some(bracket.upper_bound),
            rate: bracket.rate,
            taxable,
            contribution: taxable * bracket.rate,
        });
        lower = bracket.upper_bound;
    }

    let top = table.top_bound();
    let above_top = gross_earnings > top;
    if above_top && !table.ceiling {
        let taxable = gross_earnings - top;
        let rate = table.highest_rate();
        slices.push(BracketSlice {
            lower_bound: top,
            upper_bound: None,
            rate,
            taxable,
            contribution: taxable * rate,
        });
    }

    let exact: Decimal = slices.iter().map(|s| s.contribution).sum();
    let amount = round_money(exact);
    let effective_rate = if gross_earnings.is_zero() {
        Decimal::ZERO
    } else {
        round_money(amount / gross_earnings * Decimal::ONE_HUNDRED)
    };

    let reasoning = if slices.is_empty() {
        "No earnings - no contribution due".to_string()
    } else {
        let parts: Vec<String> = slices
            .iter()
            .map(|s| format!("${} x {}", s.taxable.normalize(), s.rate.normalize()))
            .collect();
        let mut text = format!(
            "{} = ${} ({}% effective)",
            parts.join(" + "),
            amount,
            effective_rate
        );
        if above_top && table.ceiling {
            text.push_str(&format!(
                " - earnings above ${} not contributed (ceiling)",
                top.normalize()
            ));
        }
        text
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "mandatory_contribution".to_string(),
        rule_name: "Progressive Social Security Contribution".to_string(),
        input: serde_json::json!({
            "gross_earnings": gross_earnings.normalize().to_string(),
            "table_effective_date": table.effective_date.to_string(),
            "ceiling": table.ceiling
        }),
        output: serde_json::json!({
            "amount": amount.to_string(),
            "effective_rate": effective_rate.to_string(),
            "slices": slices
                .iter()
                .map(|s| serde_json::json!({
                    "lower_bound": s.lower_bound.normalize().to_string(),
                    "upper_bound": s.upper_bound.map(|u| u.normalize().to_string()),
                    "rate": s.rate.normalize().to_string(),
                    "taxable": s.taxable.normalize().to_string(),
                    "contribution": s.contribution.normalize().to_string()
                }))
                .collect::<Vec<_>>()
        }),
        reasoning,
    };

    Ok(MandatoryDeductionResult {
        amount,
        effective_rate,
        slices,
        audit_step,
    })
}
