//! Salary advance deduction.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::AuditStep;

use super::money::{ensure_non_negative, ensure_percent, percent_of, round_money};

/// The result of the advance calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct AdvanceResult {
    /// The amount paid early and withheld from the net, rounded to cents.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes `gross_salary × advance_percent / 100`.
///
/// # Errors
///
/// Returns `InvalidInput` with field `advance_percent` when the percent is
/// outside 0 to 100, or `gross_salary` when the salary is negative or too
/// large for the advance to be represented.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_advance_deduction;
/// use rust_decimal::Decimal;
///
/// let result = compute_advance_deduction(Decimal::from(2000), Decimal::from(40), 1).unwrap();
/// assert_eq!(result.amount, Decimal::new(80000, 2));
/// ```
pub fn compute_advance_deduction(
    gross_salary: Decimal,
    advance_percent: Decimal,
    step_number: u32,
) -> EngineResult<AdvanceResult> {
    ensure_non_negative("gross_salary", gross_salary)?;
    ensure_percent("advance_percent", advance_percent)?;

    let amount = round_money(percent_of(
        "gross_salary",
        gross_salary,
        advance_percent,
    )?);

    let reasoning = if advance_percent.is_zero() {
        "No advance taken".to_string()
    } else {
        format!(
            "${} x {}% = ${}",
            gross_salary.normalize(),
            advance_percent.normalize(),
            amount
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_advance".to_string(),
        rule_name: "Salary Advance Deduction".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "advance_percent": advance_percent.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.to_string()
        }),
        reasoning,
    };

    Ok(AdvanceResult { amount, audit_step })
}
