//! Benefit aggregation.
//!
//! Sums the informational value of all benefit lines and the part of each
//! shared line that is charged back to the employee. The totals do not
//! depend on the order of the lines.

use rust_decimal::Decimal;

use crate::config::BenefitDefaults;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, BenefitDeduction, BenefitLine};

use super::money::{checked_sum, percent_of, round_money};

/// The result of aggregating benefit lines, including the audit step.
#[derive(Debug, Clone)]
pub struct BenefitAggregation {
    /// Sum of every line's amount.
    pub total_gross: Decimal,
    /// Sum of the charge-backs of shared lines.
    pub total_employee_deduction: Decimal,
    /// Per-line breakdown, in input order.
    pub lines: Vec<BenefitDeduction>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Resolves the share charged back for a line: its own share, then the
/// configured default for its kind, then 100. Informational lines are zero.
fn resolve_share(line: &BenefitLine, defaults: &BenefitDefaults) -> Decimal {
    if !line.employee_shared {
        return Decimal::ZERO;
    }
    line.employee_share_percent
        .or_else(|| defaults.share_for(line.kind))
        .unwrap_or(Decimal::ONE_HUNDRED)
}

fn validate_line(index: usize, line: &BenefitLine) -> EngineResult<()> {
    if line.amount < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            format!("benefits[{}].amount", index),
            format!("must not be negative, got {}", line.amount),
        ));
    }
    if let Some(share) = line.employee_share_percent {
        if share < Decimal::ZERO || share > Decimal::ONE_HUNDRED {
            return Err(EngineError::invalid_input(
                format!("benefits[{}].employee_share_percent", index),
                format!("must be between 0 and 100, got {}", share),
            ));
        }
    }
    Ok(())
}

/// Aggregates benefit lines into an informational total and an employee deduction.
///
/// Each line's deduction is rounded to cents before it is summed.
///
/// # Errors
///
/// Returns `InvalidInput` naming the offending line for a negative amount
/// or a share outside 0 to 100, and on `benefits` when the totals overflow.
/// No totals are produced in that case.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::aggregate_benefits;
/// use salary_engine::config::BenefitDefaults;
/// use salary_engine::models::{BenefitKind, BenefitLine};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let lines = vec![
///     BenefitLine::meal_voucher(dec("30.00"), 20, Some(dec("20"))).unwrap(),
///     BenefitLine::informational(BenefitKind::Health, dec("450.00")),
/// ];
///
/// let result = aggregate_benefits(&lines, &BenefitDefaults::default(), 1).unwrap();
/// assert_eq!(result.total_gross, dec("1050.00"));
/// assert_eq!(result.total_employee_deduction, dec("120.00"));
/// ```
pub fn aggregate_benefits(
    lines: &[BenefitLine],
    defaults: &BenefitDefaults,
    step_number: u32,
) -> EngineResult<BenefitAggregation> {
    for (index, line) in lines.iter().enumerate() {
        validate_line(index, line)?;
    }

    let deductions = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let share_percent = resolve_share(line, defaults);
            let field = format!("benefits[{}].amount", index);
            Ok(BenefitDeduction {
                kind: line.kind,
                amount: line.amount,
                share_percent,
                deduction: round_money(percent_of(&field, line.amount, share_percent)?),
                days: line.days,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let total_gross = round_money(checked_sum("benefits", lines.iter().map(|l| l.amount))?);
    let total_employee_deduction =
        round_money(checked_sum("benefits", deductions.iter().map(|d| d.deduction))?);

    let reasoning = if deductions.is_empty() {
        "No benefit lines - nothing to deduct".to_string()
    } else {
        let parts: Vec<String> = deductions
            .iter()
            .map(|d| {
                if d.share_percent.is_zero() {
                    format!("{}: not charged", d.kind.as_str())
                } else {
                    format!(
                        "{}: ${} x {}% = ${}",
                        d.kind.as_str(),
                        d.amount.normalize(),
                        d.share_percent.normalize(),
                        d.deduction
                    )
                }
            })
            .collect();
        format!(
            "{}; total deducted ${}",
            parts.join("; "),
            total_employee_deduction
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "benefit_deductions".to_string(),
        rule_name: "Benefit Deductions".to_string(),
        input: serde_json::json!({
            "lines": lines
                .iter()
                .map(|l| serde_json::json!({
                    "kind": l.kind.as_str(),
                    "amount": l.amount.normalize().to_string(),
                    "employee_shared": l.employee_shared,
                    "employee_share_percent": l.employee_share_percent.map(|s| s.normalize().to_string())
                }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "total_gross": total_gross.to_string(),
            "total_employee_deduction": total_employee_deduction.to_string()
        }),
        reasoning,
    };

    Ok(BenefitAggregation {
        total_gross,
        total_employee_deduction,
        lines: deductions,
        audit_step,
    })
}
