//! Unhealthiness addition calculation.
//!
//! Workers exposed to unhealthy conditions receive a supplement expressed as
//! a percentage of a reference base, normally the minimum wage. Only a small
//! set of regulatory tiers is accepted.

use rust_decimal::Decimal;

use crate::config::UnhealthinessRules;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::money::{ensure_non_negative, percent_of, round_money};

/// The result of the unhealthiness calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct UnhealthinessResult {
    /// The addition, rounded to cents.
    pub amount: Decimal,
    /// Portion paid together with the salary advance.
    pub advance_installment: Decimal,
    /// Portion paid at month end. `advance_installment + final_installment == amount`.
    pub final_installment: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes `base_reference × rate_percent / 100` and splits it into installments.
///
/// A zero rate yields a zero addition. Any other rate must be one of the
/// tiers in `rules`.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative base or an unsupported tier.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_unhealthiness_addition;
/// use salary_engine::config::UnhealthinessRules;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rules = UnhealthinessRules::default();
/// let result = compute_unhealthiness_addition(
///     Decimal::from_str("1518.00").unwrap(),
///     Decimal::from(40),
///     &rules,
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.amount, Decimal::from_str("607.20").unwrap());
/// assert_eq!(result.advance_installment, Decimal::from_str("242.88").unwrap());
/// assert_eq!(result.final_installment, Decimal::from_str("364.32").unwrap());
/// ```
pub fn compute_unhealthiness_addition(
    base_reference: Decimal,
    rate_percent: Decimal,
    rules: &UnhealthinessRules,
    step_number: u32,
) -> EngineResult<UnhealthinessResult> {
    ensure_non_negative("base_reference", base_reference)?;

    if !rules.accepts(rate_percent) {
        let tiers: Vec<String> = rules.tiers.iter().map(|t| t.normalize().to_string()).collect();
        return Err(EngineError::invalid_input(
            "unhealthiness_rate",
            format!(
                "unsupported tier {}; expected 0 or one of {}",
                rate_percent.normalize(),
                tiers.join("/")
            ),
        ));
    }

    let amount = round_money(percent_of("base_reference", base_reference, rate_percent)?);
    let advance_installment = round_money(percent_of(
        "base_reference",
        amount,
        rules.advance_share_percent,
    )?);
    let final_installment = amount - advance_installment;

    let reasoning = if rate_percent.is_zero() {
        "No unhealthiness tier - no addition".to_string()
    } else {
        format!(
            "${} x {}% = ${} (advance {}% = ${}, final ${})",
            base_reference.normalize(),
            rate_percent.normalize(),
            amount,
            rules.advance_share_percent.normalize(),
            advance_installment,
            final_installment
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "unhealthiness_addition".to_string(),
        rule_name: "Unhealthiness Addition".to_string(),
        input: serde_json::json!({
            "base_reference": base_reference.normalize().to_string(),
            "rate_percent": rate_percent.normalize().to_string(),
            "advance_share_percent": rules.advance_share_percent.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.to_string(),
            "advance_installment": advance_installment.to_string(),
            "final_installment": final_installment.to_string()
        }),
        reasoning,
    };

    Ok(UnhealthinessResult {
        amount,
        advance_installment,
        final_installment,
        audit_step,
    })
}
