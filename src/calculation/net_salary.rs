//! Net salary assembly.
//!
//! [`assemble`] runs every rule in a fixed order and collects their audit
//! steps into one [`PayrollResult`]. It either returns a complete result or
//! the first validation error; nothing partial escapes.

use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, AuditWarning, PayrollInput, PayrollResult};

use super::advance::compute_advance_deduction;
use super::benefits::aggregate_benefits;
use super::calendar::{days_in_month, validate_reference_year, validate_worked_days};
use super::contribution::compute_mandatory_deduction;
use super::money::{checked_sum, ensure_non_negative, ensure_percent, round_money};
use super::unhealthiness::compute_unhealthiness_addition;

/// Computes the full monthly breakdown for `input` under `rules`.
///
/// The steps run in this order: input and reference period checks,
/// unhealthiness addition over the table's minimum wage, gross earnings,
/// progressive contribution on gross earnings, benefit charge-backs, salary
/// advance and finally the net salary. The gross salary is rounded to cents
/// before anything is derived from it.
///
/// The function is pure: equal inputs and rules give equal results.
///
/// # Errors
///
/// Returns the first `InvalidInput` found. Fields checked are
/// `gross_salary`, `advance_percent`, `year`, `month`, `worked_days`,
/// `unhealthiness_rate` and `benefits[i].*`. An amount too large to carry
/// through the arithmetic is reported against `gross_salary` or `benefits`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::assemble;
/// use salary_engine::config::{Bracket, ContributionTable, PayrollRules};
/// use salary_engine::models::PayrollInput;
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
/// let rules = PayrollRules::with_table(table);
///
/// let input = PayrollInput::new(dec("3000.00"), 2025, 3);
/// let result = assemble(&input, &rules).unwrap();
///
/// assert_eq!(result.mandatory_deduction, dec("253.41"));
/// assert_eq!(result.net_salary, dec("2746.59"));
/// ```
pub fn assemble(input: &PayrollInput, rules: &PayrollRules) -> EngineResult<PayrollResult> {
    ensure_non_negative("gross_salary", input.gross_salary)?;
    ensure_percent("advance_percent", input.advance_percent)?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    // Reference period
    let year = validate_reference_year(input.reference_year, rules.reference_years)?;
    let month_days = days_in_month(year, input.reference_month)?;
    let worked_days = validate_worked_days(year, input.reference_month, input.worked_days)?;
    steps.push(AuditStep {
        step_number,
        rule_id: "reference_period".to_string(),
        rule_name: "Reference Period".to_string(),
        input: serde_json::json!({
            "year": year,
            "month": input.reference_month,
            "worked_days": worked_days
        }),
        output: serde_json::json!({
            "days_in_month": month_days,
            "table_effective_date": rules.table.effective_date.to_string()
        }),
        reasoning: format!(
            "{}-{:02} has {} days; {} worked; contribution table effective {}",
            year, input.reference_month, month_days, worked_days, rules.table.effective_date
        ),
    });
    step_number += 1;

    let gross_salary = round_money(input.gross_salary);

    let unhealthiness = compute_unhealthiness_addition(
        rules.table.minimum_wage,
        input.unhealthiness_rate,
        &rules.unhealthiness,
        step_number,
    )?;
    steps.push(unhealthiness.audit_step);
    step_number += 1;

    let gross_earnings = checked_sum("gross_salary", [gross_salary, unhealthiness.amount])?;
    steps.push(AuditStep {
        step_number,
        rule_id: "gross_earnings".to_string(),
        rule_name: "Gross Earnings".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "unhealthiness_addition": unhealthiness.amount.to_string()
        }),
        output: serde_json::json!({
            "gross_earnings": gross_earnings.to_string()
        }),
        reasoning: format!(
            "${} + ${} = ${}",
            gross_salary, unhealthiness.amount, gross_earnings
        ),
    });
    step_number += 1;

    let mandatory = compute_mandatory_deduction(gross_earnings, &rules.table, step_number)?;
    steps.push(mandatory.audit_step);
    step_number += 1;

    let benefits = aggregate_benefits(&input.benefits, &rules.benefit_defaults, step_number)?;
    steps.push(benefits.audit_step);
    step_number += 1;

    let advance = compute_advance_deduction(gross_salary, input.advance_percent, step_number)?;
    steps.push(advance.audit_step);
    step_number += 1;

    let total_deductions = checked_sum(
        "benefits",
        [mandatory.amount, benefits.total_employee_deduction, advance.amount],
    )?;
    let net_salary = gross_earnings - total_deductions;

    steps.push(AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross_earnings": gross_earnings.to_string(),
            "mandatory_deduction": mandatory.amount.to_string(),
            "benefit_deductions": benefits.total_employee_deduction.to_string(),
            "advance_deduction": advance.amount.to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.to_string(),
            "net_salary": net_salary.to_string()
        }),
        reasoning: format!(
            "${} - ${} - ${} - ${} = ${}",
            gross_earnings,
            mandatory.amount,
            benefits.total_employee_deduction,
            advance.amount,
            net_salary
        ),
    });

    if net_salary < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_SALARY".to_string(),
            message: format!(
                "Deductions of ${} exceed gross earnings of ${}",
                total_deductions, gross_earnings
            ),
            severity: "high".to_string(),
        });
    }

    Ok(PayrollResult {
        gross_salary,
        unhealthiness_addition: unhealthiness.amount,
        unhealthiness_advance: unhealthiness.advance_installment,
        unhealthiness_final: unhealthiness.final_installment,
        gross_earnings,
        mandatory_deduction: mandatory.amount,
        effective_contribution_rate: mandatory.effective_rate,
        benefit_gross: benefits.total_gross,
        benefit_deductions: benefits.total_employee_deduction,
        benefit_lines: benefits.lines,
        advance_deduction: advance.amount,
        total_deductions,
        net_salary,
        audit_trace: AuditTrace { steps, warnings },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Bracket, ContributionTable};
    use crate::error::EngineError;
    use crate::models::{BenefitKind, BenefitLine};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rules_2025() -> PayrollRules {
        let table = ContributionTable::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            dec("1518.00"),
            vec![
                Bracket {
                    upper_bound: dec("1518.00"),
                    rate: dec("0.075"),
                },
                Bracket {
                    upper_bound: dec("2793.88"),
                    rate: dec("0.09"),
                },
                Bracket {
                    upper_bound: dec("4190.83"),
                    rate: dec("0.12"),
                },
                Bracket {
                    upper_bound: dec("8157.41"),
                    rate: dec("0.14"),
                },
            ],
        )
        .unwrap();
        PayrollRules::with_table(table)
    }

    fn expect_field(result: EngineResult<PayrollResult>, expected: &str) {
        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected InvalidInput on {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_plain_salary() {
        let input = PayrollInput::new(dec("3000.00"), 2025, 1);
        let result = assemble(&input, &rules_2025()).unwrap();

        assert_eq!(result.gross_earnings, dec("3000.00"));
        assert_eq!(result.mandatory_deduction, dec("253.41"));
        assert_eq!(result.effective_contribution_rate, dec("8.45"));
        assert_eq!(result.total_deductions, dec("253.41"));
        assert_eq!(result.net_salary, dec("2746.59"));
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_advance_reduces_net() {
        let input = PayrollInput::new(dec("2000.00"), 2025, 1).with_advance_percent(dec("40"));
        let result = assemble(&input, &rules_2025()).unwrap();

        assert_eq!(result.advance_deduction, dec("800.00"));
        assert_eq!(result.mandatory_deduction, dec("157.23"));
        assert_eq!(result.net_salary, dec("1042.77"));
    }

    #[test]
    fn test_unhealthiness_raises_contribution_base() {
        let input = PayrollInput::new(dec("2000.00"), 2025, 1).with_unhealthiness_rate(dec("40"));
        let result = assemble(&input, &rules_2025()).unwrap();

        assert_eq!(result.unhealthiness_addition, dec("607.20"));
        assert_eq!(result.unhealthiness_advance, dec("242.88"));
        assert_eq!(result.unhealthiness_final, dec("364.32"));
        assert_eq!(result.gross_earnings, dec("2607.20"));
        // 113.85 + 1089.20 x 9% (98.028) = 211.878
        assert_eq!(result.mandatory_deduction, dec("211.88"));
        assert_eq!(result.net_salary, dec("2395.32"));
    }

    #[test]
    fn test_benefits_reduce_net() {
        let input = PayrollInput::new(dec("3000.00"), 2025, 1)
            .with_benefit(BenefitLine::salary_based(
                BenefitKind::Transport,
                dec("3000.00"),
                dec("6"),
            ))
            .with_benefit(BenefitLine::informational(BenefitKind::Health, dec("250.00")));
        let result = assemble(&input, &rules_2025()).unwrap();

        assert_eq!(result.benefit_gross, dec("3250.00"));
        assert_eq!(result.benefit_deductions, dec("180.00"));
        assert_eq!(result.net_salary, dec("2566.59"));
        assert_eq!(result.benefit_lines.len(), 2);
    }

    #[test]
    fn test_net_identity_and_total_deductions() {
        let input = PayrollInput::new(dec("4321.09"), 2025, 7)
            .with_unhealthiness_rate(dec("20"))
            .with_advance_percent(dec("35"))
            .with_benefit(BenefitLine::meal_voucher(dec("28.50"), 21, Some(dec("20"))).unwrap());
        let result = assemble(&input, &rules_2025()).unwrap();

        assert_eq!(
            result.net_salary,
            result.gross_earnings
                - result.mandatory_deduction
                - result.benefit_deductions
                - result.advance_deduction
        );
        assert_eq!(
            result.total_deductions,
            result.mandatory_deduction + result.benefit_deductions + result.advance_deduction
        );
    }

    #[test]
    fn test_negative_net_is_not_clamped() {
        let input = PayrollInput::new(dec("1000.00"), 2025, 1)
            .with_advance_percent(dec("100"))
            .with_benefit(BenefitLine::shared(BenefitKind::Health, dec("500.00"), None));
        let result = assemble(&input, &rules_2025()).unwrap();

        // 1000 - 75 - 500 - 1000
        assert_eq!(result.net_salary, dec("-575.00"));
        assert!(result.is_net_negative());
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "NEGATIVE_NET_SALARY");
    }

    #[test]
    fn test_zero_salary() {
        let input = PayrollInput::new(Decimal::ZERO, 2025, 1);
        let result = assemble(&input, &rules_2025()).unwrap();

        assert_eq!(result.mandatory_deduction, Decimal::ZERO);
        assert_eq!(result.effective_contribution_rate, Decimal::ZERO);
        assert_eq!(result.net_salary, Decimal::ZERO);
    }

    #[test]
    fn test_gross_salary_rounded_to_cents() {
        let input = PayrollInput::new(dec("1000.005"), 2025, 1);
        let result = assemble(&input, &rules_2025()).unwrap();

        assert_eq!(result.gross_salary.to_string(), "1000.01");
        assert_eq!(result.gross_earnings, dec("1000.01"));
    }

    #[test]
    fn test_is_deterministic() {
        let input = PayrollInput::new(dec("5123.45"), 2024, 2)
            .with_unhealthiness_rate(dec("10"))
            .with_advance_percent(dec("40"))
            .with_worked_days(29);

        let first = assemble(&input, &rules_2025()).unwrap();
        let second = assemble(&input, &rules_2025()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_audit_steps_in_order() {
        let input = PayrollInput::new(dec("3000.00"), 2025, 1).with_worked_days(31);
        let result = assemble(&input, &rules_2025()).unwrap();

        let ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "reference_period",
                "unhealthiness_addition",
                "gross_earnings",
                "mandatory_contribution",
                "benefit_deductions",
                "salary_advance",
                "net_salary",
            ]
        );
        let numbers: Vec<u32> = result.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(result.audit_trace.steps[0].output["days_in_month"], 31);
        assert_eq!(
            result.audit_trace.steps[6].reasoning,
            "$3000.00 - $253.41 - $0.00 - $0.00 = $2746.59"
        );
    }

    #[test]
    fn test_negative_gross_rejected() {
        let input = PayrollInput::new(dec("-1"), 2025, 1);
        expect_field(assemble(&input, &rules_2025()), "gross_salary");
    }

    #[test]
    fn test_huge_gross_with_full_advance_rejected() {
        let huge = Decimal::from_scientific("1e27").unwrap();
        let input = PayrollInput::new(huge, 2025, 1).with_advance_percent(dec("100"));

        match assemble(&input, &rules_2025()) {
            Err(EngineError::InvalidInput { field, reason }) => {
                assert_eq!(field, "gross_salary");
                assert_eq!(reason, "amount too large");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_gross_at_decimal_max_with_unhealthiness_rejected() {
        let input = PayrollInput::new(Decimal::MAX, 2025, 1).with_unhealthiness_rate(dec("40"));
        expect_field(assemble(&input, &rules_2025()), "gross_salary");
    }

    #[test]
    fn test_overflowing_benefit_total_rejected() {
        let input = PayrollInput::new(dec("2000"), 2025, 1)
            .with_benefit(BenefitLine::informational(BenefitKind::Health, Decimal::MAX))
            .with_benefit(BenefitLine::informational(BenefitKind::Dental, Decimal::MAX));
        expect_field(assemble(&input, &rules_2025()), "benefits");
    }

    #[test]
    fn test_advance_out_of_range_rejected() {
        let input = PayrollInput::new(dec("2000"), 2025, 1).with_advance_percent(dec("120"));
        expect_field(assemble(&input, &rules_2025()), "advance_percent");
    }

    #[test]
    fn test_invalid_period_rejected() {
        expect_field(
            assemble(&PayrollInput::new(dec("2000"), 2025, 13), &rules_2025()),
            "month",
        );
        expect_field(
            assemble(&PayrollInput::new(dec("2000"), 1850, 1), &rules_2025()),
            "year",
        );
        expect_field(
            assemble(
                &PayrollInput::new(dec("2000"), 2025, 2).with_worked_days(29),
                &rules_2025(),
            ),
            "worked_days",
        );
    }

    #[test]
    fn test_leap_february_accepts_29_days() {
        let input = PayrollInput::new(dec("2000"), 2024, 2).with_worked_days(29);
        assert!(assemble(&input, &rules_2025()).is_ok());
    }

    #[test]
    fn test_unsupported_tier_rejected() {
        let input = PayrollInput::new(dec("2000"), 2025, 1).with_unhealthiness_rate(dec("30"));
        expect_field(assemble(&input, &rules_2025()), "unhealthiness_rate");
    }

    #[test]
    fn test_bad_benefit_line_rejected() {
        let input = PayrollInput::new(dec("2000"), 2025, 1)
            .with_benefit(BenefitLine::informational(BenefitKind::Dental, dec("-5")));
        expect_field(assemble(&input, &rules_2025()), "benefits[0].amount");
    }
}
