//! Plain-text payroll breakdown.

use rust_decimal::Decimal;

use crate::models::{BenefitDeduction, BenefitKind, PayrollInput, PayrollResult};

use super::{Locale, format_money};

const SEPARATOR: &str =
    "--------------------------------------------------------------------";

/// Renders the breakdown of `result` as text, one item per line.
///
/// Sections are separated by rule lines: earnings and installments, then
/// deductions, then totals, then the net salary. Each charged benefit line
/// gets its own deduction line. Warnings from the audit trace are appended
/// at the end.
///
/// # Examples
///
/// ```
/// use salary_engine::models::{PayrollInput, PayrollResult};
/// use salary_engine::render::{Locale, render_text};
/// # use salary_engine::calculation::assemble;
/// # use salary_engine::config::{Bracket, ContributionTable, PayrollRules};
/// # use chrono::NaiveDate;
/// # use rust_decimal::Decimal;
/// # let table = ContributionTable::new(
/// #     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
/// #     Decimal::from(1518),
/// #     vec![Bracket { upper_bound: Decimal::from(1518), rate: Decimal::new(75, 3) }],
/// # ).unwrap();
/// # let rules = PayrollRules::with_table(table);
/// let input = PayrollInput::new(Decimal::from(1000), 2025, 1);
/// let result = assemble(&input, &rules).unwrap();
///
/// let text = render_text(&result, &input, Locale::PtBr);
/// assert!(text.contains("- Net Salary: R$ 925,00"));
/// ```
pub fn render_text(result: &PayrollResult, input: &PayrollInput, locale: Locale) -> String {
    let money = |amount: Decimal| format!("R$ {}", format_money(amount, locale));
    let percent = |value: Decimal| value.normalize().to_string();

    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("- Gross Salary: {}", money(result.gross_salary)));
    lines.push(format!(
        "- Salary Advance ({}%): {}",
        percent(input.advance_percent),
        money(result.advance_deduction)
    ));

    let vouchers: Vec<&BenefitDeduction> = result
        .benefit_lines
        .iter()
        .filter(|line| line.kind == BenefitKind::MealVoucher)
        .collect();
    let voucher_value: Decimal = vouchers.iter().map(|line| line.amount).sum();
    // None when a voucher line was given without its day count.
    let voucher_days = vouchers
        .iter()
        .try_fold(0u32, |total, line| total.checked_add(line.days?));
    match voucher_days {
        Some(days) => lines.push(format!(
            "- Meal Voucher Value ({} days): {}",
            days,
            money(voucher_value)
        )),
        None => lines.push(format!("- Meal Voucher Value: {}", money(voucher_value))),
    }

    lines.push(format!(
        "- Unhealthiness Advance: {}",
        money(result.unhealthiness_advance)
    ));
    lines.push(format!(
        "- Unhealthiness Final: {}",
        money(result.unhealthiness_final)
    ));
    lines.push(format!(
        "- Unhealthiness Advance + Salary Advance: {}",
        money(result.unhealthiness_advance + result.advance_deduction)
    ));
    lines.push(SEPARATOR.to_string());

    lines.push(format!(
        "- Social Security Contribution ({}%): {}",
        format_money(result.effective_contribution_rate, locale),
        money(result.mandatory_deduction)
    ));
    for kind in BenefitKind::ALL {
        let mut charged = result
            .benefit_lines
            .iter()
            .filter(|line| line.kind == kind && !line.share_percent.is_zero())
            .peekable();
        if charged.peek().is_none() {
            lines.push(format!("- No {} deduction.", kind.label()));
        }
        for line in charged {
            lines.push(format!(
                "- {} Deduction ({}%): {}",
                kind.label(),
                percent(line.share_percent),
                money(line.deduction)
            ));
        }
    }
    lines.push(format!(
        "- Total Deductions: {}",
        money(result.total_deductions)
    ));
    lines.push(SEPARATOR.to_string());

    lines.push(format!("- Total Earnings: {}", money(result.gross_earnings)));
    lines.push(format!(
        "- Total Unhealthiness: {}",
        money(result.unhealthiness_addition)
    ));
    lines.push(SEPARATOR.to_string());

    lines.push(format!("- Net Salary: {}", money(result.net_salary)));
    lines.push(SEPARATOR.to_string());

    for warning in &result.audit_trace.warnings {
        lines.push(format!("! {}", warning.message));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditTrace, AuditWarning};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample() -> (PayrollInput, PayrollResult) {
        let input = PayrollInput::new(dec("2000.00"), 2025, 1)
            .with_unhealthiness_rate(dec("40"))
            .with_advance_percent(dec("40"));
        let result = PayrollResult {
            gross_salary: dec("2000.00"),
            unhealthiness_addition: dec("607.20"),
            unhealthiness_advance: dec("242.88"),
            unhealthiness_final: dec("364.32"),
            gross_earnings: dec("2607.20"),
            mandatory_deduction: dec("211.88"),
            effective_contribution_rate: dec("8.13"),
            benefit_gross: dec("2660.00"),
            benefit_deductions: dec("186.00"),
            benefit_lines: vec![
                BenefitDeduction {
                    kind: BenefitKind::MealVoucher,
                    amount: dec("660.00"),
                    share_percent: dec("10"),
                    deduction: dec("66.00"),
                    days: Some(22),
                },
                BenefitDeduction {
                    kind: BenefitKind::Transport,
                    amount: dec("2000.00"),
                    share_percent: dec("6"),
                    deduction: dec("120.00"),
                    days: None,
                },
            ],
            advance_deduction: dec("800.00"),
            total_deductions: dec("1197.88"),
            net_salary: dec("1409.32"),
            audit_trace: AuditTrace::default(),
        };
        (input, result)
    }

    #[test]
    fn test_renders_all_sections() {
        let (input, result) = sample();
        let text = render_text(&result, &input, Locale::PtBr);

        assert!(text.contains("- Gross Salary: R$ 2.000,00"));
        assert!(text.contains("- Salary Advance (40%): R$ 800,00"));
        assert!(text.contains("- Meal Voucher Value (22 days): R$ 660,00"));
        assert!(text.contains("- Unhealthiness Advance: R$ 242,88"));
        assert!(text.contains("- Unhealthiness Final: R$ 364,32"));
        assert!(text.contains("- Unhealthiness Advance + Salary Advance: R$ 1.042,88"));
        assert!(text.contains("- Social Security Contribution (8,13%): R$ 211,88"));
        assert!(text.contains("- Meal Voucher Deduction (10%): R$ 66,00"));
        assert!(text.contains("- Transport Voucher Deduction (6%): R$ 120,00"));
        assert!(text.contains("- No Health Plan deduction."));
        assert!(text.contains("- No Dental Plan deduction."));
        assert!(text.contains("- Total Deductions: R$ 1.197,88"));
        assert!(text.contains("- Total Earnings: R$ 2.607,20"));
        assert!(text.contains("- Total Unhealthiness: R$ 607,20"));
        assert!(text.contains("- Net Salary: R$ 1.409,32"));
        assert_eq!(text.matches(SEPARATOR).count(), 4);
    }

    #[test]
    fn test_en_us_formatting() {
        let (input, result) = sample();
        let text = render_text(&result, &input, Locale::EnUs);

        assert!(text.contains("- Net Salary: R$ 1,409.32"));
        assert!(text.contains("(8.13%)"));
    }

    #[test]
    fn test_meal_voucher_value_shown_without_voucher() {
        let (input, mut result) = sample();
        result.benefit_lines.remove(0);
        let text = render_text(&result, &input, Locale::PtBr);

        assert!(text.contains("- Meal Voucher Value (0 days): R$ 0,00"));
        assert!(text.contains("- No Meal Voucher deduction."));
    }

    #[test]
    fn test_meal_voucher_value_without_day_count() {
        let (input, mut result) = sample();
        result.benefit_lines[0].days = None;
        let text = render_text(&result, &input, Locale::PtBr);

        assert!(text.contains("- Meal Voucher Value: R$ 660,00"));
    }

    #[test]
    fn test_each_charged_line_rendered_with_its_share() {
        let (input, mut result) = sample();
        result.benefit_lines.push(BenefitDeduction {
            kind: BenefitKind::Health,
            amount: dec("500.00"),
            share_percent: dec("20"),
            deduction: dec("100.00"),
            days: None,
        });
        result.benefit_lines.push(BenefitDeduction {
            kind: BenefitKind::Health,
            amount: dec("300.00"),
            share_percent: dec("10"),
            deduction: dec("30.00"),
            days: None,
        });
        let text = render_text(&result, &input, Locale::PtBr);

        assert!(text.contains("- Health Plan Deduction (20%): R$ 100,00"));
        assert!(text.contains("- Health Plan Deduction (10%): R$ 30,00"));
        assert!(!text.contains("R$ 130,00"));
        assert!(!text.contains("- No Health Plan deduction."));
    }

    #[test]
    fn test_warnings_appended() {
        let (input, mut result) = sample();
        result.audit_trace.warnings.push(AuditWarning {
            code: "NEGATIVE_NET_SALARY".to_string(),
            message: "Deductions exceed gross earnings".to_string(),
            severity: "high".to_string(),
        });
        let text = render_text(&result, &input, Locale::PtBr);

        assert!(text.ends_with("! Deductions exceed gross earnings"));
    }
}
