//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and the structures that
//! make up its breakdown: per-benefit deductions and the audit trace that
//! records every rule applied during a calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BenefitKind;

/// The deduction produced by a single benefit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitDeduction {
    /// The benefit kind.
    pub kind: BenefitKind,
    /// The benefit amount the share was applied to.
    pub amount: Decimal,
    /// The percent charged back, or zero for informational lines.
    pub share_percent: Decimal,
    /// The amount deducted from the salary.
    pub deduction: Decimal,
    /// Days of use, carried from the benefit line.
    #[serde(default)]
    pub days: Option<u32>,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that are valid but likely to surprise the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete, immutable breakdown of one payroll simulation.
///
/// All money fields are rounded to cents, and
/// `net_salary == gross_earnings - mandatory_deduction - benefit_deductions - advance_deduction`
/// holds exactly. The net salary is never clamped and may be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Base pay before any deduction.
    pub gross_salary: Decimal,
    /// Unhealthiness addition over the reference base.
    pub unhealthiness_addition: Decimal,
    /// Portion of the addition paid with the salary advance.
    pub unhealthiness_advance: Decimal,
    /// Portion of the addition paid at month end.
    pub unhealthiness_final: Decimal,
    /// Gross salary plus unhealthiness addition.
    pub gross_earnings: Decimal,
    /// Progressive social security contribution on gross earnings.
    pub mandatory_deduction: Decimal,
    /// Mandatory deduction as a percent of gross earnings.
    pub effective_contribution_rate: Decimal,
    /// Informational total of every benefit line.
    pub benefit_gross: Decimal,
    /// Total charged back to the employee for benefits.
    pub benefit_deductions: Decimal,
    /// Per-line benefit breakdown, in input order.
    pub benefit_lines: Vec<BenefitDeduction>,
    /// Salary advance withheld from the net.
    pub advance_deduction: Decimal,
    /// Mandatory plus benefit plus advance deductions.
    pub total_deductions: Decimal,
    /// What is left after every deduction.
    pub net_salary: Decimal,
    /// Record of every rule applied.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Returns true if deductions exceed earnings.
    pub fn is_net_negative(&self) -> bool {
        self.net_salary < Decimal::ZERO
    }

    /// Returns the deduction for a benefit kind, summed across lines of that kind.
    pub fn benefit_deduction_for(&self, kind: BenefitKind) -> Decimal {
        self.benefit_lines
            .iter()
            .filter(|line| line.kind == kind)
            .map(|line| line.deduction)
            .sum()
    }
}
