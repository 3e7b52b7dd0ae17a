//! Report envelope for a finished calculation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayrollInput, PayrollResult};

/// A [`PayrollResult`] stamped with identifying metadata.
///
/// The result itself is deterministic; everything that varies between two
/// runs with the same input lives on the envelope.
///
/// # Example
///
/// ```
/// use salary_engine::models::{AuditTrace, PayrollInput, PayrollReport, PayrollResult};
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput::new(Decimal::ZERO, 2025, 1);
/// let result = PayrollResult {
///     gross_salary: Decimal::ZERO,
///     unhealthiness_addition: Decimal::ZERO,
///     unhealthiness_advance: Decimal::ZERO,
///     unhealthiness_final: Decimal::ZERO,
///     gross_earnings: Decimal::ZERO,
///     mandatory_deduction: Decimal::ZERO,
///     effective_contribution_rate: Decimal::ZERO,
///     benefit_gross: Decimal::ZERO,
///     benefit_deductions: Decimal::ZERO,
///     benefit_lines: vec![],
///     advance_deduction: Decimal::ZERO,
///     total_deductions: Decimal::ZERO,
///     net_salary: Decimal::ZERO,
///     audit_trace: AuditTrace::default(),
/// };
///
/// let report = PayrollReport::new(input, result, 42);
/// assert_eq!(report.duration_us, 42);
/// assert_eq!(report.engine_version, env!("CARGO_PKG_VERSION"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// How long the calculation took, in microseconds.
    pub duration_us: u64,
    /// The input the result was computed from.
    pub input: PayrollInput,
    /// The computed breakdown.
    pub result: PayrollResult,
}

impl PayrollReport {
    /// Wraps a result with a fresh id and the current time.
    pub fn new(input: PayrollInput, result: PayrollResult, duration_us: u64) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            duration_us,
            input,
            result,
        }
    }
}
