//! Payroll input model and benefit lines.
//!
//! A [`PayrollInput`] is built once per calculation request and handed to
//! [`assemble`](crate::calculation::assemble) by reference. Nothing in the
//! engine mutates it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kind of non-wage benefit a [`BenefitLine`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitKind {
    /// Meal voucher (daily value times working days).
    MealVoucher,
    /// Transport voucher.
    Transport,
    /// Health plan.
    Health,
    /// Dental plan.
    Dental,
}

impl BenefitKind {
    /// All benefit kinds, in display order.
    pub const ALL: [BenefitKind; 4] = [
        BenefitKind::MealVoucher,
        BenefitKind::Transport,
        BenefitKind::Health,
        BenefitKind::Dental,
    ];

    /// Returns the snake_case identifier used in configuration and audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            BenefitKind::MealVoucher => "meal_voucher",
            BenefitKind::Transport => "transport",
            BenefitKind::Health => "health",
            BenefitKind::Dental => "dental",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            BenefitKind::MealVoucher => "Meal Voucher",
            BenefitKind::Transport => "Transport Voucher",
            BenefitKind::Health => "Health Plan",
            BenefitKind::Dental => "Dental Plan",
        }
    }
}

/// A single benefit election.
///
/// When `employee_shared` is false the line is informational: it counts
/// towards the benefit total but nothing is deducted from the salary.
///
/// # Example
///
/// ```
/// use salary_engine::models::{BenefitKind, BenefitLine};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = BenefitLine::meal_voucher(
///     Decimal::from_str("35.00").unwrap(),
///     22,
///     Some(Decimal::from(20)),
/// )
/// .unwrap();
/// assert_eq!(line.kind, BenefitKind::MealVoucher);
/// assert_eq!(line.amount, Decimal::from_str("770.00").unwrap());
/// assert_eq!(line.days, Some(22));
/// assert!(line.employee_shared);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitLine {
    /// What the benefit is.
    pub kind: BenefitKind,
    /// The value the employee share is applied to.
    pub amount: Decimal,
    /// Whether part of the amount is charged back to the employee.
    #[serde(default)]
    pub employee_shared: bool,
    /// Percent of `amount` charged back. Falls back to the configured default
    /// for the kind, then to 100.
    #[serde(default)]
    pub employee_share_percent: Option<Decimal>,
    /// Days of use, for benefits priced per day.
    #[serde(default)]
    pub days: Option<u32>,
}

impl BenefitLine {
    /// Creates an informational line with no charge-back.
    pub fn informational(kind: BenefitKind, amount: Decimal) -> Self {
        Self {
            kind,
            amount,
            employee_shared: false,
            employee_share_percent: None,
            days: None,
        }
    }

    /// Creates a shared line. `None` means "use the configured default".
    pub fn shared(kind: BenefitKind, amount: Decimal, share_percent: Option<Decimal>) -> Self {
        Self {
            kind,
            amount,
            employee_shared: true,
            employee_share_percent: share_percent,
            days: None,
        }
    }

    /// Creates a meal voucher line worth `daily_value × days`.
    ///
    /// The line is shared when `share_percent` is given and keeps the day
    /// count for the breakdown. Returns `InvalidInput` on
    /// `meal_voucher_daily` when the product does not fit in a `Decimal`.
    pub fn meal_voucher(
        daily_value: Decimal,
        days: u32,
        share_percent: Option<Decimal>,
    ) -> EngineResult<Self> {
        let amount = daily_value
            .checked_mul(Decimal::from(days))
            .ok_or_else(|| EngineError::invalid_input("meal_voucher_daily", "amount too large"))?;
        let line = match share_percent {
            Some(percent) => Self::shared(BenefitKind::MealVoucher, amount, Some(percent)),
            None => Self::informational(BenefitKind::MealVoucher, amount),
        };
        Ok(Self {
            days: Some(days),
            ..line
        })
    }

    /// Creates a line whose charge-back is a percentage of the gross salary.
    ///
    /// Transport, health and dental plans are charged this way.
    pub fn salary_based(kind: BenefitKind, gross_salary: Decimal, share_percent: Decimal) -> Self {
        Self::shared(kind, gross_salary, Some(share_percent))
    }
}

/// Everything needed to simulate one month of pay.
///
/// Percentages are whole percent (`40` is 40%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Base pay before any deduction.
    pub gross_salary: Decimal,
    /// Unhealthiness tier in percent of the reference base, or zero.
    #[serde(default)]
    pub unhealthiness_rate: Decimal,
    /// Percent of the gross salary paid early and withheld from the net.
    #[serde(default)]
    pub advance_percent: Decimal,
    /// Benefit elections.
    #[serde(default)]
    pub benefits: Vec<BenefitLine>,
    /// Year of the payroll month.
    pub reference_year: i32,
    /// Month of the payroll, 1 through 12.
    pub reference_month: u32,
    /// Days worked in the reference month.
    #[serde(default)]
    pub worked_days: u32,
}

impl PayrollInput {
    /// Starts an input with the required fields; everything else is zero or empty.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::models::PayrollInput;
    /// use rust_decimal::Decimal;
    ///
    /// let input = PayrollInput::new(Decimal::from(2000), 2025, 3)
    ///     .with_advance_percent(Decimal::from(40))
    ///     .with_worked_days(31);
    /// assert_eq!(input.advance_percent, Decimal::from(40));
    /// assert!(input.benefits.is_empty());
    /// ```
    pub fn new(gross_salary: Decimal, reference_year: i32, reference_month: u32) -> Self {
        Self {
            gross_salary,
            unhealthiness_rate: Decimal::ZERO,
            advance_percent: Decimal::ZERO,
            benefits: Vec::new(),
            reference_year,
            reference_month,
            worked_days: 0,
        }
    }

    /// Sets the unhealthiness tier.
    pub fn with_unhealthiness_rate(mut self, rate: Decimal) -> Self {
        self.unhealthiness_rate = rate;
        self
    }

    /// Sets the advance percentage.
    pub fn with_advance_percent(mut self, percent: Decimal) -> Self {
        self.advance_percent = percent;
        self
    }

    /// Appends a benefit line.
    pub fn with_benefit(mut self, line: BenefitLine) -> Self {
        self.benefits.push(line);
        self
    }

    /// Sets the number of days worked.
    pub fn with_worked_days(mut self, days: u32) -> Self {
        self.worked_days = days;
        self
    }
}
