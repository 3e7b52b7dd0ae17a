//! Calculation logic for the salary engine.
//!
//! This module contains the payroll rules: the progressive social security
//! contribution, the unhealthiness addition and its installments, benefit
//! charge-backs, the salary advance, calendar checks for the reference month,
//! and [`assemble`], which runs them in order to produce a net salary.
//!
//! Every function here is pure. None of them log or touch the filesystem.

mod advance;
mod benefits;
mod calendar;
mod contribution;
mod money;
mod net_salary;
mod unhealthiness;

pub use advance::{AdvanceResult, compute_advance_deduction};
pub use benefits::{BenefitAggregation, aggregate_benefits};
pub use calendar::{days_in_month, is_leap_year, validate_reference_year, validate_worked_days};
pub use contribution::{BracketSlice, MandatoryDeductionResult, compute_mandatory_deduction};
pub use money::round_money;
pub use net_salary::assemble;
pub use unhealthiness::{UnhealthinessResult, compute_unhealthiness_addition};
