//! Core data models for the salary engine.
//!
//! This module contains all the domain models used throughout the engine.

mod payroll_input;
mod payroll_result;
mod report;

pub use payroll_input::{BenefitKind, BenefitLine, PayrollInput};
pub use payroll_result::{AuditStep, AuditTrace, AuditWarning, BenefitDeduction, PayrollResult};
pub use report::PayrollReport;
