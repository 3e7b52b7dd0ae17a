//! Salary Engine for monthly Brazilian payroll
//!
//! This crate simulates a month of pay: the progressive social security
//! contribution, the unhealthiness addition, benefit charge-backs and the
//! salary advance, assembled into a net salary with an audit trace of every
//! rule applied.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
