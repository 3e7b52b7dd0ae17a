//! Rule schedule loading for the salary engine.
//!
//! This module loads the payroll schedule from YAML files: schedule
//! metadata, unhealthiness tiers, benefit defaults and the versioned
//! progressive contribution tables.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/br_clt").unwrap();
//! println!("Loaded schedule: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BenefitDefaults, Bracket, ContributionTable, PayrollRules, ScheduleConfig, ScheduleFile,
    ScheduleMetadata, UnhealthinessRules, YearRange,
};
