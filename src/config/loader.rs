//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! rule schedule from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::calculation::{days_in_month, validate_reference_year};
use crate::error::{EngineError, EngineResult};

use super::types::{
    BenefitDefaults, ContributionTable, PayrollRules, ScheduleConfig, ScheduleFile,
    ScheduleMetadata,
};

/// Loads and provides access to the payroll rule schedule.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/br_clt/
/// ├── schedule.yaml          # Metadata, unhealthiness tiers, accepted years
/// ├── benefits.yaml          # Default employee share per benefit kind
/// └── contribution/
///     └── 2025-01-01.yaml    # Contribution table effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/br_clt").unwrap();
/// let rules = loader.rules_for(2025, 3).unwrap();
/// println!("Minimum wage: {}", rules.table.minimum_wage);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScheduleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains invalid
    /// YAML, or describes an invalid contribution table.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schedule_path = path.join("schedule.yaml");
        let schedule = Self::load_yaml::<ScheduleFile>(&schedule_path)?;
        Self::validate_schedule(&schedule)?;

        let benefits_path = path.join("benefits.yaml");
        let benefit_defaults = Self::load_yaml::<BenefitDefaults>(&benefits_path)?;
        Self::validate_benefit_defaults(&benefit_defaults)?;

        let tables_dir = path.join("contribution");
        let tables = Self::load_tables(&tables_dir)?;

        let config = ScheduleConfig::new(schedule, benefit_defaults, tables);
        info!(
            schedule = %config.metadata().code,
            version = %config.metadata().version,
            tables = config.tables().len(),
            "Loaded payroll schedule"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();
        debug!(path = %path_str, "Reading configuration file");

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all contribution tables from the tables directory.
    fn load_tables(tables_dir: &Path) -> EngineResult<Vec<ContributionTable>> {
        let tables_dir_str = tables_dir.display().to_string();

        let entries = fs::read_dir(tables_dir).map_err(|_| EngineError::ConfigNotFound {
            path: tables_dir_str.clone(),
        })?;

        let mut tables: Vec<ContributionTable> = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: tables_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<ContributionTable>(&path)?;
                table.validate()?;

                if tables
                    .iter()
                    .any(|t| t.effective_date == table.effective_date)
                {
                    return Err(EngineError::InvalidConfig {
                        message: format!(
                            "more than one contribution table effective on {}",
                            table.effective_date
                        ),
                    });
                }

                debug!(
                    effective_date = %table.effective_date,
                    brackets = table.brackets.len(),
                    "Loaded contribution table"
                );
                tables.push(table);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no contribution tables found)", tables_dir_str),
            });
        }

        Ok(tables)
    }

    fn validate_schedule(schedule: &ScheduleFile) -> EngineResult<()> {
        let share = schedule.unhealthiness.advance_share_percent;
        if share < Decimal::ZERO || share > Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "unhealthiness advance share must be between 0 and 100, got {}",
                    share
                ),
            });
        }

        if let Some(tier) = schedule
            .unhealthiness
            .tiers
            .iter()
            .find(|t| **t <= Decimal::ZERO || **t > Decimal::ONE_HUNDRED)
        {
            return Err(EngineError::InvalidConfig {
                message: format!("unhealthiness tier must be between 0 and 100, got {}", tier),
            });
        }

        let years = schedule.reference_years;
        if years.min > years.max {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "reference year range is empty: {}..={}",
                    years.min, years.max
                ),
            });
        }

        Ok(())
    }

    fn validate_benefit_defaults(defaults: &BenefitDefaults) -> EngineResult<()> {
        for (kind, share) in &defaults.employee_share_percent {
            if *share < Decimal::ZERO || *share > Decimal::ONE_HUNDRED {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "default share for {} must be between 0 and 100, got {}",
                        kind.as_str(),
                        share
                    ),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying schedule configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        self.config.metadata()
    }

    /// Gets the contribution table in force on a given date.
    ///
    /// The method finds the most recent table that is effective on or
    /// before the date.
    pub fn table_for_date(&self, date: NaiveDate) -> Option<&ContributionTable> {
        self.config
            .tables()
            .iter()
            .rev()
            .find(|t| t.effective_date <= date)
    }

    /// Resolves the rules in force for a reference month.
    ///
    /// The table is chosen by the first day of the month. Returns
    /// `InvalidInput` for a month outside 1..=12 or a year outside the
    /// schedule's accepted range, and `TableNotFound` if no table is
    /// effective yet.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use salary_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/br_clt")?;
    /// let rules = loader.rules_for(2025, 6)?;
    /// println!("Brackets: {}", rules.table.brackets.len());
    /// # Ok::<(), salary_engine::error::EngineError>(())
    /// ```
    pub fn rules_for(&self, year: i32, month: u32) -> EngineResult<PayrollRules> {
        let years = self.config.reference_years();
        validate_reference_year(year, years)?;
        days_in_month(year, month)?;

        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(EngineError::TableNotFound { year, month })?;

        let table = self
            .table_for_date(first_day)
            .ok_or(EngineError::TableNotFound { year, month })?;

        Ok(PayrollRules {
            table: table.clone(),
            unhealthiness: self.config.unhealthiness().clone(),
            benefit_defaults: self.config.benefit_defaults().clone(),
            reference_years: years,
        })
    }
}
