//! Configuration types for the payroll rule schedule.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus [`PayrollRules`],
//! the resolved view the calculation core works from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::BenefitKind;

/// Metadata about the schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleMetadata {
    /// A short code identifying the schedule (e.g., "BR-CLT").
    pub code: String,
    /// The human-readable name of the schedule.
    pub name: String,
    /// The version of the schedule files.
    pub version: String,
    /// URL to the official rules the tables were taken from.
    pub source_url: String,
}

/// Inclusive range of accepted reference years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct YearRange {
    /// Earliest accepted year.
    pub min: i32,
    /// Latest accepted year.
    pub max: i32,
}

impl YearRange {
    /// Returns true if `year` is inside the range.
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 1900,
            max: 2100,
        }
    }
}

/// Unhealthiness addition rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnhealthinessRules {
    /// Accepted tiers in percent of the reference base. Zero is always accepted.
    pub tiers: Vec<Decimal>,
    /// Percent of the addition paid together with the salary advance.
    pub advance_share_percent: Decimal,
}

impl UnhealthinessRules {
    /// Returns true if `rate` is zero or one of the configured tiers.
    pub fn accepts(&self, rate: Decimal) -> bool {
        rate.is_zero() || self.tiers.contains(&rate)
    }
}

impl Default for UnhealthinessRules {
    fn default() -> Self {
        Self {
            tiers: vec![Decimal::from(10), Decimal::from(20), Decimal::from(40)],
            advance_share_percent: Decimal::from(40),
        }
    }
}

/// schedule.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleFile {
    /// Schedule metadata.
    pub schedule: ScheduleMetadata,
    /// Unhealthiness rules.
    pub unhealthiness: UnhealthinessRules,
    /// Accepted reference years.
    #[serde(default)]
    pub reference_years: YearRange,
}

/// Default employee share per benefit kind, from benefits.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BenefitDefaults {
    /// Map of benefit kind to the percent charged back when a shared line has no share of its own.
    #[serde(default)]
    pub employee_share_percent: HashMap<BenefitKind, Decimal>,
}

impl BenefitDefaults {
    /// Returns the configured default share for `kind`, if any.
    pub fn share_for(&self, kind: BenefitKind) -> Option<Decimal> {
        self.employee_share_percent.get(&kind).copied()
    }
}

/// One slice of the progressive contribution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Bracket {
    /// Upper bound of the slice, inclusive.
    pub upper_bound: Decimal,
    /// Marginal rate as a fraction (0.075 is 7.5%).
    pub rate: Decimal,
}

/// A progressive contribution table effective from a given date.
///
/// # Example
///
/// ```
/// use salary_engine::config::{Bracket, ContributionTable};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = ContributionTable::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     Decimal::from_str("1518.00").unwrap(),
///     vec![
///         Bracket { upper_bound: Decimal::from_str("1518.00").unwrap(), rate: Decimal::from_str("0.075").unwrap() },
///         Bracket { upper_bound: Decimal::from_str("2793.88").unwrap(), rate: Decimal::from_str("0.09").unwrap() },
///     ],
/// )
/// .unwrap();
/// assert_eq!(table.highest_rate(), Decimal::from_str("0.09").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContributionTable {
    /// The date from which the table applies.
    pub effective_date: NaiveDate,
    /// The minimum wage, used as the unhealthiness reference base.
    pub minimum_wage: Decimal,
    /// When true, income above the last bracket is not contributed on.
    #[serde(default)]
    pub ceiling: bool,
    /// Brackets in ascending order of upper bound.
    pub brackets: Vec<Bracket>,
}

impl ContributionTable {
    /// Creates a validated table without a ceiling.
    pub fn new(
        effective_date: NaiveDate,
        minimum_wage: Decimal,
        brackets: Vec<Bracket>,
    ) -> EngineResult<Self> {
        let table = Self {
            effective_date,
            minimum_wage,
            ceiling: false,
            brackets,
        };
        table.validate()?;
        Ok(table)
    }

    /// Returns a copy that stops contributing at the last bracket.
    pub fn with_ceiling(mut self, ceiling: bool) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Checks the structural rules every table must satisfy.
    ///
    /// At least one bracket, strictly increasing positive upper bounds,
    /// rates between 0 and 1, and a non-negative minimum wage.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidConfig {
            message: format!("contribution table {}: {}", self.effective_date, message),
        };

        if self.brackets.is_empty() {
            return Err(invalid("at least one bracket is required".to_string()));
        }

        if self.minimum_wage < Decimal::ZERO {
            return Err(invalid(format!(
                "minimum wage must not be negative, got {}",
                self.minimum_wage
            )));
        }

        let mut previous = Decimal::ZERO;
        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.upper_bound <= previous {
                return Err(invalid(format!(
                    "bracket {} upper bound {} must be greater than {}",
                    index, bracket.upper_bound, previous
                )));
            }
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} rate {} must be between 0 and 1",
                    index, bracket.rate
                )));
            }
            previous = bracket.upper_bound;
        }

        Ok(())
    }

    /// The marginal rate of the last bracket.
    pub fn highest_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// The upper bound of the last bracket.
    pub fn top_bound(&self) -> Decimal {
        self.brackets
            .last()
            .map(|b| b.upper_bound)
            .unwrap_or(Decimal::ZERO)
    }
}

/// The complete schedule loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Schedule metadata.
    metadata: ScheduleMetadata,
    /// Unhealthiness rules.
    unhealthiness: UnhealthinessRules,
    /// Benefit defaults.
    benefit_defaults: BenefitDefaults,
    /// Accepted reference years.
    reference_years: YearRange,
    /// Contribution tables by effective date (sorted oldest first).
    tables: Vec<ContributionTable>,
}

impl ScheduleConfig {
    /// Creates a new ScheduleConfig from its component parts.
    pub fn new(
        file: ScheduleFile,
        benefit_defaults: BenefitDefaults,
        tables: Vec<ContributionTable>,
    ) -> Self {
        let mut sorted_tables = tables;
        sorted_tables.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata: file.schedule,
            unhealthiness: file.unhealthiness,
            benefit_defaults,
            reference_years: file.reference_years,
            tables: sorted_tables,
        }
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the unhealthiness rules.
    pub fn unhealthiness(&self) -> &UnhealthinessRules {
        &self.unhealthiness
    }

    /// Returns the benefit defaults.
    pub fn benefit_defaults(&self) -> &BenefitDefaults {
        &self.benefit_defaults
    }

    /// Returns the accepted reference years.
    pub fn reference_years(&self) -> YearRange {
        self.reference_years
    }

    /// Returns all contribution tables, oldest first.
    pub fn tables(&self) -> &[ContributionTable] {
        &self.tables
    }
}

/// The rules in force for one reference month.
///
/// This is what [`assemble`](crate::calculation::assemble) consumes: a single
/// contribution table plus the schedule-wide rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollRules {
    /// The contribution table effective for the month.
    pub table: ContributionTable,
    /// Unhealthiness rules.
    pub unhealthiness: UnhealthinessRules,
    /// Benefit defaults.
    pub benefit_defaults: BenefitDefaults,
    /// Accepted reference years.
    pub reference_years: YearRange,
}

impl PayrollRules {
    /// Builds rules around a table, using the default tiers, years and no benefit defaults.
    pub fn with_table(table: ContributionTable) -> Self {
        Self {
            table,
            unhealthiness: UnhealthinessRules::default(),
            benefit_defaults: BenefitDefaults::default(),
            reference_years: YearRange::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn bracket(upper: &str, rate: &str) -> Bracket {
        Bracket {
            upper_bound: dec(upper),
            rate: dec(rate),
        }
    }

    #[test]
    fn test_table_rejects_empty_brackets() {
        let result = ContributionTable::new(date(), dec("1518.00"), vec![]);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_table_rejects_non_increasing_bounds() {
        let result = ContributionTable::new(
            date(),
            dec("1518.00"),
            vec![bracket("2000", "0.075"), bracket("2000", "0.09")],
        );

        match result {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("bracket 1"));
                assert!(message.contains("2025-01-01"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_table_rejects_rate_above_one() {
        let result = ContributionTable::new(date(), dec("1518.00"), vec![bracket("1000", "7.5")]);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_table_rejects_negative_minimum_wage() {
        let result = ContributionTable::new(date(), dec("-1"), vec![bracket("1000", "0.075")]);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_table_accessors() {
        let table = ContributionTable::new(
            date(),
            dec("1518.00"),
            vec![bracket("1518.00", "0.075"), bracket("8157.41", "0.14")],
        )
        .unwrap();

        assert_eq!(table.highest_rate(), dec("0.14"));
        assert_eq!(table.top_bound(), dec("8157.41"));
        assert!(!table.ceiling);
        assert!(table.with_ceiling(true).ceiling);
    }

    #[test]
    fn test_unhealthiness_rules_accept_zero_and_tiers() {
        let rules = UnhealthinessRules::default();

        assert!(rules.accepts(Decimal::ZERO));
        assert!(rules.accepts(dec("10")));
        assert!(rules.accepts(dec("20.0")));
        assert!(rules.accepts(dec("40")));
        assert!(!rules.accepts(dec("15")));
    }

    #[test]
    fn test_year_range_contains_is_inclusive() {
        let years = YearRange::default();

        assert!(years.contains(1900));
        assert!(years.contains(2100));
        assert!(!years.contains(1899));
        assert!(!years.contains(2101));
    }

    #[test]
    fn test_deserialize_table_from_yaml() {
        let yaml = r#"
effective_date: 2025-01-01
minimum_wage: "1518.00"
ceiling: true
brackets:
  - upper_bound: "1518.00"
    rate: "0.075"
  - upper_bound: "2793.88"
    rate: "0.09"
"#;
        let table: ContributionTable = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(table.effective_date, date());
        assert!(table.ceiling);
        assert_eq!(table.brackets.len(), 2);
        assert_eq!(table.brackets[1].upper_bound, dec("2793.88"));
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_deserialize_benefit_defaults_from_yaml() {
        let yaml = r#"
employee_share_percent:
  transport: "6"
  meal_voucher: "20"
"#;
        let defaults: BenefitDefaults = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(defaults.share_for(BenefitKind::Transport), Some(dec("6")));
        assert_eq!(defaults.share_for(BenefitKind::MealVoucher), Some(dec("20")));
        assert_eq!(defaults.share_for(BenefitKind::Dental), None);
    }
}
