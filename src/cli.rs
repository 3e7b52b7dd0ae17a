use std::path::PathBuf;

use chrono::{Datelike, Utc};
use clap::Parser;
use rust_decimal::Decimal;

use salary_engine::error::EngineResult;
use salary_engine::models::{BenefitKind, BenefitLine, PayrollInput};
use salary_engine::render::{Locale, parse_money};

/// Salary Engine - monthly net salary simulator
#[derive(Parser, Debug)]
#[command(name = "salary-engine")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Gross monthly salary (e.g. 3.000,00)
    #[arg(long)]
    pub gross_salary: String,

    /// Percent of the gross salary paid as advance
    #[arg(long, default_value = "")]
    pub advance_percent: String,

    /// Reference year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Reference month, 1-12 (defaults to the current month)
    #[arg(long)]
    pub month: Option<u32>,

    /// Days worked in the reference month
    #[arg(long, default_value_t = 0)]
    pub worked_days: u32,

    /// Unhealthiness tier in percent of the minimum wage (0, 10, 20 or 40)
    #[arg(long, default_value = "")]
    pub unhealthiness: String,

    /// Meal voucher value per day
    #[arg(long)]
    pub meal_voucher_daily: Option<String>,

    /// Days the meal voucher is paid for (defaults to --worked-days)
    #[arg(long)]
    pub meal_voucher_days: Option<u32>,

    /// Percent of the meal voucher charged back
    #[arg(long)]
    pub meal_voucher_share: Option<String>,

    /// Percent of the gross salary charged for the transport voucher
    #[arg(long)]
    pub transport_share: Option<String>,

    /// Percent of the gross salary charged for the health plan
    #[arg(long)]
    pub health_share: Option<String>,

    /// Percent of the gross salary charged for the dental plan
    #[arg(long)]
    pub dental_share: Option<String>,

    /// Path to the rule schedule directory
    #[arg(long, default_value = "./config/br_clt")]
    pub config: PathBuf,

    /// Number format for input and output (pt-br or en-us)
    #[arg(long, default_value = "pt-br")]
    pub locale: Locale,

    /// Print the JSON report instead of text
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the calculation input from the parsed flags.
    pub fn to_input(&self) -> EngineResult<PayrollInput> {
        let locale = self.locale;
        let today = Utc::now().date_naive();
        let year = self.year.unwrap_or_else(|| today.year());
        let month = self.month.unwrap_or_else(|| today.month());

        let gross = parse_money(&self.gross_salary, locale, "gross_salary")?;
        let mut input = PayrollInput::new(gross, year, month)
            .with_advance_percent(parse_money(&self.advance_percent, locale, "advance_percent")?)
            .with_unhealthiness_rate(parse_money(&self.unhealthiness, locale, "unhealthiness_rate")?)
            .with_worked_days(self.worked_days);

        if let Some(daily) = &self.meal_voucher_daily {
            let daily = parse_money(daily, locale, "meal_voucher_daily")?;
            let days = self.meal_voucher_days.unwrap_or(self.worked_days);
            let share = parse_optional(&self.meal_voucher_share, locale, "meal_voucher_share")?;
            input = input.with_benefit(BenefitLine::meal_voucher(daily, days, share)?);
        }

        let salary_based = [
            (BenefitKind::Transport, &self.transport_share, "transport_share"),
            (BenefitKind::Health, &self.health_share, "health_share"),
            (BenefitKind::Dental, &self.dental_share, "dental_share"),
        ];
        for (kind, flag, field) in salary_based {
            if let Some(share) = parse_optional(flag, locale, field)? {
                input = input.with_benefit(BenefitLine::salary_based(kind, gross, share));
            }
        }

        Ok(input)
    }
}

fn parse_optional(
    value: &Option<String>,
    locale: Locale,
    field: &str,
) -> EngineResult<Option<Decimal>> {
    value
        .as_deref()
        .map(|text| parse_money(text, locale, field))
        .transpose()
}
