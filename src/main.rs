//! Salary Engine CLI
//!
//! Usage: salary-engine --gross-salary <AMOUNT> [OPTIONS]
//!
//! Loads the rule schedule, computes the monthly breakdown and prints it as
//! text or, with `--json`, as a report.

mod cli;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use salary_engine::calculation::assemble;
use salary_engine::config::ConfigLoader;
use salary_engine::error::{EngineError, EngineResult};
use salary_engine::models::PayrollReport;
use salary_engine::render::render_text;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Calculation failed");
            eprintln!("Error: {}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Logs go to stderr so stdout carries only the report. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> EngineResult<String> {
    let input = cli.to_input()?;
    debug!(
        year = input.reference_year,
        month = input.reference_month,
        benefits = input.benefits.len(),
        "Parsed input"
    );

    let loader = ConfigLoader::load(&cli.config)?;
    let rules = loader.rules_for(input.reference_year, input.reference_month)?;

    let start_time = Instant::now();
    let result = assemble(&input, &rules)?;
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        net_salary = %result.net_salary,
        table = %rules.table.effective_date,
        duration_us,
        "Calculation completed"
    );

    if cli.json {
        let report = PayrollReport::new(input, result, duration_us);
        serde_json::to_string_pretty(&report).map_err(|e| EngineError::ReportError {
            message: e.to_string(),
        })
    } else {
        Ok(render_text(&result, &input, cli.locale))
    }
}

fn exit_code(err: &EngineError) -> u8 {
    if err.is_invalid_input() { 2 } else { 1 }
}
