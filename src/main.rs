//! SaaS Forecast CLI
//!
//! Command-line interface for generating history, fitting the forecast model
//! and comparing revenue scenarios

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use saas_forecast::{
    fit_and_forecast, report, sweep, Assumptions, DashboardReport, History, ScenarioControls,
    ScenarioRunner, ScenarioSet, SeededRng,
};
use saas_forecast::rng::DEFAULT_SEED;

#[derive(Parser)]
#[command(name = "saas-forecast", version, about = "Synthetic SaaS revenue forecasting and scenario analysis")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Seed for the synthetic history
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// CSV file of `key,value` assumption overrides
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Also write the command's data to this CSV file
    #[arg(long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the monthly history and print summary statistics
    Generate {
        /// Rows to print
        #[arg(long, default_value_t = 5)]
        head: usize,
    },
    /// Fit the trend + seasonality model and forecast MRR
    Forecast {
        /// Months to forecast
        #[arg(long, default_value_t = 12)]
        periods: u32,
    },
    /// Project and compare the canonical scenarios
    Scenarios {
        #[arg(long, value_enum, default_value_t = SetArg::Analysis)]
        set: SetArg,
    },
    /// Dashboard metrics with scenario controls
    Dashboard {
        /// New customer growth multiplier (0.5-1.5)
        #[arg(long, default_value_t = 1.0)]
        growth: f64,
        /// Churn rate in percent (1-15)
        #[arg(long, default_value_t = 5.0)]
        churn_pct: f64,
        /// Pricing multiplier (0.8-1.2)
        #[arg(long, default_value_t = 1.0)]
        price: f64,
    },
    /// Sweep every control across its range
    Sweep {
        /// Grid values per control
        #[arg(long, default_value_t = 5)]
        steps: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SetArg {
    /// High Growth at 1.15
    Analysis,
    /// High Growth at 1.2
    Dashboard,
}

impl From<SetArg> for ScenarioSet {
    fn from(arg: SetArg) -> Self {
        match arg {
            SetArg::Analysis => ScenarioSet::Analysis,
            SetArg::Dashboard => ScenarioSet::Dashboard,
        }
    }
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Unable to create {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let global = cli.global;

    let assumptions = match &global.assumptions {
        Some(path) => Assumptions::from_csv_path(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => Assumptions::default_baseline(),
    };

    let history = History::generate(&assumptions.generator, SeededRng::new(global.seed));
    info!("History ready: {} months", history.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Generate { head } => {
            let summary = history.summary()?;
            if global.json {
                print_json(&mut out, &history)?;
            } else {
                report::print_history(&mut out, &history, head)?;
                report::print_history_summary(&mut out, &summary)?;
            }
            if let Some(path) = &global.output {
                report::write_history_csv(create_output(path)?, &history)?;
            }
        }
        Command::Forecast { periods } => {
            let output = fit_and_forecast(&history, periods)?;
            if global.json {
                print_json(&mut out, &output)?;
            } else {
                report::print_forecast(&mut out, &output)?;
            }
            if let Some(path) = &global.output {
                report::write_forecast_csv(create_output(path)?, &history, &output)?;
            }
        }
        Command::Scenarios { set } => {
            let runner = ScenarioRunner::from_history(&history, assumptions.projection.clone())?;
            let comparison = runner.compare(&ScenarioSet::from(set).scenarios())?;
            if global.json {
                print_json(&mut out, &comparison)?;
            } else {
                report::print_series_table(&mut out, &comparison.series)?;
                writeln!(out)?;
                report::print_comparison(&mut out, &comparison)?;
            }
            if let Some(path) = &global.output {
                report::write_projection_csv(create_output(path)?, &comparison.series)?;
            }
        }
        Command::Dashboard { growth, churn_pct, price } => {
            let controls = ScenarioControls::with_churn_pct(growth, churn_pct, price)?;
            let dashboard = DashboardReport::build(&history, &assumptions, controls)?;
            if global.json {
                print_json(&mut out, &dashboard)?;
            } else {
                report::print_dashboard(&mut out, &dashboard)?;
            }
            if let Some(path) = &global.output {
                report::write_projection_csv(create_output(path)?, &dashboard.comparison.series)?;
            }
        }
        Command::Sweep { steps } => {
            let runner = ScenarioRunner::from_history(&history, assumptions.projection.clone())?;
            let result = sweep::run_sweep(&runner, steps)?;
            if global.json {
                print_json(&mut out, &result)?;
            } else {
                report::print_sweep(&mut out, &result)?;
            }
            if let Some(path) = &global.output {
                report::write_sweep_csv(create_output(path)?, &result)?;
            }
        }
    }

    Ok(())
}
