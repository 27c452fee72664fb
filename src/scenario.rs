//! Scenario runner and comparison
//!
//! Holds the projection starting point taken from a history, then projects
//! any number of scenarios from it and summarises them against Base.

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::assumptions::ProjectionAssumptions;
use crate::error::{ForecastError, ForecastResult};
use crate::history::History;
use crate::projection::{ProjectionEngine, ProjectionSeries, Scenario, BASE};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_history(&history, ProjectionAssumptions::default())?;
/// let comparison = runner.compare(&ScenarioSet::Analysis.scenarios())?;
/// println!("Most sensitive: {}", comparison.most_sensitive);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
    starting_customers: f64,
    last_month_end: NaiveDate,
}

impl ScenarioRunner {
    pub fn new(assumptions: ProjectionAssumptions, starting_customers: f64, last_month_end: NaiveDate) -> Self {
        Self {
            engine: ProjectionEngine::new(assumptions),
            starting_customers,
            last_month_end,
        }
    }

    /// Start projections from the last month of a history
    pub fn from_history(history: &History, assumptions: ProjectionAssumptions) -> ForecastResult<Self> {
        let last = history.last()?;
        Ok(Self::new(assumptions, last.active_customers as f64, last.month_end))
    }

    pub fn starting_customers(&self) -> f64 {
        self.starting_customers
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Project a single scenario
    pub fn run(&self, scenario: &Scenario) -> ProjectionSeries {
        self.engine.project(scenario, self.starting_customers, self.last_month_end)
    }

    /// Total projected revenue of a scenario, without building the series
    pub fn total_revenue(&self, scenario: &Scenario) -> f64 {
        self.engine.project_revenue(scenario, self.starting_customers).iter().sum()
    }

    /// Project several scenarios, preserving order
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> Vec<ProjectionSeries> {
        scenarios.iter().map(|s| self.run(s)).collect()
    }

    /// Project and summarise scenarios against the one named "Base"
    pub fn compare(&self, scenarios: &[Scenario]) -> ForecastResult<ScenarioComparison> {
        let comparison = ScenarioComparison::from_series(self.run_scenarios(scenarios))?;
        info!(
            "Compared {} scenarios: volatility range {:.2}, most sensitive '{}'",
            comparison.rows.len(),
            comparison.volatility_range,
            comparison.most_sensitive
        );
        Ok(comparison)
    }
}

/// Percent difference of `total` against `base`; zero when base is zero
pub fn pct_difference(total: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        (total - base) / base * 100.0
    }
}

/// One row of the scenario summary table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummaryRow {
    pub scenario: String,
    pub total_revenue: f64,
    pub pct_diff_vs_base: f64,
    pub abs_pct_impact: f64,
}

/// Totals and sensitivity across a scenario set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub series: Vec<ProjectionSeries>,
    /// Summary rows in scenario order
    pub rows: Vec<ScenarioSummaryRow>,
    pub base_total: f64,
    /// Best total minus worst total
    pub volatility_range: f64,
    /// Scenario with the largest absolute percent difference vs Base
    pub most_sensitive: String,
}

impl ScenarioComparison {
    pub fn from_series(series: Vec<ProjectionSeries>) -> ForecastResult<Self> {
        let base_total = series
            .iter()
            .find(|s| s.scenario == BASE)
            .map(|s| s.total_revenue())
            .ok_or_else(|| ForecastError::MissingBaseline { name: BASE.to_string() })?;

        let rows: Vec<ScenarioSummaryRow> = series
            .iter()
            .map(|s| {
                let total_revenue = s.total_revenue();
                let pct = pct_difference(total_revenue, base_total);
                ScenarioSummaryRow {
                    scenario: s.scenario.clone(),
                    total_revenue,
                    pct_diff_vs_base: pct,
                    abs_pct_impact: pct.abs(),
                }
            })
            .collect();

        let max_total = rows.iter().map(|r| r.total_revenue).fold(f64::NEG_INFINITY, f64::max);
        let min_total = rows.iter().map(|r| r.total_revenue).fold(f64::INFINITY, f64::min);

        let mut comparison = Self {
            series,
            rows,
            base_total,
            volatility_range: max_total - min_total,
            most_sensitive: String::new(),
        };
        let most_sensitive = comparison
            .ranked()
            .first()
            .map(|r| r.scenario.clone())
            .unwrap_or_default();
        comparison.most_sensitive = most_sensitive;

        Ok(comparison)
    }

    /// Rows sorted by absolute percent impact, largest first; ties keep scenario order
    pub fn ranked(&self) -> Vec<&ScenarioSummaryRow> {
        let mut ranked: Vec<&ScenarioSummaryRow> = self.rows.iter().collect();
        ranked.sort_by(|a, b| b.abs_pct_impact.total_cmp(&a.abs_pct_impact));
        ranked
    }

    pub fn row(&self, scenario: &str) -> Option<&ScenarioSummaryRow> {
        self.rows.iter().find(|r| r.scenario == scenario)
    }

    pub fn total(&self, scenario: &str) -> Option<f64> {
        self.row(scenario).map(|r| r.total_revenue)
    }
}
