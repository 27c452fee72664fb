//! Dashboard computations: headline metrics, scenario controls and insight

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::{ForecastError, ForecastResult};
use crate::history::{History, HistorySummary};
use crate::projection::{Scenario, ScenarioSet};
use crate::scenario::{ScenarioComparison, ScenarioRunner};

/// Name of the scenario built from the controls
pub const CUSTOM: &str = "Custom";

/// Inclusive range of a scenario control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ControlRange {
    pub fn check(&self, value: f64) -> ForecastResult<f64> {
        if value.is_finite() && value >= self.min && value <= self.max {
            Ok(value)
        } else {
            Err(ForecastError::ControlOutOfRange {
                control: self.name,
                min: self.min,
                max: self.max,
                value,
            })
        }
    }

    /// `steps` evenly spaced values from min to max inclusive
    pub fn grid(&self, steps: usize) -> Vec<f64> {
        if steps < 2 {
            return vec![self.default];
        }
        let width = (self.max - self.min) / (steps - 1) as f64;
        (0..steps).map(|i| self.min + width * i as f64).collect()
    }
}

pub const GROWTH_CONTROL: ControlRange = ControlRange {
    name: "growth multiplier",
    min: 0.5,
    max: 1.5,
    default: 1.0,
};

pub const CHURN_CONTROL: ControlRange = ControlRange {
    name: "churn rate",
    min: 0.01,
    max: 0.15,
    default: 0.05,
};

pub const PRICE_CONTROL: ControlRange = ControlRange {
    name: "price multiplier",
    min: 0.8,
    max: 1.2,
    default: 1.0,
};

/// Validated scenario controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioControls {
    pub growth_multiplier: f64,
    /// Fraction, not percent
    pub churn_rate: f64,
    pub price_multiplier: f64,
}

impl ScenarioControls {
    pub fn new(growth_multiplier: f64, churn_rate: f64, price_multiplier: f64) -> ForecastResult<Self> {
        Ok(Self {
            growth_multiplier: GROWTH_CONTROL.check(growth_multiplier)?,
            churn_rate: CHURN_CONTROL.check(churn_rate)?,
            price_multiplier: PRICE_CONTROL.check(price_multiplier)?,
        })
    }

    /// Controls from a churn rate given in whole percent (1-15)
    pub fn with_churn_pct(growth_multiplier: f64, churn_pct: f64, price_multiplier: f64) -> ForecastResult<Self> {
        Self::new(growth_multiplier, churn_pct / 100.0, price_multiplier)
    }

    pub fn to_scenario(&self) -> Scenario {
        Scenario::new(CUSTOM, self.growth_multiplier, self.churn_rate, self.price_multiplier)
    }
}

impl Default for ScenarioControls {
    fn default() -> Self {
        Self {
            growth_multiplier: GROWTH_CONTROL.default,
            churn_rate: CHURN_CONTROL.default,
            price_multiplier: PRICE_CONTROL.default,
        }
    }
}

/// Everything the dashboard shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub summary: HistorySummary,
    pub controls: ScenarioControls,
    pub comparison: ScenarioComparison,
}

impl DashboardReport {
    /// Build from a history; the controls' scenario is appended to the dashboard set
    pub fn build(history: &History, assumptions: &Assumptions, controls: ScenarioControls) -> ForecastResult<Self> {
        let summary = history.summary()?;
        let runner = ScenarioRunner::from_history(history, assumptions.projection.clone())?;

        let mut scenarios = ScenarioSet::Dashboard.scenarios();
        scenarios.push(controls.to_scenario());
        let comparison = runner.compare(&scenarios)?;

        Ok(Self {
            summary,
            controls,
            comparison,
        })
    }

    pub fn insight(&self) -> String {
        format!(
            "Revenue is most sensitive to changes in {}.",
            self.comparison.most_sensitive
        )
    }
}
