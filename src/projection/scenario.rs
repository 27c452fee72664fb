//! Named what-if scenarios

use serde::{Deserialize, Serialize};

use crate::assumptions::CHURN_RATE_FLOOR;

pub const BASE: &str = "Base";
pub const HIGH_GROWTH: &str = "High Growth";
pub const CHURN_SHOCK: &str = "Churn Shock";
pub const PRICING_INCREASE: &str = "Pricing Increase";

/// High Growth multiplier in the offline scenario analysis
pub const ANALYSIS_HIGH_GROWTH_MULTIPLIER: f64 = 1.15;

/// High Growth multiplier in the dashboard
pub const DASHBOARD_HIGH_GROWTH_MULTIPLIER: f64 = 1.2;

/// A named set of multipliers applied to the baseline recurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Multiplier on baseline new customers per month
    pub growth_multiplier: f64,
    /// Fraction of active customers lost per month
    pub churn_rate: f64,
    /// Multiplier on the base price
    pub price_multiplier: f64,
}

impl Scenario {
    pub fn new(name: impl Into<String>, growth_multiplier: f64, churn_rate: f64, price_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            growth_multiplier,
            churn_rate,
            price_multiplier,
        }
    }

    pub fn base() -> Self {
        Self::new(BASE, 1.0, 0.05, 1.0)
    }

    pub fn high_growth(growth_multiplier: f64) -> Self {
        Self::new(HIGH_GROWTH, growth_multiplier, 0.05, 1.0)
    }

    pub fn churn_shock() -> Self {
        Self::new(CHURN_SHOCK, 1.0, 0.08, 1.0)
    }

    pub fn pricing_increase() -> Self {
        Self::new(PRICING_INCREASE, 1.0, 0.05, 1.08)
    }

    /// Churn rate actually applied, never below the floor
    pub fn effective_churn_rate(&self) -> f64 {
        self.churn_rate.max(CHURN_RATE_FLOOR)
    }
}

/// The two canonical scenario sets.
///
/// They differ only in the High Growth multiplier (1.15 vs 1.2). Both are kept
/// so the difference stays visible to whoever reads the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScenarioSet {
    /// Offline scenario analysis (High Growth = 1.15)
    #[default]
    Analysis,
    /// Dashboard (High Growth = 1.2)
    Dashboard,
}

impl ScenarioSet {
    pub fn high_growth_multiplier(&self) -> f64 {
        match self {
            ScenarioSet::Analysis => ANALYSIS_HIGH_GROWTH_MULTIPLIER,
            ScenarioSet::Dashboard => DASHBOARD_HIGH_GROWTH_MULTIPLIER,
        }
    }

    /// Base, High Growth, Churn Shock, Pricing Increase
    pub fn scenarios(&self) -> Vec<Scenario> {
        vec![
            Scenario::base(),
            Scenario::high_growth(self.high_growth_multiplier()),
            Scenario::churn_shock(),
            Scenario::pricing_increase(),
        ]
    }
}
