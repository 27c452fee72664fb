//! Revenue model assumptions for history generation and scenario projection

pub mod loader;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ForecastResult;

/// Lowest churn rate any step may apply
pub const CHURN_RATE_FLOOR: f64 = 0.01;

/// Assumptions driving the synthetic history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorAssumptions {
    /// Active customers before the first generated month
    pub starting_customers: u64,

    /// Monthly subscription price
    pub subscription_price: f64,

    /// Mean monthly churn rate before noise
    pub base_churn_rate: f64,

    /// Std dev of the churn rate noise
    pub churn_noise_std: f64,

    /// Mean new customers per month before seasonality
    pub acquisition_mean: f64,

    /// Std dev of new customers per month
    pub acquisition_std: f64,

    /// Amplitude of the sinusoidal acquisition seasonality
    pub seasonal_amplitude: f64,

    /// Number of months to generate
    pub months: u32,

    /// First calendar month of the history (any day in the month)
    pub start_month: NaiveDate,
}

impl GeneratorAssumptions {
    /// Acquisition multiplier for a 1-indexed calendar month
    pub fn seasonal_factor(&self, calendar_month: u32) -> f64 {
        1.0 + self.seasonal_amplitude
            * (2.0 * std::f64::consts::PI * calendar_month as f64 / 12.0).sin()
    }
}

impl Default for GeneratorAssumptions {
    fn default() -> Self {
        Self {
            starting_customers: 1000,
            subscription_price: 50.0,
            base_churn_rate: 0.05,
            churn_noise_std: 0.005,
            acquisition_mean: 120.0,
            acquisition_std: 15.0,
            seasonal_amplitude: 0.1,
            months: 48,
            start_month: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
        }
    }
}

/// Assumptions driving forward scenario projections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAssumptions {
    /// Months projected past the last historical month
    pub horizon_months: u32,

    /// New customers per month before the scenario's growth multiplier
    pub baseline_new_customers: f64,

    /// Price before the scenario's price multiplier
    pub base_price: f64,
}

impl Default for ProjectionAssumptions {
    fn default() -> Self {
        Self {
            horizon_months: 12,
            baseline_new_customers: 120.0,
            base_price: 50.0,
        }
    }
}

/// Container for all model assumptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    pub generator: GeneratorAssumptions,
    pub projection: ProjectionAssumptions,
}

impl Assumptions {
    /// Baseline assumptions used by every command out of the box
    pub fn default_baseline() -> Self {
        Self::default()
    }

    /// Load the baseline and apply overrides from a `key,value` CSV file
    pub fn from_csv_path(path: &Path) -> ForecastResult<Self> {
        let mut assumptions = Self::default_baseline();
        let overrides = loader::load_overrides(path)?;
        assumptions.apply_overrides(&overrides)?;
        Ok(assumptions)
    }

    /// Apply `(key, value)` overrides in order.
    ///
    /// Projections continue the generated history, so overriding
    /// `subscription_price` or `acquisition_mean` also moves `base_price` or
    /// `baseline_new_customers` unless the file sets those keys itself.
    pub fn apply_overrides(&mut self, overrides: &[(String, String)]) -> ForecastResult<()> {
        for (key, value) in overrides {
            loader::apply_override(self, key, value)?;
        }

        let has = |name: &str| overrides.iter().any(|(key, _)| key == name);
        if has("subscription_price") && !has("base_price") {
            self.projection.base_price = self.generator.subscription_price;
        }
        if has("acquisition_mean") && !has("baseline_new_customers") {
            self.projection.baseline_new_customers = self.generator.acquisition_mean;
        }
        Ok(())
    }
}
