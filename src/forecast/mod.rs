//! Trend + seasonality regression on historical MRR
//!
//! Features are a linear time index and one-hot calendar month indicators
//! (January is the reference level). Coefficients come from an OLS fit; the
//! forecast re-encodes future month ends the same way.

mod features;
mod regression;

pub use features::{design_matrix, feature_row, FEATURE_COUNT, MONTH_DUMMIES};
pub use regression::{ols, rmse};

use chrono::{Datelike, NaiveDate};
use log::info;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::ForecastResult;
use crate::history::{month_end, History};

/// Fitted trend + seasonality model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeasonalityModel {
    pub intercept: f64,
    /// MRR change per month
    pub trend: f64,
    /// Offsets for February..December relative to January
    pub month_effects: Vec<f64>,
}

impl TrendSeasonalityModel {
    /// Fit against `(time_index, calendar_month, mrr)` observations
    pub fn fit(observations: &[(usize, u32, f64)]) -> ForecastResult<Self> {
        let x = design_matrix(observations.iter().map(|&(t, m, _)| (t, m)));
        let y = DVector::from_iterator(observations.len(), observations.iter().map(|&(_, _, v)| v));
        let beta = ols(&x, &y)?;

        Ok(Self {
            intercept: beta[0],
            trend: beta[1],
            month_effects: beta.iter().skip(2).copied().collect(),
        })
    }

    pub fn predict(&self, time_index: usize, calendar_month: u32) -> f64 {
        let row = feature_row(time_index, calendar_month);
        let seasonal: f64 = row[1..]
            .iter()
            .zip(&self.month_effects)
            .map(|(indicator, effect)| indicator * effect)
            .sum();
        self.intercept + self.trend * row[0] + seasonal
    }
}

/// A forecast month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub time_index: usize,
    pub month_end: NaiveDate,
    pub predicted_mrr: f64,
}

/// Fit diagnostics plus the extrapolated months
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastOutput {
    pub model: TrendSeasonalityModel,
    /// In-sample fitted MRR in history order
    pub fitted: Vec<f64>,
    pub rmse: f64,
    pub forecast: Vec<ForecastPoint>,
}

/// Fit on a history and extrapolate `periods` months past its end
pub fn fit_and_forecast(history: &History, periods: u32) -> ForecastResult<ForecastOutput> {
    let last_month_end = history.last_month_end()?;

    let observations: Vec<(usize, u32, f64)> = history
        .records
        .iter()
        .enumerate()
        .map(|(t, r)| (t, r.calendar_month(), r.mrr))
        .collect();

    let model = TrendSeasonalityModel::fit(&observations)?;

    let fitted: Vec<f64> = observations.iter().map(|&(t, m, _)| model.predict(t, m)).collect();
    let rmse = rmse(&history.mrr(), &fitted);

    let last_index = history.len() - 1;
    let forecast = (1..=periods)
        .map(|k| {
            let date = month_end(last_month_end, k);
            let time_index = last_index + k as usize;
            ForecastPoint {
                time_index,
                month_end: date,
                predicted_mrr: model.predict(time_index, date.month()),
            }
        })
        .collect();

    info!("Fitted trend {:.2}/month, RMSE {:.2}", model.trend, rmse);

    Ok(ForecastOutput {
        model,
        fitted,
        rmse,
        forecast,
    })
}
