//! Synthetic monthly customer and revenue history

mod record;
mod generator;
mod stats;

pub use record::{MonthlyRecord, month_end};
pub use generator::{
    HistoryGenerator, GeneratorState, MonthDraws, advance_customers, clamp_churn_rate, step,
};
pub use stats::{HistorySummary, pct_change, mean_defined};

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::assumptions::GeneratorAssumptions;
use crate::error::{ForecastError, ForecastResult};
use crate::rng::SeededRng;

/// A fully materialised history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    pub seed: u64,
    pub records: Vec<MonthlyRecord>,
}

impl History {
    /// Run the generator to completion
    pub fn generate(assumptions: &GeneratorAssumptions, rng: SeededRng) -> Self {
        let seed = rng.seed();
        let records: Vec<MonthlyRecord> = HistoryGenerator::new(assumptions.clone(), rng).collect();

        if let Some(last) = records.last() {
            info!(
                "Generated {} months (seed {}): final active={} mrr={:.2}",
                records.len(),
                seed,
                last.active_customers,
                last.mrr
            );
        }

        Self { seed, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> ForecastResult<&MonthlyRecord> {
        self.records.last().ok_or(ForecastError::EmptyHistory)
    }

    /// Active customers at the end of the history, the projection starting point
    pub fn last_active_customers(&self) -> ForecastResult<u64> {
        Ok(self.last()?.active_customers)
    }

    pub fn last_month_end(&self) -> ForecastResult<NaiveDate> {
        Ok(self.last()?.month_end)
    }

    pub fn mrr(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.mrr).collect()
    }

    pub fn summary(&self) -> ForecastResult<HistorySummary> {
        HistorySummary::from_records(&self.records)
    }
}
