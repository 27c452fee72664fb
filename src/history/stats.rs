//! Summary statistics over a generated history

use serde::{Deserialize, Serialize};

use super::MonthlyRecord;
use crate::error::{ForecastError, ForecastResult};

/// Percent change between consecutive values; the first entry has none
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &v in values {
        out.push(match prev {
            Some(p) if p != 0.0 => Some((v - p) / p * 100.0),
            _ => None,
        });
        prev = Some(v);
    }
    out
}

/// Mean of the defined entries, or 0.0 when none are defined
pub fn mean_defined(values: &[Option<f64>]) -> f64 {
    let defined: Vec<f64> = values.iter().flatten().copied().collect();
    if defined.is_empty() {
        0.0
    } else {
        defined.iter().sum::<f64>() / defined.len() as f64
    }
}

/// Headline statistics for a history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub months: usize,
    pub average_churn_rate: f64,
    /// Mean month-over-month MRR growth in percent
    pub average_revenue_growth_pct: f64,
    /// Mean month-over-month active customer growth in percent
    pub average_customer_growth_pct: f64,
    pub latest_mrr: f64,
    pub latest_active_customers: u64,
}

impl HistorySummary {
    pub fn from_records(records: &[MonthlyRecord]) -> ForecastResult<Self> {
        let last = records.last().ok_or(ForecastError::EmptyHistory)?;

        let mrr: Vec<f64> = records.iter().map(|r| r.mrr).collect();
        let customers: Vec<f64> = records.iter().map(|r| r.active_customers as f64).collect();
        let average_churn_rate =
            records.iter().map(|r| r.churn_rate).sum::<f64>() / records.len() as f64;

        Ok(Self {
            months: records.len(),
            average_churn_rate,
            average_revenue_growth_pct: mean_defined(&pct_change(&mrr)),
            average_customer_growth_pct: mean_defined(&pct_change(&customers)),
            latest_mrr: last.mrr,
            latest_active_customers: last.active_customers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pct_change() {
        let changes = pct_change(&[100.0, 110.0, 99.0]);
        assert_eq!(changes[0], None);
        assert_relative_eq!(changes[1].unwrap(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(changes[2].unwrap(), -10.0, epsilon = 1e-9);
        assert_relative_eq!(mean_defined(&changes), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pct_change_skips_zero_base() {
        let changes = pct_change(&[0.0, 10.0, 20.0]);
        assert_eq!(changes[1], None);
        assert_relative_eq!(changes[2].unwrap(), 100.0);
    }

    #[test]
    fn test_mean_of_nothing_is_zero() {
        assert_eq!(mean_defined(&[None]), 0.0);
    }

    #[test]
    fn test_empty_history_is_error() {
        let err = HistorySummary::from_records(&[]).unwrap_err();
        assert!(matches!(err, ForecastError::EmptyHistory));
    }
}
