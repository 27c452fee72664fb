//! Synthetic history generator
//!
//! Each month is a pure step `(state, draws) -> (state, record)`. The iterator
//! owns the RNG and the running state and threads both through the step, so
//! replaying a seed replays the whole sequence.

use chrono::Datelike;
use log::{debug, warn};

use super::record::{month_end, MonthlyRecord};
use crate::assumptions::{GeneratorAssumptions, CHURN_RATE_FLOOR};
use crate::rng::SeededRng;

/// Random inputs consumed by one month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthDraws {
    /// Raw new-customer draw before seasonality
    pub acquisition: f64,
    /// Raw churn rate before the floor
    pub churn_rate: f64,
}

impl MonthDraws {
    /// Draw acquisition first, then churn
    pub fn sample(assumptions: &GeneratorAssumptions, rng: &mut SeededRng) -> Self {
        let acquisition = rng.normal(assumptions.acquisition_mean, assumptions.acquisition_std);
        let churn_rate = assumptions.base_churn_rate + rng.normal(0.0, assumptions.churn_noise_std);
        Self { acquisition, churn_rate }
    }
}

/// Running generator state between months
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorState {
    /// Months generated so far
    pub period: u32,
    pub active_customers: u64,
}

impl GeneratorState {
    pub fn initial(assumptions: &GeneratorAssumptions) -> Self {
        Self {
            period: 0,
            active_customers: assumptions.starting_customers,
        }
    }
}

/// Apply the churn floor
pub fn clamp_churn_rate(rate: f64) -> f64 {
    rate.max(CHURN_RATE_FLOOR)
}

/// Move the customer count forward one month.
///
/// Returns `(churned, active_after)`. Churned customers never exceed the
/// opening count.
pub fn advance_customers(active: u64, new_customers: u64, churn_rate: f64) -> (u64, u64) {
    let churned = ((active as f64) * churn_rate).round().max(0.0) as u64;
    let churned = churned.min(active);
    (churned, active - churned + new_customers)
}

/// Generate one month from the prior state and this month's draws
pub fn step(
    assumptions: &GeneratorAssumptions,
    state: GeneratorState,
    draws: MonthDraws,
) -> (GeneratorState, MonthlyRecord) {
    let month_end = month_end(assumptions.start_month, state.period);
    let period = state.period + 1;

    let seasonal = assumptions.seasonal_factor(month_end.month());
    let new_customers = (draws.acquisition * seasonal).round().max(0.0) as u64;

    let churn_rate = clamp_churn_rate(draws.churn_rate);
    if churn_rate != draws.churn_rate {
        warn!("Period {}: churn rate {:.5} clamped to {:.2}", period, draws.churn_rate, churn_rate);
    }

    let (churned, active) = advance_customers(state.active_customers, new_customers, churn_rate);
    let mrr = active as f64 * assumptions.subscription_price;

    debug!(
        "Period {} ({}): new={} churn={:.5} churned={} active={} mrr={:.2}",
        period, month_end, new_customers, churn_rate, churned, active, mrr
    );

    let record = MonthlyRecord {
        period,
        month_end,
        new_customers,
        churn_rate,
        churned_customers: churned,
        active_customers: active,
        subscription_price: assumptions.subscription_price,
        mrr,
    };

    (GeneratorState { period, active_customers: active }, record)
}

/// Lazy month-by-month history
///
/// # Example
/// ```ignore
/// let assumptions = GeneratorAssumptions::default();
/// let records: Vec<_> = HistoryGenerator::new(assumptions, SeededRng::new(42)).collect();
/// assert_eq!(records.len(), 48);
/// ```
#[derive(Debug, Clone)]
pub struct HistoryGenerator {
    assumptions: GeneratorAssumptions,
    rng: SeededRng,
    state: GeneratorState,
}

impl HistoryGenerator {
    pub fn new(assumptions: GeneratorAssumptions, rng: SeededRng) -> Self {
        let state = GeneratorState::initial(&assumptions);
        Self { assumptions, rng, state }
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }
}

impl Iterator for HistoryGenerator {
    type Item = MonthlyRecord;

    fn next(&mut self) -> Option<MonthlyRecord> {
        if self.state.period >= self.assumptions.months {
            return None;
        }
        let draws = MonthDraws::sample(&self.assumptions, &mut self.rng);
        let (state, record) = step(&self.assumptions, self.state, draws);
        self.state = state;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.assumptions.months.saturating_sub(self.state.period) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HistoryGenerator {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    #[test]
    fn test_single_step_example() {
        // 1000 customers, 120 new, 5% churn -> 50 churned, 1070 active
        let (churned, active) = advance_customers(1000, 120, 0.05);
        assert_eq!(churned, 50);
        assert_eq!(active, 1070);
        assert_relative_eq!(active as f64 * 50.0, 53_500.0);
    }

    #[test]
    fn test_step_with_neutral_season() {
        // June has a seasonal factor of 1.0
        let assumptions = GeneratorAssumptions {
            start_month: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
            ..Default::default()
        };
        let state = GeneratorState::initial(&assumptions);
        let draws = MonthDraws { acquisition: 120.0, churn_rate: 0.05 };

        let (next, record) = step(&assumptions, state, draws);
        assert_eq!(record.period, 1);
        assert_eq!(record.calendar_month(), 6);
        assert_eq!(record.new_customers, 120);
        assert_eq!(record.churned_customers, 50);
        assert_eq!(record.active_customers, 1070);
        assert_relative_eq!(record.mrr, 53_500.0);
        assert_eq!(next.active_customers, 1070);
        assert_eq!(record.opening_customers(), 1000);
    }

    #[test]
    fn test_churn_floor_applied() {
        let assumptions = GeneratorAssumptions::default();
        let state = GeneratorState::initial(&assumptions);
        let draws = MonthDraws { acquisition: 100.0, churn_rate: -0.02 };

        let (_, record) = step(&assumptions, state, draws);
        assert_eq!(record.churn_rate, CHURN_RATE_FLOOR);
        assert_eq!(record.churned_customers, 10);
    }

    #[test]
    fn test_negative_acquisition_floors_at_zero() {
        let assumptions = GeneratorAssumptions::default();
        let state = GeneratorState::initial(&assumptions);
        let draws = MonthDraws { acquisition: -5.0, churn_rate: 0.05 };

        let (_, record) = step(&assumptions, state, draws);
        assert_eq!(record.new_customers, 0);
        assert_eq!(record.active_customers, 950);
    }

    #[test]
    fn test_churn_never_exceeds_active() {
        let (churned, active) = advance_customers(10, 0, 1.7);
        assert_eq!(churned, 10);
        assert_eq!(active, 0);
    }

    #[test]
    fn test_generator_length_and_recurrence() {
        let assumptions = GeneratorAssumptions::default();
        let generator = HistoryGenerator::new(assumptions.clone(), SeededRng::new(42));
        assert_eq!(generator.len(), 48);

        let records: Vec<_> = generator.collect();
        assert_eq!(records.len(), 48);

        let mut prev = assumptions.starting_customers;
        for r in &records {
            assert_eq!(r.active_customers, prev + r.new_customers - r.churned_customers);
            assert_relative_eq!(r.mrr, r.active_customers as f64 * r.subscription_price);
            assert!(r.churn_rate >= CHURN_RATE_FLOOR);
            prev = r.active_customers;
        }
        assert_eq!(records[0].month_end, NaiveDate::from_ymd_opt(2020, 1, 31).unwrap());
        assert_eq!(records[47].month_end, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_generator_resumes_from_state() {
        let assumptions = GeneratorAssumptions::default();
        let mut generator = HistoryGenerator::new(assumptions, SeededRng::new(5));
        let first: Vec<_> = generator.by_ref().take(10).collect();
        assert_eq!(generator.state().period, 10);
        assert_eq!(generator.state().active_customers, first[9].active_customers);
        assert_eq!(generator.count(), 38);
    }
}
