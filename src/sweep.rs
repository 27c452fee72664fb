//! Sensitivity sweep across the scenario control ranges
//!
//! Every grid point is an independent projection, so the grid is evaluated
//! with rayon. Results come back in growth-major order regardless of thread
//! scheduling.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dashboard::{CHURN_CONTROL, GROWTH_CONTROL, PRICE_CONTROL};
use crate::error::{ForecastError, ForecastResult};
use crate::projection::Scenario;
use crate::scenario::{pct_difference, ScenarioRunner};

/// Largest grid size per axis (`MAX_SWEEP_STEPS`^3 projections)
pub const MAX_SWEEP_STEPS: usize = 101;

/// One evaluated grid point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepPoint {
    pub growth_multiplier: f64,
    pub churn_rate: f64,
    pub price_multiplier: f64,
    pub total_revenue: f64,
    pub pct_diff_vs_base: f64,
}

/// Full sweep result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    pub steps: usize,
    pub base_total: f64,
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    pub fn best(&self) -> Option<&SweepPoint> {
        self.points.iter().max_by(|a, b| a.total_revenue.total_cmp(&b.total_revenue))
    }

    pub fn worst(&self) -> Option<&SweepPoint> {
        self.points.iter().min_by(|a, b| a.total_revenue.total_cmp(&b.total_revenue))
    }
}

/// Evaluate `steps` values per control axis (`steps`^3 projections)
pub fn run_sweep(runner: &ScenarioRunner, steps: usize) -> ForecastResult<SweepResult> {
    if !(2..=MAX_SWEEP_STEPS).contains(&steps) {
        return Err(ForecastError::InvalidSweepSteps(steps));
    }

    let base_total = runner.total_revenue(&Scenario::base());

    let growth = GROWTH_CONTROL.grid(steps);
    let churn = CHURN_CONTROL.grid(steps);
    let price = PRICE_CONTROL.grid(steps);

    let mut combos = Vec::with_capacity(steps * steps * steps);
    for &g in &growth {
        for &c in &churn {
            for &p in &price {
                combos.push((g, c, p));
            }
        }
    }

    let points: Vec<SweepPoint> = combos
        .par_iter()
        .map(|&(g, c, p)| {
            let total_revenue = runner.total_revenue(&Scenario::new("Sweep", g, c, p));
            SweepPoint {
                growth_multiplier: g,
                churn_rate: c,
                price_multiplier: p,
                total_revenue,
                pct_diff_vs_base: pct_difference(total_revenue, base_total),
            }
        })
        .collect();

    info!("Sweep evaluated {} combinations", points.len());

    Ok(SweepResult {
        steps,
        base_total,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::ProjectionAssumptions;
    use chrono::NaiveDate;

    fn runner() -> ScenarioRunner {
        ScenarioRunner::new(
            ProjectionAssumptions::default(),
            2000.0,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        )
    }

    #[test]
    fn test_sweep_size_and_order() {
        let result = run_sweep(&runner(), 3).unwrap();
        assert_eq!(result.points.len(), 27);
        assert_eq!(result.points[0].growth_multiplier, 0.5);
        assert_eq!(result.points[0].churn_rate, 0.01);
        assert_eq!(result.points[0].price_multiplier, 0.8);
        // Price varies fastest
        assert!(result.points[1].price_multiplier > result.points[0].price_multiplier);
        assert_eq!(result.points[1].churn_rate, 0.01);
    }

    #[test]
    fn test_sweep_extremes() {
        let result = run_sweep(&runner(), 3).unwrap();
        let best = result.best().unwrap();
        let worst = result.worst().unwrap();
        // Best: most growth, least churn, highest price
        assert_eq!(best.growth_multiplier, 1.5);
        assert_eq!(best.churn_rate, 0.01);
        assert_eq!(worst.growth_multiplier, 0.5);
        assert_eq!(worst.price_multiplier, 0.8);
        assert!(best.pct_diff_vs_base > 0.0);
        assert!(worst.pct_diff_vs_base < 0.0);
    }

    #[test]
    fn test_sweep_is_deterministic() {
        let a = run_sweep(&runner(), 4).unwrap();
        let b = run_sweep(&runner(), 4).unwrap();
        let ta: Vec<f64> = a.points.iter().map(|p| p.total_revenue).collect();
        let tb: Vec<f64> = b.points.iter().map(|p| p.total_revenue).collect();
        assert_eq!(ta, tb);
    }

    #[test]
    fn test_too_few_steps() {
        assert!(matches!(run_sweep(&runner(), 1), Err(ForecastError::InvalidSweepSteps(1))));
    }

    #[test]
    fn test_too_many_steps() {
        let steps = MAX_SWEEP_STEPS + 1;
        assert!(matches!(run_sweep(&runner(), steps), Err(ForecastError::InvalidSweepSteps(s)) if s == steps));
        // Would overflow a cubed grid size
        assert!(matches!(
            run_sweep(&runner(), 3_000_000),
            Err(ForecastError::InvalidSweepSteps(3_000_000))
        ));
    }

    #[test]
    fn test_totals_match_full_projection() {
        let runner = runner();
        let result = run_sweep(&runner, 2).unwrap();
        let first = &result.points[0];
        let scenario = Scenario::new("Check", first.growth_multiplier, first.churn_rate, first.price_multiplier);
        approx::assert_relative_eq!(first.total_revenue, runner.run(&scenario).total_revenue(), max_relative = 1e-12);
    }
}
