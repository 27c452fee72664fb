//! Scenario projection engine

mod scenario;
mod engine;
mod series;

pub use scenario::{
    Scenario, ScenarioSet, ANALYSIS_HIGH_GROWTH_MULTIPLIER, DASHBOARD_HIGH_GROWTH_MULTIPLIER,
    BASE, HIGH_GROWTH, CHURN_SHOCK, PRICING_INCREASE,
};
pub use engine::{ProjectionEngine, ProjectedMonth, project_step};
pub use series::{ProjectionPoint, ProjectionSeries};
