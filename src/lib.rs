//! SaaS Revenue Forecasting - synthetic history, trend/seasonality forecasts and scenario projections
//!
//! This library provides:
//! - Seeded synthetic monthly customer and MRR history
//! - Trend + seasonality OLS regression with a 12-month forecast
//! - Deterministic what-if scenario projections and comparisons
//! - Dashboard metrics and a parallel sensitivity sweep

pub mod error;
pub mod rng;
pub mod assumptions;
pub mod history;
pub mod projection;
pub mod scenario;
pub mod forecast;
pub mod dashboard;
pub mod sweep;
pub mod report;

// Re-export commonly used types
pub use error::{ForecastError, ForecastResult};
pub use rng::SeededRng;
pub use assumptions::Assumptions;
pub use history::{History, HistoryGenerator, MonthlyRecord};
pub use projection::{ProjectionEngine, ProjectionSeries, Scenario, ScenarioSet};
pub use scenario::{ScenarioComparison, ScenarioRunner};
pub use forecast::{fit_and_forecast, ForecastOutput};
pub use dashboard::{DashboardReport, ScenarioControls};
