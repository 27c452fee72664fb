//! Projection output structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single projected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Months past the last historical month (1-indexed)
    pub month: u32,
    pub month_end: NaiveDate,
    pub new_customers: f64,
    pub churned_customers: f64,
    /// Fractional customers at end of month
    pub customers: f64,
    pub revenue: f64,
}

/// Projected revenue for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSeries {
    pub scenario: String,
    pub starting_customers: f64,
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionSeries {
    pub fn new(scenario: impl Into<String>, starting_customers: f64) -> Self {
        Self {
            scenario: scenario.into(),
            starting_customers,
            points: Vec::new(),
        }
    }

    pub fn add_point(&mut self, point: ProjectionPoint) {
        self.points.push(point);
    }

    /// Revenue values in month order
    pub fn revenues(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.revenue).collect()
    }

    pub fn total_revenue(&self) -> f64 {
        self.points.iter().map(|p| p.revenue).sum()
    }

    pub fn final_customers(&self) -> f64 {
        self.points.last().map(|p| p.customers).unwrap_or(self.starting_customers)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
