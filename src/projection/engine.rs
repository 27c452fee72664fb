//! Deterministic forward projection of customers and revenue

use chrono::NaiveDate;
use log::debug;

use super::scenario::Scenario;
use super::series::{ProjectionPoint, ProjectionSeries};
use crate::assumptions::ProjectionAssumptions;
use crate::history::month_end;

/// Result of advancing one projected month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedMonth {
    pub new_customers: f64,
    pub churned_customers: f64,
    pub customers: f64,
    pub revenue: f64,
}

/// Advance fractional customers one month under a scenario
pub fn project_step(assumptions: &ProjectionAssumptions, scenario: &Scenario, customers: f64) -> ProjectedMonth {
    let new_customers = assumptions.baseline_new_customers * scenario.growth_multiplier;
    let churned_customers = customers * scenario.effective_churn_rate();
    let customers = customers + new_customers - churned_customers;
    let revenue = customers * assumptions.base_price * scenario.price_multiplier;

    ProjectedMonth {
        new_customers,
        churned_customers,
        customers,
        revenue,
    }
}

/// Projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    assumptions: ProjectionAssumptions,
}

impl ProjectionEngine {
    pub fn new(assumptions: ProjectionAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &ProjectionAssumptions {
        &self.assumptions
    }

    /// Project a scenario forward from the last historical month.
    ///
    /// `last_month_end` is the month end of the last historical month; the
    /// first projected point lands on the following month end.
    pub fn project(&self, scenario: &Scenario, starting_customers: f64, last_month_end: NaiveDate) -> ProjectionSeries {
        let mut series = ProjectionSeries::new(scenario.name.clone(), starting_customers);

        (1..=self.assumptions.horizon_months).fold(starting_customers, |customers, month| {
            let step = project_step(&self.assumptions, scenario, customers);
            debug!(
                "{} month {}: new={:.2} churn={:.4} customers={:.4} revenue={:.2}",
                scenario.name, month, step.new_customers, step.churned_customers, step.customers, step.revenue
            );
            series.add_point(ProjectionPoint {
                month,
                month_end: month_end(last_month_end, month),
                new_customers: step.new_customers,
                churned_customers: step.churned_customers,
                customers: step.customers,
                revenue: step.revenue,
            });
            step.customers
        });

        series
    }

    /// Revenue values only
    pub fn project_revenue(&self, scenario: &Scenario, starting_customers: f64) -> Vec<f64> {
        (0..self.assumptions.horizon_months)
            .scan(starting_customers, |customers, _| {
                let step = project_step(&self.assumptions, scenario, *customers);
                *customers = step.customers;
                Some(step.revenue)
            })
            .collect()
    }
}
