//! Monthly history rows

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single generated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Month number within the run (1-indexed)
    pub period: u32,

    /// Last calendar day of the month
    pub month_end: NaiveDate,

    pub new_customers: u64,
    pub churn_rate: f64,
    pub churned_customers: u64,

    /// Active customers at end of month
    pub active_customers: u64,

    pub subscription_price: f64,

    /// Monthly recurring revenue, active customers x price
    pub mrr: f64,
}

impl MonthlyRecord {
    /// Calendar month index (1-12)
    pub fn calendar_month(&self) -> u32 {
        self.month_end.month()
    }

    /// Active customers at the start of the month
    pub fn opening_customers(&self) -> u64 {
        self.active_customers + self.churned_customers - self.new_customers
    }
}

/// Last day of the month `offset` months after the month containing `start`
pub fn month_end(start: NaiveDate, offset: u32) -> NaiveDate {
    let first = start.with_day(1).unwrap_or(start);
    first
        .checked_add_months(Months::new(offset + 1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
