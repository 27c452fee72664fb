//! Terminal tables and CSV export

use serde::Serialize;
use std::io::{self, Write};

use crate::dashboard::DashboardReport;
use crate::forecast::ForecastOutput;
use crate::history::{pct_change, History, HistorySummary};
use crate::projection::ProjectionSeries;
use crate::scenario::ScenarioComparison;
use crate::sweep::SweepResult;

/// Whole-dollar amount with thousands separators, e.g. `$1,234,567`
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HistoryCsvRow {
    month: String,
    new_customers: u64,
    churn_rate: f64,
    churned_customers: u64,
    active_customers: u64,
    subscription_price: f64,
    mrr: f64,
    revenue_growth_pct: Option<f64>,
    customer_growth_pct: Option<f64>,
}

pub fn write_history_csv<W: Write>(writer: W, history: &History) -> csv::Result<()> {
    let revenue_growth = pct_change(&history.mrr());
    let customers: Vec<f64> = history.records.iter().map(|r| r.active_customers as f64).collect();
    let customer_growth = pct_change(&customers);

    let mut csv_writer = csv::Writer::from_writer(writer);
    for (i, r) in history.records.iter().enumerate() {
        csv_writer.serialize(HistoryCsvRow {
            month: r.month_end.to_string(),
            new_customers: r.new_customers,
            churn_rate: r.churn_rate,
            churned_customers: r.churned_customers,
            active_customers: r.active_customers,
            subscription_price: r.subscription_price,
            mrr: r.mrr,
            revenue_growth_pct: revenue_growth[i],
            customer_growth_pct: customer_growth[i],
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ProjectionCsvRow<'a> {
    scenario: &'a str,
    month: u32,
    month_end: String,
    customers: f64,
    revenue: f64,
}

pub fn write_projection_csv<W: Write>(writer: W, series: &[ProjectionSeries]) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for s in series {
        for p in &s.points {
            csv_writer.serialize(ProjectionCsvRow {
                scenario: &s.scenario,
                month: p.month,
                month_end: p.month_end.to_string(),
                customers: p.customers,
                revenue: p.revenue,
            })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ForecastCsvRow {
    month: String,
    kind: &'static str,
    actual_mrr: Option<f64>,
    predicted_mrr: f64,
}

pub fn write_forecast_csv<W: Write>(writer: W, history: &History, output: &ForecastOutput) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (r, fitted) in history.records.iter().zip(&output.fitted) {
        csv_writer.serialize(ForecastCsvRow {
            month: r.month_end.to_string(),
            kind: "fitted",
            actual_mrr: Some(r.mrr),
            predicted_mrr: *fitted,
        })?;
    }
    for p in &output.forecast {
        csv_writer.serialize(ForecastCsvRow {
            month: p.month_end.to_string(),
            kind: "forecast",
            actual_mrr: None,
            predicted_mrr: p.predicted_mrr,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_sweep_csv<W: Write>(writer: W, result: &SweepResult) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for p in &result.points {
        csv_writer.serialize(p)?;
    }
    csv_writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

pub fn print_history<W: Write>(out: &mut W, history: &History, head: usize) -> io::Result<()> {
    writeln!(out, "{:>10} {:>8} {:>6} {:>9} {:>8} {:>8} {:>7} {:>12}",
        "Month", "Opening", "New", "ChurnRt", "Churned", "Active", "Price", "MRR")?;
    writeln!(out, "{}", "-".repeat(75))?;
    for r in history.records.iter().take(head) {
        writeln!(out, "{:>10} {:>8} {:>6} {:>9.4} {:>8} {:>8} {:>7.2} {:>12.2}",
            r.month_end, r.opening_customers(), r.new_customers, r.churn_rate, r.churned_customers,
            r.active_customers, r.subscription_price, r.mrr)?;
    }
    if history.len() > head {
        writeln!(out, "... ({} more months)", history.len() - head)?;
    }
    Ok(())
}

pub fn print_history_summary<W: Write>(out: &mut W, summary: &HistorySummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Average Churn Rate: {:.4}", summary.average_churn_rate)?;
    writeln!(out, "Average Monthly Revenue Growth %: {:.2}", summary.average_revenue_growth_pct)?;
    writeln!(out, "Average Monthly Customer Growth %: {:.2}", summary.average_customer_growth_pct)?;
    Ok(())
}

pub fn print_forecast<W: Write>(out: &mut W, output: &ForecastOutput) -> io::Result<()> {
    writeln!(out, "RMSE: {:.2}", output.rmse)?;
    writeln!(out, "Trend: {:.2} per month (intercept {:.2})", output.model.trend, output.model.intercept)?;
    writeln!(out)?;
    writeln!(out, "{:>10} {:>14}", "Month", "Forecast MRR")?;
    writeln!(out, "{}", "-".repeat(25))?;
    for p in &output.forecast {
        writeln!(out, "{:>10} {:>14.2}", p.month_end, p.predicted_mrr)?;
    }
    Ok(())
}

pub fn print_comparison<W: Write>(out: &mut W, comparison: &ScenarioComparison) -> io::Result<()> {
    for row in &comparison.rows {
        writeln!(out, "{} - Total 12M Revenue: {:.2}", row.scenario, row.total_revenue)?;
    }
    writeln!(out)?;
    writeln!(out, "{:<18} {:>18} {:>22}", "Scenario", "Total_12M_Revenue", "%_Difference_vs_Base")?;
    writeln!(out, "{}", "-".repeat(60))?;
    for row in &comparison.rows {
        writeln!(out, "{:<18} {:>18.2} {:>22.4}", row.scenario, row.total_revenue, row.pct_diff_vs_base)?;
    }
    Ok(())
}

pub fn print_sensitivity<W: Write>(out: &mut W, comparison: &ScenarioComparison) -> io::Result<()> {
    writeln!(out, "{:<18} {:>22}", "Scenario", "% Difference vs Base")?;
    writeln!(out, "{}", "-".repeat(41))?;
    for row in comparison.ranked() {
        writeln!(out, "{:<18} {:>22.4}", row.scenario, row.pct_diff_vs_base)?;
    }
    writeln!(out)?;
    writeln!(out, "Revenue Volatility Range (Best vs Worst Case): {}",
        format_currency(comparison.volatility_range))?;
    Ok(())
}

pub fn print_dashboard<W: Write>(out: &mut W, report: &DashboardReport) -> io::Result<()> {
    writeln!(out, "SaaS Revenue Forecast & Scenario Dashboard")?;
    writeln!(out, "==========================================")?;
    writeln!(out)?;
    writeln!(out, "Latest MRR:                {}", format_currency(report.summary.latest_mrr))?;
    writeln!(out, "Active Customers:          {}", report.summary.latest_active_customers)?;
    writeln!(out, "Average Monthly Growth %:  {:.2}%", report.summary.average_revenue_growth_pct)?;
    writeln!(out)?;
    writeln!(out, "Scenario Controls: growth x{:.2}, churn {:.1}%, price x{:.2}",
        report.controls.growth_multiplier,
        report.controls.churn_rate * 100.0,
        report.controls.price_multiplier)?;
    writeln!(out)?;

    writeln!(out, "Scenario Comparison (Next 12 Months)")?;
    print_series_table(out, &report.comparison.series)?;
    writeln!(out)?;

    writeln!(out, "12-Month Revenue Summary")?;
    print_comparison(out, &report.comparison)?;
    writeln!(out)?;

    writeln!(out, "Revenue Sensitivity Analysis")?;
    print_sensitivity(out, &report.comparison)?;
    writeln!(out)?;

    writeln!(out, "Executive Decision Insight")?;
    writeln!(out, "{}", report.insight())?;
    Ok(())
}

/// Month-by-scenario revenue grid
pub fn print_series_table<W: Write>(out: &mut W, series: &[ProjectionSeries]) -> io::Result<()> {
    write!(out, "{:>10}", "Month")?;
    for s in series {
        write!(out, " {:>16}", s.scenario)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(10 + 17 * series.len()))?;

    let months = series.iter().map(|s| s.len()).max().unwrap_or(0);
    for i in 0..months {
        let date = series
            .iter()
            .find_map(|s| s.points.get(i).map(|p| p.month_end.to_string()))
            .unwrap_or_default();
        write!(out, "{:>10}", date)?;
        for s in series {
            match s.points.get(i) {
                Some(p) => write!(out, " {:>16.2}", p.revenue)?,
                None => write!(out, " {:>16}", "")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_sweep<W: Write>(out: &mut W, result: &SweepResult) -> io::Result<()> {
    writeln!(out, "Sensitivity sweep: {} steps per control, {} combinations",
        result.steps, result.points.len())?;
    writeln!(out, "Base 12M revenue: {}", format_currency(result.base_total))?;
    if let Some(best) = result.best() {
        writeln!(out, "Best:  growth x{:.2}, churn {:.1}%, price x{:.2} -> {} ({:+.2}%)",
            best.growth_multiplier, best.churn_rate * 100.0, best.price_multiplier,
            format_currency(best.total_revenue), best.pct_diff_vs_base)?;
    }
    if let Some(worst) = result.worst() {
        writeln!(out, "Worst: growth x{:.2}, churn {:.1}%, price x{:.2} -> {} ({:+.2}%)",
            worst.growth_multiplier, worst.churn_rate * 100.0, worst.price_multiplier,
            format_currency(worst.total_revenue), worst.pct_diff_vs_base)?;
    }
    Ok(())
}
