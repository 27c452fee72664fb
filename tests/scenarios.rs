//! End-to-end scenario projections from a generated history

use approx::assert_relative_eq;
use saas_forecast::projection::{BASE, CHURN_SHOCK, HIGH_GROWTH, PRICING_INCREASE};
use saas_forecast::{
    fit_and_forecast, Assumptions, DashboardReport, History, Scenario, ScenarioControls,
    ScenarioRunner, ScenarioSet, SeededRng,
};

fn baseline() -> (Assumptions, History) {
    let assumptions = Assumptions::default_baseline();
    let history = History::generate(&assumptions.generator, SeededRng::new(42));
    (assumptions, history)
}

#[test]
fn projections_start_from_last_history_month() {
    let (assumptions, history) = baseline();
    let runner = ScenarioRunner::from_history(&history, assumptions.projection.clone()).unwrap();
    let last = history.last().unwrap();

    assert_eq!(runner.starting_customers(), last.active_customers as f64);

    let series = runner.run(&Scenario::base());
    assert_eq!(series.len(), 12);
    let c0 = last.active_customers as f64;
    let expected_first = (c0 + 120.0 - c0 * 0.05) * 50.0;
    assert_relative_eq!(series.points[0].revenue, expected_first, max_relative = 1e-12);
}

#[test]
fn canonical_ordering_holds_for_both_sets() {
    let (assumptions, history) = baseline();
    let runner = ScenarioRunner::from_history(&history, assumptions.projection.clone()).unwrap();

    for set in [ScenarioSet::Analysis, ScenarioSet::Dashboard] {
        let comparison = runner.compare(&set.scenarios()).unwrap();
        let base = comparison.total(BASE).unwrap();
        assert!(comparison.total(HIGH_GROWTH).unwrap() > base);
        assert!(comparison.total(CHURN_SHOCK).unwrap() < base);
        assert!(comparison.total(PRICING_INCREASE).unwrap() > base);
        assert_eq!(comparison.rows.len(), 4);
    }
}

#[test]
fn dashboard_high_growth_exceeds_analysis_high_growth() {
    let (assumptions, history) = baseline();
    let runner = ScenarioRunner::from_history(&history, assumptions.projection.clone()).unwrap();

    let analysis = runner.compare(&ScenarioSet::Analysis.scenarios()).unwrap();
    let dashboard = runner.compare(&ScenarioSet::Dashboard.scenarios()).unwrap();
    assert!(dashboard.total(HIGH_GROWTH).unwrap() > analysis.total(HIGH_GROWTH).unwrap());
    assert_eq!(dashboard.total(BASE), analysis.total(BASE));
}

#[test]
fn dashboard_controls_drive_custom_scenario() {
    let (assumptions, history) = baseline();
    let controls = ScenarioControls::with_churn_pct(1.5, 1.0, 1.2).unwrap();
    let report = DashboardReport::build(&history, &assumptions, controls).unwrap();

    let custom = report.comparison.row("Custom").unwrap();
    assert!(custom.pct_diff_vs_base > 0.0);
    // The most aggressive settings dominate every canned scenario
    assert_eq!(report.comparison.most_sensitive, "Custom");
    assert_eq!(report.summary.latest_active_customers, history.last_active_customers().unwrap());
}

#[test]
fn forecast_continues_history_calendar() {
    let (_, history) = baseline();
    let output = fit_and_forecast(&history, 12).unwrap();
    assert_eq!(output.forecast.len(), 12);
    assert_eq!(output.forecast[0].time_index, history.len());
    assert!(output.forecast[0].month_end > history.last_month_end().unwrap());
}
