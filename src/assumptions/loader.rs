//! CSV-based assumption overrides
//!
//! The file has a `key,value` header and one row per overridden field, e.g.
//!
//! ```text
//! key,value
//! starting_customers,2500
//! subscription_price,79
//! start_month,2021-07-01
//! ```
//!
//! `base_price` and `baseline_new_customers` drive projections only. When
//! absent they follow `subscription_price` and `acquisition_mean`.

use chrono::NaiveDate;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use super::Assumptions;
use crate::error::{ForecastError, ForecastResult};

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct OverrideRow {
    key: String,
    value: String,
}

/// Read override rows from a CSV file
pub fn load_overrides(path: &Path) -> ForecastResult<Vec<(String, String)>> {
    let file = File::open(path)?;
    load_overrides_from_reader(file)
}

/// Read override rows from any reader
pub fn load_overrides_from_reader<R: std::io::Read>(reader: R) -> ForecastResult<Vec<(String, String)>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: OverrideRow = result?;
        rows.push((row.key, row.value));
    }

    Ok(rows)
}

fn parse<T: FromStr>(key: &str, value: &str) -> ForecastResult<T> {
    value.parse().map_err(|_| ForecastError::InvalidAssumption {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Apply a single override to the assumptions
pub fn apply_override(assumptions: &mut Assumptions, key: &str, value: &str) -> ForecastResult<()> {
    let g = &mut assumptions.generator;
    let p = &mut assumptions.projection;

    match key {
        "starting_customers" => g.starting_customers = parse(key, value)?,
        "subscription_price" => g.subscription_price = parse(key, value)?,
        "base_churn_rate" => g.base_churn_rate = parse(key, value)?,
        "churn_noise_std" => g.churn_noise_std = parse(key, value)?,
        "acquisition_mean" => g.acquisition_mean = parse(key, value)?,
        "acquisition_std" => g.acquisition_std = parse(key, value)?,
        "seasonal_amplitude" => g.seasonal_amplitude = parse(key, value)?,
        "months" => g.months = parse(key, value)?,
        "start_month" => {
            g.start_month = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                ForecastError::InvalidAssumption {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            })?
        }
        "horizon_months" => p.horizon_months = parse(key, value)?,
        "baseline_new_customers" => p.baseline_new_customers = parse(key, value)?,
        "base_price" => p.base_price = parse(key, value)?,
        other => {
            return Err(ForecastError::UnknownAssumption {
                key: other.to_string(),
            })
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_from_reader() {
        let data = "key,value\nstarting_customers, 2500\nsubscription_price,79.5\n";
        let rows = load_overrides_from_reader(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        let mut a = Assumptions::default_baseline();
        a.apply_overrides(&rows).unwrap();
        assert_eq!(a.generator.starting_customers, 2500);
        assert_eq!(a.generator.subscription_price, 79.5);
        // Untouched fields keep baseline values
        assert_eq!(a.generator.months, 48);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut a = Assumptions::default_baseline();
        let err = apply_override(&mut a, "discount_rate", "0.1").unwrap_err();
        assert!(matches!(err, ForecastError::UnknownAssumption { .. }));
    }

    #[test]
    fn test_bad_value_rejected() {
        let mut a = Assumptions::default_baseline();
        let err = apply_override(&mut a, "months", "forty").unwrap_err();
        assert!(matches!(err, ForecastError::InvalidAssumption { .. }));

        let err = apply_override(&mut a, "start_month", "2020/01/01").unwrap_err();
        assert!(matches!(err, ForecastError::InvalidAssumption { .. }));
    }

    #[test]
    fn test_from_csv_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "key,value").unwrap();
        writeln!(file, "horizon_months,24").unwrap();
        writeln!(file, "start_month,2021-07-01").unwrap();

        let a = Assumptions::from_csv_path(file.path()).unwrap();
        assert_eq!(a.projection.horizon_months, 24);
        assert_eq!(a.generator.start_month, NaiveDate::from_ymd_opt(2021, 7, 1).unwrap());
    }
}
