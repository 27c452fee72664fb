//! Trend + seasonality feature encoding

use nalgebra::DMatrix;

/// Month indicator columns (calendar month 1 is the dropped reference)
pub const MONTH_DUMMIES: usize = 11;

/// Time index plus month indicators
pub const FEATURE_COUNT: usize = 1 + MONTH_DUMMIES;

/// Feature row for one observation: `[time_index, is_feb, ..., is_dec]`
pub fn feature_row(time_index: usize, calendar_month: u32) -> [f64; FEATURE_COUNT] {
    let mut row = [0.0; FEATURE_COUNT];
    row[0] = time_index as f64;
    if (2..=12).contains(&calendar_month) {
        row[calendar_month as usize - 1] = 1.0;
    }
    row
}

/// Design matrix with a leading intercept column
///
/// `observations` yields `(time_index, calendar_month)` pairs.
pub fn design_matrix<I>(observations: I) -> DMatrix<f64>
where
    I: IntoIterator<Item = (usize, u32)>,
{
    let rows: Vec<[f64; FEATURE_COUNT]> = observations
        .into_iter()
        .map(|(t, m)| feature_row(t, m))
        .collect();

    DMatrix::from_fn(rows.len(), FEATURE_COUNT + 1, |i, j| {
        if j == 0 {
            1.0
        } else {
            rows[i][j - 1]
        }
    })
}
