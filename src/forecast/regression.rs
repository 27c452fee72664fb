//! Ordinary least squares via nalgebra

use nalgebra::{DMatrix, DVector};

use crate::error::{ForecastError, ForecastResult};

const SVD_EPSILON: f64 = 1e-10;

/// Fit `y ~ X` and return the coefficient vector
pub fn ols(x: &DMatrix<f64>, y: &DVector<f64>) -> ForecastResult<DVector<f64>> {
    if x.nrows() < x.ncols() {
        return Err(ForecastError::InsufficientData {
            required: x.ncols(),
            actual: x.nrows(),
        });
    }
    x.clone()
        .svd(true, true)
        .solve(y, SVD_EPSILON)
        .map_err(ForecastError::Solve)
}

/// Root mean squared error
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return 0.0;
    }
    let sse: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    (sse / n as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line() {
        // y = 3 + 2x
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let y = DVector::from_vec(vec![3.0, 5.0, 7.0, 9.0]);
        let beta = ols(&x, &y).unwrap();
        assert_relative_eq!(beta[0], 3.0, epsilon = 1e-9);
        assert_relative_eq!(beta[1], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_underdetermined_rejected() {
        let x = DMatrix::from_element(2, 3, 1.0);
        let y = DVector::from_vec(vec![1.0, 2.0]);
        assert!(matches!(ols(&x, &y), Err(ForecastError::InsufficientData { required: 3, actual: 2 })));
    }

    #[test]
    fn test_rmse() {
        assert_relative_eq!(rmse(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_relative_eq!(rmse(&[0.0, 0.0], &[3.0, 4.0]), (12.5f64).sqrt());
        assert_eq!(rmse(&[], &[]), 0.0);
    }
}
