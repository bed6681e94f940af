//! Ordinary least squares with intercept.
//!
//! We solve small regression problems of the form:
//!
//! ```text
//! minimize Σ (y_i - β0 - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - The intercept is handled by prepending a column of ones to the design.
//! - We solve with SVD so tall (more rows than columns) systems are handled
//!   directly. (Nalgebra's `QR::solve` is intended for square systems.)
//! - Rank deficiency is detected from the singular values and reported as an
//!   error instead of returning an arbitrary minimum-norm solution.

use nalgebra::{DMatrix, DVector};

use crate::domain::RegressionFit;
use crate::error::NumericError;

/// Smallest accepted ratio between the smallest and largest singular value.
const RANK_TOL: f64 = 1e-10;

/// Solve a least squares problem using SVD.
///
/// Returns `SingularMatrix` if the design is rank deficient.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, NumericError> {
    if x.nrows() != y.len() {
        return Err(NumericError::DimensionMismatch {
            rows: x.nrows(),
            targets: y.len(),
        });
    }

    let svd = x.clone().svd(true, true);
    let sv_max = svd.singular_values.max();
    let sv_min = svd.singular_values.min();
    if !(sv_max > 0.0 && sv_min / sv_max >= RANK_TOL) {
        return Err(NumericError::singular(format!(
            "design matrix is rank deficient (singular values {sv_min:.3e}..{sv_max:.3e})"
        )));
    }

    let beta = svd
        .solve(y, RANK_TOL * sv_max)
        .map_err(|e| NumericError::singular(format!("SVD solve failed: {e}")))?;
    if !beta.iter().all(|v| v.is_finite()) {
        return Err(NumericError::singular("least squares solution is not finite"));
    }
    Ok(beta)
}

/// Fit `y = β0 + X β` and report the coefficient of determination.
///
/// Requires more observations than parameters and a full-rank design.
pub fn fit_ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<RegressionFit, NumericError> {
    let (rows, cols) = x.shape();
    if rows != y.len() {
        return Err(NumericError::DimensionMismatch { rows, targets: y.len() });
    }
    let n_params = cols + 1;
    if rows <= n_params {
        return Err(NumericError::InsufficientData {
            required: n_params + 1,
            actual: rows,
        });
    }
    if !(x.iter().all(|v| v.is_finite()) && y.iter().all(|v| v.is_finite())) {
        return Err(NumericError::invalid_input("regression inputs must be finite"));
    }

    let design = DMatrix::from_fn(rows, n_params, |i, j| if j == 0 { 1.0 } else { x[(i, j - 1)] });
    let beta = solve_least_squares(&design, y)?;
    let fitted = &design * &beta;

    Ok(RegressionFit {
        intercept: beta[0],
        coefficients: beta.iter().skip(1).copied().collect(),
        r_squared: r_squared(y, &fitted),
        n_obs: rows,
    })
}

/// `R² = 1 - SS_res / SS_tot`.
///
/// A constant target has `SS_tot = 0`; we report 1.0 for an exact fit and 0.0 otherwise.
pub fn r_squared(y: &DVector<f64>, fitted: &DVector<f64>) -> f64 {
    let mean = y.mean();
    let ss_res: f64 = y.iter().zip(fitted.iter()).map(|(a, b)| (a - b).powi(2)).sum();
    let ss_tot: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}
