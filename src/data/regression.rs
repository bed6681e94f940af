//! Synthetic 3-factor regression inputs with a known linear relation.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand::distributions::Standard;
use rand_distr::Normal;

use crate::error::AppError;

/// Ground-truth factor loadings of the generated target.
pub const TRUE_COEFFICIENTS: [f64; 3] = [2.0, 0.5, -1.2];

#[derive(Debug, Clone)]
pub struct RegressionDataset {
    /// `n × 3` factor matrix, uniform on `[0, 1)`.
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
}

/// `y = 2 x0 + 0.5 x1 - 1.2 x2 + N(0, noise_sd)`.
///
/// Factors are drawn row by row, then the noise vector.
pub fn generate_regression_dataset<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    noise_sd: f64,
) -> Result<RegressionDataset, AppError> {
    // `Normal::new` accepts a negative standard deviation.
    if !(noise_sd.is_finite() && noise_sd >= 0.0) {
        return Err(AppError::new(
            2,
            format!("Noise standard deviation must be finite and non-negative, got {noise_sd}."),
        ));
    }
    let noise = Normal::new(0.0, noise_sd)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let factors: Vec<f64> = (0..n * TRUE_COEFFICIENTS.len())
        .map(|_| rng.sample(Standard))
        .collect();
    let x = DMatrix::from_row_slice(n, TRUE_COEFFICIENTS.len(), &factors);

    let y = DVector::from_iterator(
        n,
        x.row_iter().map(|row| {
            let signal: f64 = row.iter().zip(TRUE_COEFFICIENTS).map(|(v, b)| v * b).sum();
            signal + rng.sample(noise)
        }),
    );

    Ok(RegressionDataset { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fit_ols;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn dataset_shape_and_factor_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let ds = generate_regression_dataset(&mut rng, 100, 0.1).unwrap();
        assert_eq!(ds.x.shape(), (100, 3));
        assert_eq!(ds.y.len(), 100);
        assert!(ds.x.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn ols_recovers_generating_relation() {
        for seed in [0, 7, 42, 1234] {
            let mut rng = StdRng::seed_from_u64(seed);
            let ds = generate_regression_dataset(&mut rng, 100, 0.1).unwrap();
            let fit = fit_ols(&ds.x, &ds.y).unwrap();

            assert!(
                (0.85..=1.0).contains(&fit.r_squared),
                "seed {seed}: R² = {}",
                fit.r_squared
            );
            for (got, want) in fit.coefficients.iter().zip(TRUE_COEFFICIENTS) {
                assert!((got - want).abs() < 0.15, "seed {seed}: {got} vs {want}");
            }
            assert!(fit.intercept.abs() < 0.15);
        }
    }

    #[test]
    fn negative_noise_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_regression_dataset(&mut rng, 10, -1.0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(generate_regression_dataset(&mut rng, 10, f64::NAN).is_err());
        assert!(generate_regression_dataset(&mut rng, 10, 0.0).is_ok());
    }
}
