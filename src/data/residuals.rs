//! Time series residuals and their inverse transform resampling.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::domain::ResampleOutput;
use crate::error::AppError;
use crate::math::EmpiricalDistribution;

/// Draw `n` standard normal residuals.
pub fn draw_residuals<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.sample(StandardNormal)).collect()
}

/// Build an empirical distribution from `reference_size` normal residuals and
/// resample `n_samples` values from it.
///
/// The reference draw and the uniform draws share `rng`, in that order.
pub fn resample_residuals<R: Rng + ?Sized>(
    rng: &mut R,
    reference_size: usize,
    n_samples: usize,
) -> Result<ResampleOutput, AppError> {
    let dist = EmpiricalDistribution::from_sample(draw_residuals(rng, reference_size))?;
    let samples = dist.resample(rng, n_samples);

    Ok(ResampleOutput {
        reference_size: dist.len(),
        reference_min: dist.min(),
        reference_max: dist.max(),
        samples,
    })
}
