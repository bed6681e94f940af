//! Empirical quantile function and inverse transform sampling.
//!
//! A reference sample is sorted into quantiles `q_i` and paired with the
//! rank-based CDF `F_i = (i + 1) / n`. New values are produced by drawing
//! `u ~ U[0, 1)` and linearly interpolating `u` in the `(F, q)` table.
//!
//! Outside `[F_0, F_{n-1}]` the table is clamped flat to the end quantiles, so
//! every resampled value lies within `[min(sample), max(sample)]`.

use rand::Rng;
use rand::distributions::Standard;

use crate::error::NumericError;

#[derive(Debug, Clone)]
pub struct EmpiricalDistribution {
    sorted: Vec<f64>,
    cdf: Vec<f64>,
}

impl EmpiricalDistribution {
    pub fn from_sample(mut sample: Vec<f64>) -> Result<Self, NumericError> {
        if sample.is_empty() {
            return Err(NumericError::InsufficientData { required: 1, actual: 0 });
        }
        if !sample.iter().all(|v| v.is_finite()) {
            return Err(NumericError::invalid_input("reference sample must be finite"));
        }

        sample.sort_by(f64::total_cmp);
        let n = sample.len() as f64;
        let cdf = (1..=sample.len()).map(|rank| rank as f64 / n).collect();

        Ok(Self { sorted: sample, cdf })
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Always `false` for a built distribution; `from_sample` rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    pub fn min(&self) -> f64 {
        self.sorted[0]
    }

    pub fn max(&self) -> f64 {
        self.sorted[self.sorted.len() - 1]
    }

    /// Quantile at probability `u` (linear between table rows, flat outside).
    pub fn quantile(&self, u: f64) -> f64 {
        let last = self.cdf.len() - 1;
        if u <= self.cdf[0] {
            return self.sorted[0];
        }
        if u >= self.cdf[last] {
            return self.sorted[last];
        }

        // First index with cdf > u; guaranteed in 1..=last by the checks above.
        let hi = self.cdf.partition_point(|&c| c <= u);
        let lo = hi - 1;
        let w = (u - self.cdf[lo]) / (self.cdf[hi] - self.cdf[lo]);
        self.sorted[lo] + w * (self.sorted[hi] - self.sorted[lo])
    }

    /// Draw `n_samples` values through the empirical quantile function.
    pub fn resample<R: Rng + ?Sized>(&self, rng: &mut R, n_samples: usize) -> Vec<f64> {
        (0..n_samples).map(|_| self.quantile(rng.sample(Standard))).collect()
    }
}
