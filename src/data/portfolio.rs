//! Synthetic P&L impact table for a small bond book.

use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::domain::{PortfolioPosition, PortfolioSpec};
use crate::error::AppError;

/// One position per sequential bond id; exposure and P&L are drawn independently.
pub fn generate_positions<R: Rng + ?Sized>(
    rng: &mut R,
    spec: &PortfolioSpec,
) -> Result<Vec<PortfolioPosition>, AppError> {
    if !(spec.exposure.is_valid() && spec.pnl_impact.is_valid()) {
        return Err(AppError::new(2, "Invalid exposure or P&L range."));
    }
    let count = u32::try_from(spec.positions)
        .ok()
        .filter(|n| spec.first_bond_id.checked_add(*n).is_some())
        .ok_or_else(|| AppError::new(2, "Too many positions for the bond id range."))?;

    let exposure = Uniform::new(spec.exposure.min, spec.exposure.max);
    let pnl = Uniform::new(spec.pnl_impact.min, spec.pnl_impact.max);
    let exposures: Vec<f64> = (0..count).map(|_| exposure.sample(rng)).collect();
    let pnls: Vec<f64> = (0..count).map(|_| pnl.sample(rng)).collect();

    Ok((spec.first_bond_id..spec.first_bond_id + count)
        .zip(exposures)
        .zip(pnls)
        .map(|((bond_id, exposure_million), pnl_impact_million)| PortfolioPosition {
            bond_id,
            exposure_million,
            pnl_impact_million,
        })
        .collect())
}
