//! Per-unit random generators.
//!
//! Every unit gets its own `StdRng`, so a unit can be rerun (or tested) in
//! isolation without depending on how many draws an earlier unit made.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Units that draw random numbers (besides the market data generator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Residuals,
    Regression,
    Portfolio,
    Backtest,
}

impl Unit {
    pub fn name(self) -> &'static str {
        match self {
            Unit::Residuals => "residuals",
            Unit::Regression => "regression",
            Unit::Portfolio => "portfolio",
            Unit::Backtest => "backtest",
        }
    }
}

/// Seed for `unit` derived from a base seed.
pub fn unit_seed(base: u64, unit: Unit) -> u64 {
    let mut hasher = DefaultHasher::new();
    base.hash(&mut hasher);
    unit.name().hash(&mut hasher);
    hasher.finish()
}

/// Generator for `unit`: derived from `base` when given, otherwise from OS entropy.
pub fn unit_rng(base: Option<u64>, unit: Unit) -> StdRng {
    match base {
        Some(base) => StdRng::seed_from_u64(unit_seed(base, unit)),
        None => StdRng::from_entropy(),
    }
}
