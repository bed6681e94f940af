//! Mathematical utilities: least squares, cubic splines, empirical quantiles.

pub mod inverse_transform;
pub mod ols;
pub mod spline;

pub use inverse_transform::*;
pub use ols::*;
pub use spline::*;
