//! Cubic spline interpolation for spread curves.
//!
//! The spline is stored as knot values plus second derivatives `M_i` at each
//! knot. On segment `[x_i, x_{i+1}]` with `h = x_{i+1} - x_i` and `t = x - x_i`:
//!
//! ```text
//! S(x) = y_i + b_i t + (M_i / 2) t^2 + (M_{i+1} - M_i) / (6h) t^3
//! b_i  = (y_{i+1} - y_i) / h - h (2 M_i + M_{i+1}) / 6
//! ```
//!
//! Interior rows of the linear system enforce C2 continuity; the first and
//! last rows come from the boundary condition:
//!
//! - not-a-knot: `S'''` is continuous at `x_1` and `x_{n-2}` (default)
//! - natural: `M_0 = M_{n-1} = 0`
//!
//! With two knots the spline degenerates to a line; with three knots under
//! not-a-knot it is the parabola through all three points.
//!
//! Queries outside `[x_0, x_{n-1}]` reuse the end segment polynomial.

use nalgebra::{DMatrix, DVector};

use crate::domain::BoundaryCondition;
use crate::error::NumericError;

#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot.
    m: Vec<f64>,
    boundary: BoundaryCondition,
}

impl CubicSpline {
    /// Build a spline through `(xs[i], ys[i])`.
    ///
    /// `xs` must be strictly increasing; inputs are never reordered.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, boundary: BoundaryCondition) -> Result<Self, NumericError> {
        if xs.len() < 2 {
            return Err(NumericError::InsufficientData {
                required: 2,
                actual: xs.len(),
            });
        }
        if xs.len() != ys.len() {
            return Err(NumericError::invalid_input(format!(
                "knot x and y must have the same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if !(xs.iter().all(|v| v.is_finite()) && ys.iter().all(|v| v.is_finite())) {
            return Err(NumericError::invalid_input("spline knots must be finite"));
        }
        if let Some(i) = xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(NumericError::invalid_input(format!(
                "knot x values must be strictly increasing (x[{}]={} is followed by x[{}]={})",
                i,
                xs[i],
                i + 1,
                xs[i + 1]
            )));
        }

        let m = second_derivatives(&xs, &ys, boundary)?;
        Ok(Self { xs, ys, m, boundary })
    }

    pub fn boundary(&self) -> BoundaryCondition {
        self.boundary
    }

    /// Knots as `(x, y)` pairs, in input order.
    pub fn knots(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    pub fn min_x(&self) -> f64 {
        self.xs[0]
    }

    pub fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.eval_segment(self.find_segment(x), x, 0)
    }

    /// Derivative of order 1, 2 or 3 at `x`.
    pub fn derivative(&self, x: f64, order: u8) -> Result<f64, NumericError> {
        if !(1..=3).contains(&order) {
            return Err(NumericError::invalid_input(format!(
                "derivative order must be 1, 2 or 3, got {order}"
            )));
        }
        Ok(self.eval_segment(self.find_segment(x), x, order))
    }

    /// Evaluate on `n` evenly spaced points spanning the knot range.
    pub fn evaluate_grid(&self, n: usize) -> (Vec<f64>, Vec<f64>) {
        let xs = linspace(self.min_x(), self.max_x(), n);
        let ys = xs.iter().map(|&x| self.evaluate(x)).collect();
        (xs, ys)
    }

    /// Index of the segment used for `x` (end segments absorb out-of-range queries).
    fn find_segment(&self, x: f64) -> usize {
        let last = self.xs.len() - 2;
        self.xs.partition_point(|&k| k <= x).saturating_sub(1).min(last)
    }

    fn eval_segment(&self, i: usize, x: f64, order: u8) -> f64 {
        let h = self.xs[i + 1] - self.xs[i];
        let t = x - self.xs[i];
        let (m0, m1) = (self.m[i], self.m[i + 1]);

        let a = self.ys[i];
        let b = (self.ys[i + 1] - self.ys[i]) / h - h * (2.0 * m0 + m1) / 6.0;
        let c = m0 / 2.0;
        let d = (m1 - m0) / (6.0 * h);

        match order {
            0 => a + t * (b + t * (c + t * d)),
            1 => b + t * (2.0 * c + 3.0 * d * t),
            2 => 2.0 * c + 6.0 * d * t,
            _ => 6.0 * d,
        }
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

fn second_derivatives(xs: &[f64], ys: &[f64], boundary: BoundaryCondition) -> Result<Vec<f64>, NumericError> {
    let n = xs.len();
    if n == 2 {
        return Ok(vec![0.0; 2]);
    }

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let mut a = DMatrix::<f64>::zeros(n, n);
    let mut rhs = DVector::<f64>::zeros(n);

    for i in 1..n - 1 {
        a[(i, i - 1)] = h[i - 1];
        a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
        a[(i, i + 1)] = h[i];
        rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    match boundary {
        BoundaryCondition::Natural => {
            a[(0, 0)] = 1.0;
            a[(n - 1, n - 1)] = 1.0;
        }
        // Both not-a-knot conditions sit on the single interior knot: use a parabola.
        BoundaryCondition::NotAKnot if n == 3 => {
            a[(0, 0)] = 1.0;
            a[(0, 1)] = -1.0;
            a[(2, 1)] = 1.0;
            a[(2, 2)] = -1.0;
        }
        BoundaryCondition::NotAKnot => {
            a[(0, 0)] = h[1];
            a[(0, 1)] = -(h[0] + h[1]);
            a[(0, 2)] = h[0];
            a[(n - 1, n - 3)] = h[n - 2];
            a[(n - 1, n - 2)] = -(h[n - 3] + h[n - 2]);
            a[(n - 1, n - 1)] = h[n - 3];
        }
    }

    let m = a
        .lu()
        .solve(&rhs)
        .ok_or_else(|| NumericError::singular("spline system could not be solved"))?;
    if !m.iter().all(|v| v.is_finite()) {
        return Err(NumericError::singular("spline second derivatives are not finite"));
    }
    Ok(m.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TENORS: [f64; 5] = [1.0, 3.0, 5.0, 7.0, 10.0];
    const SPREADS: [f64; 5] = [5.2, 4.8, 4.1, 3.5, 3.0];

    fn hy_spline(boundary: BoundaryCondition) -> CubicSpline {
        CubicSpline::new(TENORS.to_vec(), SPREADS.to_vec(), boundary).unwrap()
    }

    #[test]
    fn spline_is_exact_at_knots() {
        for boundary in [BoundaryCondition::NotAKnot, BoundaryCondition::Natural] {
            let spline = hy_spline(boundary);
            for (x, y) in TENORS.iter().zip(SPREADS.iter()) {
                assert_relative_eq!(spline.evaluate(*x), *y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn non_monotonic_tenors_are_rejected() {
        let err = CubicSpline::new(
            vec![1.0, 5.0, 3.0, 7.0, 10.0],
            SPREADS.to_vec(),
            BoundaryCondition::NotAKnot,
        )
        .unwrap_err();
        assert!(matches!(err, NumericError::InvalidInput { .. }));
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn repeated_tenor_is_rejected() {
        let res = CubicSpline::new(vec![1.0, 3.0, 3.0], vec![1.0, 2.0, 3.0], BoundaryCondition::Natural);
        assert!(matches!(res, Err(NumericError::InvalidInput { .. })));
    }

    #[test]
    fn too_few_or_mismatched_knots_are_rejected() {
        assert_eq!(
            CubicSpline::new(vec![1.0], vec![2.0], BoundaryCondition::NotAKnot).unwrap_err(),
            NumericError::InsufficientData { required: 2, actual: 1 }
        );
        assert!(CubicSpline::new(vec![1.0, 2.0], vec![2.0], BoundaryCondition::NotAKnot).is_err());
        assert!(CubicSpline::new(vec![1.0, f64::NAN], vec![2.0, 3.0], BoundaryCondition::NotAKnot).is_err());
    }

    #[test]
    fn spline_is_c2_at_interior_knots() {
        for boundary in [BoundaryCondition::NotAKnot, BoundaryCondition::Natural] {
            let spline = hy_spline(boundary);
            for i in 1..TENORS.len() - 1 {
                let x = TENORS[i];
                for order in 0..=2 {
                    let left = spline.eval_segment(i - 1, x, order);
                    let right = spline.eval_segment(i, x, order);
                    assert_relative_eq!(left, right, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn not_a_knot_has_continuous_third_derivative_at_second_and_penultimate_knots() {
        let spline = hy_spline(BoundaryCondition::NotAKnot);
        for i in [1, TENORS.len() - 2] {
            let left = spline.eval_segment(i - 1, TENORS[i], 3);
            let right = spline.eval_segment(i, TENORS[i], 3);
            assert_relative_eq!(left, right, epsilon = 1e-9);
        }
    }

    #[test]
    fn natural_spline_has_zero_curvature_at_ends() {
        let spline = hy_spline(BoundaryCondition::Natural);
        assert_relative_eq!(spline.derivative(1.0, 2).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(spline.derivative(10.0, 2).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn not_a_knot_reproduces_a_cubic() {
        let f = |x: f64| x * x * x - 2.0 * x + 1.0;
        let xs = vec![0.0, 1.0, 2.5, 3.0, 4.0, 6.0];
        let ys = xs.iter().map(|&x| f(x)).collect();
        let spline = CubicSpline::new(xs, ys, BoundaryCondition::NotAKnot).unwrap();

        for x in [0.3, 1.7, 2.75, 3.5, 5.2] {
            assert_relative_eq!(spline.evaluate(x), f(x), epsilon = 1e-9);
        }
    }

    #[test]
    fn two_knots_give_a_line_and_three_knots_a_parabola() {
        let line = CubicSpline::new(vec![0.0, 2.0], vec![1.0, 5.0], BoundaryCondition::NotAKnot).unwrap();
        assert_relative_eq!(line.evaluate(0.5), 2.0, epsilon = 1e-12);

        let parabola =
            CubicSpline::new(vec![0.0, 1.0, 3.0], vec![0.0, 1.0, 9.0], BoundaryCondition::NotAKnot).unwrap();
        assert_relative_eq!(parabola.evaluate(1.5), 2.25, epsilon = 1e-12);
        assert_relative_eq!(parabola.evaluate(2.5), 6.25, epsilon = 1e-12);
    }

    #[test]
    fn grid_spans_knot_range() {
        let spline = hy_spline(BoundaryCondition::NotAKnot);
        let (xs, ys) = spline.evaluate_grid(20);
        assert_eq!(xs.len(), 20);
        assert_eq!(ys.len(), 20);
        assert_eq!(xs[0], 1.0);
        assert_eq!(xs[19], 10.0);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
        assert_relative_eq!(ys[0], 5.2, epsilon = 1e-9);
        assert_relative_eq!(ys[19], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn derivative_order_is_validated() {
        let spline = hy_spline(BoundaryCondition::NotAKnot);
        assert!(spline.derivative(2.0, 0).is_err());
        assert!(spline.derivative(2.0, 4).is_err());
        assert!(spline.derivative(2.0, 1).unwrap() < 0.0);
    }

    #[test]
    fn linspace_edge_cases() {
        assert!(linspace(1.0, 10.0, 0).is_empty());
        assert_eq!(linspace(1.0, 10.0, 1), vec![1.0]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }
}
