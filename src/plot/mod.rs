//! Plot rendering.
//!
//! The computational units only produce series; a [`PlotBackend`] decides how
//! (and whether) to draw them:
//!
//! - [`AsciiPlotter`] writes fixed-size text plots to any `Write` (the terminal by default)
//! - [`SvgPlotter`] writes one SVG file per plot into a directory

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppError;

pub mod ascii;
pub mod histogram;
pub mod svg;

pub use histogram::Histogram;

/// Rendering collaborator for the two plots a run produces.
///
/// `name` is a short file-safe identifier; `title` is the human-readable caption.
pub trait PlotBackend {
    fn histogram(&mut self, name: &str, title: &str, hist: &Histogram) -> Result<(), AppError>;

    fn curve_overlay(
        &mut self,
        name: &str,
        title: &str,
        knots: &[(f64, f64)],
        curve: &[(f64, f64)],
    ) -> Result<(), AppError>;
}

pub struct AsciiPlotter<W: Write> {
    out: W,
    width: usize,
    height: usize,
}

impl<W: Write> AsciiPlotter<W> {
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self { out, width, height }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, title: &str, body: &str) -> Result<(), AppError> {
        writeln!(self.out, "\n{title}\n{body}")
            .map_err(|e| AppError::new(2, format!("Failed to write plot: {e}")))
    }
}

impl<W: Write> PlotBackend for AsciiPlotter<W> {
    fn histogram(&mut self, _name: &str, title: &str, hist: &Histogram) -> Result<(), AppError> {
        let body = ascii::render_histogram(hist, self.width);
        self.emit(title, &body)
    }

    fn curve_overlay(
        &mut self,
        _name: &str,
        title: &str,
        knots: &[(f64, f64)],
        curve: &[(f64, f64)],
    ) -> Result<(), AppError> {
        let body = ascii::render_curve_overlay(knots, curve, self.width, self.height);
        self.emit(title, &body)
    }
}

pub struct SvgPlotter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SvgPlotter {
    pub fn new(dir: &Path) -> Result<Self, AppError> {
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::new(2, format!("Failed to create plot dir '{}': {e}", dir.display())))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: Vec::new(),
        })
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl PlotBackend for SvgPlotter {
    fn histogram(&mut self, name: &str, title: &str, hist: &Histogram) -> Result<(), AppError> {
        let path = self.dir.join(format!("{name}.svg"));
        svg::write_histogram_svg(&path, title, hist)?;
        self.written.push(path);
        Ok(())
    }

    fn curve_overlay(
        &mut self,
        name: &str,
        title: &str,
        knots: &[(f64, f64)],
        curve: &[(f64, f64)],
    ) -> Result<(), AppError> {
        let path = self.dir.join(format!("{name}.svg"));
        svg::write_curve_svg(&path, title, knots, curve)?;
        self.written.push(path);
        Ok(())
    }
}

/// Min/max of the finite values, if they span a non-empty interval.
pub(crate) fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else {
        None
    }
}

pub(crate) fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_plotter_writes_title_and_body() {
        let mut plotter = AsciiPlotter::new(Vec::new(), 20, 6);
        let hist = Histogram::from_values(&[0.0, 0.5, 1.0], 2).unwrap();
        plotter.histogram("residuals", "Inverse Transform Sampling", &hist).unwrap();
        plotter
            .curve_overlay("curve", "Spread Curve", &[(1.0, 5.0), (2.0, 4.0)], &[(1.0, 5.0), (2.0, 4.0)])
            .unwrap();

        let text = String::from_utf8(plotter.into_inner()).unwrap();
        assert!(text.contains("Inverse Transform Sampling\nHistogram: n=3"));
        assert!(text.contains("Spread Curve\nPlot: tenor=[1.000, 2.000]"));
    }

    #[test]
    fn svg_plotter_writes_one_file_per_plot() {
        let dir = std::env::temp_dir().join(format!("crisk-plot-test-{}", std::process::id()));
        let mut plotter = SvgPlotter::new(&dir).unwrap();
        let hist = Histogram::from_values(&[0.0, 0.5, 1.0], 2).unwrap();
        plotter.histogram("residuals", "Residuals", &hist).unwrap();
        plotter
            .curve_overlay("curve", "Curve", &[(1.0, 5.0), (2.0, 4.0)], &[(1.0, 5.0), (2.0, 4.0)])
            .unwrap();

        assert_eq!(plotter.written().len(), 2);
        for path in plotter.written() {
            assert!(path.exists(), "missing {}", path.display());
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn range_ignores_non_finite_and_degenerate() {
        assert_eq!(range([1.0, f64::NAN, 3.0].into_iter()), Some((1.0, 3.0)));
        assert_eq!(range([2.0, 2.0].into_iter()), None);
        assert_eq!(range(std::iter::empty()), None);
    }
}
