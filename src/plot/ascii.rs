//! Fixed-size text plots for the terminal.
//!
//! Output is fully deterministic, which keeps the golden tests below stable.
//!
//! Glyphs: `o` curve knot, `-` interpolated curve, `#` histogram bar.

use crate::plot::histogram::Histogram;
use crate::plot::{pad_range, range};

/// Render knots and an interpolated curve on one grid.
pub fn render_curve_overlay(knots: &[(f64, f64)], curve: &[(f64, f64)], width: usize, height: usize) -> String {
    let points = || knots.iter().chain(curve.iter());
    let x_range = range(points().map(|p| p.0)).unwrap_or((0.0, 1.0));
    let (y_lo, y_hi) = range(points().map(|p| p.1)).unwrap_or((0.0, 1.0));
    let y_range = pad_range(y_lo, y_hi, 0.05);

    let mut canvas = Canvas::new(width.max(10), height.max(5), x_range, y_range);
    canvas.polyline(curve, '-');
    // Knots go last so they stay visible on top of the curve.
    for &(x, y) in knots {
        let cell = canvas.cell(x, y);
        canvas.set(cell, 'o');
    }

    let header = format!(
        "Plot: tenor=[{:.3}, {:.3}] years | spread=[{:.2}, {:.2}]%",
        x_range.0, x_range.1, y_range.0, y_range.1
    );
    canvas.render(&header)
}

/// Render a histogram as horizontal bars, one line per bin.
pub fn render_histogram(hist: &Histogram, width: usize) -> String {
    let width = width.max(10);
    let peak = hist.max_count();

    let mut out = format!(
        "Histogram: n={} | bins={} | max count={peak}\n",
        hist.total(),
        hist.counts.len()
    );
    for (lo, hi, count) in hist.bins() {
        let len = match peak {
            0 => 0,
            _ => (count as f64 * width as f64 / peak as f64).round() as usize,
        };
        let bar = "#".repeat(len);
        out.push_str(&format!("{lo:>8.3} .. {hi:>8.3} | {bar:<width$} {count}\n"));
    }
    out
}

/// Character grid with a data-to-cell mapping; row 0 is the top (largest y).
struct Canvas {
    cells: Vec<Vec<char>>,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Canvas {
    fn new(width: usize, height: usize, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            x_range,
            y_range,
        }
    }

    fn width(&self) -> usize {
        self.cells[0].len()
    }

    fn height(&self) -> usize {
        self.cells.len()
    }

    /// `(column, row)` of a data point, clamped to the grid.
    fn cell(&self, x: f64, y: f64) -> (usize, usize) {
        let col = fraction(x, self.x_range) * (self.width() - 1) as f64;
        let row = (1.0 - fraction(y, self.y_range)) * (self.height() - 1) as f64;
        (col.round() as usize, row.round() as usize)
    }

    fn set(&mut self, (col, row): (usize, usize), ch: char) {
        self.cells[row][col] = ch;
    }

    fn set_if_blank(&mut self, cell: (usize, usize), ch: char) {
        if self.cells[cell.1][cell.0] == ' ' {
            self.set(cell, ch);
        }
    }

    /// Connect consecutive points with straight segments.
    fn polyline(&mut self, points: &[(f64, f64)], ch: char) {
        let cells: Vec<(usize, usize)> = points.iter().map(|&(x, y)| self.cell(x, y)).collect();
        match cells.as_slice() {
            [] => {}
            [only] => self.set_if_blank(*only, ch),
            _ => {
                for pair in cells.windows(2) {
                    self.segment(pair[0], pair[1], ch);
                }
            }
        }
    }

    /// Straight segment between two cells (DDA); occupied cells are left alone.
    fn segment(&mut self, from: (usize, usize), to: (usize, usize), ch: char) {
        let (c0, r0) = (from.0 as f64, from.1 as f64);
        let (dc, dr) = (to.0 as f64 - c0, to.1 as f64 - r0);
        let steps = dc.abs().max(dr.abs()) as usize;
        if steps == 0 {
            self.set_if_blank(from, ch);
            return;
        }
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let cell = ((c0 + t * dc).round() as usize, (r0 + t * dr).round() as usize);
            self.set_if_blank(cell, ch);
        }
    }

    fn render(self, header: &str) -> String {
        let mut out = format!("{header}\n");
        for row in self.cells {
            let line: String = row.into_iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

/// Position of `v` inside `(lo, hi)` as a fraction in `[0, 1]`.
fn fraction(v: f64, (lo, hi): (f64, f64)) -> f64 {
    ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
}
