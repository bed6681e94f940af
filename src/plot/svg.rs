//! SVG rendering of the histogram and curve plots via Plotters.
//!
//! Only the SVG backend is compiled in, so rendering never needs a display
//! or system fonts (text sizes are estimated).

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::error::AppError;
use crate::plot::histogram::Histogram;
use crate::plot::{pad_range, range};

const SIZE: (u32, u32) = (800, 500);

pub fn write_histogram_svg(path: &Path, title: &str, hist: &Histogram) -> Result<(), AppError> {
    draw_histogram(SVGBackend::new(path, SIZE), title, hist)
        .map_err(|e| AppError::new(2, format!("Failed to render histogram SVG '{}': {e}", path.display())))
}

pub fn write_curve_svg(
    path: &Path,
    title: &str,
    knots: &[(f64, f64)],
    curve: &[(f64, f64)],
) -> Result<(), AppError> {
    draw_curve_overlay(SVGBackend::new(path, SIZE), title, knots, curve)
        .map_err(|e| AppError::new(2, format!("Failed to render curve SVG '{}': {e}", path.display())))
}

fn draw_histogram(backend: SVGBackend<'_>, title: &str, hist: &Histogram) -> Result<(), Box<dyn Error>> {
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let x0 = hist.edges[0];
    let x1 = hist.edges[hist.edges.len() - 1];
    let y1 = hist.max_count().max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x0..x1, 0.0..y1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("residual")
        .y_desc("count")
        .draw()?;

    let fill = BLUE.mix(0.7).filled();
    chart
        .draw_series(
            hist.bins()
                .map(|(lo, hi, count)| Rectangle::new([(lo, 0.0), (hi, count as f64)], fill)),
        )?
        .label("Simulated Residuals")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], fill));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_curve_overlay(
    backend: SVGBackend<'_>,
    title: &str,
    knots: &[(f64, f64)],
    curve: &[(f64, f64)],
) -> Result<(), Box<dyn Error>> {
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let all = || knots.iter().chain(curve.iter());
    let (x0, x1) = range(all().map(|p| p.0)).unwrap_or((0.0, 1.0));
    let (y0, y1) = range(all().map(|p| p.1)).unwrap_or((0.0, 1.0));
    let (y0, y1) = pad_range(y0, y1, 0.05);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("tenor (years)")
        .y_desc("spread (%)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(curve.iter().copied(), &RED))?
        .label("Spline Interpolated Curve")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart
        .draw_series(knots.iter().map(|&p| Circle::new(p, 4, BLUE.filled())))?
        .label("Original Data")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
