//! SVG snapshot of a [`RecordingCanvas`], log-scale on y, linear on x.
#![cfg(feature = "render-svg")]

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::binding::Rgb;
use crate::headless::RecordingCanvas;

fn plotted(x: f64, y: f64) -> bool {
    x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0
}

/// Axis bounds over every plottable point, padded a little on y.
fn bounds(canvas: &RecordingCanvas) -> Option<((f64, f64), (f64, f64))> {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for s in canvas.series() {
        for (&px, &py) in s.x.iter().zip(&s.y).filter(|(px, py)| plotted(**px, **py)) {
            x = (x.0.min(px), x.1.max(px));
            y = (y.0.min(py), y.1.max(py));
        }
    }
    (x.0 < x.1 && y.0 <= y.1).then_some((x, (y.0 / 2.0, y.1 * 2.0)))
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

pub fn render(canvas: &RecordingCanvas, path: &Path, size: (u32, u32)) -> Result<(), Box<dyn Error>> {
    let ((x_lo, x_hi), (y_lo, y_hi)) = bounds(canvas).ok_or("no positive finite points to plot")?;

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, (y_lo..y_hi).log_scale())?;

    chart.configure_mesh().x_desc("units owned").y_desc("cost / production").draw()?;

    for line in canvas.reference_lines() {
        if line.x < x_lo || line.x > x_hi {
            continue;
        }
        let (bottom, top) = (line.y_min.max(y_lo), line.y_max.min(y_hi));
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(line.x, bottom), (line.x, top)],
            BLACK.mix(0.5),
        )))?;
    }

    for s in canvas.series() {
        let c = color(s.style.color);
        let points: Vec<(f64, f64)> = s
            .x
            .iter()
            .copied()
            .zip(s.y.iter().copied())
            .filter(|&(px, py)| plotted(px, py))
            .collect();
        chart
            .draw_series(LineSeries::new(points, &c))?
            .label(s.style.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], c));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
