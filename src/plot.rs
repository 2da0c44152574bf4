use log::debug;
use ndarray::ArrayView1;
use plotters::prelude::*;
use std::path::Path;

use crate::error::{RegressionError, Result};

const PLOT_SIZE: (u32, u32) = (800, 600);

fn plot_error(error: impl std::fmt::Display) -> RegressionError {
    RegressionError::Plot(error.to_string())
}

/// `[min, max]` of `values` widened by 5% on each side so no point sits on the frame.
fn padded_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    });

    let padding = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - padding)..(max + padding)
}

/// Renders the observed test targets against one feature as black dots and the
/// model's predictions as a blue line, writing an SVG file to `path`.
pub fn plot_fit(
    path: &Path,
    feature_name: &str,
    feature: ArrayView1<f64>,
    observed: ArrayView1<f64>,
    predicted: ArrayView1<f64>,
) -> Result<()> {
    RegressionError::check("plot_fit: observed targets", feature.len(), observed.len())?;
    RegressionError::check("plot_fit: predicted targets", feature.len(), predicted.len())?;
    if feature.is_empty() {
        return Err(RegressionError::EmptyInput("plot_fit: no samples"));
    }

    let x_range = padded_range(feature.iter().copied());
    let y_range = padded_range(observed.iter().chain(predicted.iter()).copied());

    let mut line: Vec<(f64, f64)> = feature
        .iter()
        .copied()
        .zip(predicted.iter().copied())
        .collect();
    line.sort_by(|a, b| a.0.total_cmp(&b.0));

    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Linear regression on {feature_name}"),
            ("sans-serif", 24).into_font(),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc(feature_name)
        .y_desc("disease progression")
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(
            feature
                .iter()
                .zip(observed.iter())
                .map(|(&x, &y)| Circle::new((x, y), 3, BLACK.filled())),
        )
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(line, BLUE.stroke_width(3)))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    debug!("wrote plot of {} samples to {}", feature.len(), path.display());

    Ok(())
}
