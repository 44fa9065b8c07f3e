//! SVG line charts via plotters.

use std::error::Error as StdError;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::systems::sdk::{Chart, ChartRenderer};

/// Writes each chart to an SVG file, overwriting it.
#[derive(Clone, Debug)]
pub struct SvgChart {
    path: PathBuf,
    size: (u32, u32),
}

impl SvgChart {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), size: (1200, 700) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn draw(&self, chart: &Chart) -> std::result::Result<(), Box<dyn StdError>> {
        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let (x_lo, x_hi) = padded(chart.points.iter().map(|&(x, _)| x));
        let (y_lo, y_hi) = padded(chart.points.iter().map(|&(_, y)| y));

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()?;

        ctx.draw_series(LineSeries::new(chart.points.iter().copied(), &BLUE))?;
        root.present()?;
        Ok(())
    }
}

/// Finite range of `values` with a 5% margin; `0..1` when there is nothing to show.
fn padded(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let range = hi - lo;
    let pad = if range > 1e-9 { 0.05 * range } else { 0.05 * hi.abs().max(1.0) };
    (lo - pad, hi + pad)
}

impl ChartRenderer for SvgChart {
    fn render_line_chart(&mut self, chart: &Chart) -> Result<()> {
        self.draw(chart).map_err(|e| Error::Render(e.to_string()))?;
        log::info!("chart '{}' written to {}", chart.title, self.path.display());
        Ok(())
    }
}
