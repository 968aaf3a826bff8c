//! Chart rendering (PNG + PDF)
//!
//! Draws one smoothed reward curve against environment steps with
//! `plotters`, once per backend. The same drawing routine runs against the
//! bitmap backend (sized in pixels at the configured DPI) and
//! [`PdfBackend`] (sized in points), so both files show the same chart.

use std::ffi::OsString;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use plotters::coord::ranged1d::{BoldPoints, Ranged};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::info;

use crate::config::RenderConfig;
use crate::dataset::Dataset;
use crate::pdf::PdfBackend;
use crate::series::Series;
use crate::{Error, Result};

/// Paths written by [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    /// Raster image
    pub png: PathBuf,
    /// Single-page PDF document
    pub pdf: PathBuf,
    /// Number of plotted points
    pub points: usize,
}

/// Filter, sort and smooth `dataset`, then write `<output_base>.png` and
/// `<output_base>.pdf`.
///
/// # Errors
///
/// - `Error::EmptyDataset` if nothing is left after filtering; no file is
///   written in that case
/// - `Error::InvalidConfig` if `config` fails validation
/// - `Error::Render` if drawing or writing either file fails
pub fn render<P: AsRef<Path>>(
    dataset: &Dataset,
    output_base: P,
    config: &RenderConfig,
) -> Result<RenderedChart> {
    config.validate()?;
    let series = Series::prepare(dataset, config)?;
    render_series(&series, output_base.as_ref(), config)
}

/// Draw an already prepared series.
///
/// # Errors
///
/// Returns `Error::Render` if drawing or writing either file fails
pub fn render_series(
    series: &Series,
    output_base: &Path,
    config: &RenderConfig,
) -> Result<RenderedChart> {
    let png = with_suffix(output_base, "png");
    let pdf = with_suffix(output_base, "pdf");
    let title = config.title.clone().unwrap_or_else(|| {
        output_base
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned())
    });

    {
        let root = BitMapBackend::new(&png, config.pixel_size()).into_drawing_area();
        draw(&root, series, config, &title, f64::from(config.dpi) / 72.0)?;
    }
    {
        let root = PdfBackend::new(&pdf, config.point_size()).into_drawing_area();
        draw(&root, series, config, &title, 1.0)?;
    }

    info!(png = %png.display(), pdf = %pdf.display(), points = series.len(), "rendered chart");
    Ok(RenderedChart {
        png,
        pdf,
        points: series.len(),
    })
}

/// Output base for a log path: the file name cut at its first `.`,
/// kept in the same directory (`logs/run.v2.txt` -> `logs/run`).
#[must_use]
pub fn output_base(log_path: &Path) -> PathBuf {
    let name = log_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default();
    log_path.with_file_name(stem)
}

/// Axis tick label with `K`/`M` suffixes.
#[must_use]
pub fn format_step(x: f64) -> String {
    if x >= 1e6 {
        format!("{:.1}M", x / 1e6)
    } else if x >= 1e3 {
        format!("{:.0}K", x / 1e3)
    } else {
        format!("{x:.0}")
    }
}

fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

fn render_err<E: Display>(e: E) -> Error {
    Error::Render(e.to_string())
}

/// `scale` converts points to backend units.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &Series,
    config: &RenderConfig,
    title: &str,
    scale: f64,
) -> Result<()> {
    let units = |pt: f64| (pt * scale).round().max(1.0) as u32;
    let (r, g, b) = config.rgb()?;
    let color = RGBColor(r, g, b);

    root.fill(&WHITE).map_err(render_err)?;

    let (x0, x1) = series.step_range();
    let (y0, y1) = series.reward_range();

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(units(12.0))
        .x_label_area_size(units(36.0))
        .y_label_area_size(units(48.0));
    if config.annotate {
        builder.caption(
            title,
            ("sans-serif", 16.0 * scale)
                .into_font()
                .style(FontStyle::Bold),
        );
    }
    let mut chart = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_err)?;

    if config.annotate {
        let tick = |x: &f64| format_step(*x);
        chart
            .configure_mesh()
            .disable_mesh()
            .x_label_formatter(&tick)
            .x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str())
            .axis_desc_style(("sans-serif", 14.0 * scale).into_font())
            .label_style(("sans-serif", 11.0 * scale).into_font())
            .draw()
            .map_err(render_err)?;
    } else {
        // Bare left and bottom axes; the mesh would lay out tick labels.
        let axis = BLACK.stroke_width(units(0.8));
        chart
            .draw_series([
                PathElement::new(vec![(x0, y0), (x1, y0)], axis),
                PathElement::new(vec![(x0, y0), (x0, y1)], axis),
            ])
            .map_err(render_err)?;
    }

    // Dashed grid at the major ticks
    let grid = BLACK.mix(0.2).stroke_width(units(0.5));
    let coord = chart.as_coord_spec();
    let xs = coord.x_spec().key_points(BoldPoints(10));
    let ys = coord.y_spec().key_points(BoldPoints(10));
    let dash = (units(4.0), units(3.0));
    chart
        .draw_series(
            xs.iter()
                .map(|&x| vec![(x, y0), (x, y1)])
                .chain(ys.iter().map(|&y| vec![(x0, y), (x1, y)]))
                .flat_map(|segment| DashedLineSeries::new(segment, dash.0, dash.1, grid)),
        )
        .map_err(render_err)?;

    let line = color.stroke_width(units(config.line_width));
    chart
        .draw_series(LineSeries::new(series.points(), line))
        .map_err(render_err)?;
    if series.len() == 1 {
        chart
            .draw_series(
                series
                    .points()
                    .map(|p| Circle::new(p, units(config.line_width * 1.5), color.filled())),
            )
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_step() {
        assert_eq!(format_step(0.0), "0");
        assert_eq!(format_step(999.0), "999");
        assert_eq!(format_step(1_000.0), "1K");
        assert_eq!(format_step(250_000.0), "250K");
        assert_eq!(format_step(1_000_000.0), "1.0M");
        assert_eq!(format_step(2_300_000.0), "2.3M");
    }

    #[test]
    fn test_output_base() {
        assert_eq!(
            output_base(Path::new("new_2c_vs_64zg.txt")),
            PathBuf::from("new_2c_vs_64zg")
        );
        assert_eq!(
            output_base(Path::new("logs/run.v2.txt")),
            PathBuf::from("logs/run")
        );
        assert_eq!(output_base(Path::new("plain")), PathBuf::from("plain"));
    }

    #[test]
    fn test_with_suffix_keeps_dots() {
        assert_eq!(
            with_suffix(Path::new("out/run.v2"), "png"),
            PathBuf::from("out/run.v2.png")
        );
    }
}
