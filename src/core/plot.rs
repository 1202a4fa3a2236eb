//! Scatter plot of a dataset with its decision boundaries.
//!
//! The chart is rendered to an in-memory SVG document, then optionally
//! converted to a single-page PDF, so the caller decides where (and whether)
//! it is persisted.

use crate::core::{BoundaryLine, Observation, Result};
use crate::utils::error::LpmError;
use plotters::prelude::*;

/// Plot configuration options.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Width of the plot in pixels.
    pub width: u32,
    /// Height of the plot in pixels.
    pub height: u32,
    /// Title of the plot.
    pub title: String,
    /// X-axis label.
    pub x_label: String,
    /// Y-axis label.
    pub y_label: String,
    /// Font size for the title.
    pub font_size: u32,
    /// Radius of each scatter point.
    pub point_size: u32,
    /// Resolution used to size the PDF page.
    pub dpi: f32,
}

impl Default for PlotConfig {
    /// 8in x 6in at 100 dpi.
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Classification of Binary Data by LPM".to_string(),
            x_label: "Var. X".to_string(),
            y_label: "Var. Y".to_string(),
            font_size: 22,
            point_size: 4,
            dpi: 100.0,
        }
    }
}

const GROUP_COLORS: [RGBColor; 4] = [
    RGBColor(248, 118, 109), // Red
    RGBColor(0, 191, 196),   // Teal
    RGBColor(124, 174, 0),   // Green
    RGBColor(199, 124, 255), // Purple
];

const LINE_COLORS: [RGBColor; 2] = [
    RGBColor(31, 119, 180), // Blue
    RGBColor(44, 44, 44),   // Charcoal
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    Pdf,
    Svg,
}

impl PlotFormat {
    /// `.svg` files keep the raw document, everything else becomes a PDF.
    pub fn from_path(path: &str) -> Self {
        match std::path::Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("svg") => Self::Svg,
            _ => Self::Pdf,
        }
    }
}

fn plot_err<E: std::fmt::Display>(e: E) -> LpmError {
    LpmError::plot(e.to_string())
}

/// Group names in order of first appearance.
fn groups_in_order(observations: &[Observation]) -> Vec<&str> {
    let mut groups: Vec<&str> = Vec::new();
    for o in observations {
        if !groups.contains(&o.group.as_str()) {
            groups.push(o.group.as_str());
        }
    }
    groups
}

/// Axis ranges covering every point and line endpoint, with a 5% margin.
fn chart_bounds(
    observations: &[Observation],
    boundaries: &[BoundaryLine],
) -> ((f64, f64), (f64, f64)) {
    let points = observations
        .iter()
        .map(|o| (o.x, o.y))
        .chain(boundaries.iter().flat_map(|b| [b.start, b.end]));

    let (mut x_min, mut x_max, mut y_min, mut y_max) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for (x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if x_min > x_max {
        return ((0.0, 1.0), (0.0, 1.0));
    }

    let pad = |lo: f64, hi: f64| {
        let span = if hi > lo { hi - lo } else { 1.0 };
        (lo - span * 0.05, hi + span * 0.05)
    };
    (pad(x_min, x_max), pad(y_min, y_max))
}

/// Renders the scatter plot (colored by group) with the boundary segments
/// overlaid and returns the SVG document.
pub fn render_svg(
    observations: &[Observation],
    boundaries: &[BoundaryLine],
    config: &PlotConfig,
) -> Result<String> {
    let ((x_min, x_max), (y_min, y_max)) = chart_bounds(observations, boundaries);
    let mut svg = String::new();

    {
        let root =
            SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, ("sans-serif", config.font_size).into_font())
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str())
            .draw()
            .map_err(plot_err)?;

        let radius = config.point_size;
        for (i, group) in groups_in_order(observations).into_iter().enumerate() {
            let color = GROUP_COLORS[i % GROUP_COLORS.len()];
            chart
                .draw_series(
                    observations
                        .iter()
                        .filter(|o| o.group == group)
                        .map(|o| Circle::new((o.x, o.y), radius, color.filled())),
                )
                .map_err(plot_err)?
                .label(group)
                .legend(move |(x, y)| Circle::new((x, y), radius, color.filled()));
        }

        for (i, line) in boundaries.iter().enumerate() {
            let color = LINE_COLORS[i % LINE_COLORS.len()];
            chart
                .draw_series(LineSeries::new(vec![line.start, line.end], color.stroke_width(2)))
                .map_err(plot_err)?
                .label(line.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_err)?;

        root.present().map_err(plot_err)?;
    }

    Ok(svg)
}

/// Converts an SVG document to a one-page PDF sized at `dpi`.
pub fn svg_to_pdf(svg: &str, dpi: f32) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(plot_err)?;

    let mut page = svg2pdf::PageOptions::default();
    page.dpi = dpi;
    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), page).map_err(plot_err)
}

/// Renders the plot and encodes it in `format`.
pub fn render_plot(
    observations: &[Observation],
    boundaries: &[BoundaryLine],
    config: &PlotConfig,
    format: PlotFormat,
) -> Result<Vec<u8>> {
    let svg = render_svg(observations, boundaries, config)?;
    match format {
        PlotFormat::Svg => Ok(svg.into_bytes()),
        PlotFormat::Pdf => svg_to_pdf(&svg, config.dpi),
    }
}
