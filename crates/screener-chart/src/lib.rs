// File: crates/screener-chart/src/lib.rs
// Summary: Core library entry point; renders a metric comparison bar chart for a
//          screened set of instruments against a sector/universe average.

pub mod chart;
pub mod error;
pub mod grid;
pub mod instrument;
pub mod metric;
pub mod output;
pub mod scale;
pub mod sector;
pub mod stats;
pub mod text;
pub mod theme;
pub mod title;
pub mod types;

pub use chart::{Bar, ComparisonChart, ReferenceLine, RenderOptions};
pub use error::{ChartError, DatasetKind, Result};
pub use instrument::{Dataset, Instrument};
pub use metric::{Metric, MetricKey};
pub use output::PngImage;
pub use sector::SectorFilter;
pub use theme::Theme;

/// Render the comparison chart with default options.
///
/// One bar per `screened` record in order; the dashed reference line is the
/// mean of `metric` over the `universe` records admitted by `sectors`, and is
/// omitted when no such record has a value.
pub fn render(
    screened: &Dataset,
    universe: &Dataset,
    metric: &Metric,
    sectors: &SectorFilter,
) -> Result<PngImage> {
    render_with(screened, universe, metric, sectors, &RenderOptions::default())
}

pub fn render_with(
    screened: &Dataset,
    universe: &Dataset,
    metric: &Metric,
    sectors: &SectorFilter,
    opts: &RenderOptions,
) -> Result<PngImage> {
    let chart = ComparisonChart::build(screened, universe, metric, sectors, opts);
    let (width, height) = chart.dimensions(opts);
    let bytes = chart.render_to_png_bytes(opts)?;
    Ok(PngImage::new(bytes, width as u32, height as u32))
}

/// Host boundary: both datasets as JSON arrays of row objects, the metric as
/// its field name, and the selected sector labels.
///
/// Fails only on malformed datasets; unknown metrics and empty inputs still
/// produce a (reduced) chart.
pub fn render_json<S: AsRef<str>>(
    screened_json: &str,
    universe_json: &str,
    metric: &str,
    sectors: &[S],
) -> Result<PngImage> {
    let screened = Dataset::from_json_str(DatasetKind::Screened, screened_json)?;
    let universe = Dataset::from_json_str(DatasetKind::Universe, universe_json)?;
    let sectors = SectorFilter::new(sectors.iter().map(|s| s.as_ref().to_string()));
    render(&screened, &universe, &Metric::parse(metric), &sectors)
}
