// File: crates/screener-chart/src/chart.rs
// Summary: Comparison chart scene (bars, labels, reference average) and the headless
//          PNG rendering pipeline using Skia CPU raster surfaces.
// Notes:
// - `ComparisonChart::build` is pure: it decides every string and number that
//   ends up on the canvas. The draw helpers below only place them.
// - The surface, canvas and font collection are all local to one call.

use std::io::Cursor;

use log::{debug, trace, warn};
use skia_safe as skia;

use crate::error::{ChartError, Result};
use crate::grid::{nice_ticks, tick_decimals};
use crate::instrument::Dataset;
use crate::metric::Metric;
use crate::scale::{bar_domain, BandScale, ValueScale};
use crate::sector::SectorFilter;
use crate::stats::{sector_average, PopulationAverage};
use crate::text::{Anchor, TextShaper};
use crate::theme::Theme;
use crate::title::{compose_title, DEFAULT_UNIVERSE_LABEL};
use crate::types::{canvas_height, canvas_width, Insets, HEIGHT, WIDTH};

const BAR_FILL: f32 = 0.8;
const BAR_LABEL_PAD: f32 = 3.0;
const HEADROOM: f64 = 0.1;
const Y_TICK_TARGET: usize = 6;
const TICKER_ROTATION: f32 = -45.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Canvas width floor; the canvas widens when bars would get too narrow.
    pub min_width: i32,
    /// Height at `min_width`; a widened canvas grows in proportion.
    pub height: i32,
    pub insets: Insets,
    /// Population name used in the title when no sector is selected.
    pub universe_label: String,
    /// Skip all text; keeps pixel snapshots independent of installed fonts.
    pub draw_labels: bool,
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            min_width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            universe_label: DEFAULT_UNIVERSE_LABEL.to_string(),
            draw_labels: true,
            theme: Theme::dark(),
        }
    }
}

/// One bar per screened instrument, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub ticker: String,
    /// `None` draws nothing: no bar, no label.
    pub value: Option<f64>,
    /// Value with two decimals, shown above the bar.
    pub label: Option<String>,
    pub color: skia::Color,
}

/// Dashed horizontal line at the averaging population's mean.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceLine {
    pub value: f64,
    pub legend: String,
}

#[derive(Clone, Debug)]
pub struct ComparisonChart {
    pub title: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
    pub reference: Option<ReferenceLine>,
    pub average: PopulationAverage,
}

pub fn format_value(v: f64) -> String {
    format!("{v:.2}")
}

impl ComparisonChart {
    pub fn build(
        screened: &Dataset,
        universe: &Dataset,
        metric: &Metric,
        sectors: &SectorFilter,
        opts: &RenderOptions,
    ) -> Self {
        if !metric.is_known() {
            warn!("unrecognized metric key `{metric}`; rendering without a label");
        }

        let count = screened.len();
        let bars = screened
            .iter()
            .enumerate()
            .map(|(i, inst)| {
                let value = inst.value(metric);
                Bar {
                    ticker: inst.ticker.clone(),
                    value,
                    label: value.map(format_value),
                    color: opts.theme.bar_color(i, count),
                }
            })
            .collect::<Vec<_>>();

        let average = sector_average(universe, metric, sectors);
        let reference = average.mean.map(|value| ReferenceLine {
            value,
            legend: format!("Industry Average: {}", format_value(value)),
        });

        debug!(
            "comparison chart: metric={metric} bars={} population={} defined={} average={:?}",
            bars.len(),
            average.population,
            average.defined,
            average.mean,
        );

        Self {
            title: compose_title(metric, sectors, &opts.universe_label),
            y_label: metric.label().to_string(),
            bars,
            reference,
            average,
        }
    }

    /// Canvas size this chart renders at under `opts`.
    pub fn dimensions(&self, opts: &RenderOptions) -> (i32, i32) {
        let width = canvas_width(self.bars.len(), opts.min_width, &opts.insets);
        (width, canvas_height(width, opts.min_width, opts.height))
    }

    /// Render to PNG bytes in memory.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let (pixels, w, h, _) = self.render_to_rgba8(opts)?;
        let buffer = image::RgbaImage::from_raw(w, h, pixels).ok_or(ChartError::ReadPixels)?;
        let mut png = Vec::new();
        buffer.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
        Ok(png)
    }

    /// Render to an unpremultiplied RGBA8 buffer: (pixels, width, height, stride).
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.draw(opts)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new(
            (w, h),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(ChartError::ReadPixels);
        }
        Ok((pixels, w as u32, h as u32, stride))
    }

    fn draw(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        let (width, height) = self.dimensions(opts);
        trace!("raster surface {width}x{height}");
        let mut surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or(ChartError::Surface { width, height })?;
        let canvas = surface.canvas();
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let plot = PlotRect {
            l: opts.insets.left as f32,
            t: opts.insets.top as f32,
            r: (width - opts.insets.right as i32) as f32,
            b: (height - opts.insets.bottom as i32) as f32,
        };

        let domain = bar_domain(
            self.bars
                .iter()
                .filter_map(|b| b.value)
                .chain(self.reference.as_ref().map(|r| r.value)),
            HEADROOM,
        );
        let ys = ValueScale::new(plot.t, plot.b, domain.0, domain.1);
        let xs = BandScale::new(plot.l, plot.r, self.bars.len(), BAR_FILL);
        let text = opts.draw_labels.then(TextShaper::new);

        draw_value_grid(canvas, &plot, &ys, theme, text.as_ref());
        draw_bars(canvas, &self.bars, &xs, &ys, theme, text.as_ref());
        if let Some(text) = &text {
            draw_tickers(canvas, text, &self.bars, &xs, &plot, theme);
            draw_titles(canvas, text, &self.title, &self.y_label, &plot, width, theme);
        }
        if let Some(reference) = &self.reference {
            let occupied = bar_extents(&self.bars, &xs, &ys, theme.bar_label_size + BAR_LABEL_PAD);
            draw_reference(canvas, reference, &plot, &ys, &occupied, theme, text.as_ref());
        }
        Ok(surface)
    }
}

// ---- helpers ----------------------------------------------------------------

struct PlotRect {
    l: f32,
    t: f32,
    r: f32,
    b: f32,
}

fn stroke(color: skia::Color, width: f32, dash: Option<&[f32]>) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    if let Some(intervals) = dash {
        paint.set_path_effect(skia::PathEffect::dash(intervals, 0.0));
    }
    paint
}

fn fill(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

fn draw_value_grid(
    canvas: &skia::Canvas,
    plot: &PlotRect,
    ys: &ValueScale,
    theme: &Theme,
    text: Option<&TextShaper>,
) {
    let ticks = nice_ticks(ys.vmin, ys.vmax, Y_TICK_TARGET);
    let step = match ticks.as_slice() {
        [a, b, ..] => b - a,
        _ => 1.0,
    };
    let decimals = tick_decimals(step);
    let paint = stroke(theme.grid, 1.0, Some(&[4.0, 4.0][..]));

    for &v in ticks.iter().filter(|v| ys.contains(**v)) {
        let y = ys.to_px(v);
        canvas.draw_line((plot.l, y), (plot.r, y), &paint);
        if let Some(text) = text {
            let label = format!("{v:.decimals$}");
            text.draw(canvas, &label, plot.l - 8.0, y + theme.tick_size * 0.35, theme.tick_size, theme.text, Anchor::Right);
        }
    }
}

fn draw_bars(
    canvas: &skia::Canvas,
    bars: &[Bar],
    xs: &BandScale,
    ys: &ValueScale,
    theme: &Theme,
    text: Option<&TextShaper>,
) {
    let y0 = ys.to_px(0.0);
    for (i, bar) in bars.iter().enumerate() {
        let Some(value) = bar.value else { continue };
        let (left, right) = xs.bar_span(i);
        let yv = ys.to_px(value);
        let rect = skia::Rect::from_ltrb(left, yv.min(y0), right, yv.max(y0));
        canvas.draw_rect(rect, &fill(bar.color));

        if let (Some(text), Some(label)) = (text, &bar.label) {
            let size = theme.bar_label_size;
            // above positive bars, below negative ones
            let baseline = if value >= 0.0 { yv - BAR_LABEL_PAD } else { yv + BAR_LABEL_PAD + size };
            text.draw(canvas, label, xs.center(i), baseline, size, theme.text, Anchor::Center);
        }
    }
}

fn draw_tickers(
    canvas: &skia::Canvas,
    text: &TextShaper,
    bars: &[Bar],
    xs: &BandScale,
    plot: &PlotRect,
    theme: &Theme,
) {
    let tick = stroke(theme.text, 1.0, None);
    for (i, bar) in bars.iter().enumerate() {
        let x = xs.center(i);
        canvas.draw_line((x, plot.b), (x, plot.b + 4.0), &tick);
        text.draw_rotated(canvas, &bar.ticker, x, plot.b + 10.0, TICKER_ROTATION, theme.tick_size, theme.text, Anchor::Right);
    }
}

fn draw_titles(
    canvas: &skia::Canvas,
    text: &TextShaper,
    title: &str,
    y_label: &str,
    plot: &PlotRect,
    width: i32,
    theme: &Theme,
) {
    text.draw(canvas, title, width as f32 * 0.5, plot.t - 28.0, theme.title_size, theme.title, Anchor::Center);
    if !y_label.is_empty() {
        let mid = (plot.t + plot.b) * 0.5;
        text.draw_rotated(canvas, y_label, plot.l - 72.0, mid, -90.0, theme.axis_label_size, theme.text, Anchor::Center);
    }
}

/// Rects covered by each drawn bar plus the room its value label needs.
fn bar_extents(bars: &[Bar], xs: &BandScale, ys: &ValueScale, label_room: f32) -> Vec<skia::Rect> {
    let y0 = ys.to_px(0.0);
    bars.iter()
        .enumerate()
        .filter_map(|(i, bar)| {
            let yv = ys.to_px(bar.value?);
            let (left, right) = xs.bar_span(i);
            Some(skia::Rect::from_ltrb(left, yv.min(y0) - label_room, right, yv.max(y0) + label_room))
        })
        .collect()
}

fn overlaps(a: &skia::Rect, b: &skia::Rect) -> bool {
    a.left < b.right && b.left < a.right && a.top < b.bottom && b.top < a.bottom
}

const LEGEND_MARGIN: f32 = 8.0;

/// Legend box position: the top-right plot corner unless bars reach into it,
/// then top-left. When both are covered, the corner hiding fewer bars wins.
fn place_legend(plot: &PlotRect, box_w: f32, box_h: f32, occupied: &[skia::Rect]) -> skia::Rect {
    let top = plot.t + LEGEND_MARGIN;
    let corners = [
        skia::Rect::from_xywh(plot.r - box_w - LEGEND_MARGIN, top, box_w, box_h),
        skia::Rect::from_xywh(plot.l + LEGEND_MARGIN, top, box_w, box_h),
    ];
    let hidden = |r: &skia::Rect| occupied.iter().filter(|o| overlaps(r, o)).count();
    let mut best = corners[0];
    let mut best_hidden = hidden(&best);
    for corner in &corners[1..] {
        if best_hidden == 0 {
            break;
        }
        let n = hidden(corner);
        if n < best_hidden {
            best = *corner;
            best_hidden = n;
        }
    }
    if best_hidden > 0 {
        trace!("legend overlaps {best_hidden} bar(s)");
    }
    best
}

fn draw_reference(
    canvas: &skia::Canvas,
    reference: &ReferenceLine,
    plot: &PlotRect,
    ys: &ValueScale,
    occupied: &[skia::Rect],
    theme: &Theme,
    text: Option<&TextShaper>,
) {
    let dash: &[f32] = &[8.0, 5.0];
    let line = stroke(theme.reference_line, 2.0, Some(dash));
    let y = ys.to_px(reference.value);
    canvas.draw_line((plot.l, y), (plot.r, y), &line);

    let size = theme.legend_size;
    let sample_w = 32.0;
    let pad = 10.0;
    let text_w = text.map_or(size * 12.0, |t| t.measure_width(&reference.legend, size));
    let rect = place_legend(plot, pad * 3.0 + sample_w + text_w, size + pad * 2.0, occupied);
    canvas.draw_round_rect(rect, 4.0, 4.0, &fill(theme.legend_fill));

    let (left, mid) = (rect.left, rect.center_y());
    canvas.draw_line((left + pad, mid), (left + pad + sample_w, mid), &line);
    if let Some(text) = text {
        text.draw(canvas, &reference.legend, left + pad * 2.0 + sample_w, mid + size * 0.35, size, theme.text, Anchor::Left);
    }
}
