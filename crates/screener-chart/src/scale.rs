// File: crates/screener-chart/src/scale.rs
// Summary: Category (X) band scale and linear value (Y) scale.

/// Horizontal band scale: one equal-width band per category, left to right.
#[derive(Clone, Copy, Debug)]
pub struct BandScale {
    pub left_px: f32,
    pub band_px: f32,
    /// Fraction of each band covered by the bar.
    pub fill: f32,
}

impl BandScale {
    pub fn new(left_px: f32, right_px: f32, count: usize, fill: f32) -> Self {
        let band_px = (right_px - left_px) / count.max(1) as f32;
        Self { left_px, band_px, fill: fill.clamp(0.05, 1.0) }
    }

    #[inline]
    pub fn center(&self, index: usize) -> f32 {
        self.left_px + (index as f32 + 0.5) * self.band_px
    }

    pub fn bar_width(&self) -> f32 {
        self.band_px * self.fill
    }

    /// Left and right pixel edges of the bar in band `index`.
    pub fn bar_span(&self, index: usize) -> (f32, f32) {
        let c = self.center(index);
        let half = self.bar_width() * 0.5;
        (c - half, c + half)
    }
}

/// Vertical value scale mapping data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 {
            s.vmax = s.vmin + 1.0;
        }
        s
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        // halved so spans near f64::MAX stay finite
        let span = (self.vmax * 0.5 - self.vmin * 0.5).max(1e-12);
        let frac = (y * 0.5 - self.vmin * 0.5) / span;
        self.bottom_px - frac as f32 * (self.bottom_px - self.top_px)
    }

    pub fn contains(&self, y: f64) -> bool {
        y >= self.vmin && y <= self.vmax
    }
}

/// Value domain for a bar chart: always includes zero and every given value,
/// with `headroom` (fraction of the span) added on the side(s) away from zero.
pub fn bar_domain<I>(values: I, headroom: f64) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = hi - lo;
    if span <= 0.0 {
        return (0.0, 1.0);
    }
    if !span.is_finite() {
        return (lo, hi);
    }
    let pad = span * headroom;
    let lo = if lo < 0.0 { (lo - pad).max(-f64::MAX) } else { lo };
    let hi = if hi > 0.0 { (hi + pad).min(f64::MAX) } else { hi };
    (lo, hi)
}
