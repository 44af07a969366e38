// File: crates/screener-chart/src/types.rs
// Summary: Shared types and constants (canvas sizes, paddings).

/// Default (minimum) surface width in pixels; 2.5:1 with `HEIGHT`.
pub const WIDTH: i32 = 1500;
/// Surface height in pixels.
pub const HEIGHT: i32 = 600;
/// Narrowest category band before the canvas is widened to fit more bars.
pub const MIN_BAND_PX: i32 = 28;

/// Screen margins around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
}

impl Default for Insets {
    fn default() -> Self {
        // room for the title above, rotated tickers below, y labels left
        Self::new(96, 32, 72, 104)
    }
}

/// Canvas width needed to give each of `bars` a band of at least `MIN_BAND_PX`.
pub fn canvas_width(bars: usize, min_width: i32, insets: &Insets) -> i32 {
    let needed = insets.hsum() as i64 + bars as i64 * MIN_BAND_PX as i64;
    needed.clamp(min_width as i64, i32::MAX as i64) as i32
}

/// Canvas height for a canvas widened to `width`, keeping the `min_width:height` aspect.
pub fn canvas_height(width: i32, min_width: i32, height: i32) -> i32 {
    if width <= min_width || min_width <= 0 {
        return height;
    }
    let scaled = (width as f64 * height as f64 / min_width as f64).round();
    scaled.clamp(height as f64, i32::MAX as f64) as i32
}
