// File: crates/screener-chart/src/text.rs
// Summary: Text shaper/renderer on Skia textlayout; one instance per render call.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

/// Horizontal anchor for a text run relative to its x coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Helvetica", "Arial", "DejaVu Sans", "Liberation Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, self.fonts.clone());
        builder.push_style(&Self::make_style(size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT).longest_line()
    }

    /// Draw `text` with its baseline at `y`, anchored horizontally at `x`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, anchor: Anchor) {
        let mut p = self.layout(text, size, color);
        let dx = anchor_offset(anchor, p.longest_line());
        // Paragraph draws from top-left; shift up so the baseline lands on y
        let ascent = p.alphabetic_baseline();
        p.paint(canvas, (x - dx, y - ascent));
    }

    /// Draw `text` rotated by `degrees` (clockwise) around `(x, y)`. The run is
    /// vertically centred on the pivot and anchored horizontally per `anchor`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_rotated(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        degrees: f32,
        size: f32,
        color: skia::Color,
        anchor: Anchor,
    ) {
        let mut p = self.layout(text, size, color);
        let dx = anchor_offset(anchor, p.longest_line());
        let half_h = p.height() * 0.5;
        canvas.save();
        canvas.translate((x, y));
        canvas.rotate(degrees, None);
        p.paint(canvas, (-dx, -half_h));
        canvas.restore();
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

fn anchor_offset(anchor: Anchor, width: f32) -> f32 {
    match anchor {
        Anchor::Left => 0.0,
        Anchor::Center => width * 0.5,
        Anchor::Right => width,
    }
}
