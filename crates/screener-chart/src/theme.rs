// File: crates/screener-chart/src/theme.rs
// Summary: Immutable chart styling (colors, font sizes, bar palette).

use skia_safe as skia;

/// Qualitative 10-color palette (matplotlib "tab10").
pub const TAB10: [skia::Color; 10] = [
    skia::Color::from_argb(255, 0x1f, 0x77, 0xb4),
    skia::Color::from_argb(255, 0xff, 0x7f, 0x0e),
    skia::Color::from_argb(255, 0x2c, 0xa0, 0x2c),
    skia::Color::from_argb(255, 0xd6, 0x27, 0x28),
    skia::Color::from_argb(255, 0x94, 0x67, 0xbd),
    skia::Color::from_argb(255, 0x8c, 0x56, 0x4b),
    skia::Color::from_argb(255, 0xe3, 0x77, 0xc2),
    skia::Color::from_argb(255, 0x7f, 0x7f, 0x7f),
    skia::Color::from_argb(255, 0xbc, 0xbd, 0x22),
    skia::Color::from_argb(255, 0x17, 0xbe, 0xcf),
];

/// Style for one render. Built fresh per call and applied to that call's
/// canvas only.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub text: skia::Color,
    pub title: skia::Color,
    pub grid: skia::Color,
    pub reference_line: skia::Color,
    pub legend_fill: skia::Color,
    pub palette: &'static [skia::Color],
    pub title_size: f32,
    pub axis_label_size: f32,
    pub tick_size: f32,
    pub bar_label_size: f32,
    pub legend_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 0x2c, 0x32, 0x41),
            text: skia::Color::from_argb(255, 0xe0, 0xe0, 0xe0),
            title: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            grid: skia::Color::from_argb(77, 0xe0, 0xe0, 0xe0), // 30%
            reference_line: skia::Color::from_argb(255, 0xff, 0x6b, 0x6b),
            legend_fill: skia::Color::from_argb(255, 0x1a, 0x1e, 0x2b),
            palette: &TAB10,
            title_size: 22.0,
            axis_label_size: 17.0,
            tick_size: 14.0,
            bar_label_size: 12.5,
            legend_size: 14.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            text: skia::Color::from_argb(255, 40, 40, 50),
            title: skia::Color::from_argb(255, 20, 20, 30),
            grid: skia::Color::from_argb(77, 60, 60, 70),
            reference_line: skia::Color::from_argb(255, 0xd6, 0x27, 0x28),
            legend_fill: skia::Color::from_argb(255, 235, 235, 240),
            ..Self::dark()
        }
    }

    /// Color of bar `index` in a chart of `count` bars. The palette repeats
    /// once `count` exceeds its length.
    pub fn bar_color(&self, index: usize, count: usize) -> skia::Color {
        if self.palette.is_empty() || count == 0 {
            return self.text;
        }
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::dark)
}
