// File: crates/pulse-core/src/theme.rs
// Summary: Light/Dark theming for chart chrome (grid, legend, tooltip, text).

use crate::types::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub grid: Rgba,
    pub zero_line: Rgba,
    pub axis_label: Rgba,
    pub text: Rgba,
    pub muted: Rgba,
    pub legend_fill: Rgba,
    pub legend_fill_hidden: Rgba,
    pub guide: Rgba,
    pub tooltip_fill: Rgba,
    pub tooltip_border: Rgba,
    pub tooltip_text: Rgba,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            grid: Rgba::new(255, 255, 255, 18),
            zero_line: Rgba::new(255, 255, 255, 90),
            axis_label: Rgba::rgb(140, 140, 150),
            text: Rgba::rgb(235, 235, 245),
            muted: Rgba::rgb(82, 82, 91),
            legend_fill: Rgba::new(255, 255, 255, 16),
            legend_fill_hidden: Rgba::new(255, 255, 255, 6),
            guide: Rgba::new(255, 255, 255, 64),
            tooltip_fill: Rgba::new(24, 24, 27, 240),
            tooltip_border: Rgba::new(255, 255, 255, 30),
            tooltip_text: Rgba::rgb(244, 244, 245),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(250, 250, 252),
            grid: Rgba::new(0, 0, 0, 20),
            zero_line: Rgba::new(0, 0, 0, 110),
            axis_label: Rgba::rgb(100, 100, 110),
            text: Rgba::rgb(20, 20, 30),
            muted: Rgba::rgb(200, 200, 208),
            legend_fill: Rgba::new(0, 0, 0, 12),
            legend_fill_hidden: Rgba::new(0, 0, 0, 4),
            guide: Rgba::new(0, 0, 0, 60),
            tooltip_fill: Rgba::new(255, 255, 255, 245),
            tooltip_border: Rgba::new(0, 0, 0, 30),
            tooltip_text: Rgba::rgb(24, 24, 27),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: Rgba::rgb(0x00, 0x00, 0x00),
            grid: Rgba::rgb(0x22, 0x22, 0x22),
            zero_line: Rgba::rgb(0xff, 0xff, 0xff),
            axis_label: Rgba::rgb(0xcc, 0xcc, 0xcc),
            text: Rgba::rgb(0xff, 0xff, 0xff),
            muted: Rgba::rgb(0x55, 0x55, 0x55),
            legend_fill: Rgba::rgb(0x1a, 0x1a, 0x1a),
            legend_fill_hidden: Rgba::rgb(0x0a, 0x0a, 0x0a),
            guide: Rgba::rgb(0xff, 0xff, 0x00),
            tooltip_fill: Rgba::rgb(0x00, 0x00, 0x00),
            tooltip_border: Rgba::rgb(0xff, 0xff, 0xff),
            tooltip_text: Rgba::rgb(0xff, 0xff, 0xff),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}
