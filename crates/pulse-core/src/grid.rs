// File: crates/pulse-core/src/grid.rs
// Summary: Grid/tick layout helpers.

use crate::scale::{LineDomain, ValueScale};

/// Fractions of the domain that receive a horizontal gridline.
pub const GRID_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gridline {
    pub value: f64,
    pub y_px: f32,
}

/// Gridlines at 0/25/50/75/100% of the display domain, bottom to top.
pub fn gridlines(domain: &LineDomain, scale: &ValueScale) -> Vec<Gridline> {
    GRID_FRACTIONS
        .iter()
        .map(|&t| {
            let value = domain.value_at_fraction(t);
            Gridline { value, y_px: scale.to_px(value) }
        })
        .collect()
}

/// Y of the zero reference line, only when the domain straddles zero.
pub fn zero_line(domain: &LineDomain, scale: &ValueScale) -> Option<f32> {
    domain.has_negative().then(|| scale.to_px(0.0))
}
