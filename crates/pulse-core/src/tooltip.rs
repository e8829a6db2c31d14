// File: crates/pulse-core/src/tooltip.rs
// Summary: Floating tooltip box: sizing, placement (beside a guide or above a bar) and scene emission.

use crate::geometry::{clamp, RectF};
use crate::scene::{Node, Paint, Role, Scene, Shape, TextAnchor};
use crate::text::measure_width;
use crate::theme::Theme;
use crate::types::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipStyle {
    pub padding: f32,
    pub row_height: f32,
    /// Distance between the anchor and the box.
    pub offset: f32,
    pub font_size: f32,
    pub swatch: f32,
    pub radius: f32,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self { padding: 8.0, row_height: 16.0, offset: 12.0, font_size: 11.0, swatch: 6.0, radius: 6.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipRow {
    pub label: Option<String>,
    pub value: String,
    pub color: Rgba,
}

impl TooltipRow {
    pub fn text(&self) -> String {
        match &self.label {
            Some(label) => format!("{label}: {}", self.value),
            None => self.value.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Box starts `offset` to the right of `x`, top at `y`.
    RightOf { x: f32, y: f32 },
    /// Box ends `offset` to the left of `x`, top at `y`.
    LeftOf { x: f32, y: f32 },
    /// Box centered on `x`, bottom `offset` above `y`.
    Above { x: f32, y: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub header: Option<String>,
    pub rows: Vec<TooltipRow>,
    pub placement: Placement,
}

impl Tooltip {
    fn size(&self, style: &TooltipStyle) -> (f32, f32) {
        let header_w = self.header.as_deref().map(|h| measure_width(h, style.font_size)).unwrap_or(0.0);
        let rows_w = self
            .rows
            .iter()
            .map(|r| style.swatch + 6.0 + measure_width(&r.text(), style.font_size))
            .fold(0.0f32, f32::max);
        let lines = self.rows.len() + usize::from(self.header.is_some());
        (header_w.max(rows_w) + style.padding * 2.0, lines as f32 * style.row_height + style.padding * 2.0)
    }

    /// Box rectangle, kept inside `bounds` whenever it fits.
    pub fn rect(&self, style: &TooltipStyle, bounds: RectF) -> RectF {
        let (w, h) = self.size(style);
        let (left, top) = match self.placement {
            Placement::RightOf { x, y } => (x + style.offset, y),
            Placement::LeftOf { x, y } => (x - style.offset - w, y),
            Placement::Above { x, y } => (x - w * 0.5, y - style.offset - h),
        };
        let left = clamp(left, bounds.left, (bounds.right - w).max(bounds.left));
        let top = clamp(top, bounds.top, (bounds.bottom - h).max(bounds.top));
        RectF::from_ltwh(left, top, w, h)
    }

    pub fn emit(&self, scene: &mut Scene, theme: &Theme, style: &TooltipStyle, bounds: RectF, draw_labels: bool) {
        let r = self.rect(style, bounds);
        scene.push(Node::new(
            Role::Tooltip,
            Shape::Rect { rect: r, fill: Paint::Solid(theme.tooltip_fill), stroke: Some(theme.tooltip_border), radius: style.radius },
        ));
        if !draw_labels {
            return;
        }
        let baseline = |line: usize| r.top + style.padding + style.row_height * (line as f32 + 0.75);
        let mut line = 0;
        if let Some(header) = &self.header {
            scene.push(Node::new(
                Role::TooltipText,
                Shape::Text {
                    pos: (r.left + style.padding, baseline(line)),
                    text: header.clone(),
                    size: style.font_size,
                    color: theme.axis_label,
                    anchor: TextAnchor::Start,
                    bold: true,
                },
            ));
            line += 1;
        }
        for row in &self.rows {
            let y = baseline(line);
            if row.label.is_some() {
                scene.push(Node::new(
                    Role::TooltipSwatch,
                    Shape::Circle {
                        center: (r.left + style.padding + style.swatch * 0.5, y - style.font_size * 0.35),
                        radius: style.swatch * 0.5,
                        fill: row.color,
                    },
                ));
            }
            let x = if row.label.is_some() { r.left + style.padding + style.swatch + 6.0 } else { r.left + style.padding };
            scene.push(Node::new(
                Role::TooltipText,
                Shape::Text {
                    pos: (x, y),
                    text: row.text(),
                    size: style.font_size,
                    color: theme.tooltip_text,
                    anchor: TextAnchor::Start,
                    bold: false,
                },
            ));
            line += 1;
        }
    }
}
