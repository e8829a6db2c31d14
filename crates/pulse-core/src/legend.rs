// File: crates/pulse-core/src/legend.rs
// Summary: Legend pills shared by both charts: layout, hit-testing and scene emission.
// Notes:
// - Every input entry gets exactly one pill, hidden or not.
// - Clicking a pill only reports its id; the host owns the `hidden` flag.

use crate::geometry::RectF;
use crate::scene::{Node, Paint, Role, Scene, Shape, TextAnchor};
use crate::series::{CategoryDatum, Series};
use crate::text::measure_width;
use crate::theme::Theme;
use crate::types::Rgba;

/// Host callback invoked with the id of a clicked legend pill.
pub type ToggleFn<'a> = Box<dyn FnMut(&str) + 'a>;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub id: String,
    pub label: String,
    pub color: Rgba,
    pub hidden: bool,
}

impl From<&Series> for LegendEntry {
    fn from(s: &Series) -> Self {
        Self { id: s.id.clone(), label: s.label.clone(), color: s.color, hidden: s.hidden }
    }
}

impl From<&CategoryDatum> for LegendEntry {
    fn from(d: &CategoryDatum) -> Self {
        Self { id: d.id.clone(), label: d.label.clone(), color: d.color, hidden: d.hidden }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendStyle {
    /// Outer margin of the legend block from the scene edge.
    pub margin: f32,
    /// Gap between the legend block and the plot's top inset.
    pub spacing: f32,
    pub pill_height: f32,
    pub pill_padding: f32,
    pub gap: f32,
    pub row_gap: f32,
    pub swatch: f32,
    pub font_size: f32,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            margin: 8.0,
            spacing: 4.0,
            pill_height: 22.0,
            pill_padding: 10.0,
            gap: 8.0,
            row_gap: 6.0,
            swatch: 8.0,
            font_size: 12.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendPill {
    pub id: String,
    pub rect: RectF,
    pub hidden: bool,
}

#[derive(Clone, Debug, Default)]
pub struct LegendLayout {
    pub pills: Vec<LegendPill>,
    top: f32,
}

impl LegendLayout {
    /// Lay pills out left to right from (`left`, `top`), wrapping to a new row
    /// when the next pill would pass `left + max_width`.
    pub fn compute(entries: &[LegendEntry], left: f32, top: f32, max_width: f32, style: &LegendStyle) -> Self {
        let mut pills = Vec::with_capacity(entries.len());
        let mut x = left;
        let mut y = top;
        for e in entries {
            let w = pill_width(&e.label, style);
            if x > left && x + w > left + max_width {
                x = left;
                y += style.pill_height + style.row_gap;
            }
            pills.push(LegendPill {
                id: e.id.clone(),
                rect: RectF::from_ltwh(x, y, w, style.pill_height),
                hidden: e.hidden,
            });
            x += w + style.gap;
        }
        Self { pills, top }
    }

    /// Bottom edge of the last row; the block's top when there are no pills.
    pub fn bottom(&self) -> f32 {
        self.pills.iter().map(|p| p.rect.bottom).fold(self.top, f32::max)
    }

    /// Id of the pill under a point. The first pill wins if ids repeat.
    pub fn hit(&self, x: f32, y: f32) -> Option<&str> {
        self.pills.iter().find(|p| p.rect.contains(x, y)).map(|p| p.id.as_str())
    }

    pub fn emit(&self, scene: &mut Scene, entries: &[LegendEntry], theme: &Theme, style: &LegendStyle, draw_labels: bool) {
        for (pill, entry) in self.pills.iter().zip(entries) {
            let r = pill.rect;
            let (fill, swatch, text) = if entry.hidden {
                (theme.legend_fill_hidden, theme.muted, theme.muted)
            } else {
                (theme.legend_fill, entry.color, theme.text)
            };
            scene.push(
                Node::new(
                    Role::LegendPill,
                    Shape::Rect { rect: r, fill: Paint::Solid(fill), stroke: None, radius: r.height() * 0.5 },
                )
                .key(&entry.id),
            );
            scene.push(
                Node::new(
                    Role::LegendSwatch,
                    Shape::Circle {
                        center: (r.left + style.pill_padding + style.swatch * 0.5, r.center_y()),
                        radius: style.swatch * 0.5,
                        fill: swatch,
                    },
                )
                .key(&entry.id),
            );
            if draw_labels {
                scene.push(
                    Node::new(
                        Role::LegendLabel,
                        Shape::Text {
                            pos: (r.left + style.pill_padding + style.swatch + 6.0, r.center_y() + style.font_size * 0.35),
                            text: entry.label.clone(),
                            size: style.font_size,
                            color: text,
                            anchor: TextAnchor::Start,
                            bold: false,
                        },
                    )
                    .key(&entry.id),
                );
            }
        }
    }
}

fn pill_width(label: &str, style: &LegendStyle) -> f32 {
    style.pill_padding * 2.0 + style.swatch + 6.0 + measure_width(label, style.font_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> LegendEntry {
        LegendEntry { id: id.into(), label: format!("Label {id}"), color: Rgba::rgb(1, 2, 3), hidden: false }
    }

    #[test]
    fn wraps_when_row_is_full() {
        let style = LegendStyle::default();
        let entries: Vec<_> = (0..6).map(|i| entry(&i.to_string())).collect();
        let layout = LegendLayout::compute(&entries, 0.0, 0.0, 200.0, &style);
        assert_eq!(layout.pills.len(), 6);
        let rows: std::collections::BTreeSet<u32> = layout.pills.iter().map(|p| p.rect.top as u32).collect();
        assert!(rows.len() > 1, "expected wrapping into several rows");
        assert!(layout.bottom() > style.pill_height);
    }

    #[test]
    fn hit_returns_pill_id() {
        let style = LegendStyle::default();
        let entries = vec![entry("a"), entry("b")];
        let layout = LegendLayout::compute(&entries, 0.0, 0.0, 1000.0, &style);
        let b = layout.pills[1].rect;
        assert_eq!(layout.hit(b.center_x(), b.center_y()), Some("b"));
        assert_eq!(layout.hit(-5.0, -5.0), None);
    }
}
