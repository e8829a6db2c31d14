// File: crates/pulse-core/src/bar.rs
// Summary: Category (bar) chart: one gradient-filled bar per visible category with per-bar hover.

use tracing::{debug, warn};

use crate::chart::{push_placeholder, ChartView, Frame, RenderOptions};
use crate::format::{self, Formatter};
use crate::geometry::RectF;
use crate::grid::GRID_FRACTIONS;
use crate::hover::HoverState;
use crate::instance::InstanceId;
use crate::legend::{LegendEntry, ToggleFn};
use crate::scale::{BarDomain, ValueScale};
use crate::scene::{Def, LinearGradient, Node, Paint, Role, Scene, Shape, TextAnchor};
use crate::series::{active_categories, validate_ids, CategoryDatum};
use crate::tooltip::{Placement, Tooltip, TooltipRow};

/// Smallest hit height so zero-value bars can still be hovered.
const MIN_HIT_HEIGHT: f32 = 2.0;

/// Horizontal placement of one bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSlot {
    pub left: f32,
    pub width: f32,
}

impl BarSlot {
    pub fn center(&self) -> f32 {
        self.left + self.width * 0.5
    }
}

/// Uniform widths (capped at `max_width`) and uniform gaps that together fill
/// `plot`. Half a gap sits at each edge, so a lone bar is centered.
pub fn layout_bars(plot: RectF, count: usize, gap_ratio: f32, max_width: f32) -> Vec<BarSlot> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as f32;
    let slot = plot.width() / n;
    let width = (slot * (1.0 - gap_ratio.clamp(0.0, 0.95))).min(max_width).max(1.0);
    let gap = ((plot.width() - n * width) / n).max(0.0);
    (0..count)
        .map(|i| BarSlot { left: plot.left + gap * 0.5 + i as f32 * (width + gap), width })
        .collect()
}

pub struct BarChart<'a> {
    data: &'a [CategoryDatum],
    options: RenderOptions,
    instance: InstanceId,
    formatter: Option<Formatter<'a>>,
    on_toggle: Option<ToggleFn<'a>>,
}

impl<'a> BarChart<'a> {
    pub fn new(data: &'a [CategoryDatum]) -> Self {
        if let Err(e) = validate_ids(data.iter().map(|d| d.id.as_str())) {
            warn!("bar chart: {e}");
        }
        Self { data, options: RenderOptions::default(), instance: InstanceId::next(), formatter: None, on_toggle: None }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_instance(mut self, instance: InstanceId) -> Self {
        self.instance = instance;
        self
    }

    pub fn with_formatter(mut self, f: impl Fn(f64) -> String + 'a) -> Self {
        self.formatter = Some(Box::new(f));
        self
    }

    pub fn with_on_toggle(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_toggle = Some(Box::new(f));
        self
    }

    /// `None` when every category is hidden.
    pub fn domain(&self) -> Option<BarDomain> {
        let mut active = active_categories(self.data).peekable();
        active.peek()?;
        Some(BarDomain::from_values(active.map(|d| d.value)))
    }

    /// Rectangles of the visible bars, in input order.
    pub fn bar_rects(&self, plot: RectF) -> Vec<(&'a CategoryDatum, RectF)> {
        let Some(domain) = self.domain() else {
            return Vec::new();
        };
        let ys = ValueScale::for_bars(plot.top, plot.bottom, &domain);
        let active: Vec<&'a CategoryDatum> = active_categories(self.data).collect();
        let slots = layout_bars(plot, active.len(), self.options.bar_gap_ratio, self.options.max_bar_width);
        active
            .into_iter()
            .zip(slots)
            .map(|(d, slot)| {
                let top = ys.to_px(d.value.max(0.0)).clamp(plot.top, plot.bottom);
                (d, RectF::from_ltrb(slot.left, top, slot.left + slot.width, plot.bottom))
            })
            .collect()
    }

    /// Id of the visible bar under a point.
    pub fn bar_at(&self, x: f32, y: f32) -> Option<&'a str> {
        let frame = self.frame();
        self.bar_rects(frame.plot)
            .into_iter()
            .find(|(_, r)| {
                let hit = RectF::from_ltrb(r.left, r.top.min(r.bottom - MIN_HIT_HEIGHT), r.right, r.bottom);
                hit.contains(x, y)
            })
            .map(|(d, _)| d.id.as_str())
    }

    fn format_value(&self, v: f64) -> String {
        format::apply(self.formatter.as_ref(), v)
    }
}

impl ChartView for BarChart<'_> {
    fn instance(&self) -> InstanceId {
        self.instance
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn legend_entries(&self) -> Vec<LegendEntry> {
        self.data.iter().map(LegendEntry::from).collect()
    }

    fn render(&self, hover: &HoverState) -> Scene {
        let o = &self.options;
        let theme = &o.theme;
        let mut scene = Scene::new(o.width, o.height, self.instance, theme.background);
        let entries = self.legend_entries();
        let Frame { legend, plot } = Frame::compute(o, &entries);
        legend.emit(&mut scene, &entries, theme, &o.legend, o.draw_labels);

        let Some(domain) = self.domain() else {
            debug!(instance = %self.instance, categories = self.data.len(), "bar chart: nothing visible");
            push_placeholder(&mut scene, plot, o);
            return scene;
        };
        let ys = ValueScale::for_bars(plot.top, plot.bottom, &domain);
        let bars = self.bar_rects(plot);
        debug!(instance = %self.instance, active = bars.len(), max = domain.max, "bar chart render");

        for t in GRID_FRACTIONS {
            let value = domain.max * t;
            let y = ys.to_px(value);
            scene.push(Node::new(
                Role::Gridline,
                Shape::Line { from: (plot.left, y), to: (plot.right, y), color: theme.grid, width: 1.0, dashed: t > 0.0 },
            ));
            if o.draw_labels {
                scene.push(Node::new(
                    Role::AxisLabel,
                    Shape::Text {
                        pos: (plot.left - 8.0, y + o.font_size * 0.35),
                        text: self.format_value(value),
                        size: o.font_size,
                        color: theme.axis_label,
                        anchor: TextAnchor::End,
                        bold: false,
                    },
                ));
            }
        }

        let hovered = hover.bar();
        for (i, (d, rect)) in bars.iter().enumerate() {
            let grad_id = self.instance.scoped("grad", &format!("{i}-{}", d.id));
            scene.def(Def::Gradient(LinearGradient {
                id: grad_id.clone(),
                top: d.color,
                bottom: d.color.with_opacity(o.bar_fade),
            }));
            let opacity = match hovered {
                Some(h) if h != d.id => 0.7,
                _ => 1.0,
            };
            scene.push(
                Node::new(
                    Role::Bar,
                    Shape::Rect { rect: *rect, fill: Paint::Gradient(grad_id), stroke: None, radius: o.bar_radius.min(rect.width() * 0.5) },
                )
                .key(&d.id)
                .opacity(opacity),
            );
            if o.draw_labels {
                scene.push(
                    Node::new(
                        Role::AxisLabel,
                        Shape::Text {
                            pos: (rect.center_x(), plot.bottom + o.font_size + 8.0),
                            text: d.label.clone(),
                            size: o.font_size,
                            color: theme.axis_label,
                            anchor: TextAnchor::Middle,
                            bold: false,
                        },
                    )
                    .key(&d.id),
                );
            }
        }

        if let Some((d, rect)) = hovered.and_then(|h| bars.iter().find(|(d, _)| d.id == h)) {
            let tooltip = Tooltip {
                header: Some(d.label.clone()),
                rows: vec![TooltipRow { label: None, value: self.format_value(d.value), color: d.color }],
                placement: Placement::Above { x: rect.center_x(), y: rect.top },
            };
            tooltip.emit(&mut scene, theme, &o.tooltip, o.bounds(), o.draw_labels);
        }
        scene
    }

    fn hover_for(&self, x: f32, y: f32) -> HoverState {
        match self.bar_at(x, y) {
            Some(id) => HoverState::Bar(id.to_string()),
            None => HoverState::None,
        }
    }

    fn handle_click(&mut self, x: f32, y: f32) -> Option<String> {
        let frame = self.frame();
        let id = frame.legend.hit(x, y)?.to_string();
        debug!(instance = %self.instance, id = %id, "legend toggle");
        if let Some(cb) = self.on_toggle.as_mut() {
            cb(&id);
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_bar_is_centered() {
        let plot = RectF::from_ltrb(50.0, 0.0, 450.0, 100.0);
        let slots = layout_bars(plot, 1, 0.3, 64.0);
        assert_eq!(slots.len(), 1);
        assert!((slots[0].center() - plot.center_x()).abs() < 1e-3);
        assert_eq!(slots[0].width, 64.0);
    }

    #[test]
    fn bars_fill_plot_with_uniform_gaps() {
        let plot = RectF::from_ltrb(0.0, 0.0, 300.0, 100.0);
        let slots = layout_bars(plot, 3, 0.3, 1000.0);
        let gaps: Vec<f32> = slots.windows(2).map(|w| w[1].left - (w[0].left + w[0].width)).collect();
        assert!((gaps[0] - gaps[1]).abs() < 1e-3);
        let last = slots.last().unwrap();
        assert!((300.0 - (last.left + last.width) - gaps[0] * 0.5).abs() < 1e-3);
    }
}
