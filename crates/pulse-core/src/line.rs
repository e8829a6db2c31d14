// File: crates/pulse-core/src/line.rs
// Summary: Series (line) chart: shared domain over visible series, gridlines, polylines, hover guide and tooltip.
// Notes:
// - Series are positional; a shorter series simply stops early (no interpolation).
// - Per-series pixel paths are memoized so hover-only re-renders skip geometry.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::axis::x_label_indices;
use crate::chart::{push_placeholder, ChartView, Frame, RenderOptions};
use crate::format::{self, Formatter};
use crate::geometry::RectF;
use crate::grid::{gridlines, zero_line};
use crate::hover::HoverState;
use crate::instance::InstanceId;
use crate::legend::{LegendEntry, ToggleFn};
use crate::scale::{IndexScale, LineDomain, ValueScale};
use crate::scene::{Def, Node, Role, Scene, Shape, TextAnchor};
use crate::series::{active_series, validate_ids, Series};
use crate::tooltip::{Placement, Tooltip, TooltipRow};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PathKey {
    data_ptr: usize,
    data_len: usize,
    bucket_count: usize,
    domain: [u64; 2],
    plot: [u32; 4],
}

/// Run of consecutive finite points in pixel space.
type Segment = Vec<(f32, f32)>;

/// Memoized pixel paths keyed by series id.
///
/// A chart owns one by default. Hosts that rebuild the chart for every event
/// keep a `PathCache` of their own and lend it with
/// [`LineChart::with_path_cache`], so paths survive across rebuilds. Entries
/// are keyed by the data's address and length, so datasets must not be
/// edited in place while the cache is in use.
#[derive(Debug, Default)]
pub struct PathCache {
    entries: RefCell<HashMap<String, (PathKey, Vec<Segment>)>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats { hits: self.hits.get(), misses: self.misses.get() }
    }
}

/// Hit/miss counters of the path cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct LineChart<'a> {
    datasets: &'a [Series],
    options: RenderOptions,
    instance: InstanceId,
    y_formatter: Option<Formatter<'a>>,
    on_toggle: Option<ToggleFn<'a>>,
    cache: PathCache,
    shared_cache: Option<&'a PathCache>,
}

impl<'a> LineChart<'a> {
    pub fn new(datasets: &'a [Series]) -> Self {
        if let Err(e) = validate_ids(datasets.iter().map(|s| s.id.as_str())) {
            warn!("line chart: {e}");
        }
        Self {
            datasets,
            options: RenderOptions::default(),
            instance: InstanceId::next(),
            y_formatter: None,
            on_toggle: None,
            cache: PathCache::default(),
            shared_cache: None,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Keep the scoping token of an earlier mount when a host rebuilds the chart.
    pub fn with_instance(mut self, instance: InstanceId) -> Self {
        self.instance = instance;
        self
    }

    /// Use a host-owned path cache instead of the chart's own.
    pub fn with_path_cache(mut self, cache: &'a PathCache) -> Self {
        self.shared_cache = Some(cache);
        self
    }

    pub fn with_y_formatter(mut self, f: impl Fn(f64) -> String + 'a) -> Self {
        self.y_formatter = Some(Box::new(f));
        self
    }

    pub fn with_on_toggle(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_toggle = Some(Box::new(f));
        self
    }

    pub fn datasets(&self) -> &'a [Series] {
        self.datasets
    }

    /// Shared value domain over every visible point; `None` when nothing is visible.
    pub fn domain(&self) -> Option<LineDomain> {
        let mut active = active_series(self.datasets).peekable();
        active.peek()?;
        Some(LineDomain::from_values(active.flat_map(|s| s.data.iter().map(|p| p.value))))
    }

    /// Longest visible series; drives the X spacing.
    pub fn data_length(&self) -> usize {
        active_series(self.datasets).map(|s| s.data.len()).max().unwrap_or(0)
    }

    pub fn index_scale(&self, plot: RectF) -> IndexScale {
        IndexScale::new(plot.left, plot.right, self.data_length())
    }

    /// Bucket under a pointer x, clamped into range. Ignores y.
    pub fn hover_index_at(&self, x: f32) -> Option<usize> {
        let frame = self.frame();
        self.index_scale(frame.plot).index_at(x)
    }

    /// Visible series values at `index`, largest first. Series that end
    /// before `index` are left out.
    pub fn tooltip_rows(&self, index: usize) -> Vec<TooltipRow> {
        let mut values: Vec<(&Series, f64)> = active_series(self.datasets)
            .filter_map(|s| s.value_at(index).map(|v| (s, v)))
            .collect();
        values.sort_by(|a, b| b.1.total_cmp(&a.1));
        values
            .into_iter()
            .map(|(s, v)| TooltipRow {
                label: Some(s.label.clone()),
                value: format::apply(self.y_formatter.as_ref(), v),
                color: s.color,
            })
            .collect()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.path_cache().stats()
    }

    fn path_cache(&self) -> &PathCache {
        self.shared_cache.unwrap_or(&self.cache)
    }

    fn format_value(&self, v: f64) -> String {
        format::apply(self.y_formatter.as_ref(), v)
    }

    /// Date label of bucket `index`, taken from the longest visible series.
    fn date_at(&self, index: usize) -> Option<&'a str> {
        let len = self.data_length();
        active_series(self.datasets)
            .find(|s| s.data.len() == len)
            .and_then(|s| s.data.get(index))
            .map(|p| p.date.as_str())
    }

    /// Pixel path of a series, split wherever a value is not finite.
    fn path_for(&self, series: &Series, xs: &IndexScale, ys: &ValueScale, domain: &LineDomain, plot: RectF) -> Vec<Segment> {
        let key = PathKey {
            data_ptr: series.data.as_ptr() as usize,
            data_len: series.data.len(),
            bucket_count: xs.len,
            domain: domain.key_bits(),
            plot: plot.key_bits(),
        };
        let cache = self.path_cache();
        let mut entries = cache.entries.borrow_mut();
        if let Some((cached_key, segments)) = entries.get(&series.id) {
            if *cached_key == key {
                cache.hits.set(cache.hits.get() + 1);
                trace!(series = %series.id, "path cache hit");
                return segments.clone();
            }
        }
        cache.misses.set(cache.misses.get() + 1);
        let mut segments: Vec<Segment> = Vec::new();
        let mut current: Segment = Vec::new();
        for (i, p) in series.data.iter().take(xs.len).enumerate() {
            if p.value.is_finite() {
                current.push((xs.to_px(i), ys.to_px(p.value)));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        if segments.len() > 1 {
            debug!(series = %series.id, segments = segments.len(), "series split at non-finite values");
        }
        entries.insert(series.id.clone(), (key, segments.clone()));
        segments
    }

    fn push_series(&self, scene: &mut Scene, series: &Series, segments: &[Segment], opacity: f32, clip: &str) {
        let o = &self.options;
        let width = if series.is_aggregate() { o.heavy_stroke } else { o.stroke };
        for points in segments {
            let shape = match points.len() {
                0 => continue,
                1 => Shape::Circle { center: points[0], radius: width + 1.0, fill: series.color },
                _ => Shape::Polyline { points: points.clone(), color: series.color, width },
            };
            scene.push(Node::new(Role::SeriesLine, shape).key(&series.id).opacity(opacity).clip(clip));
        }
    }
}

impl ChartView for LineChart<'_> {
    fn instance(&self) -> InstanceId {
        self.instance
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn legend_entries(&self) -> Vec<LegendEntry> {
        self.datasets.iter().map(LegendEntry::from).collect()
    }

    fn render(&self, hover: &HoverState) -> Scene {
        let o = &self.options;
        let theme = &o.theme;
        let mut scene = Scene::new(o.width, o.height, self.instance, theme.background);
        let entries = self.legend_entries();
        let Frame { legend, plot } = Frame::compute(o, &entries);
        legend.emit(&mut scene, &entries, theme, &o.legend, o.draw_labels);

        let Some(domain) = self.domain() else {
            debug!(instance = %self.instance, series = self.datasets.len(), "line chart: nothing visible");
            push_placeholder(&mut scene, plot, o);
            return scene;
        };
        let len = self.data_length();
        let xs = self.index_scale(plot);
        let ys = ValueScale::for_line(plot.top, plot.bottom, &domain);
        debug!(
            instance = %self.instance,
            active = active_series(self.datasets).count(),
            buckets = len,
            min = domain.display_min,
            max = domain.display_max,
            "line chart render"
        );

        let clip_id = self.instance.scoped("clip", "");
        scene.def(Def::Clip { id: clip_id.clone(), rect: plot });

        for g in gridlines(&domain, &ys) {
            scene.push(Node::new(
                Role::Gridline,
                Shape::Line { from: (plot.left, g.y_px), to: (plot.right, g.y_px), color: theme.grid, width: 1.0, dashed: true },
            ));
            if o.draw_labels {
                scene.push(Node::new(
                    Role::AxisLabel,
                    Shape::Text {
                        pos: (plot.left - 8.0, g.y_px + o.font_size * 0.35),
                        text: self.format_value(g.value),
                        size: o.font_size,
                        color: theme.axis_label,
                        anchor: TextAnchor::End,
                        bold: false,
                    },
                ));
            }
        }
        if let Some(y) = zero_line(&domain, &ys) {
            scene.push(Node::new(
                Role::ZeroLine,
                Shape::Line { from: (plot.left, y), to: (plot.right, y), color: theme.zero_line, width: 1.0, dashed: false },
            ));
        }
        if o.draw_labels {
            for i in x_label_indices(len, o.max_x_labels) {
                if let Some(date) = self.date_at(i) {
                    let anchor = match i {
                        0 if len > 1 => TextAnchor::Start,
                        _ if i + 1 == len && len > 1 => TextAnchor::End,
                        _ => TextAnchor::Middle,
                    };
                    scene.push(Node::new(
                        Role::AxisLabel,
                        Shape::Text {
                            pos: (xs.to_px(i), plot.bottom + o.font_size + 8.0),
                            text: date.to_string(),
                            size: o.font_size,
                            color: theme.axis_label,
                            anchor,
                            bold: false,
                        },
                    ));
                }
            }
        }

        let hovered = hover.index().filter(|&i| i < len);
        let base_opacity = if hovered.is_some() { o.dim_opacity } else { 1.0 };
        for s in active_series(self.datasets) {
            let segments = self.path_for(s, &xs, &ys, &domain, plot);
            self.push_series(&mut scene, s, &segments, base_opacity, &clip_id);
        }

        let Some(index) = hovered else {
            return scene;
        };
        let x = xs.to_px(index);

        scene.push(Node::new(
            Role::HoverGuide,
            Shape::Line { from: (x, plot.top), to: (x, plot.bottom), color: theme.guide, width: 1.0, dashed: false },
        ));
        for s in active_series(self.datasets) {
            if let Some(v) = s.value_at(index) {
                scene.push(
                    Node::new(Role::SeriesOverlay, Shape::Circle { center: (x, ys.to_px(v)), radius: 4.0, fill: s.color })
                        .key(&s.id),
                );
            }
        }

        let anchor_y = plot.top + o.tooltip.offset;
        let placement = if index * 2 > len.saturating_sub(1) {
            Placement::LeftOf { x, y: anchor_y }
        } else {
            Placement::RightOf { x, y: anchor_y }
        };
        let tooltip = Tooltip {
            header: self.date_at(index).map(str::to_string),
            rows: self.tooltip_rows(index),
            placement,
        };
        tooltip.emit(&mut scene, theme, &o.tooltip, o.bounds(), o.draw_labels);
        scene
    }

    fn hover_for(&self, x: f32, y: f32) -> HoverState {
        let frame = self.frame();
        if !frame.plot.contains(x, y) {
            return HoverState::None;
        }
        match self.index_scale(frame.plot).index_at(x) {
            Some(i) => HoverState::Index(i),
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
