// File: crates/pulse-core/src/chart.rs
// Summary: Render options, the shared ChartView contract, and the legend/plot frame both charts lay out.

use crate::geometry::RectF;
use crate::hover::HoverState;
use crate::instance::InstanceId;
use crate::legend::{LegendEntry, LegendLayout, LegendStyle};
use crate::scene::{Node, Role, Scene, Shape, TextAnchor};
use crate::theme::Theme;
use crate::tooltip::TooltipStyle;
use crate::types::{Insets, HEIGHT, WIDTH};

/// Shown instead of axes when every entry is hidden.
pub const PLACEHOLDER_TEXT: &str = "No data selected...";

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    /// Margins around the plot area; the legend sits above `insets.top`.
    pub insets: Insets,
    pub theme: Theme,
    /// Axis labels, legend labels and tooltip text. Off for pixel snapshots.
    pub draw_labels: bool,
    pub font_size: f32,
    pub stroke: f32,
    /// Stroke for the aggregate ("overall"/"growth") series.
    pub heavy_stroke: f32,
    /// Opacity of every series line while the chart is hovered.
    pub dim_opacity: f32,
    pub max_x_labels: usize,
    pub max_bar_width: f32,
    /// Share of each bar slot left empty.
    pub bar_gap_ratio: f32,
    pub bar_radius: f32,
    /// Opacity at the bottom of the bar gradient.
    pub bar_fade: f32,
    pub legend: LegendStyle,
    pub tooltip: TooltipStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::dark(),
            draw_labels: true,
            font_size: 11.0,
            stroke: 2.0,
            heavy_stroke: 3.0,
            dim_opacity: 0.3,
            max_x_labels: 6,
            max_bar_width: 64.0,
            bar_gap_ratio: 0.3,
            bar_radius: 4.0,
            bar_fade: 0.6,
            legend: LegendStyle::default(),
            tooltip: TooltipStyle::default(),
        }
    }
}

impl RenderOptions {
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub(crate) fn bounds(&self) -> RectF {
        RectF::from_ltwh(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

/// Common surface of the line and bar renderers. A host drives any chart
/// through this trait: render with the current hover, route pointer input,
/// and receive toggle requests.
pub trait ChartView {
    fn instance(&self) -> InstanceId;
    fn options(&self) -> &RenderOptions;
    /// One entry per input datum, hidden ones included.
    fn legend_entries(&self) -> Vec<LegendEntry>;
    fn render(&self, hover: &HoverState) -> Scene;
    /// Hover state for a pointer position; `None` outside the capture region.
    fn hover_for(&self, x: f32, y: f32) -> HoverState;
    /// Routes a click to the legend. Returns the toggled id after invoking the
    /// host's toggle callback; never changes visibility itself.
    fn handle_click(&mut self, x: f32, y: f32) -> Option<String>;

    fn frame(&self) -> Frame {
        Frame::compute(self.options(), &self.legend_entries())
    }
}

/// Legend row(s) on top, plot area underneath.
#[derive(Clone, Debug)]
pub struct Frame {
    pub legend: LegendLayout,
    pub plot: RectF,
}

impl Frame {
    pub fn compute(opts: &RenderOptions, entries: &[LegendEntry]) -> Self {
        let margin = opts.legend.margin;
        let legend = LegendLayout::compute(
            entries,
            margin,
            margin,
            (opts.width as f32 - 2.0 * margin).max(1.0),
            &opts.legend,
        );
        let top = legend.bottom() + opts.legend.spacing + opts.insets.top as f32;
        let left = opts.insets.left as f32;
        let right = (opts.width as f32 - opts.insets.right as f32).max(left + 1.0);
        let bottom = (opts.height as f32 - opts.insets.bottom as f32).max(top + 1.0);
        Self { legend, plot: RectF::from_ltrb(left, top, right, bottom) }
    }
}

/// Centered placeholder text in the plot area.
pub(crate) fn push_placeholder(scene: &mut Scene, plot: RectF, opts: &RenderOptions) {
    scene.push(Node::new(
        Role::Placeholder,
        Shape::Text {
            pos: (plot.center_x(), plot.center_y()),
            text: PLACEHOLDER_TEXT.to_string(),
            size: opts.font_size + 2.0,
            color: opts.theme.axis_label,
            anchor: TextAnchor::Middle,
            bold: false,
        },
    ));
}
