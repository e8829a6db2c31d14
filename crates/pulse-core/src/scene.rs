// File: crates/pulse-core/src/scene.rs
// Summary: Renderer-agnostic visual tree produced by the charts and consumed by SVG/raster backends.

use crate::geometry::RectF;
use crate::instance::InstanceId;
use crate::types::Rgba;

/// What a node represents; lets tests and backends find shapes without
/// depending on draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    LegendPill,
    LegendSwatch,
    LegendLabel,
    Placeholder,
    Gridline,
    ZeroLine,
    AxisLabel,
    SeriesLine,
    SeriesOverlay,
    Bar,
    HoverGuide,
    Tooltip,
    TooltipSwatch,
    TooltipText,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Background => "background",
            Role::LegendPill => "legend-pill",
            Role::LegendSwatch => "legend-swatch",
            Role::LegendLabel => "legend-label",
            Role::Placeholder => "placeholder",
            Role::Gridline => "gridline",
            Role::ZeroLine => "zero-line",
            Role::AxisLabel => "axis-label",
            Role::SeriesLine => "series-line",
            Role::SeriesOverlay => "series-overlay",
            Role::Bar => "bar",
            Role::HoverGuide => "hover-guide",
            Role::Tooltip => "tooltip",
            Role::TooltipSwatch => "tooltip-swatch",
            Role::TooltipText => "tooltip-text",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Reference to a gradient in [`Scene::defs`] by id.
    Gradient(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub id: String,
    /// Vertical gradient: `top` at y=0%, `bottom` at y=100%.
    pub top: Rgba,
    pub bottom: Rgba,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Def {
    Gradient(LinearGradient),
    Clip { id: String, rect: RectF },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect { rect: RectF, fill: Paint, stroke: Option<Rgba>, radius: f32 },
    Line { from: (f32, f32), to: (f32, f32), color: Rgba, width: f32, dashed: bool },
    Polyline { points: Vec<(f32, f32)>, color: Rgba, width: f32 },
    Circle { center: (f32, f32), radius: f32, fill: Rgba },
    Text { pos: (f32, f32), text: String, size: f32, color: Rgba, anchor: TextAnchor, bold: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub role: Role,
    /// Series/category id this node belongs to, when any.
    pub key: Option<String>,
    /// Group opacity applied on top of the shape colors.
    pub opacity: f32,
    /// Id of a clip def applied to this node.
    pub clip: Option<String>,
    pub shape: Shape,
}

impl Node {
    pub fn new(role: Role, shape: Shape) -> Self {
        Self { role, key: None, opacity: 1.0, clip: None, shape }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn clip(mut self, clip_id: impl Into<String>) -> Self {
        self.clip = Some(clip_id.into());
        self
    }

    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub width: i32,
    pub height: i32,
    pub instance: InstanceId,
    pub background: Rgba,
    pub defs: Vec<Def>,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(width: i32, height: i32, instance: InstanceId, background: Rgba) -> Self {
        Self { width, height, instance, background, defs: Vec::new(), nodes: Vec::new() }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn def(&mut self, def: Def) {
        self.defs.push(def);
    }

    pub fn nodes_with_role(&self, role: Role) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.role == role)
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.nodes_with_role(role).count()
    }

    /// Text content of every node with `role`, in draw order.
    pub fn texts(&self, role: Role) -> Vec<&str> {
        self.nodes_with_role(role).filter_map(Node::text).collect()
    }

    pub fn gradient(&self, id: &str) -> Option<&LinearGradient> {
        self.defs.iter().find_map(|d| match d {
            Def::Gradient(g) if g.id == id => Some(g),
            _ => None,
        })
    }

    pub fn has_placeholder(&self) -> bool {
        self.count_role(Role::Placeholder) > 0
    }
}
