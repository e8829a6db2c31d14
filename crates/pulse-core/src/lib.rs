// File: crates/pulse-core/src/lib.rs
// Summary: Core library entry point; exports the chart model, renderers, interaction driver and SVG output.

pub mod axis;
pub mod bar;
pub mod chart;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod hover;
pub mod instance;
pub mod legend;
pub mod line;
pub mod scale;
pub mod scene;
pub mod series;
pub mod svg;
pub mod text;
pub mod theme;
pub mod tooltip;
pub mod types;
pub mod visibility;

pub use bar::BarChart;
pub use chart::{ChartView, Frame, RenderOptions, PLACEHOLDER_TEXT};
pub use error::{ChartError, Result};
pub use format::format_compact;
pub use hover::{HoverState, Interaction, Outcome, PointerEvent};
pub use instance::InstanceId;
pub use legend::LegendEntry;
pub use line::{CacheStats, LineChart, PathCache};
pub use scale::{BarDomain, LineDomain};
pub use scene::{Role, Scene};
pub use series::{CategoryDatum, Point, Series};
pub use svg::{to_svg, write_svg};
pub use theme::Theme;
pub use types::{Insets, Rgba};
pub use visibility::Visibility;
