// File: crates/pulse-core/src/hover.rs
// Summary: Transient hover state and the host-side pointer driver (last write wins, leave always clears).

use crate::chart::ChartView;

/// Hover state kept per mounted chart; never part of the input data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    None,
    /// Line chart: bucket index under the pointer.
    Index(usize),
    /// Bar chart: id of the bar under the pointer.
    Bar(String),
}

impl HoverState {
    pub fn is_none(&self) -> bool {
        matches!(self, HoverState::None)
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            HoverState::Index(i) => Some(*i),
            _ => None,
        }
    }

    pub fn bar(&self) -> Option<&str> {
        match self {
            HoverState::Bar(id) => Some(id),
            _ => None,
        }
    }
}

/// Pointer input in scene pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move { x: f32, y: f32 },
    /// Pointer left the chart container.
    Leave,
    Click { x: f32, y: f32 },
}

/// Result of feeding one pointer event through [`Interaction::apply`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Hover or visibility changed; the host should render again.
    pub redraw: bool,
    /// Legend pill the click landed on.
    pub toggled: Option<String>,
}

/// Host-side pointer driver. Each event overwrites the previous hover state,
/// so a `Leave` after any number of `Move`s always ends with no hover.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    hover: HoverState,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn clear(&mut self) {
        self.hover = HoverState::None;
    }

    pub fn apply<C: ChartView + ?Sized>(&mut self, chart: &mut C, event: PointerEvent) -> Outcome {
        match event {
            PointerEvent::Move { x, y } => {
                let next = chart.hover_for(x, y);
                let redraw = next != self.hover;
                self.hover = next;
                Outcome { redraw, toggled: None }
            }
            PointerEvent::Leave => {
                let redraw = !self.hover.is_none();
                self.clear();
                Outcome { redraw, toggled: None }
            }
            PointerEvent::Click { x, y } => {
                let toggled = chart.handle_click(x, y);
                Outcome { redraw: toggled.is_some(), toggled }
            }
        }
    }
}
