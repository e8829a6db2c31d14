// File: crates/pulse-window/src/app.rs
// Summary: Window-independent host state: datasets, visibility, hover and the active chart tab.

use pulse_core::{
    BarChart, CategoryDatum, ChartView, HoverState, InstanceId, Interaction, LineChart, PathCache, PointerEvent,
    RenderOptions, Rgba, Scene, Series, Visibility,
};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Downloads,
    Growth,
    Projects,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Downloads => Tab::Growth,
            Tab::Growth => Tab::Projects,
            Tab::Projects => Tab::Downloads,
        }
    }
}

/// One mounted chart per tab. Datasets are re-supplied with `hidden`
/// flags from `visibility` after every toggle; instance ids and line paths
/// persist across the per-event chart rebuilds.
pub struct App {
    downloads: Vec<Series>,
    growth: Vec<Series>,
    totals: Vec<CategoryDatum>,
    visibility: Visibility,
    interaction: Interaction,
    tab: Tab,
    instances: [InstanceId; 3],
    paths: [PathCache; 2],
    options: RenderOptions,
}

impl App {
    pub fn new(downloads: Vec<Series>, growth: Vec<Series>, totals: Vec<CategoryDatum>) -> Self {
        Self {
            downloads,
            growth,
            totals,
            visibility: Visibility::new(),
            interaction: Interaction::new(),
            tab: Tab::Downloads,
            instances: [InstanceId::next(), InstanceId::next(), InstanceId::next()],
            paths: [PathCache::new(), PathCache::new()],
            options: RenderOptions::default(),
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn hover(&self) -> &HoverState {
        self.interaction.hover()
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.options = self.options.clone().with_size(width as i32, height as i32);
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    fn with_chart<R>(&self, f: impl FnOnce(&mut dyn ChartView) -> R) -> R {
        let opts = self.options.clone();
        match self.tab {
            Tab::Downloads => f(&mut self.line_chart(&self.downloads, 0, opts)),
            Tab::Growth => f(&mut self.line_chart(&self.growth, 1, opts)),
            Tab::Projects => f(&mut BarChart::new(&self.totals).with_options(opts).with_instance(self.instances[2])),
        }
    }

    fn line_chart<'a>(&'a self, data: &'a [Series], slot: usize, opts: RenderOptions) -> LineChart<'a> {
        LineChart::new(data).with_options(opts).with_instance(self.instances[slot]).with_path_cache(&self.paths[slot])
    }

    /// Path cache counters of the active line tab; zero on the bar tab.
    pub fn path_stats(&self) -> pulse_core::CacheStats {
        match self.tab {
            Tab::Downloads => self.paths[0].stats(),
            Tab::Growth => self.paths[1].stats(),
            Tab::Projects => pulse_core::CacheStats::default(),
        }
    }

    pub fn scene(&self) -> Scene {
        let hover = self.interaction.hover().clone();
        self.with_chart(|chart| chart.render(&hover))
    }

    /// Feed one pointer event; returns whether the window needs a redraw.
    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        let mut interaction = std::mem::take(&mut self.interaction);
        let outcome = self.with_chart(|chart| interaction.apply(chart, event));
        self.interaction = interaction;
        if let Some(id) = outcome.toggled {
            let hidden = self.visibility.toggle(&id);
            debug!(id = %id, hidden, "visibility toggled");
            self.visibility.apply_to_series(&mut self.downloads);
            self.visibility.apply_to_series(&mut self.growth);
            self.visibility.apply_to_categories(&mut self.totals);
        }
        outcome.redraw
    }

    pub fn switch_tab(&mut self) {
        self.tab = self.tab.next();
        self.interaction.clear();
        debug!(tab = ?self.tab, "tab switched");
    }
}

/// Small built-in dataset used when no CSV is given.
pub fn sample() -> (Vec<Series>, Vec<Series>, Vec<CategoryDatum>) {
    let days = ["Mar 01", "Mar 02", "Mar 03", "Mar 04", "Mar 05", "Mar 06", "Mar 07"];
    let a = [12.0, 18.0, 9.0, 22.0, 30.0, 26.0, 41.0];
    let b = [4.0, 6.0, 11.0, 7.0, 5.0, 9.0, 8.0];
    let overall: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x + y).collect();
    let growth: Vec<f64> = overall.iter().enumerate().map(|(i, v)| if i == 0 { 0.0 } else { v - overall[i - 1] }).collect();

    let green = Rgba::rgb(16, 185, 129);
    let amber = Rgba::rgb(245, 158, 11);
    let downloads = vec![
        Series::new("overall", "Overall", Rgba::rgb(59, 130, 246)).with_points(days.iter().copied().zip(overall.iter().copied())),
        Series::new("mod-a", "Mod A", green).with_points(days.iter().copied().zip(a)),
        Series::new("mod-b", "Mod B", amber).with_points(days.iter().copied().zip(b)),
    ];
    let growth = vec![Series::new("growth", "Growth", Rgba::rgb(234, 179, 8)).with_points(days.iter().copied().zip(growth))];
    let totals = vec![
        CategoryDatum::new("mod-a", "Mod A", a.iter().sum(), green),
        CategoryDatum::new("mod-b", "Mod B", b.iter().sum(), amber),
    ];
    (downloads, growth, totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::Role;

    fn app() -> App {
        let (d, g, t) = sample();
        App::new(d, g, t)
    }

    #[test]
    fn hover_then_leave() {
        let mut app = app();
        let plot = LineChart::new(&app.downloads).frame().plot;
        assert!(app.pointer(PointerEvent::Move { x: plot.center_x(), y: plot.center_y() }));
        assert_eq!(app.scene().count_role(Role::Tooltip), 1);
        assert!(app.pointer(PointerEvent::Leave));
        assert_eq!(app.scene().count_role(Role::Tooltip), 0);
    }

    #[test]
    fn click_toggles_host_visibility() {
        let mut app = app();
        let pill = LineChart::new(&app.downloads).frame().legend.pills[1].rect;
        assert!(app.pointer(PointerEvent::Click { x: pill.center_x(), y: pill.center_y() }));
        assert!(app.visibility().is_hidden("mod-a"));
        assert_eq!(app.scene().count_role(Role::SeriesLine), 2);

        // The shared id also hides the project bar.
        app.switch_tab();
        app.switch_tab();
        assert_eq!(app.tab(), Tab::Projects);
        assert_eq!(app.scene().count_role(Role::Bar), 1);

        let pill = BarChart::new(&app.totals).frame().legend.pills[0].rect;
        app.pointer(PointerEvent::Click { x: pill.center_x(), y: pill.center_y() });
        assert!(!app.visibility().is_hidden("mod-a"));
        assert_eq!(app.scene().count_role(Role::Bar), 2);
    }

    #[test]
    fn hover_frames_reuse_line_paths() {
        let mut app = app();
        let plot = LineChart::new(&app.downloads).frame().plot;
        app.scene();
        let cold = app.path_stats();
        assert_eq!(cold.misses, 3);

        for step in 0..7 {
            let x = plot.left + plot.width() * step as f32 / 6.0;
            app.pointer(PointerEvent::Move { x, y: plot.center_y() });
            app.scene();
        }
        let warm = app.path_stats();
        assert_eq!(warm.misses, 3, "hover frames must not rebuild paths");
        assert_eq!(warm.hits, 21);

        app.resize(640, 320);
        app.scene();
        assert_eq!(app.path_stats().misses, 6);
    }

    #[test]
    fn switching_tabs_drops_hover_and_keeps_ids() {
        let mut app = app();
        let plot = LineChart::new(&app.downloads).frame().plot;
        app.pointer(PointerEvent::Move { x: plot.left, y: plot.center_y() });
        let first = app.scene().instance;
        app.switch_tab();
        assert!(app.hover().is_none());
        app.switch_tab();
        app.switch_tab();
        assert_eq!(app.tab(), Tab::Downloads);
        assert_eq!(app.scene().instance, first);
    }
}
