// File: crates/pulse-core/tests/legend_toggle.rs
// Purpose: Legend contract shared by both charts: one pill per entry, hidden entries excluded from drawing and scale.

use pulse_core::{
    BarChart, CategoryDatum, ChartView, HoverState, LineChart, Rgba, Role, Series, Visibility, PLACEHOLDER_TEXT,
};

fn series_set() -> Vec<Series> {
    vec![
        Series::new("overall", "Overall", Rgba::rgb(59, 130, 246)).with_points([("d1", 10.0), ("d2", 40.0), ("d3", 30.0)]),
        Series::new("mod-a", "Mod A", Rgba::rgb(16, 185, 129)).with_points([("d1", 4.0), ("d2", 12.0), ("d3", 9.0)]),
        Series::new("mod-b", "Mod B", Rgba::rgb(245, 158, 11)).with_points([("d1", 900.0), ("d2", 950.0), ("d3", 1000.0)]),
    ]
}

fn keys(scene: &pulse_core::Scene, role: Role) -> Vec<String> {
    scene.nodes_with_role(role).filter_map(|n| n.key.clone()).collect()
}

#[test]
fn hidden_series_keeps_pill_but_no_line() {
    let base = series_set();
    for target in &base {
        let mut data = base.clone();
        Visibility::hiding([target.id.as_str()]).apply_to_series(&mut data);

        let chart = LineChart::new(&data);
        let scene = chart.render(&HoverState::None);

        assert_eq!(scene.count_role(Role::LegendPill), data.len());
        assert_eq!(keys(&scene, Role::LegendPill).iter().filter(|k| **k == target.id).count(), 1);

        let lines = keys(&scene, Role::SeriesLine);
        assert_eq!(lines.len(), data.len() - 1);
        assert!(!lines.contains(&target.id), "hidden series {} was drawn", target.id);
    }
}

#[test]
fn hidden_series_does_not_scale_domain() {
    let mut data = series_set();
    Visibility::hiding(["mod-b"]).apply_to_series(&mut data);
    let domain = LineChart::new(&data).domain().expect("visible data");
    assert_eq!(domain.raw_max, 40.0);
    assert!(domain.display_max < 900.0);
}

#[test]
fn hidden_series_pill_is_dimmed() {
    let mut data = series_set();
    data[1].hidden = true;
    let opts = pulse_core::RenderOptions::default();
    let scene = LineChart::new(&data).with_options(opts.clone()).render(&HoverState::None);
    let swatch = scene
        .nodes_with_role(Role::LegendSwatch)
        .find(|n| n.key.as_deref() == Some("mod-a"))
        .expect("swatch for hidden series");
    match &swatch.shape {
        pulse_core::scene::Shape::Circle { fill, .. } => assert_eq!(*fill, opts.theme.muted),
        other => panic!("unexpected swatch shape {other:?}"),
    }
}

#[test]
fn all_hidden_renders_placeholder_only() {
    let mut data = series_set();
    for s in &mut data {
        s.hidden = true;
    }
    let scene = LineChart::new(&data).render(&HoverState::Index(1));
    assert!(scene.has_placeholder());
    assert_eq!(scene.texts(Role::Placeholder), vec![PLACEHOLDER_TEXT]);
    assert_eq!(scene.count_role(Role::LegendPill), 3);
    for role in [Role::Gridline, Role::ZeroLine, Role::AxisLabel, Role::SeriesLine, Role::HoverGuide, Role::Tooltip] {
        assert_eq!(scene.count_role(role), 0, "{role:?} drawn with nothing visible");
    }

    let cats = vec![CategoryDatum::new("x", "X", 3.0, Rgba::rgb(1, 1, 1)).hidden(true)];
    let scene = BarChart::new(&cats).render(&HoverState::None);
    assert!(scene.has_placeholder());
    assert_eq!(scene.count_role(Role::Bar), 0);
    assert_eq!(scene.count_role(Role::LegendPill), 1);
}

#[test]
fn empty_dataset_list_shows_placeholder() {
    let data: Vec<Series> = Vec::new();
    let scene = LineChart::new(&data).render(&HoverState::None);
    assert!(scene.has_placeholder());
    assert_eq!(scene.count_role(Role::LegendPill), 0);
}

#[test]
fn click_on_pill_calls_host_and_leaves_data_alone() {
    let data = series_set();
    let mut toggled: Vec<String> = Vec::new();
    {
        let mut chart = LineChart::new(&data).with_on_toggle(|id| toggled.push(id.to_string()));
        let pill = chart.frame().legend.pills[1].rect;
        let got = chart.handle_click(pill.center_x(), pill.center_y());
        assert_eq!(got.as_deref(), Some("mod-a"));

        // Clicks in the plot are not legend clicks.
        let plot = chart.frame().plot;
        assert_eq!(chart.handle_click(plot.center_x(), plot.center_y()), None);
    }
    assert_eq!(toggled, vec!["mod-a".to_string()]);
    assert!(data.iter().all(|s| !s.hidden));
}

#[test]
fn hidden_pill_stays_clickable() {
    let mut data = series_set();
    data[2].hidden = true;
    let mut chart = LineChart::new(&data);
    let pill = chart.frame().legend.pills[2].rect;
    assert_eq!(chart.handle_click(pill.center_x(), pill.center_y()).as_deref(), Some("mod-b"));
}

#[test]
fn bar_legend_round_trip_through_host_state() {
    let mut cats = vec![
        CategoryDatum::new("a", "Alpha", 10.0, Rgba::rgb(200, 0, 0)),
        CategoryDatum::new("b", "Beta", 20.0, Rgba::rgb(0, 200, 0)),
    ];
    let mut visibility = Visibility::new();

    let clicked = {
        let mut chart = BarChart::new(&cats);
        let pill = chart.frame().legend.pills[0].rect;
        chart.handle_click(pill.center_x(), pill.center_y())
    };
    visibility.toggle(clicked.as_deref().expect("pill hit"));
    visibility.apply_to_categories(&mut cats);

    let scene = BarChart::new(&cats).render(&HoverState::None);
    assert_eq!(scene.count_role(Role::LegendPill), 2);
    assert_eq!(keys(&scene, Role::Bar), vec!["b".to_string()]);
}
