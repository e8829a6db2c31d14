// File: crates/pulse-core/tests/scenario.rs
// Purpose: End-to-end dashboard flow: render, hover, toggle through host state, render again.

use pulse_core::{ChartView, HoverState, Interaction, LineChart, PointerEvent, Rgba, Role, Series, Visibility};

fn downloads() -> Vec<Series> {
    vec![
        Series::new("overall", "overall", Rgba::rgb(59, 130, 246)).with_points([("d1", 10.0), ("d2", 20.0)]),
        Series::new("a", "a", Rgba::rgb(16, 185, 129)).with_points([("d1", 5.0), ("d2", 15.0)]),
    ]
}

#[test]
fn two_series_hover_last_bucket() {
    let data = downloads();
    let chart = LineChart::new(&data);
    let domain = chart.domain().unwrap();
    assert!(domain.display_max >= 22.0 - 1e-9);
    assert_eq!(domain.display_min, 0.0);

    let scene = chart.render(&HoverState::Index(1));
    assert_eq!(scene.count_role(Role::LegendPill), 2);
    assert_eq!(scene.count_role(Role::SeriesLine), 2);
    assert_eq!(scene.count_role(Role::HoverGuide), 1);
    assert_eq!(scene.count_role(Role::Tooltip), 1);
    assert_eq!(scene.texts(Role::TooltipText), vec!["d2", "overall: 20", "a: 15"]);
}

#[test]
fn aggregate_series_use_heavy_stroke() {
    let data = downloads();
    let chart = LineChart::new(&data);
    let scene = chart.render(&HoverState::None);
    let widths: Vec<(String, f32)> = scene
        .nodes_with_role(Role::SeriesLine)
        .filter_map(|n| match n.shape {
            pulse_core::scene::Shape::Polyline { width, .. } => Some((n.key.clone().unwrap_or_default(), width)),
            _ => None,
        })
        .collect();
    let opts = chart.options();
    assert_eq!(widths, vec![("overall".to_string(), opts.heavy_stroke), ("a".to_string(), opts.stroke)]);
}

#[test]
fn toggle_cycle_through_host_state() {
    let mut data = downloads();
    let mut visibility = Visibility::new();
    let mut interaction = Interaction::new();
    let instance = pulse_core::InstanceId::next();

    // Click the "a" pill; the chart only reports it.
    let toggled = {
        let mut chart = LineChart::new(&data).with_instance(instance);
        let pill = chart.frame().legend.pills[1].rect;
        let out = interaction.apply(&mut chart, PointerEvent::Click { x: pill.center_x(), y: pill.center_y() });
        assert!(out.redraw);
        out.toggled
    };
    assert_eq!(toggled.as_deref(), Some("a"));
    assert!(!data[1].hidden, "chart must not mutate host data");

    visibility.toggle("a");
    visibility.apply_to_series(&mut data);
    let chart = LineChart::new(&data).with_instance(instance);
    let scene = chart.render(&HoverState::Index(1));
    assert_eq!(scene.instance, instance);
    assert_eq!(scene.count_role(Role::LegendPill), 2);
    assert_eq!(scene.count_role(Role::SeriesLine), 1);
    assert_eq!(scene.texts(Role::TooltipText), vec!["d2", "overall: 20"]);
    drop(chart);

    // Toggle back.
    visibility.toggle("a");
    visibility.apply_to_series(&mut data);
    let scene = LineChart::new(&data).with_instance(instance).render(&HoverState::None);
    assert_eq!(scene.count_role(Role::SeriesLine), 2);
}

#[test]
fn custom_formatter_drives_axis_and_tooltip() {
    let data = downloads();
    let chart = LineChart::new(&data).with_y_formatter(|v| format!("{v:.0} dl"));
    let scene = chart.render(&HoverState::Index(0));
    assert!(scene.texts(Role::AxisLabel).iter().any(|t| t.ends_with(" dl")));
    assert_eq!(scene.texts(Role::TooltipText), vec!["d1", "overall: 10 dl", "a: 5 dl"]);
}

#[test]
fn growth_series_may_go_negative() {
    let data = vec![
        Series::new("growth", "growth", Rgba::rgb(234, 179, 8)).with_points([("d1", 0.0), ("d2", 10.0), ("d3", -8.0)]),
    ];
    let chart = LineChart::new(&data);
    let scene = chart.render(&HoverState::Index(2));
    assert_eq!(scene.count_role(Role::ZeroLine), 1);
    assert_eq!(scene.texts(Role::TooltipText), vec!["d3", "growth: -8"]);
}
