// File: crates/pulse-render-skia/tests/smoke.rs
// Purpose: End-to-end raster smoke test writing PNG files for both chart kinds.

use pulse_core::{BarChart, CategoryDatum, ChartView, HoverState, LineChart, Rgba, Series};
use pulse_render_skia::SkiaRenderer;

#[test]
fn render_smoke_png() {
    let data = vec![
        Series::new("overall", "Overall", Rgba::rgb(59, 130, 246))
            .with_points([("d1", 0.0), ("d2", 2.0), ("d3", 1.0), ("d4", 3.5), ("d5", 2.5)]),
        Series::new("growth", "Growth", Rgba::rgb(234, 179, 8))
            .with_points([("d1", 0.0), ("d2", 2.0), ("d3", -1.0), ("d4", 2.5), ("d5", -1.0)]),
    ];
    let renderer = SkiaRenderer::new();
    let scene = LineChart::new(&data).render(&HoverState::Index(2));

    let out = std::path::PathBuf::from("target/test_out/smoke_line.png");
    renderer.render_to_png(&scene, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = renderer.render_to_png_bytes(&scene).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn bar_chart_and_placeholder_render() {
    let renderer = SkiaRenderer::new();
    let cats = vec![
        CategoryDatum::new("a", "Alpha", 40.0, Rgba::rgb(16, 185, 129)),
        CategoryDatum::new("b", "Beta", 90.0, Rgba::rgb(239, 68, 68)),
    ];
    let bars = BarChart::new(&cats).render(&HoverState::Bar("b".into()));
    renderer
        .render_to_png(&bars, "target/test_out/smoke_bar.png")
        .expect("bar render");

    let hidden = vec![Series::new("x", "X", Rgba::rgb(1, 1, 1)).hidden(true)];
    let empty = LineChart::new(&hidden).render(&HoverState::None);
    let bytes = renderer.render_to_png_bytes(&empty).expect("placeholder render");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}
