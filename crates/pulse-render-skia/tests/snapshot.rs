// File: crates/pulse-render-skia/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic hovered line chart to PNG bytes with labels off.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if the snapshot exists, compares decoded pixels for an exact match.
// - Pixel invariants (background corner, hover dots) are checked on every run,
//   blessed or not.

use pulse_core::scene::Shape;
use pulse_core::{ChartView, HoverState, InstanceId, LineChart, RenderOptions, Rgba, Role, Scene, Series};
use pulse_render_skia::SkiaRenderer;

fn render_scene() -> Scene {
    let data = vec![
        Series::new("overall", "Overall", Rgba::rgb(59, 130, 246))
            .with_points([("d1", 0.0), ("d2", 10.0), ("d3", 4.0), ("d4", 15.0), ("d5", 10.0)]),
        Series::new("a", "A", Rgba::rgb(16, 185, 129))
            .with_points([("d1", 0.0), ("d2", 6.0), ("d3", 1.0), ("d4", 9.0), ("d5", 4.0)]),
    ];
    let mut opts = RenderOptions::default();
    opts.draw_labels = false;
    let scene = LineChart::new(&data)
        .with_options(opts)
        .with_instance(InstanceId::next())
        .render(&HoverState::Index(3))
}

fn close(got: &[u8], want: Rgba) -> bool {
    [want.r, want.g, want.b].iter().zip(got).all(|(w, g)| w.abs_diff(*g) <= 8)
}

#[test]
fn hovered_line_pixels_hold_without_golden() {
    let scene = render_scene();
    let bytes = SkiaRenderer::new().render_to_png_bytes(&scene).expect("render png");
    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (scene.width as u32, scene.height as u32));

    let bg = RenderOptions::default().theme.background;
    assert!(close(&img.get_pixel(0, 0).0, bg), "corner should be background");

    let dots: Vec<((f32, f32), Rgba)> = scene
        .nodes_with_role(Role::SeriesOverlay)
        .filter_map(|n| match n.shape {
            Shape::Circle { center, fill, .. } => Some((center, fill)),
            _ => None,
        })
        .collect();
    assert_eq!(dots.len(), 2);
    for ((x, y), fill) in dots {
        let px = img.get_pixel(x.round() as u32, y.round() as u32).0;
        assert!(close(&px, fill), "hover dot at ({x}, {y}) should be {fill:?}, got {px:?}");
    }
}

#[test]
fn golden_hovered_line_chart() {
    let bytes = SkiaRenderer::new().render_to_png_bytes(&render_scene()).expect("render png");
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("hovered_line.png");

    let update = std::env::var("UPDATE_SNAPSHOTS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.dimensions(), want_img.dimensions());
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
