// File: crates/pulse-window/src/main.rs
// Summary: Interactive window rendering pulse charts via RGBA blit (CPU) using winit + softbuffer.
// Controls: move to hover, leave to clear, click a legend pill to toggle, Tab to switch charts.

mod app;

use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use pulse_core::PointerEvent;
use pulse_dashboard::{load_rows, Dashboard, Metric};
use pulse_render_skia::SkiaRenderer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::app::App;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,winit=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_app(path: Option<PathBuf>) -> Result<App> {
    let Some(path) = path else {
        info!("no CSV given; using built-in sample data");
        let (d, g, t) = app::sample();
        return Ok(App::new(d, g, t));
    };
    let rows = load_rows(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    let dash = Dashboard::aggregate(&rows, Metric::Downloads);
    info!(path = %path.display(), dates = dash.dates.len(), projects = dash.projects.len(), "loaded");
    Ok(App::new(dash.downloads_series()?, dash.growth_series()?, dash.project_totals()?))
}

/// Pack RGBA8 pixels as 0RGB words for softbuffer.
fn blit(rgba: &[u8], frame: &mut [u32]) {
    for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
        *dst = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
    }
}

fn main() -> Result<()> {
    init_logging();
    let mut app = load_app(std::env::args().nth(1).map(PathBuf::from))?;
    let renderer = SkiaRenderer::new();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Pulse Charts")
        .with_inner_size(winit::dpi::LogicalSize::new(960.0, 480.0))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    let size = window.inner_size();
    app.resize(size.width.max(1), size.height.max(1));
    let mut cursor: Option<(f32, f32)> = None;

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => {
                let redraw = match event {
                    WindowEvent::CloseRequested => {
                        *cf = ControlFlow::Exit;
                        false
                    }
                    WindowEvent::Resized(new_size) => {
                        app.resize(new_size.width.max(1), new_size.height.max(1));
                        true
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let (x, y) = (position.x as f32, position.y as f32);
                        cursor = Some((x, y));
                        app.pointer(PointerEvent::Move { x, y })
                    }
                    WindowEvent::CursorLeft { .. } => {
                        cursor = None;
                        app.pointer(PointerEvent::Leave)
                    }
                    WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                        match cursor {
                            Some((x, y)) => app.pointer(PointerEvent::Click { x, y }),
                            None => false,
                        }
                    }
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(VirtualKeyCode::Tab), .. },
                        ..
                    } => {
                        app.switch_tab();
                        true
                    }
                    _ => false,
                };
                if redraw {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                let size = window.inner_size();
                let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
                    return;
                };
                if let Err(e) = surface.resize(w, h) {
                    error!("resize error: {e}");
                    return;
                }
                let scene = app.scene();
                let rgba = match renderer.render_to_rgba8(&scene) {
                    Ok((px, ..)) => px,
                    Err(e) => {
                        error!("render error: {e:#}");
                        return;
                    }
                };
                let mut frame = match surface.buffer_mut() {
                    Ok(f) => f,
                    Err(e) => {
                        error!("frame error: {e}");
                        return;
                    }
                };
                blit(&rgba, &mut frame);
                if let Err(e) = frame.present() {
                    error!("present error: {e}");
                }
            }
            _ => {}
        }
    });
}
