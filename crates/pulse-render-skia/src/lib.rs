// File: crates/pulse-render-skia/src/lib.rs
// Summary: Headless raster backend; draws a pulse-core Scene onto a Skia CPU surface.

pub mod text;

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use pulse_core::geometry::RectF;
use pulse_core::scene::{Def, LinearGradient, Node, Paint, Scene, Shape};
use pulse_core::Rgba;
use skia_safe as skia;
use tracing::debug;

pub use text::TextShaper;

fn to_color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn to_rect(r: RectF) -> skia::Rect {
    skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
}

/// Scales a color's alpha by a node's group opacity.
fn faded(c: Rgba, opacity: f32) -> skia::Color {
    to_color(c.with_opacity(opacity))
}

pub struct SkiaRenderer {
    shaper: TextShaper,
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { shaper: TextShaper::new() }
    }

    fn surface(scene: &Scene) -> Result<skia::Surface> {
        let mut surface = skia::surfaces::raster_n32_premul((scene.width.max(1), scene.height.max(1)))
            .ok_or_else(|| anyhow!("failed to create raster surface"))?;
        surface.canvas().clear(to_color(scene.background));
        Ok(surface)
    }

    /// Draw every node of `scene` in order onto `canvas`.
    pub fn draw(&self, canvas: &skia::Canvas, scene: &Scene) {
        let gradients: HashMap<&str, &LinearGradient> = scene
            .defs
            .iter()
            .filter_map(|d| match d {
                Def::Gradient(g) => Some((g.id.as_str(), g)),
                _ => None,
            })
            .collect();
        let clips: HashMap<&str, RectF> = scene
            .defs
            .iter()
            .filter_map(|d| match d {
                Def::Clip { id, rect } => Some((id.as_str(), *rect)),
                _ => None,
            })
            .collect();

        for node in &scene.nodes {
            let clip = node.clip.as_deref().and_then(|id| clips.get(id));
            if let Some(rect) = clip {
                canvas.save();
                canvas.clip_rect(to_rect(*rect), None, Some(true));
            }
            self.draw_node(canvas, node, &gradients);
            if clip.is_some() {
                canvas.restore();
            }
        }
    }

    fn draw_node(&self, canvas: &skia::Canvas, node: &Node, gradients: &HashMap<&str, &LinearGradient>) {
        let opacity = node.opacity.clamp(0.0, 1.0);
        match &node.shape {
            Shape::Rect { rect, fill, stroke, radius } => {
                let r = to_rect(*rect);
                let mut paint = skia::Paint::default();
                paint.set_anti_alias(true);
                paint.set_style(skia::paint::Style::Fill);
                match fill {
                    Paint::Solid(c) => {
                        paint.set_color(faded(*c, opacity));
                    }
                    Paint::Gradient(id) => {
                        let Some(g) = gradients.get(id.as_str()) else {
                            debug!(id = %id, "gradient def missing; bar skipped");
                            return;
                        };
                        let colors = [to_color(g.top), to_color(g.bottom)];
                        let shader = skia::Shader::linear_gradient(
                            ((r.left, r.top), (r.left, r.bottom)),
                            &colors[..],
                            None,
                            skia::TileMode::Clamp,
                            None,
                            None,
                        );
                        paint.set_shader(shader);
                        paint.set_alpha_f(opacity);
                    }
                }
                canvas.draw_round_rect(r, *radius, *radius, &paint);
                if let Some(c) = stroke {
                    let mut outline = skia::Paint::default();
                    outline.set_anti_alias(true);
                    outline.set_style(skia::paint::Style::Stroke);
                    outline.set_stroke_width(1.0);
                    outline.set_color(faded(*c, opacity));
                    canvas.draw_round_rect(r, *radius, *radius, &outline);
                }
            }
            Shape::Line { from, to, color, width, dashed } => {
                let mut paint = skia::Paint::default();
                paint.set_anti_alias(true);
                paint.set_style(skia::paint::Style::Stroke);
                paint.set_stroke_width(*width);
                paint.set_color(faded(*color, opacity));
                if *dashed {
                    paint.set_path_effect(skia::PathEffect::dash(&[4.0, 4.0], 0.0));
                }
                canvas.draw_line(*from, *to, &paint);
            }
            Shape::Polyline { points, color, width } => {
                let Some((first, rest)) = points.split_first() else {
                    return;
                };
                let mut path = skia::Path::new();
                path.move_to(*first);
                for p in rest {
                    path.line_to(*p);
                }
                let mut stroke = skia::Paint::default();
                stroke.set_anti_alias(true);
                stroke.set_style(skia::paint::Style::Stroke);
                stroke.set_stroke_width(*width);
                stroke.set_stroke_join(skia::paint::Join::Round);
                stroke.set_stroke_cap(skia::paint::Cap::Round);
                stroke.set_color(faded(*color, opacity));
                canvas.draw_path(&path, &stroke);
            }
            Shape::Circle { center, radius, fill } => {
                let mut paint = skia::Paint::default();
                paint.set_anti_alias(true);
                paint.set_color(faded(*fill, opacity));
                canvas.draw_circle(*center, *radius, &paint);
            }
            Shape::Text { pos, text, size, color, anchor, bold } => {
                self.shaper.draw(canvas, text, *pos, *size, faded(*color, opacity), *anchor, *bold);
            }
        }
    }

    /// Render `scene` and encode it as PNG.
    pub fn render_to_png_bytes(&self, scene: &Scene) -> Result<Vec<u8>> {
        let mut surface = Self::surface(scene)?;
        self.draw(surface.canvas(), scene);
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        debug!(instance = %scene.instance, nodes = scene.nodes.len(), bytes = data.size(), "rendered png");
        Ok(data.as_bytes().to_vec())
    }

    /// Render `scene` to a PNG file, creating parent directories.
    pub fn render_to_png(&self, scene: &Scene, output_png_path: impl AsRef<Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(scene)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Render `scene` to unpremultiplied RGBA8 pixels.
    /// Returns `(pixels, width, height, row_stride_bytes)`.
    pub fn render_to_rgba8(&self, scene: &Scene) -> Result<(Vec<u8>, i32, i32, usize)> {
        let mut surface = Self::surface(scene)?;
        self.draw(surface.canvas(), scene);
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(anyhow!("read_pixels failed ({w}x{h})"));
        }
        Ok((pixels, w, h, stride))
    }
}
