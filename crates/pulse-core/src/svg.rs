// File: crates/pulse-core/src/svg.rs
// Summary: Serialize a Scene to a standalone SVG document.

use std::fmt::Write;
use std::path::Path;

use crate::error::{ChartError, Result};
use crate::scene::{Def, Node, Paint, Scene, Shape, TextAnchor};
use crate::types::Rgba;

const FONT_FAMILY: &str = "Segoe UI, Arial, Helvetica, Roboto, DejaVu Sans, sans-serif";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn color_attr(name: &str, c: Rgba) -> String {
    if c.a == 255 {
        format!(r#"{name}="{}""#, c.to_hex())
    } else {
        format!(r#"{name}="{}" {name}-opacity="{:.3}""#, c.to_hex(), c.opacity())
    }
}

fn paint_attr(name: &str, p: &Paint) -> String {
    match p {
        Paint::Solid(c) => color_attr(name, *c),
        Paint::Gradient(id) => format!(r#"{name}="url(#{})""#, escape(id)),
    }
}

fn common_attrs(node: &Node) -> String {
    let mut a = format!(r#" data-role="{}""#, node.role.as_str());
    if let Some(key) = &node.key {
        let _ = write!(a, r#" data-key="{}""#, escape(key));
    }
    if node.opacity < 1.0 {
        let _ = write!(a, r#" opacity="{:.3}""#, node.opacity);
    }
    if let Some(clip) = &node.clip {
        let _ = write!(a, r#" clip-path="url(#{})""#, escape(clip));
    }
    a
}

fn write_node(out: &mut String, node: &Node) {
    let attrs = common_attrs(node);
    let _ = match &node.shape {
        Shape::Rect { rect, fill, stroke, radius } => {
            let stroke = stroke.map(|c| format!(" {}", color_attr("stroke", c))).unwrap_or_default();
            writeln!(
                out,
                r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{:.2}" {}{}{attrs}/>"#,
                rect.left,
                rect.top,
                rect.width().max(0.0),
                rect.height().max(0.0),
                radius,
                paint_attr("fill", fill),
                stroke
            )
        }
        Shape::Line { from, to, color, width, dashed } => {
            let dash = if *dashed { r#" stroke-dasharray="4 4""# } else { "" };
            writeln!(
                out,
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {} stroke-width="{width}"{dash}{attrs}/>"#,
                from.0,
                from.1,
                to.0,
                to.1,
                color_attr("stroke", *color)
            )
        }
        Shape::Polyline { points, color, width } => {
            let pts: Vec<String> = points.iter().map(|(x, y)| format!("{x:.2},{y:.2}")).collect();
            writeln!(
                out,
                r#"  <polyline points="{}" fill="none" {} stroke-width="{width}" stroke-linejoin="round" stroke-linecap="round"{attrs}/>"#,
                pts.join(" "),
                color_attr("stroke", *color)
            )
        }
        Shape::Circle { center, radius, fill } => writeln!(
            out,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" {}{attrs}/>"#,
            center.0,
            center.1,
            radius,
            color_attr("fill", *fill)
        ),
        Shape::Text { pos, text, size, color, anchor, bold } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let weight = if *bold { r#" font-weight="600""# } else { "" };
            writeln!(
                out,
                r#"  <text x="{:.2}" y="{:.2}" font-size="{size}" text-anchor="{anchor}" {}{weight}{attrs}>{}</text>"#,
                pos.0,
                pos.1,
                color_attr("fill", *color),
                escape(text)
            )
        }
    };
}

/// Standalone SVG document for `scene`.
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg viewBox="0 0 {w} {h}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" font-family="{FONT_FAMILY}" data-chart="{}">"#,
        scene.instance.token(),
        w = scene.width,
        h = scene.height,
    );
    if !scene.defs.is_empty() {
        out.push_str("  <defs>\n");
        for def in &scene.defs {
            let _ = match def {
                Def::Gradient(g) => writeln!(
                    out,
                    r#"    <linearGradient id="{}" x1="0" y1="0" x2="0" y2="1"><stop offset="0%" stop-color="{}" stop-opacity="{:.3}"/><stop offset="100%" stop-color="{}" stop-opacity="{:.3}"/></linearGradient>"#,
                    escape(&g.id),
                    g.top.to_hex(),
                    g.top.opacity(),
                    g.bottom.to_hex(),
                    g.bottom.opacity()
                ),
                Def::Clip { id, rect } => writeln!(
                    out,
                    r#"    <clipPath id="{}"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath>"#,
                    escape(id),
                    rect.left,
                    rect.top,
                    rect.width().max(0.0),
                    rect.height().max(0.0)
                ),
            };
        }
        out.push_str("  </defs>\n");
    }
    let _ = writeln!(
        out,
        r#"  <rect width="100%" height="100%" {} data-role="background"/>"#,
        color_attr("fill", scene.background)
    );
    for node in &scene.nodes {
        write_node(&mut out, node);
    }
    out.push_str("</svg>\n");
    out
}

/// Write `scene` as SVG to `path`, creating parent directories.
pub fn write_svg(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let io_err = |e: std::io::Error| ChartError::Io { path: path.display().to_string(), message: e.to_string() };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, to_svg(scene)).map_err(io_err)
}
