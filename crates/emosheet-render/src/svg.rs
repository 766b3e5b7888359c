//! SVG serialization of a [`Scene`].
//!
//! Gradients and clip paths are hoisted into a single `<defs>` block; their ids are derived from
//! [`SvgRenderOptions::sheet_id`] so several sheets can share one HTML page.

use crate::scene::{DrawCommand, LineCap, Paint, Scene, Stroke, TextAnchor, TextBaseline};
use crate::theme::Color;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Prefix for generated element ids.
    pub sheet_id: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            sheet_id: "emosheet".to_string(),
        }
    }
}

pub fn render_scene_svg(scene: &Scene, options: &SvgRenderOptions) -> String {
    let mut w = SvgWriter {
        id_prefix: escape_xml(&options.sheet_id),
        defs: String::new(),
        body: String::new(),
        next_id: 0,
    };
    for cmd in &scene.commands {
        w.command(cmd);
    }

    let width = fmt(scene.width);
    let height = fmt(scene.height);
    let mut out = String::with_capacity(w.body.len() + w.defs.len() + 256);
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" id="{id}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#,
        id = w.id_prefix,
    );
    if !w.defs.is_empty() {
        out.push_str("<defs>");
        out.push_str(&w.defs);
        out.push_str("</defs>");
    }
    out.push_str(&w.body);
    out.push_str("</svg>\n");
    out
}

struct SvgWriter {
    id_prefix: String,
    defs: String,
    body: String,
    next_id: usize,
}

impl SvgWriter {
    fn fresh_id(&mut self, kind: &str) -> String {
        let id = format!("{}-{kind}-{}", self.id_prefix, self.next_id);
        self.next_id += 1;
        id
    }

    /// Returns the attribute value for `paint`, registering a gradient when needed.
    fn paint_ref(&mut self, paint: &Paint) -> (String, f64) {
        match paint {
            Paint::Solid(c) => (c.to_hex(), c.a),
            Paint::LinearGradient {
                x1,
                y1,
                x2,
                y2,
                stops,
            } => {
                let id = self.fresh_id("grad");
                let _ = write!(
                    &mut self.defs,
                    r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    fmt(*x1),
                    fmt(*y1),
                    fmt(*x2),
                    fmt(*y2),
                );
                for stop in stops {
                    let _ = write!(
                        &mut self.defs,
                        r#"<stop offset="{}" stop-color="{}"{}/>"#,
                        fmt(stop.offset),
                        stop.color.to_hex(),
                        opacity_attr("stop-opacity", stop.color),
                    );
                }
                self.defs.push_str("</linearGradient>");
                (format!("url(#{id})"), 1.0)
            }
        }
    }

    fn fill_attrs(&mut self, fill: Option<&Paint>) -> String {
        match fill {
            None => r#" fill="none""#.to_string(),
            Some(p) => {
                let (value, alpha) = self.paint_ref(p);
                let mut s = format!(r#" fill="{value}""#);
                if alpha < 1.0 {
                    let _ = write!(&mut s, r#" fill-opacity="{}""#, fmt(alpha));
                }
                s
            }
        }
    }

    fn stroke_attrs(&mut self, stroke: Option<&Stroke>) -> String {
        let Some(stroke) = stroke else {
            return String::new();
        };
        let (value, alpha) = self.paint_ref(&stroke.paint);
        let mut s = format!(
            r#" stroke="{value}" stroke-width="{}""#,
            fmt(stroke.width)
        );
        if alpha < 1.0 {
            let _ = write!(&mut s, r#" stroke-opacity="{}""#, fmt(alpha));
        }
        if let Some(dash) = &stroke.dash {
            let pattern: Vec<String> = dash.iter().map(|d| fmt(*d)).collect();
            let _ = write!(&mut s, r#" stroke-dasharray="{}""#, pattern.join(","));
        }
        if stroke.cap == LineCap::Round {
            s.push_str(r#" stroke-linecap="round""#);
        }
        s
    }

    fn command(&mut self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::Rect { rect, fill, stroke } => {
                let fill = self.fill_attrs(fill.as_ref());
                let stroke = self.stroke_attrs(stroke.as_ref());
                let _ = write!(
                    &mut self.body,
                    r#"<rect x="{}" y="{}" width="{}" height="{}"{fill}{stroke}/>"#,
                    fmt(rect.x),
                    fmt(rect.y),
                    fmt(rect.width),
                    fmt(rect.height),
                );
            }
            DrawCommand::Line { from, to, stroke } => {
                let stroke = self.stroke_attrs(Some(stroke));
                let _ = write!(
                    &mut self.body,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{stroke}/>"#,
                    fmt(from.x),
                    fmt(from.y),
                    fmt(to.x),
                    fmt(to.y),
                );
            }
            DrawCommand::Polygon {
                points,
                fill,
                stroke,
            } => {
                let fill = self.fill_attrs(fill.as_ref());
                let stroke = self.stroke_attrs(stroke.as_ref());
                let pts: Vec<String> = points
                    .iter()
                    .map(|p| format!("{},{}", fmt(p.x), fmt(p.y)))
                    .collect();
                let _ = write!(
                    &mut self.body,
                    r#"<polygon points="{}"{fill}{stroke}/>"#,
                    pts.join(" ")
                );
            }
            DrawCommand::Text {
                x,
                y,
                text,
                style,
                fill,
                anchor,
                baseline,
            } => {
                let _ = write!(
                    &mut self.body,
                    r#"<text x="{}" y="{}" font-size="{}""#,
                    fmt(*x),
                    fmt(*y),
                    fmt(style.font_size),
                );
                if let Some(family) = &style.font_family {
                    let _ = write!(&mut self.body, r#" font-family="{}""#, escape_xml(family));
                }
                if let Some(weight) = &style.font_weight {
                    let _ = write!(&mut self.body, r#" font-weight="{}""#, escape_xml(weight));
                }
                if *anchor == TextAnchor::Middle {
                    self.body.push_str(r#" text-anchor="middle""#);
                }
                let baseline = match baseline {
                    TextBaseline::Top => "hanging",
                    TextBaseline::Middle => "middle",
                };
                let _ = write!(
                    &mut self.body,
                    r#" dominant-baseline="{baseline}" fill="{}"{} xml:space="preserve">{}</text>"#,
                    fill.to_hex(),
                    opacity_attr("fill-opacity", *fill),
                    escape_xml(text),
                );
            }
            DrawCommand::Image { rect, href } => {
                let _ = write!(
                    &mut self.body,
                    r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none" xlink:href="{href}"/>"#,
                    fmt(rect.x),
                    fmt(rect.y),
                    fmt(rect.width),
                    fmt(rect.height),
                    href = escape_xml(href),
                );
            }
            DrawCommand::Clip { rect, children } => {
                let id = self.fresh_id("clip");
                let _ = write!(
                    &mut self.defs,
                    r#"<clipPath id="{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    fmt(rect.x),
                    fmt(rect.y),
                    fmt(rect.width),
                    fmt(rect.height),
                );
                let _ = write!(&mut self.body, r#"<g clip-path="url(#{id})">"#);
                for child in children {
                    self.command(child);
                }
                self.body.push_str("</g>");
            }
        }
    }
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.is_opaque() {
        String::new()
    } else {
        format!(r#" {name}="{}""#, fmt(color.a))
    }
}

/// Shortest decimal form, without `-0` or float noise from layout arithmetic.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = (v * 1000.0).round() / 1000.0;
    if v == 0.0 {
        v = 0.0;
    }
    format!("{v}")
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
