//! Retained drawing commands.
//!
//! Renderers append to a [`Scene`]; serializers (SVG today) walk it afterwards. Coordinates are
//! canvas pixels with the origin at the top-left corner.

use crate::model::{LayoutPoint, LayoutRect};
use crate::text::TextStyle;
use crate::theme::Color;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    Solid(Color),
    LinearGradient {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stops: Vec<GradientStop>,
    },
}

impl From<Color> for Paint {
    fn from(value: Color) -> Self {
        Paint::Solid(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    pub dash: Option<Vec<f64>>,
    pub cap: LineCap,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            paint: Paint::Solid(color),
            width,
            dash: None,
            cap: LineCap::Butt,
        }
    }

    pub fn dashed(mut self, pattern: &[f64]) -> Self {
        self.dash = Some(pattern.to_vec());
        self
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Rect {
        rect: LayoutRect,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },
    Line {
        from: LayoutPoint,
        to: LayoutPoint,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<LayoutPoint>,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
        fill: Color,
        anchor: TextAnchor,
        baseline: TextBaseline,
    },
    Image {
        rect: LayoutRect,
        href: String,
    },
    /// Children are clipped to `rect`.
    Clip {
        rect: LayoutRect,
        children: Vec<DrawCommand>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }

    pub fn fill_rect(&mut self, rect: LayoutRect, fill: impl Into<Paint>) {
        self.push(DrawCommand::Rect {
            rect,
            fill: Some(fill.into()),
            stroke: None,
        });
    }

    pub fn stroke_rect(&mut self, rect: LayoutRect, stroke: Stroke) {
        self.push(DrawCommand::Rect {
            rect,
            fill: None,
            stroke: Some(stroke),
        });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) {
        self.push(DrawCommand::Line {
            from: LayoutPoint { x: x1, y: y1 },
            to: LayoutPoint { x: x2, y: y2 },
            stroke,
        });
    }

    pub fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle, fill: Color) {
        self.text_aligned(x, y, text, style, fill, TextAnchor::Start, TextBaseline::Top);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn text_aligned(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        style: &TextStyle,
        fill: Color,
        anchor: TextAnchor,
        baseline: TextBaseline,
    ) {
        self.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            style: style.clone(),
            fill,
            anchor,
            baseline,
        });
    }

    /// Runs `f` against a nested scene whose commands end up clipped to `rect`.
    pub fn clipped(&mut self, rect: LayoutRect, f: impl FnOnce(&mut Scene)) {
        let mut inner = Scene::new(self.width, self.height);
        f(&mut inner);
        self.push(DrawCommand::Clip {
            rect,
            children: inner.commands,
        });
    }

    /// Depth-first iterator over every command, including clipped children.
    pub fn iter_flat(&self) -> impl Iterator<Item = &DrawCommand> {
        fn walk<'a>(cmds: &'a [DrawCommand], out: &mut Vec<&'a DrawCommand>) {
            for c in cmds {
                out.push(c);
                if let DrawCommand::Clip { children, .. } = c {
                    walk(children, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.commands, &mut out);
        out.into_iter()
    }

    /// Text runs in drawing order, handy for assertions.
    pub fn texts(&self) -> Vec<&str> {
        self.iter_flat()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
