use crate::scene::{GradientStop, LineCap, Paint, Scene, Stroke};
use crate::theme::{Color, DecorStyle, Theme};

const SEPARATOR_WIDTH: f64 = 2.0;

/// Horizontal divider from `(x, y)` to `(x + w, y)`, styled by the theme's decoration.
pub fn draw_separator(scene: &mut Scene, x: f64, y: f64, w: f64, theme: &Theme) {
    match theme.decor {
        DecorStyle::Simple => {
            scene.line(x, y, x + w, y, Stroke::solid(theme.accent, SEPARATOR_WIDTH));
        }
        DecorStyle::Rounded => {
            let stroke = Stroke::solid(theme.accent, SEPARATOR_WIDTH)
                .dashed(&[5.0, 10.0])
                .with_cap(LineCap::Round);
            scene.line(x, y, x + w, y, stroke);
        }
        DecorStyle::Double => {
            for dy in [-2.0, 2.0] {
                scene.line(x, y + dy, x + w, y + dy, Stroke::solid(theme.accent, 1.0));
            }
        }
        DecorStyle::Sharp => {
            let paint = Paint::LinearGradient {
                x1: x,
                y1: y,
                x2: x + w,
                y2: y,
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: theme.accent,
                    },
                    GradientStop {
                        offset: 1.0,
                        color: Color::TRANSPARENT,
                    },
                ],
            };
            let stroke = Stroke {
                paint,
                width: SEPARATOR_WIDTH,
                dash: None,
                cap: LineCap::Butt,
            };
            scene.line(x, y, x + w, y, stroke);
        }
    }
}
