use crate::model::LayoutRect;
use crate::scene::Scene;
use crate::text::{TextMeasurer, wrap_text_lines};
use crate::theme::Theme;

pub const MIN_BAND_HEIGHT: f64 = 50.0;
pub const INNER_PADDING: f64 = 15.0;
pub const FONT_SIZE: f64 = 18.0;
pub const LINE_HEIGHT: f64 = 26.0;
const CLIP_BLEED_X: f64 = 5.0;

/// Free text on a faint panel, wrapped to the band and cut at its bottom edge.
pub fn draw_notes(
    scene: &mut Scene,
    notes: &str,
    band: &LayoutRect,
    theme: &Theme,
    measurer: &dyn TextMeasurer,
) {
    if band.height < MIN_BAND_HEIGHT || notes.is_empty() {
        tracing::trace!(band_height = band.height, "notes band skipped");
        return;
    }

    let style = theme.sub_font(FONT_SIZE);
    let lines = wrap_text_lines(
        notes,
        measurer,
        &style,
        band.width - INNER_PADDING * 2.0,
        LINE_HEIGHT,
        Some(band.height - INNER_PADDING * 2.0),
    );
    tracing::debug!(lines = lines.len(), "notes wrapped");

    scene.clipped(band.inflate_x(CLIP_BLEED_X), |s| {
        s.fill_rect(*band, theme.panel_overlay());
        let x = band.x + INNER_PADDING;
        for (i, line) in lines.iter().enumerate() {
            let y = band.y + INNER_PADDING + i as f64 * LINE_HEIGHT;
            s.text(x, y, line, &style, theme.text);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{DrawCommand, Paint};
    use crate::text::DeterministicTextMeasurer;
    use crate::theme::{Color, NOIR, STANDARD};

    fn band(height: f64) -> LayoutRect {
        LayoutRect::new(600.0, 840.0, 850.0, height)
    }

    #[test]
    fn short_band_or_empty_text_draws_nothing() {
        let m = DeterministicTextMeasurer::default();
        let mut scene = Scene::new(1500.0, 1000.0);
        draw_notes(&mut scene, "メモ", &band(49.0), &STANDARD, &m);
        draw_notes(&mut scene, "", &band(110.0), &STANDARD, &m);
        assert!(scene.commands.is_empty());
    }

    #[test]
    fn notes_are_clipped_with_overlay_and_padded_lines() {
        let m = DeterministicTextMeasurer::default();
        let mut scene = Scene::new(1500.0, 1000.0);
        draw_notes(&mut scene, "一行目\n二行目", &band(110.0), &STANDARD, &m);

        assert_eq!(scene.commands.len(), 1);
        let DrawCommand::Clip { rect, children } = &scene.commands[0] else {
            panic!("expected a clip group");
        };
        assert_eq!(*rect, LayoutRect::new(595.0, 840.0, 860.0, 110.0));
        assert_eq!(
            children[0],
            DrawCommand::Rect {
                rect: band(110.0),
                fill: Some(Paint::Solid(Color::BLACK.with_alpha(0.03))),
                stroke: None,
            }
        );
        let positions: Vec<(f64, f64)> = children
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(positions, vec![(615.0, 855.0), (615.0, 881.0)]);
    }

    #[test]
    fn height_budget_limits_line_count() {
        let m = DeterministicTextMeasurer::default();
        let text = (1..=10).map(|i| format!("行{i}")).collect::<Vec<_>>().join("\n");
        let mut scene = Scene::new(1500.0, 1000.0);
        // Budget 110 - 30 = 80 fits three 26px lines.
        draw_notes(&mut scene, &text, &band(110.0), &NOIR, &m);
        assert_eq!(scene.texts(), vec!["行1", "行2", "行3"]);
    }
}
