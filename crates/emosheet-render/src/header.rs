use crate::model::SheetLayout;
use crate::portrait::Portrait;
use crate::scene::{DrawCommand, Scene, Stroke, TextAnchor, TextBaseline};
use crate::theme::Theme;
use emosheet_core::CharacterModel;

pub fn placeholder_caption(width: f64, height: f64) -> String {
    format!("Character Image Area ({width}x{height})")
}

/// Name, furigana and the portrait (or its placeholder) in the left column.
pub fn draw_header(
    scene: &mut Scene,
    model: &CharacterModel,
    portrait: Option<&Portrait>,
    layout: &SheetLayout,
    theme: &Theme,
) {
    scene.text(
        layout.name.x,
        layout.name.y,
        &model.name,
        &theme.main_font(80.0).bold(),
        theme.text,
    );
    if let Some(furigana) = &model.furigana {
        scene.text(
            layout.furigana.x,
            layout.furigana.y,
            furigana,
            &theme.sub_font(24.0),
            theme.sub_accent,
        );
    }

    let area = layout.portrait;
    match portrait {
        Some(p) => {
            let rect = p.fit_in(&area);
            tracing::trace!(w = rect.width, h = rect.height, "portrait placed");
            scene.push(DrawCommand::Image {
                rect,
                href: p.href.clone(),
            });
        }
        None => {
            scene.stroke_rect(area, Stroke::solid(theme.sub_accent, 1.0).dashed(&[5.0, 5.0]));
            let center = area.center();
            scene.text_aligned(
                center.x,
                center.y,
                &placeholder_caption(area.width, area.height),
                &theme.sub_font(20.0),
                theme.sub_accent,
                TextAnchor::Middle,
                TextBaseline::Middle,
            );
        }
    }
}
