use crate::model::{LayoutRect, ResonanceGeometry};
use crate::scene::Scene;
use crate::separator::draw_separator;
use crate::text::TextMeasurer;
use crate::theme::Theme;
use emosheet_core::ResonanceInfo;

pub const TITLE: &str = "共鳴感情";
const ROW_PITCH: f64 = 60.0;
const VALUE_X: f64 = 80.0;

pub fn draw_resonance(
    scene: &mut Scene,
    resonance: &ResonanceInfo,
    geo: &ResonanceGeometry,
    theme: &Theme,
    measurer: &dyn TextMeasurer,
) {
    let (x, y) = (geo.x, geo.y);
    scene.text(x, y, TITLE, &theme.main_font(24.0).bold(), theme.accent);
    draw_separator(scene, x, y + 35.0, geo.width, theme);

    let label_style = theme.sub_font(18.0).bold();
    let value_style = theme.main_font(32.0).bold();
    let rows = [
        ("表:", resonance.front.as_str()),
        ("裏:", resonance.back.as_str()),
        ("ルーツ:", resonance.roots.as_str()),
    ];

    let mut row_y = y + 60.0;
    for (label, value) in rows {
        scene.text(x + 5.0, row_y + 12.0, label, &label_style, theme.sub_accent);

        // Emphasis bar under the value, exactly as wide as the value text.
        let bar_width = measurer.text_width(value, &value_style);
        scene.fill_rect(
            LayoutRect::new(x + VALUE_X, row_y + 20.0, bar_width, 10.0),
            theme.accent,
        );
        scene.text(x + VALUE_X, row_y, value, &value_style, theme.text);
        row_y += ROW_PITCH;
    }
}
