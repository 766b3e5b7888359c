use crate::model::LayoutRect;
use crate::scene::Scene;
use crate::separator::draw_separator;
use crate::text::{TextMeasurer, truncate_with_ellipsis};
use crate::theme::Theme;
use emosheet_core::SkillEntry;

pub const TITLE: &str = "技能";
pub const COLUMNS: usize = 2;
pub const COLUMN_GAP: f64 = 20.0;
pub const ROW_HEIGHT: f64 = 30.0;
/// Title + separator height above the first row.
pub const HEADER_HEIGHT: f64 = 50.0;
/// Share of a column reserved for the skill name.
pub const NAME_SHARE: f64 = 0.75;
const NAME_MARGIN: f64 = 5.0;
const VALUE_OFFSET: f64 = 50.0;

/// Rows per column for a band of `band_height`.
pub fn column_capacity(band_height: f64) -> usize {
    let rows = ((band_height - HEADER_HEIGHT) / ROW_HEIGHT).floor();
    if rows.is_finite() && rows > 0.0 {
        rows as usize
    } else {
        0
    }
}

pub fn column_width(band_width: f64) -> f64 {
    (band_width - COLUMN_GAP * (COLUMNS as f64 - 1.0)) / COLUMNS as f64
}

pub fn draw_skill_grid(
    scene: &mut Scene,
    skills: &[SkillEntry],
    band: &LayoutRect,
    theme: &Theme,
    measurer: &dyn TextMeasurer,
) {
    let (x, y) = (band.x, band.y);
    scene.text(x, y, TITLE, &theme.main_font(24.0).bold(), theme.accent);
    draw_separator(scene, x, y + 35.0, band.width, theme);

    let capacity = column_capacity(band.height);
    let col_width = column_width(band.width);
    let visible = skills.len().min(capacity * COLUMNS);
    if visible < skills.len() {
        tracing::debug!(
            total = skills.len(),
            visible,
            "skill grid is full, dropping remaining entries"
        );
    }

    let name_style = theme.sub_font(18.0);
    let level_style = theme.sub_font(14.0);
    let value_style = theme.sub_font(18.0).bold();
    let name_width = col_width * NAME_SHARE;

    for (index, skill) in skills.iter().take(visible).enumerate() {
        let col = index / capacity;
        let row = index % capacity;
        let cell_x = x + col as f64 * (col_width + COLUMN_GAP);
        let cell_y = y + HEADER_HEIGHT + row as f64 * ROW_HEIGHT;

        let name =
            truncate_with_ellipsis(&skill.name, measurer, &name_style, name_width - NAME_MARGIN);
        scene.text(cell_x, cell_y, &name, &name_style, theme.text);

        if skill.is_resonance {
            continue;
        }

        scene.text(
            cell_x + name_width,
            cell_y + 3.0,
            &format!("Lv:{}", skill.level),
            &level_style,
            theme.sub_accent,
        );
        scene.text(
            cell_x + name_width + VALUE_OFFSET,
            cell_y,
            &skill.value,
            &value_style,
            theme.text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCommand;
    use crate::text::{DeterministicTextMeasurer, ELLIPSIS};
    use crate::theme::STANDARD;

    fn band(height: f64) -> LayoutRect {
        LayoutRect::new(600.0, 420.0, 850.0, height)
    }

    fn skills(n: usize) -> Vec<SkillEntry> {
        (0..n)
            .map(|i| SkillEntry::new(format!("技能{i}"), "1", "3"))
            .collect()
    }

    fn name_cells(scene: &Scene) -> Vec<(f64, f64, String)> {
        scene
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text {
                    x, y, text, style, ..
                } if style.font_size == 18.0 && style.font_weight.is_none() => {
                    Some((*x, *y, text.clone()))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn capacity_follows_band_height() {
        assert_eq!(column_capacity(400.0), 11);
        assert_eq!(column_capacity(79.0), 0);
        assert_eq!(column_capacity(80.0), 1);
        assert_eq!(column_capacity(10.0), 0);
        assert_eq!(column_width(850.0), 415.0);
    }

    #[test]
    fn overflow_beyond_two_columns_is_dropped_in_input_order() {
        let m = DeterministicTextMeasurer::default();
        let mut scene = Scene::new(1500.0, 1000.0);
        draw_skill_grid(&mut scene, &skills(30), &band(400.0), &STANDARD, &m);

        let cells = name_cells(&scene);
        assert_eq!(cells.len(), 22);
        assert_eq!(cells[0], (600.0, 470.0, "技能0".to_string()));
        assert_eq!(cells[10].1, 470.0 + 10.0 * 30.0);
        // Entry 11 starts the second column.
        assert_eq!(cells[11], (1035.0, 470.0, "技能11".to_string()));
        assert_eq!(cells[21].2, "技能21");
    }

    #[test]
    fn zero_capacity_draws_only_the_header() {
        let m = DeterministicTextMeasurer::default();
        let mut scene = Scene::new(1500.0, 1000.0);
        draw_skill_grid(&mut scene, &skills(3), &band(60.0), &STANDARD, &m);
        assert_eq!(scene.texts(), vec![TITLE]);
    }

    #[test]
    fn resonance_entries_render_name_only() {
        let m = DeterministicTextMeasurer::default();
        let entries = vec![
            SkillEntry::infinite_resonance(),
            SkillEntry::new("剣術", "3", "5"),
        ];
        let mut scene = Scene::new(1500.0, 1000.0);
        draw_skill_grid(&mut scene, &entries, &band(400.0), &STANDARD, &m);
        assert_eq!(scene.texts(), vec![TITLE, "∞共鳴", "剣術", "Lv:3", "5"]);

        let level = scene
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { x, y, text, .. } if text == "Lv:3" => Some((*x, *y)),
                _ => None,
            })
            .unwrap();
        assert_eq!(level, (600.0 + 415.0 * 0.75, 500.0 + 3.0));
    }

    #[test]
    fn long_names_are_truncated_to_the_name_field() {
        let m = DeterministicTextMeasurer::default();
        let long = "とても長い技能名がここに入りますがカラムに収まりません";
        let entries = vec![SkillEntry::new(long, "2", "7")];
        let mut scene = Scene::new(1500.0, 1000.0);
        draw_skill_grid(&mut scene, &entries, &band(400.0), &STANDARD, &m);

        let name = &name_cells(&scene)[0].2;
        assert!(name.ends_with(ELLIPSIS));
        assert!(long.starts_with(name.trim_end_matches(ELLIPSIS)));
        let limit = column_width(850.0) * NAME_SHARE - 5.0;
        assert!(m.text_width(name, &STANDARD.sub_font(18.0)) <= limit);
    }
}
