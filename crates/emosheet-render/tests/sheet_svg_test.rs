use emosheet_core::{CharacterModel, SkillEntry, parse_character};
use emosheet_render::portrait::Portrait;
use emosheet_render::scene::{DrawCommand, Paint};
use emosheet_render::svg::SvgRenderOptions;
use emosheet_render::theme::ThemeKey;
use emosheet_render::{Error, RenderOptions, SheetConfig, render_sheet, render_sheet_svg};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn basic_model() -> CharacterModel {
    let path = workspace_root()
        .join("fixtures")
        .join("character")
        .join("basic.json");
    let text = std::fs::read_to_string(&path).expect("fixture");
    parse_character(&text).expect("parse ok")
}

#[test]
fn every_theme_renders_the_fixture() {
    let model = basic_model();
    for theme in ThemeKey::ALL {
        let options = RenderOptions {
            theme,
            ..Default::default()
        };
        let scene = render_sheet(&model, &model.memo, None, &options).expect("render ok");

        let DrawCommand::Rect {
            rect,
            fill: Some(Paint::Solid(bg)),
            ..
        } = &scene.commands[0]
        else {
            panic!("first command should be the background");
        };
        assert_eq!((rect.width, rect.height), (1500.0, 1000.0));
        assert_eq!(*bg, theme.theme().background);

        let texts = scene.texts();
        for expected in ["久遠寺 朔", "くおんじ さく", "共鳴感情", "信頼", "技能", "知識：古書"] {
            assert!(texts.contains(&expected), "{theme}: missing {expected}");
        }
        assert!(texts.contains(&"Character Image Area (500x750)"));
    }
}

#[test]
fn svg_output_has_fixed_canvas_and_embedded_portrait() {
    let model = basic_model();
    let portrait = Portrait::new(640, 480, "data:image/png;base64,iVBORw0KGgo=");
    let svg = render_sheet_svg(
        &model,
        "",
        Some(&portrait),
        &RenderOptions::default(),
        &SvgRenderOptions::default(),
    )
    .expect("render ok");

    assert!(svg.contains(r#"width="1500" height="1000" viewBox="0 0 1500 1000""#));
    assert!(svg.contains(r#"xlink:href="data:image/png;base64,iVBORw0KGgo=""#));
    assert!(!svg.contains("Character Image Area"));
    // No notes text means no clip group.
    assert!(!svg.contains("<clipPath"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn skill_grid_renders_only_two_columns_worth() {
    let mut model = CharacterModel::default();
    model.skills = (0..40)
        .map(|i| SkillEntry::new(format!("skill{i:02}"), "1", "2"))
        .collect();
    let scene = render_sheet(&model, "", None, &RenderOptions::default()).expect("render ok");

    let shown: Vec<&str> = scene
        .texts()
        .into_iter()
        .filter(|t| t.starts_with("skill"))
        .collect();
    // 400px band: (400 - 50) / 30 = 11 rows per column.
    assert_eq!(shown.len(), 22);
    assert_eq!(shown.first(), Some(&"skill00"));
    assert_eq!(shown.last(), Some(&"skill21"));
}

#[test]
fn undersized_canvas_fails_before_drawing() {
    let options = RenderOptions {
        canvas_width: 1200.0,
        ..Default::default()
    };
    let err = render_sheet(&CharacterModel::default(), "", None, &options).unwrap_err();
    assert!(matches!(err, Error::CanvasTooSmall { .. }));
    assert_eq!(
        err.to_string(),
        "canvas 1200x1000 is smaller than the minimum sheet size 1470x1000"
    );
}

#[test]
fn sheet_config_fills_missing_fields_with_defaults() {
    let config = SheetConfig::from_json(r#"{ "theme": "noir", "canvas_width": 1600 }"#).unwrap();
    assert_eq!(config.theme, ThemeKey::Noir);
    assert_eq!(config.canvas_width, 1600.0);
    assert_eq!(config.canvas_height, 1000.0);
    assert_eq!(config.export_prefix, "emoklore_sheet");

    let options = config.render_options();
    assert_eq!(options.theme, ThemeKey::Noir);
    assert_eq!(options.canvas_width, 1600.0);

    assert!(SheetConfig::from_json(r#"{ "theme": "sepia" }"#).is_err());
}
