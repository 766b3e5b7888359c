#![forbid(unsafe_code)]

//! Headless layout and SVG rendering for emosheet character sheets.
//!
//! [`render_sheet`] turns a [`CharacterModel`] into a [`Scene`] of drawing commands;
//! [`render_sheet_svg`] serializes that scene. Both are pure: the same model, notes, portrait and
//! options always produce the same output.

pub mod header;
pub mod layout;
pub mod model;
pub mod notes;
pub mod portrait;
pub mod radar;
pub mod resonance;
pub mod scene;
pub mod separator;
pub mod skills;
pub mod svg;
pub mod text;
pub mod theme;

use crate::model::{LayoutRect, SheetLayout};
use crate::portrait::Portrait;
use crate::scene::Scene;
use crate::svg::SvgRenderOptions;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use crate::theme::ThemeKey;
use emosheet_core::CharacterModel;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown theme: {key}")]
    UnknownTheme { key: String },
    #[error(
        "canvas {width}x{height} is smaller than the minimum sheet size {min_width}x{min_height}"
    )]
    CanvasTooSmall {
        width: f64,
        height: f64,
        min_width: f64,
        min_height: f64,
    },
    #[error("sheet config JSON error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct RenderOptions {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub theme: ThemeKey,
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            canvas_width: layout::DEFAULT_CANVAS_WIDTH,
            canvas_height: layout::DEFAULT_CANVAS_HEIGHT,
            theme: ThemeKey::default(),
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

impl std::fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("canvas_width", &self.canvas_width)
            .field("canvas_height", &self.canvas_height)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

/// File-level sheet settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub theme: ThemeKey,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub export_prefix: String,
}

pub const DEFAULT_EXPORT_PREFIX: &str = "emoklore_sheet";

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            theme: ThemeKey::default(),
            canvas_width: layout::DEFAULT_CANVAS_WIDTH,
            canvas_height: layout::DEFAULT_CANVAS_HEIGHT,
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }
}

impl SheetConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            theme: self.theme,
            ..Default::default()
        }
    }
}

pub fn layout_sheet(options: &RenderOptions) -> Result<SheetLayout> {
    layout::compute_layout(options.canvas_width, options.canvas_height)
}

/// Lays out and draws one sheet.
///
/// Fails only when the canvas is below the minimum size; nothing is drawn in that case.
pub fn render_sheet(
    model: &CharacterModel,
    notes: &str,
    portrait: Option<&Portrait>,
    options: &RenderOptions,
) -> Result<Scene> {
    let layout = layout_sheet(options)?;
    let theme = options.theme.theme();
    let measurer = options.text_measurer.as_ref();
    tracing::debug!(
        theme = %options.theme,
        skills = model.skills.len(),
        has_portrait = portrait.is_some(),
        "rendering sheet"
    );

    let mut scene = Scene::new(layout.canvas_width, layout.canvas_height);
    scene.fill_rect(
        LayoutRect::new(0.0, 0.0, layout.canvas_width, layout.canvas_height),
        theme.background,
    );
    header::draw_header(&mut scene, model, portrait, &layout, theme);
    radar::draw_radar_chart(&mut scene, &model.stats, &layout.chart, theme);
    resonance::draw_resonance(&mut scene, &model.resonance, &layout.resonance, theme, measurer);
    skills::draw_skill_grid(&mut scene, &model.skills, &layout.skills_band, theme, measurer);
    notes::draw_notes(&mut scene, notes, &layout.notes_band, theme, measurer);
    Ok(scene)
}

pub fn render_sheet_svg(
    model: &CharacterModel,
    notes: &str,
    portrait: Option<&Portrait>,
    options: &RenderOptions,
    svg_options: &SvgRenderOptions,
) -> Result<String> {
    let scene = render_sheet(model, notes, portrait, options)?;
    Ok(svg::render_scene_svg(&scene, svg_options))
}
