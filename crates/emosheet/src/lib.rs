#![forbid(unsafe_code)]

//! `emosheet` turns an Emoklore character export into a one-page character sheet.
//!
//! The core (always on) parses the export into a [`CharacterModel`]. Optional features add the
//! rest of the pipeline:
//!
//! - `render`: layout + SVG rendering (`emosheet::render`)
//! - `raster`: PNG/JPG/PDF output via pure-Rust SVG rasterization, and portrait decoding

pub use emosheet_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use emosheet_render::model::SheetLayout;
    pub use emosheet_render::portrait::Portrait;
    pub use emosheet_render::scene::Scene;
    pub use emosheet_render::svg::SvgRenderOptions;
    pub use emosheet_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use emosheet_render::theme::{Theme, ThemeKey};
    pub use emosheet_render::{DEFAULT_EXPORT_PREFIX, RenderOptions, SheetConfig};

    use emosheet_core::CharacterModel;

    mod canvas;
    #[cfg(feature = "raster")]
    pub mod raster;

    pub use canvas::{PortraitSlot, RenderedSheet, SheetCanvas};

    #[derive(Debug, thiserror::Error)]
    pub enum SheetError {
        #[error(transparent)]
        Parse(#[from] emosheet_core::Error),
        #[error(transparent)]
        Render(#[from] emosheet_render::Error),
    }

    pub type Result<T> = std::result::Result<T, SheetError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several sheets can be
    /// inlined into one page without their gradient and clip ids colliding.
    pub fn sanitize_sheet_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "sheet-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 6);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
            out.push(if ok { ch } else { '-' });
        }
        if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
            out.insert_str(0, "sheet-");
        }
        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "sheet" {
            return "sheet-untitled".to_string();
        }
        out.to_string()
    }

    /// `<prefix>_<unix millis>.png`.
    pub fn export_file_name(prefix: &str, at: chrono::DateTime<chrono::Utc>) -> String {
        format!("{prefix}_{}.png", at.timestamp_millis())
    }

    pub fn default_export_file_name(prefix: &str) -> String {
        export_file_name(prefix, chrono::Utc::now())
    }

    /// Parses `text` and renders the sheet scene in one call.
    pub fn render_scene_sync(
        text: &str,
        notes: &str,
        portrait: Option<&Portrait>,
        options: &RenderOptions,
    ) -> Result<Scene> {
        let model = emosheet_core::parse_character(text)?;
        Ok(emosheet_render::render_sheet(
            &model, notes, portrait, options,
        )?)
    }

    pub fn render_svg_sync(
        text: &str,
        notes: &str,
        portrait: Option<&Portrait>,
        options: &RenderOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let scene = render_scene_sync(text, notes, portrait, options)?;
        Ok(emosheet_render::svg::render_scene_svg(&scene, svg_options))
    }

    /// Where the notes band text comes from.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub enum NotesSource {
        #[default]
        None,
        Text(String),
        /// The character's own memo.
        Memo,
    }

    impl NotesSource {
        pub fn resolve<'a>(&'a self, model: &'a CharacterModel) -> &'a str {
            match self {
                NotesSource::None => "",
                NotesSource::Text(text) => text,
                NotesSource::Memo => &model.memo,
            }
        }
    }

    /// Bundles the options for repeated renders.
    ///
    /// Stays runtime-agnostic: all work is CPU-bound and does no I/O.
    #[derive(Debug, Clone, Default)]
    pub struct SheetRenderer {
        pub render: RenderOptions,
        pub svg: SvgRenderOptions,
        pub notes: NotesSource,
    }

    impl SheetRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn from_config(config: &SheetConfig) -> Self {
            Self {
                render: config.render_options(),
                ..Default::default()
            }
        }

        pub fn with_theme(mut self, theme: ThemeKey) -> Self {
            self.render.theme = theme;
            self
        }

        pub fn with_notes(mut self, notes: NotesSource) -> Self {
            self.notes = notes;
            self
        }

        pub fn with_sheet_id(mut self, sheet_id: &str) -> Self {
            self.svg.sheet_id = sanitize_sheet_id(sheet_id);
            self
        }

        pub fn parse_sync(&self, text: &str) -> Result<CharacterModel> {
            Ok(emosheet_core::parse_character(text)?)
        }

        pub fn layout_sync(&self) -> Result<SheetLayout> {
            Ok(emosheet_render::layout_sheet(&self.render)?)
        }

        pub fn render_model(
            &self,
            model: &CharacterModel,
            portrait: Option<&Portrait>,
        ) -> Result<Scene> {
            let notes = self.notes.resolve(model);
            Ok(emosheet_render::render_sheet(
                model,
                notes,
                portrait,
                &self.render,
            )?)
        }

        pub fn render_scene_sync(&self, text: &str, portrait: Option<&Portrait>) -> Result<Scene> {
            let model = self.parse_sync(text)?;
            self.render_model(&model, portrait)
        }

        pub fn render_svg_sync(&self, text: &str, portrait: Option<&Portrait>) -> Result<String> {
            let scene = self.render_scene_sync(text, portrait)?;
            Ok(emosheet_render::svg::render_scene_svg(&scene, &self.svg))
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            text: &str,
            portrait: Option<&Portrait>,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_png(&self.render_svg_sync(text, portrait)?, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            text: &str,
            portrait: Option<&Portrait>,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_jpeg(&self.render_svg_sync(text, portrait)?, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(
            &self,
            text: &str,
            portrait: Option<&Portrait>,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_pdf(&self.render_svg_sync(text, portrait)?)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn sanitize_sheet_id_produces_safe_tokens() {
            assert_eq!(sanitize_sheet_id("  "), "sheet-untitled");
            assert_eq!(sanitize_sheet_id("my sheet!"), "my-sheet");
            assert_eq!(sanitize_sheet_id("42"), "sheet-42");
            assert_eq!(sanitize_sheet_id("久遠寺"), "sheet-untitled");
        }

        #[test]
        fn export_file_name_uses_unix_millis() {
            use chrono::TimeZone;
            let at = chrono::Utc
                .timestamp_millis_opt(1_700_000_000_123)
                .single()
                .unwrap();
            assert_eq!(
                export_file_name(DEFAULT_EXPORT_PREFIX, at),
                "emoklore_sheet_1700000000123.png"
            );
            assert!(default_export_file_name("x").starts_with("x_"));
        }

        #[test]
        fn notes_source_picks_memo_or_text() {
            let model = CharacterModel {
                memo: "memo".to_string(),
                ..Default::default()
            };
            assert_eq!(NotesSource::None.resolve(&model), "");
            assert_eq!(NotesSource::Memo.resolve(&model), "memo");
            assert_eq!(NotesSource::Text("t".into()).resolve(&model), "t");
        }

        #[test]
        fn parse_errors_surface_through_sheet_error() {
            let err = SheetRenderer::new().render_svg_sync("", None).unwrap_err();
            assert!(matches!(err, SheetError::Parse(emosheet_core::Error::EmptyInput)));

            let err = render_svg_sync(
                r#"{"data":{}}"#,
                "",
                None,
                &RenderOptions {
                    canvas_height: 10.0,
                    ..Default::default()
                },
                &SvgRenderOptions::default(),
            )
            .unwrap_err();
            assert!(matches!(err, SheetError::Render(_)));
        }
    }
}
