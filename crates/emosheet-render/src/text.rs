use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub mod wrap;

pub use wrap::{ELLIPSIS, truncate_with_ellipsis, wrap_text_lines};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn new(font_family: &str, font_size: f64) -> Self {
        Self {
            font_family: Some(font_family.to_string()),
            font_size,
            font_weight: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.font_weight = Some("bold".to_string());
        self
    }

    pub fn is_bold(&self) -> bool {
        matches!(self.font_weight.as_deref(), Some("bold" | "bolder" | "700" | "800" | "900"))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        self.measure(text, style).width
    }
}

/// Font-free measurer: East Asian wide graphemes are one em, narrow graphemes a fixed fraction of
/// an em. Stable across machines, which keeps layout reproducible.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
    pub bold_width_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<&str> {
        text.split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect()
    }

    fn grapheme_em(&self, g: &str) -> f64 {
        let narrow = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        match g.width() {
            0 => 0.0,
            1 => narrow,
            _ => 1.0,
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };
        let bold_factor = if !style.is_bold() {
            1.0
        } else if self.bold_width_factor == 0.0 {
            1.05
        } else {
            self.bold_width_factor
        };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let mut max_em: f64 = 0.0;
        for line in &lines {
            let em: f64 = line.graphemes(true).map(|g| self.grapheme_em(g)).sum();
            max_em = max_em.max(em);
        }

        TextMetrics {
            width: max_em * font_size * bold_factor,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}
