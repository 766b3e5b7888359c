//! Greedy grapheme wrapping and ellipsis truncation.
//!
//! Wrapping is character based (no word boundaries), which suits scripts that do not separate
//! words with spaces. Both helpers work on extended grapheme clusters so a cut never splits a
//! combined glyph.

use super::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
use unicode_segmentation::UnicodeSegmentation;

pub const ELLIPSIS: &str = "..";

/// Wraps `text` into lines no wider than `max_width_px`.
///
/// Explicit newlines always break. Within a line, graphemes are appended until the next one would
/// overflow; a grapheme that is wider than `max_width_px` on its own still gets a line.
///
/// With `max_height_px`, each line costs `line_height_px` and wrapping stops before the first line
/// that would not fit. Nothing marks the cut.
pub fn wrap_text_lines(
    text: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    max_width_px: f64,
    line_height_px: f64,
    max_height_px: Option<f64>,
) -> Vec<String> {
    let fits_another = |emitted: usize| match max_height_px {
        Some(budget) => (emitted as f64 + 1.0) * line_height_px <= budget,
        None => true,
    };

    let mut out: Vec<String> = Vec::new();
    for line in DeterministicTextMeasurer::normalized_text_lines(text) {
        let mut buf = String::new();
        for g in line.graphemes(true) {
            let candidate = format!("{buf}{g}");
            if !buf.is_empty() && measurer.text_width(&candidate, style) > max_width_px {
                if !fits_another(out.len()) {
                    tracing::debug!(lines = out.len(), "text truncated at height budget");
                    return out;
                }
                out.push(std::mem::take(&mut buf));
                buf.push_str(g);
            } else {
                buf = candidate;
            }
        }
        if !fits_another(out.len()) {
            tracing::debug!(lines = out.len(), "text truncated at height budget");
            return out;
        }
        out.push(buf);
    }
    out
}

/// Returns `text` unchanged when it fits `max_width_px`; otherwise drops trailing graphemes until
/// the text plus [`ELLIPSIS`] fits (or nothing is left) and appends the ellipsis.
pub fn truncate_with_ellipsis(
    text: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    max_width_px: f64,
) -> String {
    if measurer.text_width(text, style) <= max_width_px {
        return text.to_string();
    }

    let mut graphemes: Vec<&str> = text.graphemes(true).collect();
    while !graphemes.is_empty() {
        let candidate = format!("{}{ELLIPSIS}", graphemes.concat());
        if measurer.text_width(&candidate, style) <= max_width_px {
            return candidate;
        }
        graphemes.pop();
    }
    ELLIPSIS.to_string()
}
