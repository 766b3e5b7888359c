#![forbid(unsafe_code)]

//! Character export parser + sheet model (headless).
//!
//! Parsing is the only fallible step: once the JSON document is accepted, field extraction
//! always produces a complete [`CharacterModel`], falling back to defaults for anything missing.

pub mod error;
pub mod extract;
pub mod input;
pub mod model;

pub use error::{Error, Result};
pub use extract::{
    extract_character, extract_furigana, extract_resonance, extract_skills, extract_stats,
};
pub use input::{CharacterData, CharacterDocument, Param};
pub use model::{AttributeScore, CharacterModel, ResonanceInfo, SkillEntry};

/// Parses a character export without extracting any fields.
pub fn parse_document(text: &str) -> Result<CharacterDocument> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }
    let doc: CharacterDocument = serde_json::from_str(text)?;
    tracing::trace!(params = doc.data.params.len(), "parsed character document");
    Ok(doc)
}

/// Parses a character export and extracts the sheet model.
pub fn parse_character(text: &str) -> Result<CharacterModel> {
    let doc = parse_document(text)?;
    Ok(extract_character(&doc.data))
}

#[cfg(test)]
mod tests;
