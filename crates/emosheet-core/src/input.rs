//! Raw character export document.
//!
//! Only the fields the sheet reads are declared; everything else in the export is ignored.
//! Sub-fields default when absent or mistyped so a sparse or hand-edited export still parses;
//! only malformed JSON and a missing `data` object are errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterDocument {
    pub data: CharacterData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterData {
    #[serde(default, deserialize_with = "text_or_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub memo: Option<String>,
    #[serde(default, deserialize_with = "params_or_empty")]
    pub params: Vec<Param>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub commands: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Param {
    #[serde(default, deserialize_with = "label_or_empty")]
    pub label: String,
    #[serde(default)]
    pub value: Value,
}

impl Param {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Strings pass through and numbers keep their JSON spelling; anything else reads as absent.
fn text_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn label_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

// `null`, a map, or stray non-object entries all occur in hand-edited exports.
fn params_or_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Param>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value::<Param>(item).ok())
        .collect())
}
