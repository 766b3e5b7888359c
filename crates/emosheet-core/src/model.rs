use serde::{Deserialize, Serialize};

/// Canonical attribute labels, in chart order.
pub const ATTRIBUTE_LABELS: [&str; 8] = [
    "身体", "器用", "精神", "五感", "知力", "魅力", "社会", "運勢",
];

pub const DEFAULT_NAME: &str = "No Name";

/// Placeholder for a resonance slot the memo does not mention.
pub const RESONANCE_NONE: &str = "なし";

/// Display name of the unconditional resonance skill.
pub const INFINITE_RESONANCE: &str = "∞共鳴";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeScore {
    pub label: String,
    /// Raw extracted value. Chart code clamps; the model never does.
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub level: String,
    pub value: String,
    pub is_resonance: bool,
}

impl SkillEntry {
    pub fn new(
        name: impl Into<String>,
        level: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
            value: value.into(),
            is_resonance: false,
        }
    }

    pub fn infinite_resonance() -> Self {
        Self {
            name: INFINITE_RESONANCE.to_string(),
            level: String::new(),
            value: String::new(),
            is_resonance: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResonanceInfo {
    pub front: String,
    pub back: String,
    pub roots: String,
}

impl Default for ResonanceInfo {
    fn default() -> Self {
        Self {
            front: RESONANCE_NONE.to_string(),
            back: RESONANCE_NONE.to_string(),
            roots: RESONANCE_NONE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterModel {
    pub name: String,
    pub furigana: Option<String>,
    pub stats: Vec<AttributeScore>,
    pub skills: Vec<SkillEntry>,
    pub resonance: ResonanceInfo,
    pub memo: String,
}

impl Default for CharacterModel {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            furigana: None,
            stats: ATTRIBUTE_LABELS
                .iter()
                .map(|label| AttributeScore {
                    label: (*label).to_string(),
                    value: 0,
                })
                .collect(),
            skills: Vec::new(),
            resonance: ResonanceInfo::default(),
            memo: String::new(),
        }
    }
}
