//! Field extraction from a raw character export.
//!
//! Every matcher is first-match-wins. None of these functions fail: absent or malformed
//! sub-fields resolve to the defaults documented on [`crate::model`].

use crate::input::{CharacterData, Param};
use crate::model::{
    ATTRIBUTE_LABELS, AttributeScore, CharacterModel, DEFAULT_NAME, INFINITE_RESONANCE,
    ResonanceInfo, SkillEntry,
};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const HIDE_MARKERS: [char; 2] = ['＊', '*'];

fn furigana_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ふりがな[:：]\s*(.*)$").expect("valid regex"))
}

fn skill_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(.+?)DM<=(.+?)\s*[〈<](.+?)[〉>]").expect("valid regex"))
}

fn resonance_front_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"共鳴感情[・･]表[:：]\s*(.+)").expect("valid regex"))
}

fn resonance_back_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"共鳴感情[・･]裏[:：]\s*(.+)").expect("valid regex"))
}

fn resonance_roots_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"共鳴感情[・･]ルーツ[:：]\s*(.+)").expect("valid regex"))
}

/// Builds the sheet model from the `data` object of an export.
pub fn extract_character(data: &CharacterData) -> CharacterModel {
    let memo = data.memo.as_deref().unwrap_or_default();
    let name = data
        .name
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_NAME)
        .to_string();

    let model = CharacterModel {
        name,
        furigana: extract_furigana(memo),
        stats: extract_stats(&data.params),
        skills: extract_skills(data.commands.as_deref().unwrap_or_default()),
        resonance: extract_resonance(memo),
        memo: memo.to_string(),
    };
    tracing::debug!(
        name = %model.name,
        has_furigana = model.furigana.is_some(),
        skills = model.skills.len(),
        "extracted character model"
    );
    model
}

/// Returns the reading from the first `ふりがな:` line, or `None` when that line is blank or no
/// such line exists.
pub fn extract_furigana(memo: &str) -> Option<String> {
    let re = furigana_regex();
    let caps = memo
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .find_map(|line| re.captures(line))?;
    let reading = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
    if reading.is_empty() {
        None
    } else {
        Some(reading.to_string())
    }
}

/// Always returns one score per canonical label, in canonical order.
pub fn extract_stats(params: &[Param]) -> Vec<AttributeScore> {
    ATTRIBUTE_LABELS
        .iter()
        .map(|label| {
            let value = params
                .iter()
                .find(|p| p.label == *label)
                .map(|p| param_int(&p.value))
                .unwrap_or(0);
            AttributeScore {
                label: (*label).to_string(),
                value,
            }
        })
        .collect()
}

pub fn extract_skills(commands: &str) -> Vec<SkillEntry> {
    let re = skill_regex();
    let mut skills = Vec::new();
    let mut has_infinite_resonance = false;

    for line in commands.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or_default();
        let name = group(3);

        if name.contains(HIDE_MARKERS) {
            tracing::trace!(skill = name, "skipping hidden skill");
            continue;
        }

        if name.contains(INFINITE_RESONANCE) {
            if !has_infinite_resonance {
                skills.push(SkillEntry::infinite_resonance());
                has_infinite_resonance = true;
            }
            continue;
        }

        skills.push(SkillEntry::new(
            name.trim(),
            group(1).trim(),
            group(2).trim(),
        ));
    }

    skills
}

pub fn extract_resonance(memo: &str) -> ResonanceInfo {
    let mut out = ResonanceInfo::default();
    if let Some(v) = first_capture(resonance_front_regex(), memo) {
        out.front = v;
    }
    if let Some(v) = first_capture(resonance_back_regex(), memo) {
        out.back = v;
    }
    if let Some(v) = first_capture(resonance_roots_regex(), memo) {
        out.roots = v;
    }
    out
}

fn first_capture(re: &Regex, haystack: &str) -> Option<String> {
    let v = re.captures(haystack)?.get(1)?.as_str().trim();
    // `.+` can capture only whitespace; keep the placeholder rather than an empty slot.
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

fn param_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_int_prefix(s).unwrap_or(0),
        _ => 0,
    }
}

/// Parses the leading base-10 integer of `s`, ignoring leading whitespace and any trailing
/// garbage (`"3abc"` is 3). Out-of-range values saturate.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let t = s.trim_start();
    let (negative, digits) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        let d = i64::from(b - b'0');
        value = value
            .saturating_mul(10)
            .saturating_add(if negative { -d } else { d });
    }
    seen.then_some(value)
}
