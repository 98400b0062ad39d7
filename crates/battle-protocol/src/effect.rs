//! Effect references
//!
//! Effects arrive as free text such as `item: Leftovers` or `ability:Intimidate`.
//! This module splits off the category prefix and derives the canonical id.

use serde::{Deserialize, Serialize};

/// Category prefix carried by an effect reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Ability,
    Item,
    Move,
}

impl EffectKind {
    fn prefix(&self) -> &'static str {
        match self {
            EffectKind::Ability => "ability:",
            EffectKind::Item => "item:",
            EffectKind::Move => "move:",
        }
    }
}

/// A parsed effect reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRef {
    /// Category prefix, if one was written
    pub kind: Option<EffectKind>,
    /// Display name with the prefix removed
    pub name: String,
    /// Canonical identifier (lowercase alphanumerics)
    pub id: String,
}

/// Canonicalizes a name: lowercase, keeping only `[a-z0-9]`.
pub fn to_id(s: &str) -> String {
    s.chars()
        .filter_map(|c| {
            let c = c.to_ascii_lowercase();
            c.is_ascii_alphanumeric().then_some(c)
        })
        .collect()
}

/// Parses a raw effect reference. Absent or empty input yields an empty reference.
pub fn parse_effect(raw: Option<&str>) -> EffectRef {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return EffectRef::default();
    };

    let (kind, name) = [EffectKind::Ability, EffectKind::Item, EffectKind::Move]
        .into_iter()
        .find_map(|kind| raw.strip_prefix(kind.prefix()).map(|rest| (Some(kind), rest.trim())))
        .unwrap_or((None, raw));

    EffectRef {
        kind,
        name: name.to_string(),
        id: to_id(name),
    }
}
