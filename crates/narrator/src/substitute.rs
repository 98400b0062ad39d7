//! Placeholder substitution.
//!
//! Each substitution replaces only the first occurrence of its token. Some
//! templates reuse a token (`[TRAINER]` twice in `startBattle`), and callers
//! fill those by pushing the same placeholder twice.

use std::fmt;

/// A bracketed token that may appear in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Pokemon,
    Trainer,
    Item,
    Move,
    Stat,
    Number,
    Source,
    Target,
    Effect,
    Type,
    Species,
    Team,
    Party,
    Nickname,
    FullName,
    Percentage,
    Ability,
}

impl Placeholder {
    /// The token as written in templates.
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::Pokemon => "[POKEMON]",
            Placeholder::Trainer => "[TRAINER]",
            Placeholder::Item => "[ITEM]",
            Placeholder::Move => "[MOVE]",
            Placeholder::Stat => "[STAT]",
            Placeholder::Number => "[NUMBER]",
            Placeholder::Source => "[SOURCE]",
            Placeholder::Target => "[TARGET]",
            Placeholder::Effect => "[EFFECT]",
            Placeholder::Type => "[TYPE]",
            Placeholder::Species => "[SPECIES]",
            Placeholder::Team => "[TEAM]",
            Placeholder::Party => "[PARTY]",
            Placeholder::Nickname => "[NICKNAME]",
            Placeholder::FullName => "[FULLNAME]",
            Placeholder::Percentage => "[PERCENTAGE]",
            Placeholder::Ability => "[ABILITY]",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// An ordered list of substitution passes.
///
/// A pass with no value leaves its token in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    passes: Vec<(Placeholder, Option<String>)>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pass that fills `placeholder` with `value`.
    pub fn set(mut self, placeholder: Placeholder, value: impl Into<String>) -> Self {
        self.passes.push((placeholder, Some(value.into())));
        self
    }

    /// Adds a pass that fills `placeholder` only when a value is present.
    pub fn set_opt(mut self, placeholder: Placeholder, value: Option<&str>) -> Self {
        self.passes.push((placeholder, value.map(str::to_string)));
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Runs every pass over `template` in order.
    pub fn apply(&self, template: &str) -> String {
        let mut text = template.to_string();
        for (placeholder, value) in &self.passes {
            if let Some(value) = value {
                text = text.replacen(placeholder.token(), value, 1);
            }
        }
        text
    }
}
