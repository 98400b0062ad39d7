//! Capitalizes lowercase pronoun templates at the start of a sentence.
//!
//! `opposingPokemon` renders as "the opposing Gengar", which needs a capital
//! when it opens a line, optionally after the two-space indent and an opening
//! parenthesis or bracket.

use std::borrow::Cow;

use regex::{Captures, Regex};

use crate::templates::TemplateStore;

/// Default-namespace templates that may open a sentence.
const PRONOUN_TEMPLATES: [&str; 6] = [
    "pokemon",
    "opposingPokemon",
    "team",
    "opposingTeam",
    "party",
    "opposingParty",
];

#[derive(Debug, Clone)]
pub struct LowercaseFixer {
    pattern: Option<Regex>,
}

impl LowercaseFixer {
    /// Builds the fixer from the lowercase pronoun templates in `store`.
    pub fn from_templates(store: &TemplateStore) -> Self {
        let prefixes: Vec<String> = PRONOUN_TEMPLATES
            .iter()
            .filter_map(|name| store.default_text(name))
            .filter(|template| template.chars().next().is_some_and(char::is_lowercase))
            .map(|template| match template.find('[') {
                Some(bracket) => &template[..bracket],
                None => template,
            })
            .map(regex::escape)
            .collect();

        if prefixes.is_empty() {
            return Self { pattern: None };
        }

        let source = format!(r"((?:^|\n)(?:  |  \(|\[)?)({})", prefixes.join("|"));
        match Regex::new(&source) {
            Ok(pattern) => Self {
                pattern: Some(pattern),
            },
            Err(e) => {
                tracing::warn!("Lowercase fixer disabled: {}", e);
                Self { pattern: None }
            }
        }
    }

    pub fn apply<'t>(&self, input: &'t str) -> Cow<'t, str> {
        let Some(pattern) = &self.pattern else {
            return Cow::Borrowed(input);
        };
        pattern.replace_all(input, |caps: &Captures<'_>| {
            let lead = &caps[1];
            let prefix = &caps[2];
            let mut chars = prefix.chars();
            let first: String = chars
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default();
            format!("{lead}{first}{}", chars.as_str())
        })
    }
}
