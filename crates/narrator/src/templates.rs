//! Template store and resolver.
//!
//! Templates are grouped into namespaces. The `default` namespace holds the
//! fallback text for every template name; every other namespace is an effect
//! id (`leftovers`, `stealthrock`, `brn`) holding overrides.
//!
//! A stored value is either display text or a redirect:
//!
//! - `.name` renames the lookup to another template in the same namespace
//! - `#namespace` repeats the lookup in another namespace
//!
//! Each redirect kind is followed at most once per lookup, rename first.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use battle_protocol::parse_effect;
use serde::{Deserialize, Serialize};

/// Name of the fallback namespace.
pub const DEFAULT_NAMESPACE: &str = "default";

const BUNDLED_TOML: &str = include_str!("../data/text.toml");

/// Returns the bundled English template set as TOML.
pub fn bundled_templates_toml() -> &'static str {
    BUNDLED_TOML
}

/// One namespace: template name to stored value.
pub type Namespace = HashMap<String, String>;

/// A stored template value, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    /// Display text (possibly empty)
    Text(&'a str),
    /// Look up this template name in the same namespace
    Rename(&'a str),
    /// Look up the same template name in this namespace
    Redirect(&'a str),
}

impl<'a> Entry<'a> {
    pub fn classify(raw: &'a str) -> Self {
        if let Some(name) = raw.strip_prefix('.') {
            Entry::Rename(name)
        } else if let Some(namespace) = raw.strip_prefix('#') {
            Entry::Redirect(namespace)
        } else {
            Entry::Text(raw)
        }
    }
}

/// A namespace candidate passed to [`TemplateStore::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    /// Nothing to try
    Skip,
    /// A raw effect reference, normalized to a namespace id before lookup
    Effect(&'a str),
    /// Use the default namespace's `<name>Own` template and stop
    Own,
    /// Stop without falling back to the default namespace
    NoDefault,
}

impl<'a> From<&'a str> for Candidate<'a> {
    fn from(raw: &'a str) -> Self {
        if raw.is_empty() {
            Candidate::Skip
        } else {
            Candidate::Effect(raw)
        }
    }
}

impl<'a> From<Option<&'a str>> for Candidate<'a> {
    fn from(raw: Option<&'a str>) -> Self {
        raw.map_or(Candidate::Skip, Candidate::from)
    }
}

/// Immutable namespace → template mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateStore {
    namespaces: HashMap<String, Namespace>,
}

impl TemplateStore {
    /// The bundled English template set, parsed once per process.
    ///
    /// # Panics
    ///
    /// Panics if the bundled asset is malformed. The asset is compiled in
    /// and checked by the crate's tests.
    pub fn bundled() -> Arc<TemplateStore> {
        static BUNDLED: OnceLock<Arc<TemplateStore>> = OnceLock::new();
        BUNDLED
            .get_or_init(|| {
                let store = Self::from_toml_str(BUNDLED_TOML)
                    .expect("bundled template set should always parse");
                Arc::new(store)
            })
            .clone()
    }

    /// Builds a store from namespaces, requiring a `default` namespace.
    pub fn from_namespaces(namespaces: HashMap<String, Namespace>) -> Result<Self, TemplateError> {
        if !namespaces.contains_key(DEFAULT_NAMESPACE) {
            return Err(TemplateError::MissingDefault);
        }
        Ok(Self { namespaces })
    }

    /// Parses a template dictionary from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, TemplateError> {
        let namespaces: HashMap<String, Namespace> = toml::from_str(content)?;
        let store = Self::from_namespaces(namespaces)?;
        tracing::info!("Loaded {} template namespaces from TOML", store.namespace_count());
        Ok(store)
    }

    /// Parses a template dictionary from JSON.
    pub fn from_json_str(content: &str) -> Result<Self, TemplateError> {
        let namespaces: HashMap<String, Namespace> = serde_json::from_str(content)?;
        let store = Self::from_namespaces(namespaces)?;
        tracing::info!("Loaded {} template namespaces from JSON", store.namespace_count());
        Ok(store)
    }

    /// Loads a template dictionary from disk. Files ending in `.json` are
    /// read as JSON, anything else as TOML.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Reading templates from {:?}", path);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }

    /// Raw stored value, redirects not followed.
    pub fn get(&self, namespace: &str, name: &str) -> Option<&str> {
        self.namespaces
            .get(namespace)
            .and_then(|ns| ns.get(name))
            .map(String::as_str)
    }

    /// Raw value from the default namespace.
    pub fn default_text(&self, name: &str) -> Option<&str> {
        self.get(DEFAULT_NAMESPACE, name)
    }

    /// Resolves `name` against `candidates`, most specific first.
    ///
    /// Returns the template followed by a newline, or an empty string when
    /// nothing applies or the winning value is empty.
    pub fn resolve(&self, name: &str, candidates: &[Candidate<'_>]) -> String {
        for candidate in candidates {
            match *candidate {
                Candidate::Skip => continue,
                Candidate::Own => {
                    let own = format!("{name}Own");
                    return with_newline(self.default_text(&own));
                }
                Candidate::NoDefault => return String::new(),
                Candidate::Effect(raw) => {
                    let id = parse_effect(Some(raw)).id;
                    if let Some(value) = self.get(&id, name) {
                        return with_newline(self.follow(&id, name, value));
                    }
                }
            }
        }

        let fallback = self.default_text(name);
        if fallback.is_none() {
            tracing::trace!("No template named {}", name);
        }
        with_newline(fallback)
    }

    /// Follows at most one rename and then at most one namespace redirect.
    fn follow<'s>(&'s self, namespace: &'s str, name: &'s str, value: &'s str) -> Option<&'s str> {
        let (mut namespace, mut name, mut value) = (namespace, name, Some(value));

        if let Some(Entry::Rename(renamed)) = value.map(Entry::classify) {
            name = renamed;
            value = self.get(namespace, name);
        }
        if let Some(Entry::Redirect(target)) = value.map(Entry::classify) {
            namespace = target;
            value = self.get(namespace, name);
        }
        value
    }
}

fn with_newline(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => format!("{text}\n"),
        _ => String::new(),
    }
}

/// Errors that can occur while loading a template dictionary.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// IO error reading a template file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error parsing JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// The dictionary has no `default` namespace
    #[error("template dictionary has no `default` namespace")]
    MissingDefault,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store(toml: &str) -> TemplateStore {
        TemplateStore::from_toml_str(toml).unwrap()
    }

    const SMALL: &str = r##"
        [default]
        damage = "  ([POKEMON] was hurt!)"
        switchIn = "[TRAINER] sent out [FULLNAME]!"
        switchInOwn = "Go! [FULLNAME]!"
        start = "  ([EFFECT] started!)"

        [leftovers]
        heal = "  [POKEMON] ate some leftovers."

        [blacksludge]
        heal = "#leftovers"
        start = ".heal"

        [psn]
        damage = "  [POKEMON] was hurt by poison!"
        start = ""

        [tox]
        damage = "#psn"
        alias = ".damage"

        [brn]
        damage = "  [POKEMON] was hurt by its burn!"
    "##;

    #[test]
    fn test_bundled_templates_parse() {
        let store = TemplateStore::bundled();
        assert!(store.has_namespace(DEFAULT_NAMESPACE));
        assert!(store.namespace_count() > 50);
        assert_eq!(store.get("atk", "statName"), Some("Attack"));
        assert_eq!(store.get("spc", "statName"), Some("Special"));
    }

    #[test]
    fn test_bundled_redirects_stay_one_hop() {
        let store = TemplateStore::bundled();
        for (id, namespace) in &store.namespaces {
            for (name, value) in namespace {
                let resolved = store.follow(id, name, value).unwrap_or("");
                assert!(
                    matches!(Entry::classify(resolved), Entry::Text(_)),
                    "{id}.{name} resolves to another redirect: {resolved:?}"
                );
            }
        }
    }

    #[test]
    fn test_entry_classification() {
        assert_eq!(Entry::classify(".start"), Entry::Rename("start"));
        assert_eq!(Entry::classify("#psn"), Entry::Redirect("psn"));
        assert_eq!(Entry::classify("plain"), Entry::Text("plain"));
        assert_eq!(Entry::classify(""), Entry::Text(""));
    }

    #[test]
    fn test_candidate_from_option() {
        assert_eq!(Candidate::from(None), Candidate::Skip);
        assert_eq!(Candidate::from(Some("")), Candidate::Skip);
        assert_eq!(Candidate::from("item: Leftovers"), Candidate::Effect("item: Leftovers"));
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let store = store(SMALL);
        assert_eq!(store.resolve("damage", &[]), "  ([POKEMON] was hurt!)\n");
        assert_eq!(
            store.resolve("damage", &[Candidate::Effect("move: Stealth Rock")]),
            "  ([POKEMON] was hurt!)\n"
        );
        assert_eq!(store.resolve("missing", &[]), "");
    }

    #[test]
    fn test_resolve_first_candidate_wins() {
        let store = store(SMALL);
        let psn = Candidate::Effect("psn");
        let brn = Candidate::Effect("brn");
        assert_eq!(
            store.resolve("damage", &[psn, brn]),
            "  [POKEMON] was hurt by poison!\n"
        );
        assert_eq!(
            store.resolve("damage", &[brn, psn]),
            "  [POKEMON] was hurt by its burn!\n"
        );
        assert_eq!(
            store.resolve("damage", &[Candidate::Skip, brn]),
            "  [POKEMON] was hurt by its burn!\n"
        );
    }

    #[test]
    fn test_resolve_normalizes_effect_reference() {
        let store = store(SMALL);
        assert_eq!(
            store.resolve("heal", &[Candidate::Effect("item: Leftovers")]),
            "  [POKEMON] ate some leftovers.\n"
        );
    }

    #[test]
    fn test_resolve_namespace_redirect() {
        let store = store(SMALL);
        assert_eq!(
            store.resolve("heal", &[Candidate::Effect("item: Black Sludge")]),
            "  [POKEMON] ate some leftovers.\n"
        );
        assert_eq!(
            store.resolve("damage", &[Candidate::Effect("tox")]),
            "  [POKEMON] was hurt by poison!\n"
        );
    }

    #[test]
    fn test_resolve_rename_then_redirect() {
        let store = store(SMALL);
        // blacksludge.start -> blacksludge.heal -> leftovers.heal
        assert_eq!(
            store.resolve("start", &[Candidate::Effect("blacksludge")]),
            "  [POKEMON] ate some leftovers.\n"
        );
        // tox.alias -> tox.damage -> psn.damage
        assert_eq!(
            store.resolve("alias", &[Candidate::Effect("tox")]),
            "  [POKEMON] was hurt by poison!\n"
        );
    }

    #[test]
    fn test_resolve_empty_override_renders_nothing() {
        let store = store(SMALL);
        assert_eq!(store.resolve("start", &[Candidate::Effect("psn")]), "");
    }

    #[test]
    fn test_resolve_own_short_circuits() {
        let store = store(SMALL);
        assert_eq!(
            store.resolve("switchIn", &[Candidate::Skip, Candidate::Own, Candidate::Effect("psn")]),
            "Go! [FULLNAME]!\n"
        );
        assert_eq!(store.resolve("damage", &[Candidate::Own]), "");
    }

    #[test]
    fn test_resolve_nodefault_suppresses_fallback() {
        let store = store(SMALL);
        assert_eq!(
            store.resolve("damage", &[Candidate::Skip, Candidate::NoDefault]),
            ""
        );
        assert_eq!(
            store.resolve("damage", &[Candidate::Effect("psn"), Candidate::NoDefault]),
            "  [POKEMON] was hurt by poison!\n"
        );
    }

    #[test]
    fn test_missing_default_rejected() {
        let result = TemplateStore::from_toml_str("[leftovers]\nheal = \"x\"\n");
        assert!(matches!(result, Err(TemplateError::MissingDefault)));
    }

    #[test]
    fn test_from_json_str() {
        let store = TemplateStore::from_json_str(
            r#"{"default": {"turn": "== Turn [NUMBER] =="}, "brn": {"start": "burned"}}"#,
        )
        .unwrap();
        assert_eq!(store.resolve("turn", &[]), "== Turn [NUMBER] ==\n");
        assert_eq!(store.resolve("start", &[Candidate::Effect("brn")]), "burned\n");
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"default": {{"faint": "[POKEMON] fainted!"}}}}"#).unwrap();
        let store = TemplateStore::from_file(json.path()).unwrap();
        assert_eq!(store.default_text("faint"), Some("[POKEMON] fainted!"));

        let mut toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(toml, "[default]\nfaint = \"gone\"\n").unwrap();
        let store = TemplateStore::from_file(toml.path()).unwrap();
        assert_eq!(store.default_text("faint"), Some("gone"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = TemplateStore::from_file(Path::new("/nonexistent/text.toml"));
        assert!(matches!(result, Err(TemplateError::Io(_))));
    }
}
