//! Event Types
//!
//! A single protocol record emitted by the battle simulator, plus the
//! line-oriented parser that produces it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::command::Command;

/// Keyword arguments trailing a protocol line (`[from] item: Leftovers`).
///
/// A keyword written without a value (`[still]`) is present with `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KwArgs(BTreeMap<String, Option<String>>);

impl KwArgs {
    /// Creates an empty keyword map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key` if it is present and non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.is_empty())
    }

    /// Returns true if the keyword is set, with or without a value.
    ///
    /// An explicitly empty value counts as unset.
    pub fn has(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(None) => true,
            Some(Some(v)) => !v.is_empty(),
            None => false,
        }
    }

    /// Sets a keyword with a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Some(value.into()));
    }

    /// Sets a value-less keyword.
    pub fn insert_flag(&mut self, key: impl Into<String>) {
        self.0.insert(key.into(), None);
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no keywords are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates keywords in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

/// One protocol record.
///
/// `args[0]` is always the command itself so positional indices line up
/// with the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Command name, e.g. `move` or `-boost`
    pub command: String,
    /// Positional fields, starting with the command
    pub args: Vec<String>,
    /// Keyword fields
    #[serde(default, rename = "kwArgs")]
    pub kw_args: KwArgs,
}

impl Event {
    /// Builds an event from its positional fields. The first field is the command.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let command = args.first().cloned().unwrap_or_default();
        Self {
            command,
            args,
            kw_args: KwArgs::new(),
        }
    }

    /// Adds a keyword argument with a value.
    pub fn with_kw(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.kw_args.insert(key, value);
        self
    }

    /// Adds a value-less keyword argument.
    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.kw_args.insert_flag(key);
        self
    }

    /// Returns positional field `index` if present and non-empty.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args
            .get(index)
            .map(String::as_str)
            .filter(|a| !a.is_empty())
    }

    /// Returns the keyword value for `key` if present and non-empty.
    pub fn kw(&self, key: &str) -> Option<&str> {
        self.kw_args.get(key)
    }

    /// Returns true if keyword `key` is set.
    pub fn flag(&self, key: &str) -> bool {
        self.kw_args.has(key)
    }

    /// Resolves the command against the supported vocabulary.
    pub fn known_command(&self) -> Option<Command> {
        Command::parse(&self.command)
    }

    /// Parses one protocol line such as `|-damage|p2a: Gengar|50/100|[from] psn`.
    ///
    /// Returns `None` for blank lines and lines that do not start with `|`.
    /// Trailing `[key] value` fields are moved into the keyword map, scanning
    /// from the end and stopping at the first positional field.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let body = line.strip_prefix('|')?;
        if body.is_empty() {
            return None;
        }

        let mut args: Vec<String> = body.split('|').map(str::to_string).collect();
        let mut kw_args = KwArgs::new();
        while args.len() > 1 {
            let Some(last) = args.last() else { break };
            if !last.starts_with('[') {
                break;
            }
            let Some(bracket) = last.find(']') else { break };
            if bracket <= 1 {
                break;
            }
            let key = last[1..bracket].to_string();
            let value = last[bracket + 1..].trim();
            if value.is_empty() {
                kw_args.insert_flag(key);
            } else {
                kw_args.insert(key, value);
            }
            args.pop();
        }

        let command = args[0].clone();
        Some(Self {
            command,
            args,
            kw_args,
        })
    }

    /// Serializes the event to a JSON line.
    pub fn to_jsonl(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Parses a multi-line protocol log, skipping lines that carry no event.
pub fn parse_log(text: &str) -> Vec<Event> {
    text.lines().filter_map(Event::parse_line).collect()
}

/// Errors raised while decoding serialized events.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The JSON line could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_positional() {
        let event = Event::parse_line("|switch|p1a: Charizard|Charizard, L50, M|100/100").unwrap();
        assert_eq!(event.command, "switch");
        assert_eq!(event.args.len(), 4);
        assert_eq!(event.arg(1), Some("p1a: Charizard"));
        assert_eq!(event.arg(2), Some("Charizard, L50, M"));
        assert!(event.kw_args.is_empty());
    }

    #[test]
    fn test_parse_line_keywords() {
        let line = "|-damage|p2a: Gengar|50/100|[from] item: Rocky Helmet|[of] p1a: Ferrothorn";
        let event = Event::parse_line(line).unwrap();
        assert_eq!(event.args, vec!["-damage", "p2a: Gengar", "50/100"]);
        assert_eq!(event.kw("from"), Some("item: Rocky Helmet"));
        assert_eq!(event.kw("of"), Some("p1a: Ferrothorn"));
    }

    #[test]
    fn test_parse_line_flag_without_value() {
        let event = Event::parse_line("|move|p1a: Pidgeot|Fly||[still]").unwrap();
        assert!(event.flag("still"));
        assert_eq!(event.kw("still"), None);
        // The empty target stays positional
        assert_eq!(event.args.len(), 4);
        assert_eq!(event.arg(3), None);
    }

    #[test]
    fn test_keywords_only_peeled_from_end() {
        let event = Event::parse_line("|-message|[not a keyword] text|plain").unwrap();
        assert_eq!(event.args.len(), 3);
        assert!(event.kw_args.is_empty());
    }

    #[test]
    fn test_parse_line_rejects_non_protocol() {
        assert!(Event::parse_line("").is_none());
        assert!(Event::parse_line("|").is_none());
        assert!(Event::parse_line("just chat text").is_none());
    }

    #[test]
    fn test_blank_separator_line_has_empty_command() {
        let event = Event::parse_line("||").unwrap();
        assert_eq!(event.command, "");
        assert!(event.known_command().is_none());
    }

    #[test]
    fn test_parse_log_skips_noise() {
        let log = "|player|p1|Red\n\n|gen|8\nnot protocol\n|turn|1\n";
        let events = parse_log(log);
        let commands: Vec<&str> = events.iter().map(|e| e.command.as_str()).collect();
        assert_eq!(commands, vec!["player", "gen", "turn"]);
    }

    #[test]
    fn test_jsonl_wire_names() {
        let event = Event::from_args(["-heal", "p1a: Snorlax", "70/100"])
            .with_kw("from", "item: Leftovers")
            .with_flag("silent");
        let line = event.to_jsonl().unwrap();
        assert!(line.contains("\"kwArgs\""));
        assert!(line.contains("\"silent\":null"));

        let decoded = Event::from_jsonl(&line).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_jsonl_kwargs_optional() {
        let decoded = Event::from_jsonl(r#"{"command":"turn","args":["turn","3"]}"#).unwrap();
        assert_eq!(decoded.arg(1), Some("3"));
        assert!(decoded.kw_args.is_empty());
    }

    #[test]
    fn test_from_jsonl_error() {
        assert!(matches!(
            Event::from_jsonl("{not json"),
            Err(ProtocolError::Json(_))
        ));
    }

    #[test]
    fn test_empty_keyword_value_is_unset() {
        let mut kw = KwArgs::new();
        kw.insert("of", "");
        assert!(!kw.has("of"));
        assert_eq!(kw.get("of"), None);
        assert_eq!(kw.len(), 1);
    }
}
