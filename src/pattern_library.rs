//! Reference library of clause patterns
//!
//! The library is loaded once at startup from a JSON document with a top-level
//! `patterns` list and is never mutated afterwards. Triggers are classified and
//! compiled here, so analysis runs never re-parse a regex.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex_automata::meta::{self, Regex};
use regex_automata::util::syntax;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::negation::NegationCues;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read pattern library {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed pattern library: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("pattern at index {index} has an empty id")]
    EmptyId { index: usize },

    #[error("duplicate pattern id {0:?}")]
    DuplicateId(String),

    #[error("pattern {0:?} has no triggers")]
    NoTriggers(String),

    #[error("pattern {id:?} has an empty trigger at position {position}")]
    EmptyTrigger { id: String, position: usize },

    #[error("failed to build negation cue matcher: {0}")]
    Negation(#[from] meta::BuildError),
}

/// One pattern entry as it appears in the reference document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDefinition {
    pub id: String,
    pub category: String,
    pub triggers: Vec<String>,
    pub description: String,
    pub severity: String,
    #[serde(default)]
    pub source_title: String,
    #[serde(default)]
    pub source_url: String,
}

#[derive(Debug, Deserialize)]
struct ReferenceDocument {
    patterns: Vec<PatternDefinition>,
}

/// How a trigger is tested beyond the literal substring check
#[derive(Debug, Clone)]
pub enum TriggerKind {
    Literal,
    Pattern(Regex),
}

/// A trigger prepared for matching
#[derive(Debug, Clone)]
pub struct Trigger {
    raw: String,
    lowered: String,
    negated: bool,
    kind: TriggerKind,
}

impl Trigger {
    /// Triggers containing `.*` or `\b` are treated as regular expressions
    pub fn looks_like_regex(raw: &str) -> bool {
        raw.contains(".*") || raw.contains(r"\b")
    }

    /// Classify and compile a trigger
    ///
    /// A regex-looking trigger that does not compile is logged and kept as a
    /// literal-only trigger.
    pub fn compile(raw: &str, cues: &NegationCues) -> Self {
        let kind = if Self::looks_like_regex(raw) {
            match build_case_insensitive(raw) {
                Ok(regex) => TriggerKind::Pattern(regex),
                Err(e) => {
                    warn!(trigger = raw, error = %e, "Invalid regex trigger, using literal comparison only");
                    TriggerKind::Literal
                }
            }
        } else {
            TriggerKind::Literal
        };

        Self {
            raw: raw.to_string(),
            lowered: raw.to_lowercase(),
            negated: cues.is_negated(raw),
            kind,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &TriggerKind {
        &self.kind
    }

    /// Whether the trigger itself contains a negation cue
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Literal substring test on lower-cased text, then the regex on the original text
    pub fn matches(&self, lowered_text: &str, original_text: &str) -> bool {
        if lowered_text.contains(&self.lowered) {
            return true;
        }
        match &self.kind {
            TriggerKind::Literal => false,
            TriggerKind::Pattern(regex) => regex.is_match(original_text),
        }
    }
}

fn build_case_insensitive(pattern: &str) -> Result<Regex, meta::BuildError> {
    Regex::builder()
        .syntax(syntax::Config::new().case_insensitive(true))
        .build(pattern)
}

/// A validated pattern with compiled triggers
#[derive(Debug, Clone)]
pub struct Pattern {
    definition: PatternDefinition,
    triggers: Vec<Trigger>,
}

impl Pattern {
    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn category(&self) -> &str {
        &self.definition.category
    }

    pub fn description(&self) -> &str {
        &self.definition.description
    }

    pub fn severity(&self) -> &str {
        &self.definition.severity
    }

    pub fn source_title(&self) -> &str {
        &self.definition.source_title
    }

    pub fn source_url(&self) -> &str {
        &self.definition.source_url
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn definition(&self) -> &PatternDefinition {
        &self.definition
    }
}

/// Immutable set of patterns, iterated in document order
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
    negation: NegationCues,
}

impl PatternLibrary {
    /// Validate definitions and compile their triggers
    pub fn from_definitions(definitions: Vec<PatternDefinition>) -> Result<Self, LibraryError> {
        let negation = NegationCues::new()?;
        let mut seen = HashSet::with_capacity(definitions.len());
        let mut patterns = Vec::with_capacity(definitions.len());

        for (index, definition) in definitions.into_iter().enumerate() {
            if definition.id.trim().is_empty() {
                return Err(LibraryError::EmptyId { index });
            }
            if !seen.insert(definition.id.clone()) {
                return Err(LibraryError::DuplicateId(definition.id));
            }
            if definition.triggers.is_empty() {
                return Err(LibraryError::NoTriggers(definition.id));
            }
            if let Some(position) = definition.triggers.iter().position(|t| t.is_empty()) {
                return Err(LibraryError::EmptyTrigger {
                    id: definition.id,
                    position,
                });
            }

            let triggers = definition
                .triggers
                .iter()
                .map(|raw| Trigger::compile(raw, &negation))
                .collect();
            patterns.push(Pattern { definition, triggers });
        }

        if patterns.is_empty() {
            warn!("Pattern library is empty, no passages will be flagged");
        }

        Ok(Self { patterns, negation })
    }

    /// Parse a reference document of the form `{"patterns": [...]}`
    pub fn from_json_str(json: &str) -> Result<Self, LibraryError> {
        let document: ReferenceDocument = serde_json::from_str(json)?;
        Self::from_definitions(document.patterns)
    }

    /// Read and validate the reference document at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_json_str(&content)?;
        info!(path = %path.display(), patterns = library.len(), "Loaded pattern library");
        Ok(library)
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id() == id)
    }

    pub fn negation(&self) -> &NegationCues {
        &self.negation
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Definitions in document order, for listing the library
    pub fn definitions(&self) -> impl Iterator<Item = &PatternDefinition> {
        self.patterns.iter().map(Pattern::definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(id: &str, triggers: &[&str]) -> PatternDefinition {
        PatternDefinition {
            id: id.to_string(),
            category: "data-sharing".to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            description: "Shares data".to_string(),
            severity: "high".to_string(),
            source_title: String::new(),
            source_url: String::new(),
        }
    }

    #[test]
    fn test_parse_reference_document() {
        let json = r#"{
            "patterns": [
                {
                    "id": "share-third-parties",
                    "category": "data-sharing",
                    "triggers": ["share data", "disclose.*\\bthird part(y|ies)\\b"],
                    "description": "Shares data with third parties",
                    "severity": "high",
                    "source_title": "FTC guidance",
                    "source_url": "https://example.org/ftc"
                },
                {
                    "id": "retention",
                    "category": "retention",
                    "triggers": ["retain"],
                    "description": "Keeps data",
                    "severity": "medium"
                }
            ]
        }"#;

        let library = PatternLibrary::from_json_str(json).unwrap();
        assert_eq!(library.len(), 2);
        let first = &library.patterns()[0];
        assert_eq!(first.id(), "share-third-parties");
        assert_eq!(first.source_title(), "FTC guidance");
        assert!(matches!(first.triggers()[0].kind(), TriggerKind::Literal));
        assert!(matches!(first.triggers()[1].kind(), TriggerKind::Pattern(_)));
        assert_eq!(library.get("retention").unwrap().source_url(), "");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = PatternLibrary::from_definitions(vec![
            definition("p1", &["share data"]),
            definition("p1", &["sell data"]),
        ]);
        assert!(matches!(result, Err(LibraryError::DuplicateId(id)) if id == "p1"));
    }

    #[test]
    fn test_empty_triggers_rejected() {
        let result = PatternLibrary::from_definitions(vec![definition("p1", &[])]);
        assert!(matches!(result, Err(LibraryError::NoTriggers(_))));

        let result = PatternLibrary::from_definitions(vec![definition("p2", &["ok", ""])]);
        assert!(matches!(result, Err(LibraryError::EmptyTrigger { position: 1, .. })));
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = PatternLibrary::from_definitions(vec![definition("  ", &["x"])]);
        assert!(matches!(result, Err(LibraryError::EmptyId { index: 0 })));
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let json = r#"{"patterns": [{"id": "p1", "triggers": ["x"]}]}"#;
        assert!(matches!(PatternLibrary::from_json_str(json), Err(LibraryError::Parse(_))));
        assert!(matches!(PatternLibrary::from_json_str("[]"), Err(LibraryError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = PatternLibrary::load("/definitely/not/here/reference.json");
        assert!(matches!(result, Err(LibraryError::Io { .. })));
    }

    #[test]
    fn test_invalid_regex_degrades_to_literal() {
        let library =
            PatternLibrary::from_definitions(vec![definition("p1", &["retain.*(years"])]).unwrap();
        let trigger = &library.patterns()[0].triggers()[0];
        assert!(matches!(trigger.kind(), TriggerKind::Literal));
        assert!(!trigger.matches("we retain data for years", "we retain data for years"));
        assert!(trigger.matches("text with retain.*(years inside", "text with retain.*(years inside"));
    }

    #[test]
    fn test_trigger_negation_precomputed() {
        let cues = NegationCues::new().unwrap();
        assert!(Trigger::compile("do not sell", &cues).is_negated());
        assert!(!Trigger::compile("sell data", &cues).is_negated());
    }

    #[test]
    fn test_regex_detection_markers() {
        assert!(Trigger::looks_like_regex("retain.*years"));
        assert!(Trigger::looks_like_regex(r"\bcookies\b"));
        assert!(!Trigger::looks_like_regex("share data"));
        assert!(!Trigger::looks_like_regex("e.g. cookies"));
    }

    #[test]
    fn test_definitions_preserve_document_order() {
        let library = PatternLibrary::from_definitions(vec![
            definition("b", &["x"]),
            definition("a", &["y"]),
        ])
        .unwrap();
        let ids: Vec<&str> = library.definitions().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
