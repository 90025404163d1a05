//! Pattern matching over sealed chunks
//!
//! Every (chunk, pattern) pair is evaluated independently. Negation is judged on the
//! whole chunk text, and the first trigger that hits decides the confidence.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chunk::Chunk;
use crate::pattern_library::{Pattern, PatternLibrary};

/// Agreement between the negation polarity of a chunk and of the trigger that matched it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    High,
}

impl Confidence {
    /// High when both sides are negated or neither is
    pub fn from_alignment(chunk_negated: bool, trigger_negated: bool) -> Self {
        if chunk_negated == trigger_negated {
            Confidence::High
        } else {
            Confidence::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pattern flagged on one chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "id")]
    pub pattern_id: String,
    pub category: String,
    pub confidence: Confidence,
    pub description: String,
    pub severity: String,
    pub source_title: String,
    pub source_url: String,
}

impl Match {
    fn from_pattern(pattern: &Pattern, confidence: Confidence) -> Self {
        Self {
            pattern_id: pattern.id().to_string(),
            category: pattern.category().to_string(),
            confidence,
            description: pattern.description().to_string(),
            severity: pattern.severity().to_string(),
            source_title: pattern.source_title().to_string(),
            source_url: pattern.source_url().to_string(),
        }
    }
}

/// Evaluates a pattern library against chunk text
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    library: &'a PatternLibrary,
}

impl<'a> Matcher<'a> {
    pub fn new(library: &'a PatternLibrary) -> Self {
        Self { library }
    }

    /// Matches for `text`, one per matching pattern, in library order
    pub fn match_text(&self, text: &str) -> Vec<Match> {
        let lowered = text.to_lowercase();
        let chunk_negated = self.library.negation().is_negated(text);

        self.library
            .patterns()
            .iter()
            .filter_map(|pattern| {
                match_pattern(pattern, &lowered, text, chunk_negated)
                    .map(|confidence| Match::from_pattern(pattern, confidence))
            })
            .collect()
    }

    /// Replace the chunk's references with the matches for its text
    pub fn annotate(&self, chunk: &mut Chunk) {
        let references = self.match_text(chunk.text());
        if !references.is_empty() {
            debug!(
                start = chunk.start(),
                end = chunk.end(),
                matches = references.len(),
                "Chunk matched patterns"
            );
        }
        chunk.set_references(references);
    }

    pub fn annotate_all(&self, chunks: &mut [Chunk]) {
        for chunk in chunks.iter_mut() {
            self.annotate(chunk);
        }
    }
}

/// Annotate every chunk against `library`, preserving chunk order
pub fn annotate(chunks: &mut [Chunk], library: &PatternLibrary) {
    Matcher::new(library).annotate_all(chunks);
}

/// Confidence of the first trigger, in list order, that hits the text
fn match_pattern(pattern: &Pattern, lowered: &str, original: &str, chunk_negated: bool) -> Option<Confidence> {
    pattern
        .triggers()
        .iter()
        .find(|trigger| trigger.matches(lowered, original))
        .map(|trigger| Confidence::from_alignment(chunk_negated, trigger.is_negated()))
}
