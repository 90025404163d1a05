// WHY: chunks are accumulated by a builder and sealed once, so no chunk is ever
// observable with a missing end offset

use serde::{Deserialize, Serialize};

use crate::matcher::Match;

/// A run of consecutive sentences from the normalized policy text
///
/// `start` is the character offset of the first sentence. `end` is the running
/// position minus one at the moment the chunk was sealed, which for a chunk with
/// sentences is the offset just past its last character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    sentences: Vec<String>,
    text: String,
    start: usize,
    end: usize,
    #[serde(default)]
    references: Vec<Match>,
}

impl Chunk {
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Sentences joined by single spaces; the surface triggers are matched against
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn references(&self) -> &[Match] {
        &self.references
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Replace the annotations; sentences and offsets stay as sealed
    pub(crate) fn set_references(&mut self, references: Vec<Match>) {
        self.references = references;
    }
}

/// Open chunk that accepts sentences until it is sealed
#[derive(Debug)]
pub struct ChunkBuilder {
    start: usize,
    sentences: Vec<String>,
}

impl ChunkBuilder {
    pub fn new(start: usize) -> Self {
        Self {
            start,
            sentences: Vec::new(),
        }
    }

    pub fn push_sentence(&mut self, sentence: &str) {
        self.sentences.push(sentence.to_string());
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Close the chunk at `end` and hand back the read-only value
    pub fn seal(self, end: usize) -> Chunk {
        debug_assert!(end >= self.start, "chunk end {end} before start {}", self.start);
        let text = self.sentences.join(" ");
        Chunk {
            sentences: self.sentences,
            text,
            start: self.start,
            end,
            references: Vec::new(),
        }
    }
}
