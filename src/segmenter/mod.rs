// WHY: the segmenter turns raw policy text into sentence-bounded chunks whose
// offsets point back into the normalized text

use thiserror::Error;
use tracing::{debug, info};

use crate::chunk::{Chunk, ChunkBuilder};

pub mod normalization;

pub use normalization::{normalize_text, normalize_text_into};

/// Default number of sentences grouped into one chunk for context
pub const DEFAULT_CHUNK_SIZE: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
}

/// Configuration for sentence boundary detection
#[derive(Debug, Clone)]
pub struct SentenceBoundaryRules {
    /// Punctuation that can terminate a sentence
    pub end_punctuation: Vec<char>,
}

impl Default for SentenceBoundaryRules {
    fn default() -> Self {
        Self {
            end_punctuation: vec!['.', '!', '?'],
        }
    }
}

impl SentenceBoundaryRules {
    fn is_terminal(&self, ch: char) -> bool {
        self.end_punctuation.contains(&ch)
    }
}

/// Splits normalized text into sentences and groups them into fixed-size chunks
#[derive(Debug, Clone)]
pub struct Segmenter {
    rules: SentenceBoundaryRules,
    chunk_size: usize,
}

impl Segmenter {
    /// Create a segmenter with the default boundary rules
    pub fn new(chunk_size: usize) -> Result<Self, SegmentError> {
        Self::with_rules(SentenceBoundaryRules::default(), chunk_size)
    }

    pub fn with_rules(rules: SentenceBoundaryRules, chunk_size: usize) -> Result<Self, SegmentError> {
        if chunk_size == 0 {
            return Err(SegmentError::ZeroChunkSize);
        }
        Ok(Self { rules, chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Partition already-normalized text into trimmed sentences
    ///
    /// A terminal mark ends a sentence only when whitespace or the end of the text
    /// follows it, so "U.S." and "..." stay inside their sentence. Text after the
    /// last boundary becomes the final sentence.
    pub fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut sentence_start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            if !self.rules.is_terminal(ch) {
                continue;
            }
            let ends_sentence = match chars.peek() {
                None => true,
                Some(&(_, next)) => next.is_whitespace(),
            };
            if ends_sentence {
                let end = idx + ch.len_utf8();
                push_trimmed(&mut sentences, &text[sentence_start..end]);
                sentence_start = end;
            }
        }

        push_trimmed(&mut sentences, &text[sentence_start..]);
        sentences
    }

    /// Normalize `raw_text`, split it into sentences and assemble chunks
    pub fn segment(&self, raw_text: &str) -> Vec<Chunk> {
        let normalized = normalize_text(raw_text);
        let sentences = self.split_sentences(&normalized);
        debug!(
            "Split {} normalized characters into {} sentences",
            normalized.chars().count(),
            sentences.len()
        );

        let mut chunks = Vec::with_capacity(sentences.len() / self.chunk_size + 1);
        let mut position = 0usize;
        let mut current = ChunkBuilder::new(position);

        for sentence in sentences {
            current.push_sentence(sentence);
            // +1 for the space that separated this sentence from the next
            position += sentence.chars().count() + 1;

            if current.len() >= self.chunk_size {
                let sealed = std::mem::replace(&mut current, ChunkBuilder::new(position));
                chunks.push(sealed.seal(position - 1));
            }
        }

        // The open chunk always closes; it is dropped only when empty and something was already emitted
        if !current.is_empty() || chunks.is_empty() {
            chunks.push(current.seal(position.saturating_sub(1)));
        }

        info!(chunks = chunks.len(), chunk_size = self.chunk_size, "Segmented policy text");
        chunks
    }
}

/// Segment with default boundary rules
pub fn segment(raw_text: &str, chunk_size: usize) -> Result<Vec<Chunk>, SegmentError> {
    Ok(Segmenter::new(chunk_size)?.segment(raw_text))
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
