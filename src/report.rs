//! Analysis requests and the result record handed to storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::chunk::Chunk;
use crate::matcher::Match;

/// Rejected input, reported before the pipeline runs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Policy invalid")]
    EmptyPolicy,

    #[error("Source invalid")]
    EmptySource,
}

/// Validated analysis input: both fields trimmed and non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    policy: String,
    source: String,
}

impl AnalysisRequest {
    pub fn new(policy: impl AsRef<str>, source: impl AsRef<str>) -> Result<Self, InputError> {
        let policy = policy.as_ref().trim();
        let source = source.as_ref().trim();

        if policy.is_empty() {
            return Err(InputError::EmptyPolicy);
        }
        if source.is_empty() {
            return Err(InputError::EmptySource);
        }

        Ok(Self {
            policy: policy.to_string(),
            source: source.to_string(),
        })
    }

    pub fn policy(&self) -> &str {
        &self.policy
    }

    /// Provenance label, carried through unmodified
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A completed analysis as persisted and downloaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub source: String,
    pub policy: String,
    pub chunks: Vec<Chunk>,
}

impl AnalysisResult {
    /// Assign a fresh id and the current time to annotated chunks
    pub fn new(request: AnalysisRequest, chunks: Vec<Chunk>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            source: request.source,
            policy: request.policy,
            chunks,
        }
    }

    /// Chunks with at least one match
    pub fn flagged_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|c| !c.references().is_empty())
    }

    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.chunks.iter().flat_map(|c| c.references())
    }

    pub fn match_count(&self) -> usize {
        self.matches().count()
    }
}
