// WHY: results are persisted as one pretty-printed JSON file per analysis so they
// can be downloaded later by id

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::report::AnalysisResult;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid result id {0:?}")]
    InvalidId(String),

    #[error("result {0} not found")]
    NotFound(Uuid),

    #[error("result store I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Directory of `{id}.json` result files
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    /// Open the store, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        debug!("Result store ready at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Parse an externally supplied id; anything but a UUID is rejected
    pub fn parse_id(id: &str) -> Result<Uuid, StoreError> {
        Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
    }

    pub fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Write the result, replacing any previous file for the same id
    pub async fn save(&self, result: &AnalysisResult) -> Result<PathBuf, StoreError> {
        let path = self.path_for(result.id);
        let content = serde_json::to_string_pretty(result)?;
        fs::write(&path, content).await.map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        info!(id = %result.id, path = %path.display(), "Saved analysis result");
        Ok(path)
    }

    /// Stored JSON exactly as written, for download
    pub async fn read_raw(&self, id: Uuid) -> Result<String, StoreError> {
        let path = self.path_for(id);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound(id)),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    pub async fn load(&self, id: Uuid) -> Result<AnalysisResult, StoreError> {
        let content = self.read_raw(id).await?;
        Ok(serde_json::from_str(&content)?)
    }

    pub async fn exists(&self, id: Uuid) -> bool {
        fs::try_exists(self.path_for(id)).await.unwrap_or(false)
    }
}
