// WHY: one typed configuration shared by the CLI subcommands and the server,
// with defaults that match the on-disk layout under data/

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::segmenter::DEFAULT_CHUNK_SIZE;

/// Configuration for a single analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Number of sentences grouped into one chunk
    pub chunk_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Process-wide configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Reference document holding the `patterns` list
    pub patterns_path: PathBuf,
    /// Directory where analysis results are stored as `{id}.json`
    pub results_dir: PathBuf,
    pub analysis: AnalysisConfig,
    /// HTTP port for `serve`
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            patterns_path: PathBuf::from("data/reference.json"),
            results_dir: PathBuf::from("data/results"),
            analysis: AnalysisConfig::default(),
            port: 8080,
        }
    }
}

impl AppConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
