pub mod chunk;
pub mod config;
pub mod matcher;
pub mod negation;
pub mod pattern_library;
pub mod pipeline;
pub mod report;
pub mod result_store;
pub mod segmenter;
pub mod server;

// Re-export main types for convenient access
pub use chunk::{Chunk, ChunkBuilder};
pub use config::{AnalysisConfig, AppConfig};
pub use matcher::{annotate, Confidence, Match, Matcher};
pub use pattern_library::{LibraryError, Pattern, PatternDefinition, PatternLibrary, Trigger, TriggerKind};
pub use pipeline::{analyze_text, AnalysisPipeline};
pub use report::{AnalysisRequest, AnalysisResult, InputError};
pub use result_store::{ResultStore, StoreError};
pub use segmenter::{segment, normalize_text, SegmentError, Segmenter};
