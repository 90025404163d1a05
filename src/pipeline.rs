// WHY: composes segmentation and matching behind one entry point; the pattern
// library is passed in explicitly and shared read-only between runs

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::chunk::Chunk;
use crate::config::AnalysisConfig;
use crate::matcher::Matcher;
use crate::pattern_library::PatternLibrary;
use crate::report::{AnalysisRequest, AnalysisResult};
use crate::segmenter::{SegmentError, Segmenter};

/// Segmenter followed by matcher, bound to one pattern library
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    library: Arc<PatternLibrary>,
    segmenter: Segmenter,
}

impl AnalysisPipeline {
    pub fn new(library: Arc<PatternLibrary>, config: &AnalysisConfig) -> Result<Self, SegmentError> {
        Ok(Self {
            library,
            segmenter: Segmenter::new(config.chunk_size)?,
        })
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    pub fn chunk_size(&self) -> usize {
        self.segmenter.chunk_size()
    }

    /// Segment `policy` and annotate every chunk, in document order
    pub fn run(&self, policy: &str) -> Vec<Chunk> {
        let start_time = Instant::now();

        let mut chunks = self.segmenter.segment(policy);
        Matcher::new(&self.library).annotate_all(&mut chunks);

        let matches: usize = chunks.iter().map(|c| c.references().len()).sum();
        info!(
            chunks = chunks.len(),
            matches,
            patterns = self.library.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Analysis complete"
        );
        chunks
    }

    /// Run the pipeline on a validated request and stamp the result
    pub fn analyze(&self, request: AnalysisRequest) -> AnalysisResult {
        let chunks = self.run(request.policy());
        AnalysisResult::new(request, chunks)
    }
}

/// One-shot analysis without building a pipeline
pub fn analyze_text(policy: &str, library: &PatternLibrary, chunk_size: usize) -> Result<Vec<Chunk>, SegmentError> {
    let mut chunks = Segmenter::new(chunk_size)?.segment(policy);
    Matcher::new(library).annotate_all(&mut chunks);
    Ok(chunks)
}
