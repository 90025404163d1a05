// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clausemark::{AnalysisConfig, AnalysisPipeline, Chunk, PatternLibrary};
use tempfile::TempDir;

use super::fixtures::REFERENCE_JSON;

/// Test fixture holding a temporary data directory with a reference library
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with the fixture reference library written to disk
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        fs::write(root_path.join("reference.json"), REFERENCE_JSON).expect("Failed to write reference library");

        Self { temp_dir, root_path }
    }

    pub fn reference_path(&self) -> PathBuf {
        self.root_path.join("reference.json")
    }

    /// Results directory inside the fixture; not created until a store opens it
    pub fn results_dir(&self) -> PathBuf {
        self.root_path.join("results")
    }

    pub fn library(&self) -> Arc<PatternLibrary> {
        Arc::new(PatternLibrary::load(self.reference_path()).expect("Fixture library should load"))
    }

    pub fn pipeline(&self, chunk_size: usize) -> AnalysisPipeline {
        AnalysisPipeline::new(self.library(), &AnalysisConfig { chunk_size }).expect("Pipeline should build")
    }
}

/// Format chunks one per line: index, offsets, sentence count, matched ids with confidence
pub fn format_chunk_report(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let references = if chunk.references().is_empty() {
                "-".to_string()
            } else {
                chunk
                    .references()
                    .iter()
                    .map(|m| format!("{}:{}", m.pattern_id, m.confidence))
                    .collect::<Vec<_>>()
                    .join(",")
            };
            format!(
                "{}\t({},{})\t{}\t{}",
                index,
                chunk.start(),
                chunk.end(),
                chunk.sentences().len(),
                references
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compare two strings line by line, providing detailed diff on mismatch
pub fn assert_golden_file(actual: &str, expected: &str, context: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    if actual_lines.len() != expected_lines.len() {
        panic!(
            "{}: Line count mismatch. Expected {} lines, got {} lines\nActual:\n{}",
            context,
            expected_lines.len(),
            actual_lines.len(),
            actual
        );
    }

    for (i, (actual_line, expected_line)) in actual_lines.iter().zip(expected_lines.iter()).enumerate() {
        if actual_line != expected_line {
            panic!(
                "{}: Line {} mismatch\nExpected: {}\nActual:   {}",
                context,
                i + 1,
                expected_line,
                actual_line
            );
        }
    }
}
