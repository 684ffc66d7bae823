use std::path::PathBuf;

use serde::Serialize;

/// Outcome of materializing an outline.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub sections_created: Vec<PathBuf>,
    /// Sections whose directory already existed and were left alone.
    pub sections_existing: Vec<PathBuf>,
    pub projects: Vec<String>,
    pub failures: Vec<BuildFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A recoverable per-item failure.
#[derive(Debug, Clone, Serialize)]
pub struct BuildFailure {
    /// Section folder or qualified project name.
    pub item: String,
    pub message: String,
}

/// Outcome of patching a manifest.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatchReport {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
}
