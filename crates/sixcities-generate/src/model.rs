use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Options for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for the random source; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Timeout applied to remote template sources.
    pub template_timeout: Duration,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            template_timeout: Duration::from_secs(10),
        }
    }
}

/// Outcome of streaming offers into one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub records_written: u64,
    pub bytes_written: u64,
    /// The run stopped early; the file holds the header and complete rows only.
    pub cancelled: bool,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub templates_loaded: usize,
    pub records_requested: u64,
    pub summary: WriteSummary,
    pub duration_ms: u64,
}
