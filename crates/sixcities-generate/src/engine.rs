use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use tracing::{info, warn};

use crate::errors::GenerationError;
use crate::generator::RecordGenerator;
use crate::model::{GenerateOptions, GenerationReport};
use crate::templates::{TemplateSource, load_templates};
use crate::writer::StreamingWriter;

/// Entry point for the generate command: load templates, then stream offers.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
    cancel: Arc<AtomicBool>,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the run at the next record boundary when set.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Generate `count` offers into `path`.
    ///
    /// A zero count fails before the template source is contacted, and a
    /// failing source aborts before the output file is created. The file write
    /// itself runs on a blocking worker thread.
    pub async fn run(
        &self,
        source: &dyn TemplateSource,
        count: u64,
        path: &Path,
    ) -> Result<GenerationReport, GenerationError> {
        if count == 0 {
            return Err(GenerationError::InvalidArgument(
                "record count must be a positive integer, got '0'".to_string(),
            ));
        }

        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        info!(
            event = "generation_started",
            run_id = %run_id,
            records = count,
            source = %source.describe(),
            seed = ?self.options.seed,
        );

        let templates = load_templates(source).await?;
        let templates_loaded = templates.len();

        let mut writer = StreamingWriter::new(RecordGenerator::new(self.options.seed))
            .with_cancel_flag(self.cancel_flag());
        let target = path.to_path_buf();
        let outcome =
            tokio::task::spawn_blocking(move || writer.write(&target, count, &templates)).await;

        let summary = match outcome {
            Ok(Ok(summary)) => summary,
            Ok(Err(err)) => {
                warn!(event = "generation_failed", run_id = %run_id, error = %err);
                return Err(err);
            }
            Err(join) => {
                warn!(event = "generation_failed", run_id = %run_id, error = %join);
                return Err(GenerationError::Task(join.to_string()));
            }
        };

        let report = GenerationReport {
            run_id,
            templates_loaded,
            records_requested: count,
            summary,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            event = "generation_finished",
            run_id = %report.run_id,
            records_written = report.summary.records_written,
            bytes_written = report.summary.bytes_written,
            cancelled = report.summary.cancelled,
            duration_ms = report.duration_ms,
        );
        Ok(report)
    }
}
