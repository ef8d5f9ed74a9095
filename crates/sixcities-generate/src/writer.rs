use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use sixcities_core::{TSV_COLUMNS, TemplateItem};

use crate::errors::GenerationError;
use crate::generator::{RecordGenerator, check_templates};
use crate::model::WriteSummary;
use crate::output::tsv::{CountingWriter, TsvEncoder};

const PROGRESS_EVERY: u64 = 10_000;

/// Parse a user-supplied record count; it must be a positive integer.
pub fn parse_record_count(raw: &str) -> Result<u64, GenerationError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|count| u64::try_from(count).ok())
        .filter(|count| *count > 0)
        .ok_or_else(|| {
            GenerationError::InvalidArgument(format!(
                "record count must be a positive integer, got '{raw}'"
            ))
        })
}

/// Streams generated offers into a TSV file, one record at a time.
///
/// A record is pulled from the generator only after the previous one has been
/// handed to the file writer, whose buffer is bounded. Memory use therefore
/// does not depend on the number of records.
#[derive(Debug)]
pub struct StreamingWriter {
    generator: RecordGenerator,
    encoder: TsvEncoder,
    cancel: Option<Arc<AtomicBool>>,
    reference_time: Option<DateTime<Utc>>,
}

impl StreamingWriter {
    pub fn new(generator: RecordGenerator) -> Self {
        Self {
            generator,
            encoder: TsvEncoder::new(),
            cancel: None,
            reference_time: None,
        }
    }

    /// Stop between records once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Count publication dates back from `now` instead of the wall clock.
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    /// Write the header and `count` generated records to `path`.
    ///
    /// Arguments are checked before the file is created. On I/O failure the
    /// rows already flushed stay in the file.
    pub fn write(
        &mut self,
        path: &Path,
        count: u64,
        templates: &[TemplateItem],
    ) -> Result<WriteSummary, GenerationError> {
        if count == 0 {
            return Err(GenerationError::InvalidArgument(
                "record count must be a positive integer, got '0'".to_string(),
            ));
        }
        if templates.is_empty() {
            return Err(GenerationError::InvalidArgument(
                "at least one template is required".to_string(),
            ));
        }
        check_templates(templates)?;

        let start = Instant::now();
        let now = self.reference_time.unwrap_or_else(Utc::now);
        let file = File::create(path)?;
        let mut writer = self.encoder.writer(CountingWriter::new(file));
        writer.write_record(TSV_COLUMNS)?;

        info!(
            event = "write_started",
            path = %path.display(),
            records = count,
            templates = templates.len(),
        );

        let mut records_written = 0_u64;
        let mut cancelled = false;
        let mut stream = self.generator.stream(templates, count, now);
        loop {
            if self
                .cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
            {
                cancelled = true;
                break;
            }
            let Some(offer) = stream.next() else {
                break;
            };
            writer.write_record(self.encoder.cells(&offer?))?;
            records_written += 1;

            if records_written % PROGRESS_EVERY == 0 {
                debug!(event = "write_progress", records_written);
            }
        }

        writer.flush()?;
        let counting = writer.into_inner().map_err(|err| err.into_error())?;
        let bytes_written = counting.bytes_written();

        if cancelled {
            warn!(
                event = "write_cancelled",
                path = %path.display(),
                records_written,
                records_requested = count,
            );
        } else {
            info!(
                event = "write_finished",
                path = %path.display(),
                records_written,
                bytes_written,
                duration_ms = start.elapsed().as_millis() as u64,
            );
        }

        Ok(WriteSummary {
            path: path.to_path_buf(),
            records_written,
            bytes_written,
            cancelled,
        })
    }
}
