use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{debug, info, warn};

use sixcities_core::{ValidationResult, validate_row};

use crate::errors::ImportError;
use crate::model::ImportReport;
use crate::parser::TsvParser;
use crate::reporter::Reporter;

/// Parses a TSV source and validates every row in file order.
///
/// Rows that fail validation are reported and skipped; only I/O and decoding
/// failures abort the run.
#[derive(Debug, Clone, Default)]
pub struct ImportEngine {
    cancel: Arc<AtomicBool>,
}

impl ImportEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag that stops the run before the next row when set.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn run(
        &self,
        path: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<ImportReport, ImportError> {
        info!(event = "import_started", path = %path.display());
        let parser = TsvParser::from_path(path)?;
        self.run_parser(parser, reporter)
    }

    pub fn run_reader<R: Read>(
        &self,
        reader: R,
        reporter: &mut dyn Reporter,
    ) -> Result<ImportReport, ImportError> {
        self.run_parser(TsvParser::new(reader), reporter)
    }

    fn run_parser<R: Read>(
        &self,
        parser: TsvParser<R>,
        reporter: &mut dyn Reporter,
    ) -> Result<ImportReport, ImportError> {
        let start = Instant::now();
        let mut report = ImportReport::default();

        for row in parser {
            if self.cancel.load(Ordering::Relaxed) {
                report.cancelled = true;
                warn!(event = "import_cancelled", rows_read = report.rows_read);
                break;
            }

            let row = row?;
            report.rows_read += 1;
            let position = report.rows_read;

            match validate_row(&row) {
                ValidationResult::Valid(offer) => {
                    report.rows_valid += 1;
                    reporter.accepted(position, &offer);
                }
                ValidationResult::Invalid(issues) => {
                    report.rows_invalid += 1;
                    debug!(
                        event = "row_rejected",
                        position,
                        line = row.line(),
                        issues = issues.len(),
                    );
                    reporter.rejected(position, row.line(), &issues);
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            event = "import_finished",
            rows_read = report.rows_read,
            rows_valid = report.rows_valid,
            rows_invalid = report.rows_invalid,
            duration_ms = report.duration_ms,
        );
        reporter.finished(&report);
        Ok(report)
    }
}
