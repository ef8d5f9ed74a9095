use std::io::{self, Write};

use clap::ValueEnum;
use serde_json::json;

use sixcities_core::{RentalOffer, ValidationIssue};
use sixcities_import::{ImportReport, Reporter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One readable line per row.
    #[default]
    Text,
    /// One JSON object per row.
    Json,
}

/// Prints import outcomes to `out` as they arrive.
///
/// The first write error is kept and returned by [`ConsoleReporter::finish`];
/// later output is skipped.
pub struct ConsoleReporter<W: Write> {
    out: W,
    format: OutputFormat,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            error: None,
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, line: impl FnOnce(OutputFormat) -> io::Result<String>) {
        if self.error.is_some() {
            return;
        }
        let result = line(self.format).and_then(|line| writeln!(self.out, "{line}"));
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn accepted(&mut self, position: u64, offer: &RentalOffer) {
        self.emit(|format| match format {
            OutputFormat::Text => Ok(format!(
                "row {position}: ok {} ({}, {} EUR)",
                offer.title, offer.city, offer.price
            )),
            OutputFormat::Json => to_line(&json!({
                "position": position,
                "ok": true,
                "offer": offer,
            })),
        });
    }

    fn rejected(&mut self, position: u64, line: u64, issues: &[ValidationIssue]) {
        self.emit(|format| match format {
            OutputFormat::Text => {
                let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
                Ok(format!(
                    "row {position} (line {line}): rejected: {}",
                    messages.join("; ")
                ))
            }
            OutputFormat::Json => to_line(&json!({
                "position": position,
                "line": line,
                "ok": false,
                "issues": issues,
            })),
        });
    }

    fn finished(&mut self, report: &ImportReport) {
        self.emit(|format| match format {
            OutputFormat::Text => {
                let mut summary = format!(
                    "{} rows imported, {} rejected",
                    report.rows_valid, report.rows_invalid
                );
                if report.cancelled {
                    summary.push_str(" (cancelled)");
                }
                Ok(summary)
            }
            OutputFormat::Json => to_line(&json!({ "summary": report })),
        });
    }
}

fn to_line(value: &serde_json::Value) -> io::Result<String> {
    serde_json::to_string(value).map_err(io::Error::from)
}
