use sixcities_core::{RentalOffer, ValidationIssue};

use crate::model::ImportReport;

/// Sink for per-row import outcomes.
///
/// `position` is the 1-based index of the row among data rows; `line` is the
/// 1-based line in the source file.
pub trait Reporter {
    fn accepted(&mut self, position: u64, offer: &RentalOffer);

    fn rejected(&mut self, position: u64, line: u64, issues: &[ValidationIssue]);

    fn finished(&mut self, _report: &ImportReport) {}
}
