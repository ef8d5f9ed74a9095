use std::env;
use std::path::PathBuf;

use sixcities_core::{RentalOffer, ValidationIssue};
use sixcities_import::{ImportEngine, Reporter};
use tracing_subscriber::EnvFilter;

struct PrintRejected;

impl Reporter for PrintRejected {
    fn accepted(&mut self, _position: u64, _offer: &RentalOffer) {}

    fn rejected(&mut self, position: u64, line: u64, issues: &[ValidationIssue]) {
        for issue in issues {
            println!("row {position} (line {line}) {}: {issue}", issue.field);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: validate_tsv <INPUT>")?;

    let report = ImportEngine::new().run(&path, &mut PrintRejected)?;
    println!(
        "rows_read={} rows_valid={} rows_invalid={}",
        report.rows_read, report.rows_valid, report.rows_invalid
    );
    Ok(())
}
