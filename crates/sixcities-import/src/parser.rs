use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use sixcities_core::RawRow;

use crate::errors::ImportError;

/// Single forward pass over a TSV source, yielding one [`RawRow`] per line.
///
/// The first non-blank line is the header. Blank and whitespace-only lines
/// are skipped and never yield a row. Input is read incrementally through a
/// bounded buffer, so memory use does not depend on file size. Quotes have no
/// special meaning.
pub struct TsvParser<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    header: Option<Arc<[String]>>,
}

impl TsvParser<File> {
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> TsvParser<R> {
    pub fn new(reader: R) -> Self {
        let records = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader)
            .into_records();
        Self {
            records,
            header: None,
        }
    }

    /// Column names once the header line has been read.
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }
}

impl<R: Read> Iterator for TsvParser<R> {
    type Item = Result<RawRow, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) => return Some(Err(err.into())),
            };
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            match self.header.as_ref().map(Arc::clone) {
                None => {
                    let header: Vec<String> =
                        record.iter().map(|name| name.trim().to_string()).collect();
                    self.header = Some(header.into());
                }
                Some(header) => {
                    let line = record.position().map(|pos| pos.line()).unwrap_or_default();
                    let cells = record.iter().map(str::to_string).collect();
                    return Some(Ok(RawRow::new(line, header, cells)));
                }
            }
        }
    }
}
