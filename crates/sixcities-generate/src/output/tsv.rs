use std::io::Write;

use sixcities_core::{AMENITY_SEPARATOR, IMAGE_SEPARATOR, RentalOffer, TSV_COLUMNS};

/// Bytes the TSV writer buffers before handing them to the file.
pub const ROW_BUFFER_CAPACITY: usize = 8 * 1024;

/// Encodes offers as tab-separated rows in the fixed column order.
///
/// Cells are escaped so that no value can open a new column or row: tabs and
/// line breaks collapse into a single space. The encoding is lossy for free
/// text that contained them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvEncoder;

impl TsvEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Header line, terminated by `\n`.
    pub fn header(&self) -> String {
        line(TSV_COLUMNS)
    }

    /// One encoded row, terminated by `\n`.
    pub fn encode_row(&self, offer: &RentalOffer) -> String {
        line(self.cells(offer))
    }

    /// Escaped cells of one row, aligned with [`TSV_COLUMNS`].
    pub fn cells(&self, offer: &RentalOffer) -> [String; 17] {
        let amenities: Vec<&str> = offer.amenities.iter().map(|amenity| amenity.as_str()).collect();
        [
            escape_cell(&offer.title),
            escape_cell(&offer.description),
            escape_cell(&offer.publication_date),
            offer.city.to_string(),
            escape_cell(&offer.preview_image),
            escape_cell(&offer.images.join(IMAGE_SEPARATOR)),
            offer.is_premium.to_string(),
            offer.is_favorite.to_string(),
            offer.rating.to_string(),
            offer.home_type.to_string(),
            offer.rooms.to_string(),
            offer.guests.to_string(),
            offer.price.to_string(),
            escape_cell(&amenities.join(AMENITY_SEPARATOR)),
            escape_cell(&offer.author),
            offer.latitude.to_string(),
            offer.longitude.to_string(),
        ]
    }

    /// CSV writer configured for this format: tab delimiter, `\n` terminator,
    /// no quoting. Cells must already be escaped.
    pub fn writer<W: Write>(&self, inner: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .delimiter(b'\t')
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Never)
            .has_headers(false)
            .buffer_capacity(ROW_BUFFER_CAPACITY)
            .from_writer(inner)
    }
}

/// Replace tabs and line breaks (CR, LF, CRLF) with a single space each.
pub fn escape_cell(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\t' | '\n' => escaped.push(' '),
            '\r' => {
                chars.next_if_eq(&'\n');
                escaped.push(' ');
            }
            other => escaped.push(other),
        }
    }
    escaped
}

fn line<S: AsRef<str>>(cells: impl IntoIterator<Item = S>) -> String {
    let mut line = String::new();
    for (idx, cell) in cells.into_iter().enumerate() {
        if idx > 0 {
            line.push('\t');
        }
        line.push_str(cell.as_ref());
    }
    line.push('\n');
    line
}

/// Write adapter that counts bytes accepted by the inner writer.
pub struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
