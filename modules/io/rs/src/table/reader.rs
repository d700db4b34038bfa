use std::io::BufRead;

use depthit_core_rs::loc::ReadInterval;
use eyre::{ensure, eyre, Context, Result};

/// Column parsers shared by the table readers.
pub mod parse {
    use super::*;

    pub fn column<'a>(parts: &mut impl Iterator<Item = &'a str>, name: &str) -> Result<u64> {
        let value = parts.next().ok_or_else(|| eyre!("Missing {} column", name))?;
        value
            .trim()
            .parse::<u64>()
            .wrap_err_with(|| format!("Invalid {} value: {}", name, value))
    }

    pub fn interval<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<ReadInterval<u64>> {
        let start = column(parts, "start")?;
        let length = column(parts, "length")?;
        Ok(ReadInterval::new(start, length))
    }

    pub fn locus<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<u64> {
        column(parts, "position")
    }
}

/// A trait for reading table rows into reusable buffers.
pub trait ReadTable<Row: Default> {
    /// Parse the next data row into the given buffer.
    /// Returns None if there are no more rows to read.
    ///
    /// The read is successful only if the function returns `Ok(Some(()))`.
    /// Otherwise the buffer is left in an unspecified state, but can be
    /// reused for the next read.
    fn read_record(&mut self, into: &mut Row) -> Result<Option<()>>;

    /// Read the remaining rows and append them to the given vector.
    /// Returns the number of rows read.
    fn read_to_end(&mut self, into: &mut Vec<Row>) -> Result<usize> {
        let mut total = 0;
        loop {
            let mut record = Row::default();
            if self.read_record(&mut record)?.is_none() {
                return Ok(total);
            }
            into.push(record);
            total += 1;
        }
    }
}

/// Line-oriented reader over comma-separated tables with a mandatory header
/// row. The header is dropped, not validated: tables are positional, like
/// the files this tool exchanges with spreadsheet-grade pipelines.
pub struct Reader<R> {
    reader: R,
    buffer: String,
    skipped_header: bool,
}

impl<R: BufRead> Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            skipped_header: false,
        }
    }

    /// Next data line with the trailing newline trimmed, or None at EOF.
    /// An entirely empty input yields no rows rather than an error.
    fn next_line(&mut self) -> Result<Option<&str>> {
        if !self.skipped_header {
            self.skipped_header = true;
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
        }

        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(
            self.buffer.trim_end_matches(|c| c == '\n' || c == '\r'),
        ))
    }
}

impl<R: BufRead> ReadTable<ReadInterval<u64>> for Reader<R> {
    fn read_record(&mut self, into: &mut ReadInterval<u64>) -> Result<Option<()>> {
        let line = match self.next_line()? {
            Some(line) => line,
            None => return Ok(None),
        };

        let mut parts = line.split(',');
        *into = parse::interval(&mut parts)
            .wrap_err_with(|| format!("Failed to parse read interval row: {}", line))?;
        ensure!(
            parts.next().is_none(),
            "Read interval row has too many columns: {}",
            line
        );
        Ok(Some(()))
    }
}

impl<R: BufRead> ReadTable<u64> for Reader<R> {
    fn read_record(&mut self, into: &mut u64) -> Result<Option<()>> {
        let line = match self.next_line()? {
            Some(line) => line,
            None => return Ok(None),
        };

        // Only the leading column matters: locus tables are routinely
        // re-read from position/coverage exports, so extra columns pass.
        let mut parts = line.split(',');
        *into = parse::locus(&mut parts)
            .wrap_err_with(|| format!("Failed to parse locus row: {}", line))?;
        Ok(Some(()))
    }
}
