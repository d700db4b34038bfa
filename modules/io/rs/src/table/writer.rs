use std::io::Write;
use std::marker::PhantomData;

use depthit_core_rs::loc::{ReadInterval, ReadIntervalOp};
use eyre::Result;

/// A trait for writing table rows.
pub trait WriteTable {
    type Record;

    /// Write a single row.
    fn write_record(&mut self, record: &Self::Record) -> Result<()>;

    /// Write a slice of rows in order.
    fn write_records(&mut self, records: &[Self::Record]) -> Result<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Flush the output.
    fn flush(&mut self) -> Result<()>;
}

/// Comma-separated table writer. The header row is emitted at construction,
/// so a freshly created writer always produces a well-formed table even when
/// no data rows follow.
pub struct Writer<W, Row> {
    writer: W,
    _phantom: PhantomData<Row>,
}

macro_rules! impl_write_table {
    ($(($Row:ty, $header:literal, |$record:ident| [$($field:expr),+]),)+) => {$(
        impl<W: Write> Writer<W, $Row> {
            pub fn new(mut writer: W) -> Result<Self> {
                writeln!(writer, $header)?;
                Ok(Self {
                    writer,
                    _phantom: PhantomData,
                })
            }
        }

        impl<W: Write> WriteTable for Writer<W, $Row> {
            type Record = $Row;

            fn write_record(&mut self, $record: &Self::Record) -> Result<()> {
                writeln!(self.writer, "{},{}", $($field),+)?;
                Ok(())
            }

            fn flush(&mut self) -> Result<()> {
                self.writer.flush()?;
                Ok(())
            }
        }
    )+};
}

impl_write_table!(
    (ReadInterval<u64>, "start,length", |record| [record.start(), record.length()]),
    ((u64, u32), "position,coverage", |record| [record.0, record.1]),
);
