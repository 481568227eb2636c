//! Destinations for decoded rows.
//!
//! Readers hand each emitted row to a [`RowSink`] together with the table it
//! belongs to. The sink owns batching and persistence; readers never decide
//! when anything is committed.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::field::Row;

/// Errors raised by a sink while accepting or flushing rows.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot serialise row: {0}")]
    Json(#[from] serde_json::Error),
}

/// Accepts rows in the order a reader produces them.
pub trait RowSink {
    /// Accept one row destined for `table`.
    fn emit(&mut self, table: &str, row: Row) -> Result<(), SinkError>;

    /// Push out anything buffered. Called once the input has been read.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn emit(&mut self, table: &str, row: Row) -> Result<(), SinkError> {
        (**self).emit(table, row)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

/// One row as handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedRow {
    pub table: String,
    pub values: Row,
}

/// Keeps every row in memory.
///
/// # Examples
///
/// ```
/// use cif_ingest::field::Value;
/// use cif_ingest::sink::{MemorySink, RowSink};
///
/// let mut sink = MemorySink::new();
/// sink.emit("tsi", vec![Some(Value::Integer(5)), None]).unwrap();
/// assert_eq!(sink.rows().len(), 1);
/// assert_eq!(sink.tables().collect::<Vec<_>>(), vec!["tsi"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    rows: Vec<EmittedRow>,
    flushes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[EmittedRow] {
        &self.rows
    }

    /// Rows emitted to one table, in order.
    pub fn table<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Row> + 'a {
        self.rows
            .iter()
            .filter(move |r| r.table == table)
            .map(|r| &r.values)
    }

    /// Table name of every emitted row, in order.
    pub fn tables(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|r| r.table.as_str())
    }

    /// How many times the sink has been flushed.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    pub fn into_rows(self) -> Vec<EmittedRow> {
        self.rows
    }
}

impl RowSink for MemorySink {
    fn emit(&mut self, table: &str, row: Row) -> Result<(), SinkError> {
        self.rows.push(EmittedRow {
            table: table.to_owned(),
            values: row,
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushes += 1;
        Ok(())
    }
}

/// Writes one JSON object per row: `{"table": ..., "values": [...]}`.
///
/// Absent values are written as `null`.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: usize,
}

impl JsonLinesSink<BufWriter<File>> {
    /// Create (or truncate) `path` and write rows to it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Number of rows written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Serialize)]
struct JsonRow<'a> {
    table: &'a str,
    values: &'a Row,
}

impl<W: Write> RowSink for JsonLinesSink<W> {
    fn emit(&mut self, table: &str, row: Row) -> Result<(), SinkError> {
        serde_json::to_writer(
            &mut self.out,
            &JsonRow {
                table,
                values: &row,
            },
        )?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}
