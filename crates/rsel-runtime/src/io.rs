//! JSON Lines row files.
//!
//! One row per line: `{"key": "Row0", "cells": [1, "Apple", null]}`. `null`
//! is a missing cell; a line without `key` is named `Row<n>` after its
//! position among non-blank lines.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use orion_error::StructError;
use orion_error::prelude::*;
use orion_error::ErrorOwe;
use rsel_core::{Cell, CoreReason, CoreResult, Row};
use rsel_lang::{Schema, ValueKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RowRecord {
    #[serde(default)]
    key: Option<String>,
    cells: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct RowOut<'a> {
    key: &'a str,
    cells: Vec<Value>,
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Reads typed rows, checking every cell against the schema.
pub struct JsonlSource<R> {
    reader: R,
    kinds: Vec<ValueKind>,
    line_no: usize,
    row_no: u64,
    buf: String,
}

impl JsonlSource<BufReader<File>> {
    pub fn open(path: &Path, schema: &Schema) -> io::Result<Self> {
        Ok(Self::from_reader(BufReader::new(File::open(path)?), schema))
    }
}

impl<R: BufRead> JsonlSource<R> {
    pub fn from_reader(reader: R, schema: &Schema) -> Self {
        Self {
            reader,
            kinds: schema.columns().iter().map(|c| c.kind).collect(),
            line_no: 0,
            row_no: 0,
            buf: String::new(),
        }
    }

    fn read_row(&mut self) -> CoreResult<Option<Row>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf).owe_sys()? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            let record: RowRecord = serde_json::from_str(line)
                .map_err(|e| data_error(self.line_no, format!("invalid row: {e}")))?;
            let row = self.convert(record)?;
            self.row_no += 1;
            return Ok(Some(row));
        }
    }

    fn convert(&self, record: RowRecord) -> CoreResult<Row> {
        if record.cells.len() != self.kinds.len() {
            return Err(data_error(
                self.line_no,
                format!(
                    "expected {} cells, got {}",
                    self.kinds.len(),
                    record.cells.len()
                ),
            ));
        }
        let cells = record
            .cells
            .iter()
            .zip(&self.kinds)
            .enumerate()
            .map(|(i, (value, kind))| {
                to_cell(value, *kind).ok_or_else(|| {
                    data_error(self.line_no, format!("cell {i}: {value} is not a valid {kind}"))
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;
        let key = record.key.unwrap_or_else(|| format!("Row{}", self.row_no));
        Ok(Row::new(key, cells))
    }
}

impl<R: BufRead> Iterator for JsonlSource<R> {
    type Item = CoreResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row().transpose()
    }
}

fn to_cell(value: &Value, kind: ValueKind) -> Option<Cell> {
    if value.is_null() {
        return Some(Cell::Missing);
    }
    match kind {
        ValueKind::Int => value.as_i64().map(Cell::Int),
        ValueKind::Float => match value.as_i64() {
            Some(v) => Some(Cell::Int(v)),
            None => value.as_f64().map(Cell::Float),
        },
        ValueKind::String => value.as_str().map(|s| Cell::Str(s.to_string())),
    }
}

fn data_error(line: usize, detail: String) -> StructError<CoreReason> {
    StructError::from(CoreReason::DataFormat).with_detail(format!("line {line}: {detail}"))
}

/// Number of non-blank lines, used as the progress total.
pub fn count_rows(path: &Path) -> io::Result<u64> {
    let reader = BufReader::new(File::open(path)?);
    let mut n = 0;
    for line in reader.lines() {
        if !line?.trim().is_empty() {
            n += 1;
        }
    }
    Ok(n)
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Writes kept rows in the same shape they were read.
pub struct JsonlSink<W: Write> {
    writer: BufWriter<W>,
    written: u64,
}

impl JsonlSink<Box<dyn Write + Send>> {
    /// Sink writing to `path`, creating parent directories, or to stdout
    /// when no path is configured.
    pub fn open(path: Option<&Path>) -> io::Result<Self> {
        let writer: Box<dyn Write + Send> = match path {
            Some(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }
                Box::new(File::create(path)?)
            }
            None => Box::new(io::stdout()),
        };
        Ok(Self::new(writer))
    }
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    pub fn write(&mut self, row: &Row) -> io::Result<()> {
        let out = RowOut {
            key: &row.key,
            cells: row.cells.iter().map(to_json).collect(),
        };
        serde_json::to_writer(&mut self.writer, &out)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn to_json(cell: &Cell) -> Value {
    match cell {
        Cell::Int(v) => Value::from(*v),
        Cell::Float(v) => Value::from(*v),
        Cell::Str(s) => Value::from(s.as_str()),
        Cell::Missing => Value::Null,
    }
}
