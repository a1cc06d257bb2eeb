//! CSV log export loading.
//!
//! Decodes rows of the form `ts,source,msg` into [`Record`]s for the
//! aggregation pass. Rows are yielded lazily, in input order, so the whole
//! file never has to sit in memory as raw text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use baseline_core::error::{BaselineError, Result};
use baseline_core::models::Record;
use baseline_core::time_utils::parse_timestamp;
use serde::Deserialize;
use tracing::debug;

/// Column that every input file must provide.
pub const TIMESTAMP_COLUMN: &str = "ts";

/// Raw row as it appears in the CSV file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    ts: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

// ── RecordReader ──────────────────────────────────────────────────────────────

/// Iterator over the records of a CSV log export.
///
/// Each item carries either a decoded [`Record`] or the error for that row,
/// tagged with its 1-based line number.
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
    headers: csv::StringRecord,
    row: csv::StringRecord,
    done: bool,
}

impl RecordReader<File> {
    /// Open the CSV file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| BaselineError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Reading records from {}", path.display());
        Self::from_reader(file)
    }
}

impl<R: Read> RecordReader<R> {
    /// Wrap any byte source and validate its header row.
    ///
    /// An entirely empty source is accepted and yields no records; a header
    /// without a `ts` column is rejected.
    pub fn from_reader(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(source);

        let headers = reader
            .headers()
            .map_err(|source| BaselineError::Csv { line: 1, source })?
            .clone();

        let done = headers.is_empty();
        if !done && !headers.iter().any(|h| h == TIMESTAMP_COLUMN) {
            return Err(BaselineError::MissingColumn(TIMESTAMP_COLUMN.to_string()));
        }

        Ok(Self {
            reader,
            headers,
            row: csv::StringRecord::new(),
            done,
        })
    }

    /// Decode the row currently held in `self.row`.
    fn decode(&self) -> Result<Record> {
        let line = self.row.position().map_or(0, |p| p.line());

        let row: CsvRow = self
            .row
            .deserialize(Some(&self.headers))
            .map_err(|source| BaselineError::Csv { line, source })?;

        let timestamp = parse_timestamp(&row.ts).ok_or_else(|| BaselineError::TimestampParse {
            line,
            value: row.ts.clone(),
        })?;

        Ok(Record::new(
            timestamp,
            row.source.as_deref(),
            row.msg.unwrap_or_default(),
        ))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_record(&mut self.row) {
            Ok(true) => Some(self.decode()),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(source) => {
                self.done = true;
                let line = source.position().map_or(0, |p| p.line());
                Some(Err(BaselineError::Csv { line, source }))
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
