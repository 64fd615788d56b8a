//! Append-only CSV output sink.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};

use lsa_core::{ErrorInfo, LsaError};

/// Single-writer CSV sink. The header row is written at creation and every
/// record is flushed as soon as it is appended, so a halted run leaves a
/// readable file with no partial rows.
pub struct CsvSink {
    path: PathBuf,
    writer: Writer<BufWriter<File>>,
    rows_written: usize,
}

impl CsvSink {
    /// Creates the output file and writes the header row.
    pub fn create(path: &Path, headers: &[&str]) -> Result<Self, LsaError> {
        let file = File::create(path).map_err(|err| {
            LsaError::Run(
                ErrorInfo::new("run.sink-create", "failed to create output file")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));
        writer.write_record(headers).map_err(|err| {
            LsaError::Run(
                ErrorInfo::new("run.sink-header", "failed to write header row")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        let mut sink = Self {
            path: path.to_path_buf(),
            writer,
            rows_written: 0,
        };
        sink.flush()?;
        Ok(sink)
    }

    /// Appends one record and flushes it to disk.
    pub fn append(&mut self, record: &[String]) -> Result<(), LsaError> {
        self.writer.write_record(record).map_err(|err| {
            LsaError::Run(
                ErrorInfo::new("run.sink-write", "failed to write record")
                    .with_context("path", self.path.display().to_string())
                    .with_context("row", self.rows_written.to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        self.rows_written += 1;
        self.flush()
    }

    /// Number of data rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    fn flush(&mut self) -> Result<(), LsaError> {
        self.writer.flush().map_err(|err| {
            LsaError::Run(
                ErrorInfo::new("run.sink-flush", "failed to flush output file")
                    .with_context("path", self.path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })
    }
}
