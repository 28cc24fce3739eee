//! JSONL reading operations.
//!
//! Reading is strict: a line that fails to decode stops the read with an
//! [`Error::Parse`] carrying its line number. Registry data feeds graph
//! metrics, and a silently skipped record would skew them.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Async reader for JSONL (JSON Lines) data.
///
/// `JsonlReader` wraps an async reader in a [`BufReader`] and decodes one
/// record per non-blank line, tracking line numbers for error reporting.
///
/// # Examples
///
/// ```no_run
/// use appgraph_jsonl::JsonlReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("applications.jsonl").await?;
/// let mut reader = JsonlReader::new(file);
/// while let Some(value) = reader.read_record::<serde_json::Value>().await? {
///     println!("{value}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    reader: BufReader<R>,
    /// 1-based number of the last line read; 0 before any read.
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Creates a new `JsonlReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    /// Returns the number of the last line read (0 before any read).
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads and decodes the next record.
    ///
    /// Blank and whitespace-only lines are skipped but still counted.
    /// Returns `Ok(None)` at end of input. Lines are read as bytes, so
    /// invalid UTF-8 is a decode failure of that line.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the underlying reader fails
    /// - [`Error::Parse`] if a non-blank line is not a valid `T`
    pub async fn read_record<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        loop {
            self.buffer.clear();
            let bytes = self.reader.read_until(b'\n', &mut self.buffer).await?;
            if bytes == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim_ascii();
            if line.is_empty() {
                continue;
            }

            return serde_json::from_slice(line)
                .map(Some)
                .map_err(|source| Error::Parse {
                    line_number: self.line_number,
                    source,
                });
        }
    }

    /// Reads every remaining record.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable or undecodable line.
    pub async fn read_all<T: DeserializeOwned>(&mut self) -> Result<Vec<T>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record().await? {
            records.push(record);
        }
        Ok(records)
    }
}

/// Reads every record of a JSONL file.
///
/// A missing file is an [`Error::Io`] with kind `NotFound`; callers that
/// treat an absent file as empty should check for that kind.
///
/// # Errors
///
/// Fails if the file cannot be opened or any line does not decode.
pub async fn read_jsonl<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await?;
    let mut reader = JsonlReader::new(file);
    let records = reader.read_all().await?;
    tracing::trace!(
        path = %path.display(),
        records = records.len(),
        lines = reader.line_number(),
        "Read JSONL file"
    );
    Ok(records)
}
