//! Serializing gallery results as JSON or JSON Lines.

use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON array holding every item
    #[default]
    Json,
    /// One JSON object per line
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown output format '{}' (expected json or jsonl)", s))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::JsonLines => write!(f, "jsonl"),
        }
    }
}

/// Writes serializable records to a sink in the chosen format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    records: usize,
}

impl<W: Write> OutputWriter<W> {
    /// `pretty` only affects [`OutputFormat::Json`]; JSON Lines stays one
    /// record per line.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            records: 0,
        }
    }

    /// Write a whole batch: a single array for JSON, one line per record for
    /// JSON Lines. An empty batch is `[]` or nothing at all, respectively.
    pub fn write_batch<T: Serialize>(&mut self, records: &[T]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                self.write_json(records)?;
                self.records += records.len();
            }
            OutputFormat::JsonLines => {
                for record in records {
                    self.write_record(record)?;
                }
            }
        }
        Ok(())
    }

    /// Write one standalone record followed by a newline.
    pub fn write_record<T: Serialize>(&mut self, record: &T) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(record)?,
            OutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.writer, record).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
        }
        self.records += 1;
        Ok(())
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)
        } else {
            serde_json::to_writer(&mut self.writer, value)
        };
        result.map_err(io::Error::other)?;
        writeln!(self.writer)
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> usize {
        self.records
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
