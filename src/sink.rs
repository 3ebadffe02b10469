//! Per-repetition timing records and the sinks that collect them.
//!
//! Every timed repetition the harness performs becomes one [`TimingSample`]
//! pushed into a [`TimingSink`]. The sink decides where samples go: an
//! in-memory `Vec`, a CSV stream with the `method,R,T,repeat,seconds`
//! layout, or nowhere.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{OccError, Result};

/// One timed repetition. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    /// Method and phase label, e.g. `dac_full` or `sequential_T`.
    pub method: String,
    #[serde(rename = "R")]
    pub rows: usize,
    #[serde(rename = "T")]
    pub cols: usize,
    /// 1-based repetition number.
    pub repeat: usize,
    /// Serialised in `{:.8e}` notation.
    #[serde(serialize_with = "scientific")]
    pub seconds: f64,
}

fn scientific<S>(seconds: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&format_args!("{seconds:.8e}"))
}

/// Append-only destination for timing samples.
pub trait TimingSink {
    fn record(&mut self, sample: &TimingSample) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl TimingSink for Vec<TimingSample> {
    fn record(&mut self, sample: &TimingSample) -> Result<()> {
        self.push(sample.clone());
        Ok(())
    }
}

/// Drops every sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl TimingSink for DiscardSink {
    fn record(&mut self, _sample: &TimingSample) -> Result<()> {
        Ok(())
    }
}

/// Writes samples as CSV rows.
pub struct CsvTimingSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvTimingSink<W> {
    /// Wrap `writer`; the header row is emitted before the first sample when
    /// `write_header` is set.
    pub fn new(writer: W, write_header: bool) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(writer);
        Self { writer }
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| OccError::from(err.into_error()))
    }
}

impl CsvTimingSink<File> {
    /// Start a fresh log at `path`, truncating any previous content.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file, true))
    }

    /// Append to the log at `path`; the header is written only when the file
    /// is new or empty.
    pub fn append(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let fresh = file.metadata()?.len() == 0;
        Ok(Self::new(file, fresh))
    }
}

impl<W: Write> TimingSink for CsvTimingSink<W> {
    fn record(&mut self, sample: &TimingSample) -> Result<()> {
        self.writer.serialize(sample)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
