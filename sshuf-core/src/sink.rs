//! Output sink abstraction
//!
//! The engine reports downstream pipe closure as an explicit [`SinkState`]
//! instead of an error: a consumer that stops reading (for example `head`)
//! ends the run cleanly, it does not fail it.

use std::io::{self, ErrorKind, Write};

use crate::reader::Record;

/// Whether the sink can accept further records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    /// The sink accepted the record
    Open,
    /// The downstream consumer is gone; stop emitting
    Closed,
}

/// Destination for shuffled records
pub trait RecordSink {
    /// Write one record, reporting whether the sink is still open
    fn write_record(&mut self, record: &[u8]) -> io::Result<SinkState>;
}

/// [`RecordSink`] adapter over any [`Write`]
///
/// Maps `BrokenPipe` to [`SinkState::Closed`]; all other write errors
/// propagate.
pub struct WriterSink<W> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Flush the underlying writer, treating pipe closure as closed
    pub fn flush(&mut self) -> io::Result<SinkState> {
        match self.inner.flush() {
            Ok(()) => Ok(SinkState::Open),
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(SinkState::Closed),
            Err(e) => Err(e),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> RecordSink for WriterSink<W> {
    fn write_record(&mut self, record: &[u8]) -> io::Result<SinkState> {
        match self.inner.write_all(record) {
            Ok(()) => Ok(SinkState::Open),
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(SinkState::Closed),
            Err(e) => Err(e),
        }
    }
}

/// In-memory sink collecting records, used mainly by tests
impl RecordSink for Vec<Record> {
    fn write_record(&mut self, record: &[u8]) -> io::Result<SinkState> {
        self.push(record.to_vec());
        Ok(SinkState::Open)
    }
}
