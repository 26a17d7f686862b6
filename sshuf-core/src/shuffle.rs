//! Windowed streaming shuffle engine
//!
//! Single-pass, O(1)-amortized-per-record shuffle over an unbounded record
//! stream. Memory is bounded by the window cap (or by the minimum depth when
//! the cap is unbounded) plus the one record in flight.
//!
//! The engine keeps a growing estimate of the total stream length
//! (`predicted`, doubling as the stream outruns it) and draws each record's
//! slot uniformly from `[0, predicted)`. A draw inside the live window swaps
//! the incoming record in and emits the evicted one; a draw outside grows the
//! window, or passes the record straight through once the window is at its
//! cap. The shrinking probability of landing inside the window approximates a
//! reservoir sample's decaying keep-probability without a second pass.
//!
//! The output is always an exact permutation of the input multiset, but the
//! permutation is not proven uniform over all orderings; treat it as a
//! well-mixed reordering, not a statistical guarantee.

use std::io::{self, Read, Write};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cancel::CancelToken;
use crate::config::{ShuffleConfig, WindowCap};
use crate::error::Result;
use crate::reader::{Record, RecordReader};
use crate::sink::{RecordSink, SinkState, WriterSink};

/// Counters and outcome of one shuffle run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleReport {
    /// Records consumed from the input
    pub consumed: u64,
    /// Records written to the sink
    pub emitted: u64,
    /// Whether the run ended early (cancellation or sink closure)
    pub interrupted: bool,
}

/// Streaming shuffle engine owning its window buffer and PRNG
///
/// The generator is explicit and caller-supplied, so a seeded run is fully
/// deterministic. One engine processes one stream start-to-finish; the window
/// is drained exactly once, by [`finish`](Self::finish).
pub struct ShuffleEngine<G: Rng> {
    window: Vec<Record>,
    predicted: usize,
    seen: u64,
    emitted: u64,
    window_min: usize,
    window_max: WindowCap,
    rng: G,
}

impl<G: Rng> ShuffleEngine<G> {
    /// Create an engine for one run
    ///
    /// Assumes a validated configuration (see [`ShuffleConfig::builder`]).
    pub fn new(config: &ShuffleConfig, rng: G) -> Self {
        Self {
            window: Vec::new(),
            predicted: config.window_min(),
            seen: 0,
            emitted: 0,
            window_min: config.window_min(),
            window_max: config.window_max(),
            rng,
        }
    }

    /// Records currently held in the window
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Current estimate of the total stream length
    pub fn predicted(&self) -> usize {
        self.predicted
    }

    /// Feed one record, possibly emitting one to the sink
    pub fn push<S: RecordSink>(&mut self, record: Record, sink: &mut S) -> Result<SinkState> {
        self.seen += 1;

        // Buffering phase: fill the window to its minimum depth first.
        if self.seen <= self.window_min as u64 {
            self.window.push(record);
            return Ok(SinkState::Open);
        }

        // Steady state: double the length estimate whenever the stream
        // outruns it, clamped at the window cap.
        if self.seen > self.predicted as u64 {
            self.predicted = self.window_max.clamp(self.predicted.saturating_mul(2));
        }

        let k = self.rng.gen_range(0..self.predicted);
        if k < self.window.len() {
            // Swap in the newcomer, emit the evicted record.
            let evicted = std::mem::replace(&mut self.window[k], record);
            self.write(&evicted, sink)
        } else if self.window_max.admits(self.window.len() + 1) {
            self.window.push(record);
            Ok(SinkState::Open)
        } else {
            // Window at capacity and the draw landed outside it.
            self.write(&record, sink)
        }
    }

    /// Drain the window in uniformly random order
    pub fn finish<S: RecordSink>(&mut self, sink: &mut S) -> Result<SinkState> {
        self.window.shuffle(&mut self.rng);
        while let Some(record) = self.window.pop() {
            if self.write(&record, sink)? == SinkState::Closed {
                return Ok(SinkState::Closed);
            }
        }
        Ok(SinkState::Open)
    }

    /// Consume a record stream to completion
    ///
    /// Stops early and cleanly when the sink closes, the token is cancelled,
    /// or a read fails. Whatever was already written stays written; the
    /// window is simply dropped.
    pub fn run<I, S>(mut self, records: I, sink: &mut S, cancel: &CancelToken) -> Result<ShuffleReport>
    where
        I: IntoIterator<Item = io::Result<Record>>,
        S: RecordSink,
    {
        let mut interrupted = false;

        for record in records {
            if cancel.is_cancelled() {
                interrupted = true;
                break;
            }
            let record = record?;
            if self.push(record, sink)? == SinkState::Closed {
                interrupted = true;
                break;
            }
        }

        if !interrupted && !cancel.is_cancelled() && self.finish(sink)? == SinkState::Closed {
            interrupted = !self.window.is_empty();
        }

        Ok(ShuffleReport {
            consumed: self.seen,
            emitted: self.emitted,
            interrupted: interrupted || self.emitted < self.seen,
        })
    }

    fn write<S: RecordSink>(&mut self, record: &[u8], sink: &mut S) -> Result<SinkState> {
        let state = sink.write_record(record)?;
        if state == SinkState::Open {
            self.emitted += 1;
        }
        Ok(state)
    }
}

/// Shuffle a byte stream end to end
///
/// Wires a [`RecordReader`] over `input` through a [`ShuffleEngine`] into a
/// [`WriterSink`] over `output`, then flushes. This is the whole pipeline;
/// the CLI is a thin wrapper around it.
pub fn shuffle_stream<R, W, G>(
    input: R,
    output: W,
    config: &ShuffleConfig,
    rng: G,
    cancel: &CancelToken,
) -> Result<ShuffleReport>
where
    R: Read,
    W: Write,
    G: Rng,
{
    let records = RecordReader::new(input, config.delimiter());
    let mut sink = WriterSink::new(output);
    let report = ShuffleEngine::new(config, rng).run(records, &mut sink, cancel)?;
    sink.flush()?;
    Ok(report)
}
