//! Streaming windowed shuffle for delimiter-separated record streams
//!
//! This crate shuffles an unbounded record stream into a randomized output
//! stream using bounded memory, in a single forward pass. The input is never
//! materialized: each incoming record is either written out immediately or
//! swapped into a bounded in-memory window that is drained in random order at
//! end of stream.
//!
//! The emitted order is a permutation of the input (every record comes out
//! exactly once), but the permutation is *not* proven uniform over all
//! orderings — the engine is a single-pass heuristic, not classic reservoir
//! sampling. See [`ShuffleEngine`] for the algorithm.
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use sshuf_core::{shuffle_stream, CancelToken, ShuffleConfig};
//!
//! let input: &[u8] = b"alpha\nbravo\ncharlie\n";
//! let mut output = Vec::new();
//!
//! let config = ShuffleConfig::builder().window_min(2).build().unwrap();
//! let rng = StdRng::seed_from_u64(7);
//! let report = shuffle_stream(input, &mut output, &config, rng, &CancelToken::new()).unwrap();
//!
//! assert_eq!(report.consumed, 3);
//! assert_eq!(output.len(), input.len());
//! ```

#![warn(missing_docs)]

pub mod cancel;
pub mod config;
pub mod error;
pub mod reader;
pub mod shuffle;
pub mod sink;

pub use cancel::CancelToken;
pub use config::{ConfigBuilder, Delimiter, ShuffleConfig, WindowCap};
pub use error::{CoreError, Result};
pub use reader::{Record, RecordReader};
pub use shuffle::{shuffle_stream, ShuffleEngine, ShuffleReport};
pub use sink::{RecordSink, SinkState, WriterSink};
