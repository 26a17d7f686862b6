//! sshuf CLI library
//!
//! Thin glue around `sshuf-core`: argument parsing, stream selection, and
//! logging setup. The shuffle itself lives entirely in the core crate.

pub mod args;
pub mod input;
pub mod output;
