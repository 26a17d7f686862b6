//! Delimiter-aware record tokenizer
//!
//! Splits a raw byte stream into records on a single-byte delimiter. Records
//! are opaque bytes: they are never decoded or validated, so arbitrary binary
//! content (including invalid UTF-8) passes through untouched.

use std::io::{self, Read};

use crate::config::{defaults, Delimiter};

/// One delimiter-bounded unit of the input stream
///
/// Includes the trailing delimiter, except possibly on the final record of a
/// stream that did not end with one.
pub type Record = Vec<u8>;

/// Lazy record iterator over a byte source
///
/// Reads the source in fixed-size chunks and carries partial data across
/// chunk boundaries, so a delimiter split between two reads is still
/// detected. The final unterminated record, if any, is yielded as-is with no
/// delimiter fabricated.
pub struct RecordReader<R> {
    source: R,
    delimiter: u8,
    chunk: Vec<u8>,
    /// Bytes read but not yet yielded; a prefix of the next record(s).
    carry: Vec<u8>,
    /// Length of the carry prefix already known to be delimiter-free.
    scanned: usize,
    eof: bool,
}

impl<R: Read> RecordReader<R> {
    /// Create a reader splitting `source` on `delimiter`
    pub fn new(source: R, delimiter: Delimiter) -> Self {
        Self::with_chunk_size(source, delimiter, defaults::READ_CHUNK_SIZE)
    }

    /// Create a reader with an explicit chunk size
    ///
    /// Chunk size affects throughput only, never record boundaries.
    pub fn with_chunk_size(source: R, delimiter: Delimiter, chunk_size: usize) -> Self {
        Self {
            source,
            delimiter: delimiter.as_byte(),
            chunk: vec![0u8; chunk_size.max(1)],
            carry: Vec::new(),
            scanned: 0,
            eof: false,
        }
    }

    fn fill(&mut self) -> io::Result<()> {
        loop {
            match self.source.read(&mut self.chunk) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.carry.extend_from_slice(&self.chunk[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pos) = self.carry[self.scanned..]
                .iter()
                .position(|&b| b == self.delimiter)
            {
                // Split off everything after the delimiter; the record keeps it.
                let rest = self.carry.split_off(self.scanned + pos + 1);
                let record = std::mem::replace(&mut self.carry, rest);
                self.scanned = 0;
                return Some(Ok(record));
            }
            self.scanned = self.carry.len();

            if self.eof {
                if self.carry.is_empty() {
                    return None;
                }
                // Trailing data without a delimiter is still a record.
                self.scanned = 0;
                return Some(Ok(std::mem::take(&mut self.carry)));
            }

            if let Err(e) = self.fill() {
                return Some(Err(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &[u8], delimiter: Delimiter) -> Vec<Record> {
        RecordReader::new(input, delimiter)
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(collect(b"", Delimiter::Newline).is_empty());
    }

    #[test]
    fn records_keep_their_delimiter() {
        let records = collect(b"a\nbb\nccc\n", Delimiter::Newline);
        assert_eq!(records, vec![b"a\n".to_vec(), b"bb\n".to_vec(), b"ccc\n".to_vec()]);
    }

    #[test]
    fn trailing_data_without_delimiter_is_a_record() {
        let records = collect(b"line1\nline2", Delimiter::Newline);
        assert_eq!(records, vec![b"line1\n".to_vec(), b"line2".to_vec()]);
        let total: usize = records.iter().map(Vec::len).sum();
        assert_eq!(total, b"line1\nline2".len());
    }

    #[test]
    fn nul_delimited_records() {
        let records = collect(b"a\0b\0", Delimiter::Nul);
        assert_eq!(records, vec![b"a\0".to_vec(), b"b\0".to_vec()]);
    }

    #[test]
    fn delimiter_only_input_yields_empty_records() {
        let records = collect(b"\n\n\n", Delimiter::Newline);
        assert_eq!(records, vec![b"\n".to_vec(); 3]);
    }

    #[test]
    fn delimiter_split_across_chunk_boundary() {
        // Chunk size 4 puts the delimiter of "abcde\n" in a later read than
        // the record head.
        let input: &[u8] = b"abcde\nfg\nh";
        let records: Vec<Record> = RecordReader::with_chunk_size(input, Delimiter::Newline, 4)
            .collect::<io::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            records,
            vec![b"abcde\n".to_vec(), b"fg\n".to_vec(), b"h".to_vec()]
        );
    }

    #[test]
    fn binary_content_passes_through_unaltered() {
        let input = [0xff, 0xfe, b'\n', 0x00, 0x80, b'\n'];
        let records = collect(&input, Delimiter::Newline);
        assert_eq!(records[0], vec![0xff, 0xfe, b'\n']);
        assert_eq!(records[1], vec![0x00, 0x80, b'\n']);
    }

    #[test]
    fn newline_bytes_are_data_under_nul_delimiter() {
        let records = collect(b"a\nb\0c\0", Delimiter::Nul);
        assert_eq!(records, vec![b"a\nb\0".to_vec(), b"c\0".to_vec()]);
    }

    #[test]
    fn chunk_size_does_not_change_tokenization() {
        let input = b"alpha\nbravo\ncharlie\ndelta";
        let reference = collect(input, Delimiter::Newline);
        for chunk_size in [1, 2, 3, 5, 7, 64] {
            let records: Vec<Record> =
                RecordReader::with_chunk_size(&input[..], Delimiter::Newline, chunk_size)
                    .collect::<io::Result<Vec<_>>>()
                    .unwrap();
            assert_eq!(records, reference, "chunk_size={chunk_size}");
        }
    }

    #[test]
    fn read_errors_are_surfaced() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "device gone"))
            }
        }

        let mut reader = RecordReader::new(FailingReader, Delimiter::Newline);
        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.to_string(), "device gone");
    }
}
