//! Error types for morrowsave-common.

use thiserror::Error;

use crate::Tag;

/// Common error type for chunk reading and writing.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// Invalid magic bytes encountered.
    #[error("invalid magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic {
        expected: Vec<u8>,
        actual: Vec<u8>,
    },

    /// A required subrecord was not where the grammar expects it.
    #[error("expected subrecord {expected}, found {found} (offset {offset:#x})")]
    MissingSubrecord {
        expected: Tag,
        found: String,
        offset: usize,
    },

    /// A subrecord body did not have the size its layout requires.
    #[error("subrecord {tag} has size {actual}, expected {expected} (offset {offset:#x})")]
    SubrecordSize {
        tag: Tag,
        expected: usize,
        actual: usize,
        offset: usize,
    },

    /// A read ran past the end of the enclosing record or subrecord.
    #[error("read of {needed} bytes overruns {context} with {left} bytes left (offset {offset:#x})")]
    Overrun {
        context: &'static str,
        needed: usize,
        left: usize,
        offset: usize,
    },

    /// Unknown text encoding name.
    #[error("unknown encoding: {0} (expected win1250, win1251 or win1252)")]
    UnknownEncoding(String),

    /// Record or subrecord framing used out of order on the write side.
    #[error("chunk writer misuse: {0}")]
    Framing(String),

    /// A body was too large for its 32-bit size field.
    #[error("chunk body of {0} bytes does not fit a 32-bit size field")]
    TooLarge(usize),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
