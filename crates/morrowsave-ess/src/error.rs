//! Error types for legacy record decoding.

use morrowsave_common::Tag;
use thiserror::Error;

/// Errors that can occur while decoding legacy records.
#[derive(Debug, Error)]
pub enum Error {
    /// Framing or primitive read error.
    #[error(transparent)]
    Common(#[from] morrowsave_common::Error),

    /// A `WIDX` entry pointed past the end of the item list.
    #[error("equipment item index {index} out of range (inventory has {len} items)")]
    EquipmentIndex { index: i32, len: usize },

    /// A subrecord had none of the sizes its known versions use.
    #[error("unexpected size {size} for subrecord {record}.{tag}")]
    UnexpectedSize { record: Tag, tag: Tag, size: usize },

    /// A count field was negative.
    #[error("invalid {field} value {value}")]
    InvalidValue { field: &'static str, value: i64 },
}

/// Result type for legacy record decoding.
pub type Result<T> = std::result::Result<T, Error>;
