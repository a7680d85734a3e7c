//! Error types for record encoding.

use thiserror::Error;

/// Errors that can occur while writing OpenMW records.
#[derive(Debug, Error)]
pub enum Error {
    /// Framing or I/O error from the chunk writer.
    #[error(transparent)]
    Common(#[from] morrowsave_common::Error),

    /// An equipment entry pointed past the end of the item list.
    #[error("equipped item index {index} out of range (inventory has {len} items)")]
    EquippedIndex { index: i32, len: usize },
}

/// Result type for record encoding.
pub type Result<T> = std::result::Result<T, Error>;
