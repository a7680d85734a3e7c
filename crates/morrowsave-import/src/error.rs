//! Error types for the importer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can end an import run.
#[derive(Debug, Error)]
pub enum Error {
    /// Framing or I/O error from the chunk codec.
    #[error(transparent)]
    Common(#[from] morrowsave_common::Error),

    /// A legacy record could not be decoded.
    #[error(transparent)]
    Ess(#[from] morrowsave_ess::Error),

    /// A target record could not be written.
    #[error(transparent)]
    Omw(#[from] morrowsave_omw::Error),

    /// A weather id outside the ten known weathers and `-1`.
    #[error("unknown weather id {0}")]
    UnknownWeather(i32),

    /// The output exists and does not look like a saved game.
    #[error("refusing to overwrite {}: existing file is not an .omwsave", .0.display())]
    OutputExists(PathBuf),

    /// I/O error on the input or output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the importer.
pub type Result<T> = std::result::Result<T, Error>;
