//! Morrowsave - Morrowind saved game conversion library.
//!
//! This crate provides a unified interface to the morrowsave crates.
//!
//! # Crates
//!
//! - [`morrowsave_common`] - Chunk codec, tags and legacy text encodings
//! - [`morrowsave_ess`] - Legacy `.ess` record decoders
//! - [`morrowsave_omw`] - OpenMW saved game records
//! - [`morrowsave_import`] - The `.ess` to `.omwsave` importer and compare mode
//!
//! # Example
//!
//! ```no_run
//! use morrowsave::prelude::*;
//!
//! let importer = Importer::new(ImportOptions {
//!     encoding: Encoding::Win1251,
//! });
//! let data = std::fs::read("quiksave.ess")?;
//! let mut out = Vec::new();
//! let summary = importer.convert(&data, &mut out)?;
//! println!("{} cells, {} bytes", summary.cells_written, out.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use morrowsave_common as common;
pub use morrowsave_ess as ess;
pub use morrowsave_import as import;
pub use morrowsave_omw as omw;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use morrowsave_common::{ChunkReader, ChunkWriter, Encoding, RawRecord, Tag};
    pub use morrowsave_import::{
        compare_bytes, compare_files, Difference, ImportOptions, ImportSummary, Importer,
    };
}

// Re-export commonly used types at the crate root
pub use morrowsave_import::{Importer, ImportOptions};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
