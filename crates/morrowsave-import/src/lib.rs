//! Converts legacy Morrowind saved games (`.ess`) into OpenMW saved games.
//!
//! The import runs in two phases. Every legacy record is first decoded
//! and folded into a per-record-kind [`Converter`] or into the shared
//! [`Context`]. Once the input is exhausted the converters write their
//! target records in a fixed order of stages, so that change records can
//! be merged into the objects they describe no matter where they
//! appeared in the input.
//!
//! # Example
//!
//! ```no_run
//! use morrowsave_import::{ImportOptions, Importer};
//! use std::path::Path;
//!
//! let importer = Importer::new(ImportOptions::default());
//! let summary = importer.run(Path::new("quiksave.ess"), Path::new("quiksave.omwsave"))?;
//! println!("{summary}");
//! # Ok::<(), morrowsave_import::Error>(())
//! ```
//!
//! [`Converter`]: converters::Converter

mod error;

pub mod compare;
pub mod context;
pub mod convert;
pub mod converters;
pub mod importer;
pub mod refid;
pub mod summary;

pub use error::{Error, Result};

pub use compare::{compare_bytes, compare_files, Difference};
pub use context::Context;
pub use importer::{check_output_path, ImportOptions, Importer, OUTPUT_EXTENSION};
pub use refid::RefKey;
pub use summary::ImportSummary;
