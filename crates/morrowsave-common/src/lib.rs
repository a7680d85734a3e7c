//! Common utilities for morrowsave.
//!
//! This crate provides the foundational types shared by the legacy decoders
//! and the target-format encoders:
//!
//! - [`BinaryReader`] - Zero-copy binary reading from byte slices
//! - [`Tag`] - Four-character record and subrecord codes
//! - [`Encoding`] - Legacy 8-bit code pages decoded to UTF-8
//! - [`chunk`] - Record/subrecord framing on both the read and write side
//! - [`RawRecord`] - Records kept as raw subrecord bytes

mod encoding;
mod error;
mod position;
mod reader;
mod record;
mod tag;

pub mod chunk;

pub use chunk::{ChunkReader, ChunkWriter, RecordHeader};
pub use encoding::Encoding;
pub use error::{Error, Result};
pub use position::Position;
pub use reader::BinaryReader;
pub use record::{RawRecord, Subrecord};
pub use tag::Tag;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
