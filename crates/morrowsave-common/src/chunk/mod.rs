//! Tagged chunk framing shared by the legacy and target save formats.
//!
//! Both formats are a flat sequence of records:
//!
//! - 4 bytes: record tag
//! - 4 bytes: body size
//! - 4 bytes: unused (always zero)
//! - 4 bytes: record flags
//! - N bytes: subrecord stream
//!
//! and each subrecord is a 4-byte tag, a 4-byte size and the body.

mod reader;
mod writer;

pub use reader::{ChunkReader, RecordHeader};
pub use writer::ChunkWriter;
