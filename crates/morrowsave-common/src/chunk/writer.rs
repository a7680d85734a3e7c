//! Write side of the chunk codec.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use zerocopy::{Immutable, IntoBytes};

use crate::{Error, Result, Tag};

#[derive(Debug)]
struct OpenRecord {
    tag: Tag,
    flags: u32,
    body: Vec<u8>,
}

/// Writer producing tagged chunk records.
///
/// A record is buffered until [`end_record`](Self::end_record) so its size
/// can be written up front. Subrecord sizes are patched in place when the
/// subrecord is closed.
#[derive(Debug)]
pub struct ChunkWriter<W: Write> {
    out: W,
    record: Option<OpenRecord>,
    sub: Option<(Tag, usize)>,
    record_count: usize,
}

impl<W: Write> ChunkWriter<W> {
    /// Create a writer on top of an output stream.
    pub fn new(out: W) -> Self {
        Self {
            out,
            record: None,
            sub: None,
            record_count: 0,
        }
    }

    /// Number of records written so far.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Open a record with zero flags.
    pub fn start_record(&mut self, tag: &[u8; 4]) -> Result<()> {
        self.start_record_with_flags(tag, 0)
    }

    /// Open a record.
    pub fn start_record_with_flags(&mut self, tag: &[u8; 4], flags: u32) -> Result<()> {
        if let Some(open) = &self.record {
            return Err(Error::Framing(format!(
                "cannot start record {} while {} is open",
                Tag::new(tag),
                open.tag
            )));
        }
        self.record = Some(OpenRecord {
            tag: Tag::new(tag),
            flags,
            body: Vec::new(),
        });
        Ok(())
    }

    /// Close the open record and write it out.
    pub fn end_record(&mut self, tag: &[u8; 4]) -> Result<()> {
        if let Some((sub, _)) = self.sub {
            return Err(Error::Framing(format!(
                "cannot end record {} with subrecord {} open",
                Tag::new(tag),
                sub
            )));
        }
        let record = match self.record.take() {
            Some(record) if record.tag == tag => record,
            Some(record) => {
                let message = format!("cannot end record {} while {} is open", Tag::new(tag), record.tag);
                self.record = Some(record);
                return Err(Error::Framing(message));
            }
            None => {
                return Err(Error::Framing(format!(
                    "cannot end record {} without starting it",
                    Tag::new(tag)
                )))
            }
        };

        let size = u32::try_from(record.body.len()).map_err(|_| Error::TooLarge(record.body.len()))?;
        self.out.write_all(record.tag.as_bytes())?;
        self.out.write_u32::<LittleEndian>(size)?;
        self.out.write_u32::<LittleEndian>(0)?;
        self.out.write_u32::<LittleEndian>(record.flags)?;
        self.out.write_all(&record.body)?;
        self.record_count += 1;
        Ok(())
    }

    /// Open a subrecord inside the open record.
    pub fn start_sub(&mut self, tag: &[u8; 4]) -> Result<()> {
        if let Some((open, _)) = self.sub {
            return Err(Error::Framing(format!(
                "cannot start subrecord {} while {} is open",
                Tag::new(tag),
                open
            )));
        }
        let body = self.body()?;
        body.extend_from_slice(tag);
        body.extend_from_slice(&[0; 4]);
        let start = body.len();
        self.sub = Some((Tag::new(tag), start));
        Ok(())
    }

    /// Close the open subrecord, patching its size.
    pub fn end_sub(&mut self) -> Result<()> {
        let Some((_, start)) = self.sub.take() else {
            return Err(Error::Framing("no subrecord open".to_string()));
        };
        let body = self.body()?;
        let len = body.len() - start;
        let size = u32::try_from(len).map_err(|_| Error::TooLarge(len))?;
        body[start - 4..start].copy_from_slice(&size.to_le_bytes());
        Ok(())
    }

    fn body(&mut self) -> Result<&mut Vec<u8>> {
        match &mut self.record {
            Some(record) => Ok(&mut record.body),
            None => Err(Error::Framing("no record open".to_string())),
        }
    }

    fn data(&mut self) -> Result<&mut Vec<u8>> {
        if self.sub.is_none() {
            return Err(Error::Framing("data written outside a subrecord".to_string()));
        }
        self.body()
    }

    // ------------------------------------------------------------------
    // Writes into the open subrecord
    // ------------------------------------------------------------------

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.data()?.extend_from_slice(bytes);
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.data()?.write_u8(value)?;
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.data()?.write_i32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.data()?.write_u32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.data()?.write_u64::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.data()?.write_f32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.data()?.write_f64::<LittleEndian>(value)?;
        Ok(())
    }

    /// Write a string padded or truncated to a fixed width.
    pub fn write_fixed_string(&mut self, value: &str, width: usize) -> Result<()> {
        let bytes = value.as_bytes();
        let len = bytes.len().min(width);
        let data = self.data()?;
        data.extend_from_slice(&bytes[..len]);
        data.resize(data.len() + (width - len), 0);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Whole subrecords
    // ------------------------------------------------------------------

    /// Write a subrecord holding raw bytes.
    pub fn write_hn_bytes(&mut self, tag: &[u8; 4], bytes: &[u8]) -> Result<()> {
        self.start_sub(tag)?;
        self.write_bytes(bytes)?;
        self.end_sub()
    }

    /// Write a subrecord holding a UTF-8 string without terminator.
    pub fn write_hn_string(&mut self, tag: &[u8; 4], value: &str) -> Result<()> {
        self.write_hn_bytes(tag, value.as_bytes())
    }

    /// Write a subrecord holding a fixed-layout struct.
    pub fn write_hn_struct<T: IntoBytes + Immutable>(&mut self, tag: &[u8; 4], value: &T) -> Result<()> {
        self.write_hn_bytes(tag, value.as_bytes())
    }

    pub fn write_hn_u8(&mut self, tag: &[u8; 4], value: u8) -> Result<()> {
        self.write_hn_bytes(tag, &[value])
    }

    pub fn write_hn_bool(&mut self, tag: &[u8; 4], value: bool) -> Result<()> {
        self.write_hn_u8(tag, value as u8)
    }

    pub fn write_hn_i32(&mut self, tag: &[u8; 4], value: i32) -> Result<()> {
        self.write_hn_bytes(tag, &value.to_le_bytes())
    }

    pub fn write_hn_u32(&mut self, tag: &[u8; 4], value: u32) -> Result<()> {
        self.write_hn_bytes(tag, &value.to_le_bytes())
    }

    pub fn write_hn_f32(&mut self, tag: &[u8; 4], value: f32) -> Result<()> {
        self.write_hn_bytes(tag, &value.to_le_bytes())
    }

    pub fn write_hn_f64(&mut self, tag: &[u8; 4], value: f64) -> Result<()> {
        self.write_hn_bytes(tag, &value.to_le_bytes())
    }

    /// Flush and return the underlying stream.
    pub fn into_inner(mut self) -> Result<W> {
        if let Some(open) = &self.record {
            return Err(Error::Framing(format!("record {} left open", open.tag)));
        }
        self.out.flush()?;
        Ok(self.out)
    }
}
