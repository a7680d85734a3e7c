//! Read side of the chunk codec.

use zerocopy::FromBytes;

use crate::{BinaryReader, Encoding, Error, Result, Tag};

/// Header fields of the record currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Size of the record body in bytes.
    pub size: u32,
    /// Record flags.
    pub flags: u32,
}

/// Streaming reader over a tagged chunk file held in memory.
///
/// The reader tracks how many bytes are left in the current record and
/// subrecord so that decoders can probe optional subrecords with
/// [`is_next_sub`](Self::is_next_sub): a probe that does not match leaves
/// the tag cached for the next call.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    reader: BinaryReader<'a>,
    encoding: Encoding,
    rec_name: Tag,
    rec_offset: usize,
    rec_left: usize,
    sub_name: Tag,
    sub_left: usize,
    sub_cached: bool,
}

impl<'a> ChunkReader<'a> {
    /// Create a reader over a whole file.
    pub fn new(data: &'a [u8], encoding: Encoding) -> Self {
        Self {
            reader: BinaryReader::new(data),
            encoding,
            rec_name: Tag::new(&[0; 4]),
            rec_offset: 0,
            rec_left: 0,
            sub_name: Tag::new(&[0; 4]),
            sub_left: 0,
            sub_cached: false,
        }
    }

    /// The code page text fields are decoded with.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Current absolute position in the file.
    pub fn file_offset(&self) -> usize {
        self.reader.position()
    }

    /// Total size of the file.
    pub fn file_len(&self) -> usize {
        self.reader.len()
    }

    // ------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------

    /// Check whether another record follows.
    pub fn has_more_recs(&self) -> bool {
        self.rec_left == 0 && self.sub_left == 0 && !self.reader.is_empty()
    }

    /// Read the tag of the next record.
    pub fn next_record_name(&mut self) -> Result<Tag> {
        if self.rec_left != 0 || self.sub_left != 0 || self.sub_cached {
            return Err(Error::Overrun {
                context: "record",
                needed: 4,
                left: self.rec_left,
                offset: self.file_offset(),
            });
        }
        self.rec_offset = self.file_offset();
        self.rec_name = self.reader.read_tag()?;
        Ok(self.rec_name)
    }

    /// Read the header following the record tag.
    pub fn record_header(&mut self) -> Result<RecordHeader> {
        let size = self.reader.read_u32()?;
        let _unused = self.reader.read_u32()?;
        let flags = self.reader.read_u32()?;

        if size as usize > self.reader.remaining() {
            return Err(Error::Overrun {
                context: "file",
                needed: size as usize,
                left: self.reader.remaining(),
                offset: self.rec_offset,
            });
        }

        self.rec_left = size as usize;
        Ok(RecordHeader { size, flags })
    }

    /// Tag of the record being read.
    pub fn record_name(&self) -> Tag {
        self.rec_name
    }

    /// File offset of the tag of the record being read.
    pub fn record_offset(&self) -> usize {
        self.rec_offset
    }

    /// Skip whatever is left of the current record.
    pub fn skip_record(&mut self) -> Result<()> {
        let left = self.sub_left + self.rec_left;
        self.reader.advance(left)?;
        self.sub_left = 0;
        self.rec_left = 0;
        self.sub_cached = false;
        Ok(())
    }

    /// Skip the rest of the record, returning the tags of the subrecords
    /// that were never decoded.
    pub fn skip_remaining_subs(&mut self) -> Result<Vec<Tag>> {
        self.skip_sub_body()?;
        let mut skipped = Vec::new();
        while self.has_more_subs() {
            skipped.push(self.next_sub_name()?);
            self.skip_h_sub()?;
        }
        Ok(skipped)
    }

    // ------------------------------------------------------------------
    // Subrecord headers
    // ------------------------------------------------------------------

    /// Check whether the current record has another subrecord.
    pub fn has_more_subs(&self) -> bool {
        self.sub_cached || self.rec_left > 0
    }

    /// Tag of the most recently read subrecord.
    pub fn sub_name(&self) -> Tag {
        self.sub_name
    }

    /// Read the next subrecord tag, or take the cached one.
    pub fn next_sub_name(&mut self) -> Result<Tag> {
        if self.sub_cached {
            self.sub_cached = false;
            return Ok(self.sub_name);
        }
        if self.rec_left < 4 {
            return Err(Error::Overrun {
                context: "record",
                needed: 4,
                left: self.rec_left,
                offset: self.file_offset(),
            });
        }
        self.sub_name = self.reader.read_tag()?;
        self.rec_left -= 4;
        Ok(self.sub_name)
    }

    /// Put back the subrecord tag that was just read by
    /// [`next_sub_name`](Self::next_sub_name).
    pub fn cache_sub_name(&mut self) {
        self.sub_cached = true;
    }

    /// Look at the next subrecord tag without consuming it.
    pub fn peek_sub_name(&mut self) -> Result<Option<Tag>> {
        if !self.has_more_subs() {
            return Ok(None);
        }
        let name = self.next_sub_name()?;
        self.sub_cached = true;
        Ok(Some(name))
    }

    /// Consume the next subrecord tag if it is `tag`.
    ///
    /// On a mismatch the tag stays cached and `false` is returned.
    pub fn is_next_sub(&mut self, tag: &[u8; 4]) -> Result<bool> {
        if !self.has_more_subs() {
            return Ok(false);
        }
        let name = self.next_sub_name()?;
        if name == tag {
            Ok(true)
        } else {
            self.sub_cached = true;
            Ok(false)
        }
    }

    /// Require the next subrecord to be `tag`.
    pub fn expect_sub(&mut self, tag: &[u8; 4]) -> Result<()> {
        let offset = self.file_offset();
        if !self.has_more_subs() {
            return Err(Error::MissingSubrecord {
                expected: Tag::new(tag),
                found: "end of record".to_string(),
                offset,
            });
        }
        let name = self.next_sub_name()?;
        if name != tag {
            return Err(Error::MissingSubrecord {
                expected: Tag::new(tag),
                found: name.to_string(),
                offset,
            });
        }
        Ok(())
    }

    /// Read the size of the subrecord whose tag was just read.
    pub fn sub_header(&mut self) -> Result<usize> {
        if self.rec_left < 4 {
            return Err(Error::Overrun {
                context: "record",
                needed: 4,
                left: self.rec_left,
                offset: self.file_offset(),
            });
        }
        let size = self.reader.read_u32()? as usize;
        self.rec_left -= 4;
        if size > self.rec_left {
            return Err(Error::Overrun {
                context: "record",
                needed: size,
                left: self.rec_left,
                offset: self.file_offset(),
            });
        }
        self.rec_left -= size;
        self.sub_left = size;
        Ok(size)
    }

    // ------------------------------------------------------------------
    // Subrecord bodies
    // ------------------------------------------------------------------

    /// Take raw bytes from the current subrecord body.
    pub fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.sub_left {
            return Err(Error::Overrun {
                context: "subrecord",
                needed: count,
                left: self.sub_left,
                offset: self.file_offset(),
            });
        }
        self.sub_left -= count;
        self.reader.read_bytes(count)
    }

    /// Skip bytes of the current subrecord body.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    /// Skip whatever is left of the current subrecord body.
    pub fn skip_sub_body(&mut self) -> Result<()> {
        self.skip(self.sub_left)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_u32().map(|v| v as i32)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_u32().map(f32::from_bits)
    }

    /// Read a fixed-layout struct from the current body.
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.take(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Read `length` bytes of text, cut at the first NUL.
    pub fn read_string(&mut self, length: usize) -> Result<String> {
        let bytes = self.take(length)?;
        Ok(self.decode_text(bytes))
    }

    /// Decode legacy text, cut at the first NUL.
    pub fn decode_text(&self, bytes: &[u8]) -> String {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        self.encoding.decode(&bytes[..end])
    }

    // ------------------------------------------------------------------
    // Header + body helpers
    // ------------------------------------------------------------------

    /// Read a subrecord body that must be exactly one `T`.
    pub fn read_h_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = self.sub_header()?;
        let expected = std::mem::size_of::<T>();
        if size != expected {
            return Err(Error::SubrecordSize {
                tag: self.sub_name,
                expected,
                actual: size,
                offset: self.file_offset(),
            });
        }
        self.read_struct()
    }

    /// Read the mandatory subrecord `tag` as one `T`.
    pub fn read_hn_struct<T: FromBytes>(&mut self, tag: &[u8; 4]) -> Result<T> {
        self.expect_sub(tag)?;
        self.read_h_struct()
    }

    /// Read the optional subrecord `tag` as one `T`.
    pub fn read_hno_struct<T: FromBytes>(&mut self, tag: &[u8; 4]) -> Result<Option<T>> {
        if self.is_next_sub(tag)? {
            self.read_h_struct().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Read a whole subrecord body as text.
    pub fn read_h_string(&mut self) -> Result<String> {
        let size = self.sub_header()?;
        self.read_string(size)
    }

    /// Read the mandatory subrecord `tag` as text.
    pub fn read_hn_string(&mut self, tag: &[u8; 4]) -> Result<String> {
        self.expect_sub(tag)?;
        self.read_h_string()
    }

    /// Read the optional subrecord `tag` as text.
    pub fn read_hno_string(&mut self, tag: &[u8; 4]) -> Result<Option<String>> {
        if self.is_next_sub(tag)? {
            self.read_h_string().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Read a whole subrecord body as raw bytes.
    pub fn read_h_bytes(&mut self) -> Result<&'a [u8]> {
        let size = self.sub_header()?;
        self.take(size)
    }

    /// Skip a subrecord whose tag was just read.
    pub fn skip_h_sub(&mut self) -> Result<()> {
        let size = self.sub_header()?;
        self.skip(size)
    }

    /// Skip a subrecord whose tag was just read, checking its size.
    pub fn skip_h_sub_size(&mut self, expected: usize) -> Result<()> {
        let size = self.sub_header()?;
        if size != expected {
            return Err(Error::SubrecordSize {
                tag: self.sub_name,
                expected,
                actual: size,
                offset: self.file_offset(),
            });
        }
        self.skip(size)
    }
}
