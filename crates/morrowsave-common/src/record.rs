//! Generic, schema-less records.
//!
//! A [`RawRecord`] keeps every subrecord body as raw bytes. It is used
//! wherever a record only needs to be carried through or compared rather
//! than understood.

use std::io::Write;

use crate::{ChunkReader, ChunkWriter, Encoding, Result, Tag};

/// One subrecord kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subrecord {
    pub name: Tag,
    pub data: Vec<u8>,
    /// File offset of the first body byte.
    pub offset: usize,
}

/// A record with all its subrecords kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub name: Tag,
    pub flags: u32,
    /// File offset of the record body.
    pub offset: usize,
    pub subrecords: Vec<Subrecord>,
}

impl RawRecord {
    /// Read the body of the record whose header was just read.
    pub fn read_body(reader: &mut ChunkReader<'_>, flags: u32) -> Result<Self> {
        let mut record = Self {
            name: reader.record_name(),
            flags,
            offset: reader.file_offset(),
            subrecords: Vec::new(),
        };
        while reader.has_more_subs() {
            let name = reader.next_sub_name()?;
            let size = reader.sub_header()?;
            let offset = reader.file_offset();
            let data = reader.take(size)?.to_vec();
            record.subrecords.push(Subrecord { name, data, offset });
        }
        Ok(record)
    }

    /// Read every record of a file.
    pub fn read_all(data: &[u8], encoding: Encoding) -> Result<Vec<Self>> {
        let mut reader = ChunkReader::new(data, encoding);
        let mut records = Vec::new();
        while reader.has_more_recs() {
            reader.next_record_name()?;
            let header = reader.record_header()?;
            records.push(Self::read_body(&mut reader, header.flags)?);
        }
        Ok(records)
    }

    /// First subrecord named `tag`.
    pub fn find(&self, tag: &[u8; 4]) -> Option<&Subrecord> {
        self.subrecords.iter().find(|sub| sub.name == tag)
    }

    /// Write the record back out unchanged.
    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.start_record_with_flags(self.name.as_bytes(), self.flags)?;
        for sub in &self.subrecords {
            writer.write_hn_bytes(sub.name.as_bytes(), &sub.data)?;
        }
        writer.end_record(self.name.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_all_keeps_offsets() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"GLOB").unwrap();
        writer.write_hn_string(b"NAME", "day").unwrap();
        writer.write_hn_f32(b"FLTV", 3.0).unwrap();
        writer.end_record(b"GLOB").unwrap();
        writer.start_record_with_flags(b"SPEL", 1).unwrap();
        writer.end_record(b"SPEL").unwrap();
        let data = writer.into_inner().unwrap();

        let records = RawRecord::read_all(&data, Encoding::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].offset, 16);
        assert_eq!(records[0].subrecords[0].offset, 24);
        assert_eq!(records[0].find(b"NAME").unwrap().data, b"day");
        assert_eq!(records[1].flags, 1);
        assert!(records[1].subrecords.is_empty());

        let mut out = ChunkWriter::new(Vec::new());
        for record in &records {
            record.write(&mut out).unwrap();
        }
        assert_eq!(out.into_inner().unwrap(), data);
    }
}
