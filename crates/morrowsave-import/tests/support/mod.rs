//! Helpers for building legacy saves in memory and reading back the output.

#![allow(dead_code)]

use morrowsave_common::{ChunkReader, ChunkWriter, Encoding, RawRecord, Tag};
use morrowsave_import::{ImportOptions, ImportSummary, Importer};

pub type Writer = ChunkWriter<Vec<u8>>;

/// A legacy save under construction.
pub struct Ess {
    writer: Writer,
}

impl Ess {
    /// Start a save with a `TES3` header naming the player cell.
    pub fn new(current_cell: &str) -> Self {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"TES3").unwrap();

        writer.start_sub(b"HEDR").unwrap();
        writer.write_f32(1.3).unwrap();
        writer.write_i32(32).unwrap();
        writer.write_fixed_string("", 32).unwrap();
        writer.write_fixed_string("Saved at dawn", 256).unwrap();
        writer.write_i32(0).unwrap();
        writer.end_sub().unwrap();

        writer.write_hn_string(b"MAST", "Morrowind.esm\0").unwrap();
        writer.write_hn_bytes(b"DATA", &79_837_557u64.to_le_bytes()).unwrap();

        writer.start_sub(b"GMDT").unwrap();
        writer.write_f32(50.0).unwrap();
        writer.write_f32(50.0).unwrap();
        writer.write_f32(9.0).unwrap();
        writer.write_bytes(&[0; 12]).unwrap();
        writer.write_fixed_string(current_cell, 64).unwrap();
        writer.write_bytes(&[0; 4]).unwrap();
        writer.write_fixed_string("Nerevar", 32).unwrap();
        writer.end_sub().unwrap();

        writer.end_record(b"TES3").unwrap();
        Self { writer }
    }

    pub fn record(mut self, tag: &[u8; 4], body: impl FnOnce(&mut Writer)) -> Self {
        self.writer.start_record(tag).unwrap();
        body(&mut self.writer);
        self.writer.end_record(tag).unwrap();
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.writer.into_inner().unwrap()
    }
}

/// Write an interior `CELL` header.
pub fn interior_cell(w: &mut Writer, name: &str) {
    w.write_hn_string(b"NAME", &format!("{name}\0")).unwrap();
    w.start_sub(b"DATA").unwrap();
    w.write_u32(0x01).unwrap();
    w.write_i32(0).unwrap();
    w.write_i32(0).unwrap();
    w.end_sub().unwrap();
}

/// Write an exterior `CELL` header.
pub fn exterior_cell(w: &mut Writer, x: i32, y: i32, flags: u32) {
    w.write_hn_string(b"NAME", "\0").unwrap();
    w.start_sub(b"DATA").unwrap();
    w.write_u32(flags).unwrap();
    w.write_i32(x).unwrap();
    w.write_i32(y).unwrap();
    w.end_sub().unwrap();
}

/// Start a placed object.
pub fn placed(w: &mut Writer, frmr: u32, indexed_ref_id: &str) {
    w.write_hn_u32(b"FRMR", frmr).unwrap();
    w.write_hn_string(b"NAME", &format!("{indexed_ref_id}\0")).unwrap();
}

pub fn import(data: &[u8]) -> (ImportSummary, Vec<RawRecord>) {
    let importer = Importer::new(ImportOptions::default());
    let mut out = Vec::new();
    let summary = importer.convert(data, &mut out).unwrap();
    let records = RawRecord::read_all(&out, Encoding::Win1252).unwrap();
    (summary, records)
}

pub fn with_tag<'a>(records: &'a [RawRecord], tag: &[u8; 4]) -> Vec<&'a RawRecord> {
    records.iter().filter(|record| record.name == tag).collect()
}

pub fn names(records: &[RawRecord]) -> Vec<String> {
    records.iter().map(|record| record.name.to_string()).collect()
}

pub fn sub_i32(data: &[u8]) -> i32 {
    i32::from_le_bytes(data[..4].try_into().unwrap())
}

pub fn sub_f32(data: &[u8]) -> f32 {
    f32::from_le_bytes(data[..4].try_into().unwrap())
}

pub fn sub_str(data: &[u8]) -> &str {
    std::str::from_utf8(data).unwrap().trim_end_matches('\0')
}

/// Every subrecord named `tag`, in order.
pub fn subs<'a>(record: &'a RawRecord, tag: &[u8; 4]) -> Vec<&'a [u8]> {
    record
        .subrecords
        .iter()
        .filter(|sub| sub.name == tag)
        .map(|sub| sub.data.as_slice())
        .collect()
}

/// The `OBJE` kind and ref id of every placed object in a cell state.
pub fn placed_objects(csta: &RawRecord) -> Vec<(i32, String)> {
    let mut objects = Vec::new();
    let mut kind = None;
    for sub in &csta.subrecords {
        if sub.name == b"OBJE" {
            kind = Some(sub_i32(&sub.data));
        } else if sub.name == b"NAME" {
            if let Some(kind) = kind.take() {
                objects.push((kind, sub_str(&sub.data).to_string()));
            }
        }
    }
    objects
}

pub fn type_code(tag: &[u8; 4]) -> i32 {
    Tag::new(tag).to_u32() as i32
}

/// Read the record stream back with a chunk reader, for tests that need
/// the framing rather than raw records.
pub fn record_tags(data: &[u8]) -> Vec<Tag> {
    let mut reader = ChunkReader::new(data, Encoding::Win1252);
    let mut tags = Vec::new();
    while reader.has_more_recs() {
        tags.push(reader.next_record_name().unwrap());
        reader.record_header().unwrap();
        reader.skip_record().unwrap();
    }
    tags
}
