//! Records that are carried into the output mostly unchanged.
//!
//! These are content-file record kinds the save overrides wholesale
//! (spells made by the player, enchanted items, levelled lists touched by
//! scripts and so on). Their layout is the same in both formats; only the
//! text subrecords have to move from the legacy code page to UTF-8.

use morrowsave_common::{ChunkReader, Encoding, RawRecord, Tag};

use crate::Result;

/// Subrecords holding text, per record kind. `NAME` is always text.
pub fn text_subrecords(record: Tag) -> &'static [&'static [u8; 4]] {
    match record.as_bytes() {
        b"ALCH" => &[b"MODL", b"FNAM", b"TEXT", b"SCRI"],
        b"ARMO" | b"CLOT" => &[b"MODL", b"FNAM", b"SCRI", b"ITEX", b"ENAM", b"BNAM", b"CNAM"],
        b"WEAP" => &[b"MODL", b"FNAM", b"ITEX", b"ENAM", b"SCRI"],
        b"SPEL" => &[b"FNAM"],
        b"LEVC" | b"LEVI" => &[b"CNAM", b"INAM"],
        b"BOOK" => &[b"MODL", b"FNAM", b"SCRI", b"ITEX", b"TEXT", b"ENAM"],
        b"CLAS" => &[b"FNAM", b"DESC"],
        b"NPC_" | b"CREA" => &[
            b"MODL", b"FNAM", b"RNAM", b"CNAM", b"ANAM", b"BNAM", b"KNAM", b"SCRI", b"NPCS",
        ],
        b"FACT" => &[b"FNAM", b"RNAM", b"ANAM"],
        _ => &[],
    }
}

/// A record kept as raw subrecords, keyed by its `NAME`.
#[derive(Debug, Clone, PartialEq)]
pub struct PassThrough {
    pub id: String,
    pub record: RawRecord,
}

impl PassThrough {
    /// Read the body of the record whose header was just read.
    pub fn load(reader: &mut ChunkReader<'_>, flags: u32) -> Result<Self> {
        let encoding = reader.encoding();
        let mut record = RawRecord::read_body(reader, flags)?;

        let text = text_subrecords(record.name);
        let mut id = String::new();
        for sub in &mut record.subrecords {
            if sub.name == b"NAME" {
                id = decode(encoding, &sub.data);
                sub.data = reencode(encoding, &sub.data);
            } else if text.iter().any(|tag| sub.name == **tag) {
                sub.data = reencode(encoding, &sub.data);
            }
        }

        Ok(PassThrough { id, record })
    }

    pub fn name(&self) -> Tag {
        self.record.name
    }

    /// Body of the first subrecord named `tag`.
    pub fn sub(&self, tag: &[u8; 4]) -> Option<&[u8]> {
        self.record.find(tag).map(|sub| sub.data.as_slice())
    }

    /// Text of the first subrecord named `tag`, already UTF-8.
    pub fn text(&self, tag: &[u8; 4]) -> Option<String> {
        self.sub(tag).map(until_nul)
    }

    /// Text of every subrecord named `tag`, in file order.
    pub fn texts<'a>(&'a self, tag: &'a [u8; 4]) -> impl Iterator<Item = String> + 'a {
        self.record
            .subrecords
            .iter()
            .filter(move |sub| sub.name == tag)
            .map(|sub| until_nul(&sub.data))
    }

    /// Remove every subrecord named `tag`.
    pub fn strip(&mut self, tag: &[u8; 4]) {
        self.record.subrecords.retain(|sub| sub.name != tag);
    }

    /// Rename the record, keeping the `NAME` terminator if it had one.
    pub fn set_id(&mut self, id: &str) {
        for sub in self.record.subrecords.iter_mut().filter(|sub| sub.name == b"NAME") {
            let terminated = sub.data.last() == Some(&0);
            sub.data = id.as_bytes().to_vec();
            if terminated {
                sub.data.push(0);
            }
        }
        self.id = id.to_string();
    }
}

fn until_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

fn decode(encoding: Encoding, bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    encoding.decode(&bytes[..end])
}

fn reencode(encoding: Encoding, bytes: &[u8]) -> Vec<u8> {
    let mut out = decode(encoding, bytes).into_bytes();
    if bytes.last() == Some(&0) {
        out.push(0);
    }
    out
}
