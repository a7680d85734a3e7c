//! Compare mode: a subrecord-by-subrecord diff of two record streams.
//!
//! Used to check a save against one written back by the game. Both files
//! are walked in parallel; the first structural mismatch ends the walk,
//! since records and subrecords are matched by position only.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

use morrowsave_common::{Encoding, RawRecord, Tag};

use crate::Result;

/// Subrecords whose contents change on every save, by record.
const IGNORED: [(&[u8; 4], &[u8; 4]); 7] = [
    (b"GLOB", b"FLTV"),
    (b"REFR", b"DATA"),
    (b"CELL", b"NAM8"),
    (b"GAME", b"GMDT"),
    // first three bytes are uninitialised
    (b"CELL", b"DELE"),
    (b"CELL", b"ND3D"),
    (b"REFR", b"ND3D"),
];

const HIGHLIGHT: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

fn is_ignored(record: Tag, sub: Tag) -> bool {
    IGNORED.iter().any(|&(r, s)| record == r && sub == s)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    /// The second file ran out of records.
    MissingRecord { offset: usize },
    RecordName {
        first: Tag,
        second: Tag,
        offset: usize,
    },
    /// The record in the second file ran out of subrecords.
    MissingSubrecord { record: Tag, sub: Tag, offset: usize },
    SubrecordName {
        record: Tag,
        first: Tag,
        second: Tag,
        offsets: (usize, usize),
    },
    Data {
        record: Tag,
        sub: Tag,
        offsets: (usize, usize),
        first: Vec<u8>,
        second: Vec<u8>,
    },
}

/// Hex bytes of `data`, highlighting those that differ from `other`.
pub fn hex_dump(data: &[u8], other: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3);
    for (index, byte) in data.iter().enumerate() {
        if other.get(index) == Some(byte) {
            let _ = write!(out, "{byte:02x} ");
        } else {
            let _ = write!(out, "{HIGHLIGHT}{byte:02x}{RESET} ");
        }
    }
    out
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::MissingRecord { offset } => {
                write!(f, "Record in file1 not present in file2: (1) {offset:#x}")
            }
            Difference::RecordName { first, second, offset } => {
                write!(f, "Different record name ({first} vs. {second}) at (2) {offset:#x}")
            }
            Difference::MissingSubrecord { record, sub, offset } => {
                write!(f, "Subrecord {record}.{sub} in file1 not present in file2: (1) {offset:#x}")
            }
            Difference::SubrecordName {
                record,
                first,
                second,
                offsets: (a, b),
            } => write!(
                f,
                "Different subrecord name ({record}.{first} vs. {second}) at (1) {a:#x} (2) {b:#x}"
            ),
            Difference::Data {
                record,
                sub,
                offsets: (a, b),
                first,
                second,
            } => {
                writeln!(f, "Different subrecord data for {record}.{sub} at (1) {a:#x} (2) {b:#x}")?;
                writeln!(f, "Data 1:")?;
                writeln!(f, "{}", hex_dump(first, second))?;
                writeln!(f, "Data 2:")?;
                write!(f, "{}", hex_dump(second, first))
            }
        }
    }
}

pub fn compare_records(first: &[RawRecord], second: &[RawRecord]) -> Vec<Difference> {
    let mut differences = Vec::new();

    for (index, rec) in first.iter().enumerate() {
        let Some(rec2) = second.get(index) else {
            differences.push(Difference::MissingRecord { offset: rec.offset });
            return differences;
        };
        if rec.name != rec2.name {
            differences.push(Difference::RecordName {
                first: rec.name,
                second: rec2.name,
                offset: rec2.offset,
            });
            return differences;
        }

        for (sub_index, sub) in rec.subrecords.iter().enumerate() {
            let Some(sub2) = rec2.subrecords.get(sub_index) else {
                differences.push(Difference::MissingSubrecord {
                    record: rec.name,
                    sub: sub.name,
                    offset: sub.offset,
                });
                return differences;
            };
            if sub.name != sub2.name {
                differences.push(Difference::SubrecordName {
                    record: rec.name,
                    first: sub.name,
                    second: sub2.name,
                    offsets: (sub.offset, sub2.offset),
                });
                break;
            }
            if sub.data != sub2.data && !is_ignored(rec.name, sub.name) {
                differences.push(Difference::Data {
                    record: rec.name,
                    sub: sub.name,
                    offsets: (sub.offset, sub2.offset),
                    first: sub.data.clone(),
                    second: sub2.data.clone(),
                });
            }
        }
    }
    differences
}

pub fn compare_bytes(first: &[u8], second: &[u8], encoding: Encoding) -> Result<Vec<Difference>> {
    let first = RawRecord::read_all(first, encoding)?;
    let second = RawRecord::read_all(second, encoding)?;
    Ok(compare_records(&first, &second))
}

pub fn compare_files(first: &Path, second: &Path, encoding: Encoding) -> Result<Vec<Difference>> {
    let first = fs::read(first)?;
    let second = fs::read(second)?;
    compare_bytes(&first, &second, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::ChunkWriter;

    #[derive(Default)]
    struct File(Vec<(&'static [u8; 4], Vec<(&'static [u8; 4], Vec<u8>)>)>);

    impl File {
        fn record(mut self, name: &'static [u8; 4]) -> Self {
            self.0.push((name, Vec::new()));
            self
        }

        fn sub(mut self, name: &'static [u8; 4], data: &[u8]) -> Self {
            if let Some((_, subs)) = self.0.last_mut() {
                subs.push((name, data.to_vec()));
            }
            self
        }

        fn bytes(&self) -> Vec<u8> {
            let mut writer = ChunkWriter::new(Vec::new());
            for (name, subs) in &self.0 {
                writer.start_record(name).unwrap();
                for (sub, data) in subs {
                    writer.write_hn_bytes(sub, data).unwrap();
                }
                writer.end_record(name).unwrap();
            }
            writer.into_inner().unwrap()
        }
    }

    #[test]
    fn test_identical_files() {
        let data = File::default()
            .record(b"GLOB")
            .sub(b"NAME", b"day")
            .sub(b"FLTV", &[0, 0, 64, 64])
            .bytes();
        assert!(compare_bytes(&data, &data, Encoding::Win1252).unwrap().is_empty());
    }

    #[test]
    fn test_data_difference() {
        let a = File::default().record(b"SPEL").sub(b"NAME", b"ab").sub(b"SPDT", &[1, 2, 3]);
        let b = File::default().record(b"SPEL").sub(b"NAME", b"ab").sub(b"SPDT", &[1, 9, 3]);
        let differences = compare_bytes(&a.bytes(), &b.bytes(), Encoding::Win1252).unwrap();

        assert_eq!(differences.len(), 1);
        let Difference::Data { record, sub, first, second, .. } = &differences[0] else {
            panic!("expected a data difference, got {:?}", differences[0]);
        };
        assert_eq!(*record, b"SPEL");
        assert_eq!(*sub, b"SPDT");
        assert_eq!(first, &[1, 2, 3]);
        assert_eq!(second, &[1, 9, 3]);
    }

    #[test]
    fn test_ignored_subrecords() {
        let a = File::default().record(b"CELL").sub(b"NAME", b"c").sub(b"NAM8", &[0; 32]);
        let b = File::default().record(b"CELL").sub(b"NAME", b"c").sub(b"NAM8", &[0xff; 32]);
        assert!(compare_bytes(&a.bytes(), &b.bytes(), Encoding::Win1252).unwrap().is_empty());

        // only ignored within the listed record
        let a = File::default().record(b"SPEL").sub(b"NAM8", &[0]);
        let b = File::default().record(b"SPEL").sub(b"NAM8", &[1]);
        assert_eq!(compare_bytes(&a.bytes(), &b.bytes(), Encoding::Win1252).unwrap().len(), 1);
    }

    #[test]
    fn test_record_name_mismatch_stops() {
        let a = File::default().record(b"GLOB").record(b"SPEL").sub(b"NAME", b"x");
        let b = File::default().record(b"CLAS").record(b"SPEL").sub(b"NAME", b"y");
        let differences = compare_bytes(&a.bytes(), &b.bytes(), Encoding::Win1252).unwrap();
        assert_eq!(differences.len(), 1);
        assert!(matches!(differences[0], Difference::RecordName { .. }));
    }

    #[test]
    fn test_subrecord_name_mismatch_ends_record() {
        let a = File::default()
            .record(b"SPEL")
            .sub(b"NAME", b"x")
            .sub(b"FNAM", b"a")
            .sub(b"SPDT", &[1])
            .record(b"CLAS")
            .sub(b"NAME", b"p");
        let b = File::default()
            .record(b"SPEL")
            .sub(b"NAME", b"x")
            .sub(b"SPDT", &[2])
            .sub(b"FNAM", b"b")
            .record(b"CLAS")
            .sub(b"NAME", b"q");
        let differences = compare_bytes(&a.bytes(), &b.bytes(), Encoding::Win1252).unwrap();
        assert_eq!(differences.len(), 2);
        assert!(matches!(differences[0], Difference::SubrecordName { .. }));
        assert!(matches!(differences[1], Difference::Data { .. }));
    }

    #[test]
    fn test_missing_record() {
        let a = File::default().record(b"GLOB").record(b"SPEL");
        let b = File::default().record(b"GLOB");
        let differences = compare_bytes(&a.bytes(), &b.bytes(), Encoding::Win1252).unwrap();
        assert_eq!(differences, [Difference::MissingRecord { offset: 32 }]);
    }

    #[test]
    fn test_hex_dump_highlights() {
        assert_eq!(hex_dump(&[0xab, 0x01], &[0xab, 0x01]), "ab 01 ");
        assert_eq!(hex_dump(&[0xab, 0x01], &[0xab]), "ab \x1b[33m01\x1b[0m ");
    }
}
