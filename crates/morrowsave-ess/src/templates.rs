//! Fields the importer pulls out of pass-through records.
//!
//! The records themselves are re-emitted whole; these readers only look
//! at the few subrecords that also feed the player or the calendar.

use morrowsave_common::{BinaryReader, Tag};

use crate::passthrough::PassThrough;
use crate::{Error, Result};

/// Class id the character generation menu gives a custom class.
pub const CHARGEN_CLASS_ID: &str = "NEWCLASSID_CHARGEN";

/// `GLOB`: value of a global variable. Always stored as a float.
pub fn global_value(record: &PassThrough) -> Option<f32> {
    let bytes = record.sub(b"FLTV")?;
    BinaryReader::new(bytes).read_f32().ok()
}

/// `NPC_`: level from the first field of `NPDT`.
pub fn npc_level(record: &PassThrough) -> Result<Option<i32>> {
    let Some(bytes) = record.sub(b"NPDT") else {
        return Ok(None);
    };
    let level = BinaryReader::new(bytes).read_i16()?;
    Ok(Some(level.into()))
}

/// `CREA`: level from `NPDT`, after the creature type.
pub fn creature_level(record: &PassThrough) -> Result<Option<i32>> {
    let Some(bytes) = record.sub(b"NPDT") else {
        return Ok(None);
    };
    let mut reader = BinaryReader::new(bytes);
    reader.advance(4)?;
    Ok(Some(reader.read_i32()?))
}

/// `NPC_`: ids of the spells in `NPCS`.
pub fn npc_spells(record: &PassThrough) -> Vec<String> {
    record.texts(b"NPCS").collect()
}

/// `BOOK`: skill taught by the book, `-1` for none.
///
/// Books that teach a skill have it reset to `-1` once read.
pub fn book_skill(record: &PassThrough) -> Result<Option<i32>> {
    let Some(bytes) = record.sub(b"BKDT") else {
        return Ok(None);
    };
    let mut reader = BinaryReader::new(bytes);
    // weight, value, scroll flag
    reader.advance(12)?;
    Ok(Some(reader.read_i32()?))
}

/// `FACT`: reactions towards other factions, in file order.
pub fn faction_reactions(record: &PassThrough) -> Result<Vec<(String, i32)>> {
    let mut reactions = Vec::new();
    let mut pending: Option<String> = None;
    for sub in &record.record.subrecords {
        if sub.name == b"ANAM" {
            let end = sub.data.iter().position(|&b| b == 0).unwrap_or(sub.data.len());
            pending = Some(String::from_utf8_lossy(&sub.data[..end]).into_owned());
        } else if sub.name == b"INTV" {
            if let Some(faction) = pending.take() {
                let value = BinaryReader::new(&sub.data).read_i32()?;
                reactions.push((faction, value));
            }
        }
    }
    if let Some(faction) = pending {
        return Err(Error::Common(morrowsave_common::Error::MissingSubrecord {
            expected: Tag::new(b"INTV"),
            found: format!("end of record after reaction to {faction}"),
            offset: record.record.offset,
        }));
    }
    Ok(reactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::{ChunkReader, ChunkWriter, Encoding};

    fn pass_through(build: impl FnOnce(&mut ChunkWriter<Vec<u8>>), tag: &[u8; 4]) -> PassThrough {
        pass_through_in(Encoding::Win1252, build, tag)
    }

    fn pass_through_in(
        encoding: Encoding,
        build: impl FnOnce(&mut ChunkWriter<Vec<u8>>),
        tag: &[u8; 4],
    ) -> PassThrough {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(tag).unwrap();
        build(&mut writer);
        writer.end_record(tag).unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = ChunkReader::new(&data, encoding);
        reader.next_record_name().unwrap();
        reader.record_header().unwrap();
        PassThrough::load(&mut reader, 0).unwrap()
    }

    #[test]
    fn test_global_value() {
        let glob = pass_through(
            |w| {
                w.write_hn_string(b"NAME", "GameHour").unwrap();
                w.write_hn_string(b"FNAM", "f").unwrap();
                w.write_hn_f32(b"FLTV", 13.5).unwrap();
            },
            b"GLOB",
        );
        assert_eq!(global_value(&glob), Some(13.5));
    }

    #[test]
    fn test_npc_level_and_spells() {
        let npc = pass_through(
            |w| {
                w.write_hn_string(b"NAME", "player").unwrap();
                let mut npdt = vec![0u8; 12];
                npdt[0] = 7;
                w.write_hn_bytes(b"NPDT", &npdt).unwrap();
                w.start_sub(b"NPCS").unwrap();
                w.write_fixed_string("fireball", 32).unwrap();
                w.end_sub().unwrap();
            },
            b"NPC_",
        );
        assert_eq!(npc_level(&npc).unwrap(), Some(7));
        assert_eq!(npc_spells(&npc), vec!["fireball"]);
    }

    #[test]
    fn test_npc_spells_use_code_page() {
        let npc = pass_through_in(
            Encoding::Win1251,
            |w| {
                w.write_hn_string(b"NAME", "player").unwrap();
                let mut npcs = b"\xc0\xff_fire".to_vec();
                npcs.resize(32, 0);
                w.write_hn_bytes(b"NPCS", &npcs).unwrap();
            },
            b"NPC_",
        );
        assert_eq!(npc_spells(&npc), vec!["\u{410}\u{44f}_fire"]);
    }

    #[test]
    fn test_creature_level() {
        let crea = pass_through(
            |w| {
                w.write_hn_string(b"NAME", "rat").unwrap();
                w.start_sub(b"NPDT").unwrap();
                w.write_i32(0).unwrap();
                w.write_i32(3).unwrap();
                w.end_sub().unwrap();
            },
            b"CREA",
        );
        assert_eq!(creature_level(&crea).unwrap(), Some(3));
    }

    #[test]
    fn test_book_skill() {
        let book = pass_through(
            |w| {
                w.write_hn_string(b"NAME", "bk_ABCs").unwrap();
                w.start_sub(b"BKDT").unwrap();
                w.write_f32(1.0).unwrap();
                w.write_i32(50).unwrap();
                w.write_i32(0).unwrap();
                w.write_i32(-1).unwrap();
                w.write_i32(0).unwrap();
                w.end_sub().unwrap();
            },
            b"BOOK",
        );
        assert_eq!(book_skill(&book).unwrap(), Some(-1));
    }

    #[test]
    fn test_faction_reactions() {
        let fact = pass_through(
            |w| {
                w.write_hn_string(b"NAME", "Redoran").unwrap();
                w.write_hn_string(b"ANAM", "Hlaalu").unwrap();
                w.write_hn_i32(b"INTV", -2).unwrap();
                w.write_hn_string(b"ANAM", "Telvanni").unwrap();
                w.write_hn_i32(b"INTV", 1).unwrap();
            },
            b"FACT",
        );
        assert_eq!(
            faction_reactions(&fact).unwrap(),
            vec![("Hlaalu".to_string(), -2), ("Telvanni".to_string(), 1)]
        );
    }
}
