//! The `TES3` file header of a legacy save.

use morrowsave_common::{BinaryReader, ChunkReader, FromBytes, Immutable, IntoBytes, KnownLayout};
use tracing::debug;

use crate::Result;

/// `HEDR`: file version and description.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Hedr {
    pub version: f32,
    pub file_type: i32,
    pub author: [u8; 32],
    pub description: [u8; 256],
    pub record_count: i32,
}

impl Hedr {
    pub const SIZE: usize = 300;
}

/// `GMDT`: summary of the game state shown on the load screen.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct GameData {
    pub current_health: f32,
    pub maximum_health: f32,
    pub hour: f32,
    pub unknown1: [u8; 12],
    pub current_cell: [u8; 64],
    pub unknown2: [u8; 4],
    pub player_name: [u8; 32],
}

impl GameData {
    pub const SIZE: usize = 124;
}

/// A content file the save depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Master {
    pub name: String,
    pub size: u64,
}

/// Decoded legacy file header.
#[derive(Debug, Clone, Default)]
pub struct Header {
    pub version: f32,
    pub description: String,
    pub masters: Vec<Master>,
    pub current_cell: String,
    pub player_name: String,
    pub has_screenshot: bool,
}

impl Header {
    /// Read the `TES3` record at the start of the file.
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let offset = reader.file_offset();
        let name = reader.next_record_name()?;
        BinaryReader::new(name.as_bytes()).expect_magic(b"TES3")?;
        reader.record_header()?;

        let hedr: Hedr = reader.read_hn_struct(b"HEDR")?;
        let mut header = Header {
            version: hedr.version,
            description: reader.decode_text(&hedr.description),
            ..Default::default()
        };

        while reader.is_next_sub(b"MAST")? {
            let name = reader.read_h_string()?;
            let size = reader.read_hno_struct::<u64>(b"DATA")?.unwrap_or(0);
            header.masters.push(Master { name, size });
        }

        if let Some(game) = reader.read_hno_struct::<GameData>(b"GMDT")? {
            header.current_cell = reader.decode_text(&game.current_cell);
            header.player_name = reader.decode_text(&game.player_name);
        }

        if reader.is_next_sub(b"SCRD")? {
            reader.skip_h_sub()?;
        }
        if reader.is_next_sub(b"SCRS")? {
            header.has_screenshot = true;
            reader.skip_h_sub()?;
        }

        let skipped = reader.skip_remaining_subs()?;
        if !skipped.is_empty() {
            debug!(offset, ?skipped, "unhandled header subrecords");
        }
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::{ChunkWriter, Encoding};

    fn fixed<const N: usize>(text: &str) -> [u8; N] {
        let mut out = [0u8; N];
        out[..text.len()].copy_from_slice(text.as_bytes());
        out
    }

    #[test]
    fn test_header_fields() {
        let mut hedr = Hedr::read_from_bytes(&[0u8; Hedr::SIZE]).unwrap();
        hedr.version = 1.3;
        hedr.description = fixed("Quicksave");
        let mut game = GameData::read_from_bytes(&[0u8; GameData::SIZE]).unwrap();
        game.current_cell = fixed("Balmora, Guild of Mages");
        game.player_name = fixed("Nerevar");

        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"TES3").unwrap();
        writer.write_hn_struct(b"HEDR", &hedr).unwrap();
        writer.write_hn_bytes(b"MAST", b"Morrowind.esm\0").unwrap();
        writer.write_hn_struct(b"DATA", &79837557u64).unwrap();
        writer.write_hn_struct(b"GMDT", &game).unwrap();
        writer.write_hn_bytes(b"SCRD", &[0; 20]).unwrap();
        writer.write_hn_bytes(b"SCRS", &[0; 16]).unwrap();
        writer.end_record(b"TES3").unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = ChunkReader::new(&data, Encoding::Win1252);
        let header = Header::load(&mut reader).unwrap();
        assert_eq!(header.description, "Quicksave");
        assert_eq!(
            header.masters,
            vec![Master {
                name: "Morrowind.esm".to_string(),
                size: 79837557
            }]
        );
        assert_eq!(header.current_cell, "Balmora, Guild of Mages");
        assert_eq!(header.player_name, "Nerevar");
        assert!(header.has_screenshot);
        assert!(!reader.has_more_recs());
    }

    #[test]
    fn test_wrong_magic() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"TES4").unwrap();
        writer.end_record(b"TES4").unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = ChunkReader::new(&data, Encoding::Win1252);
        let err = Header::load(&mut reader).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Common(morrowsave_common::Error::InvalidMagic { ref actual, .. }) if actual == b"TES4"
        ));
    }
}
