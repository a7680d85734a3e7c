//! The `TES3` file header and the `SAVE` profile record.

use std::io::Write;

use morrowsave_common::{ChunkWriter, Immutable, IntoBytes};

use crate::Result;

/// Save format version written into `FORM`.
pub const FORMAT_VERSION: i32 = 21;

/// `HEDR` version field.
pub const HEADER_VERSION: f32 = 1.3;

/// `HEDR` body.
#[derive(Debug, Clone, Copy, IntoBytes, Immutable)]
#[repr(C)]
struct Hedr {
    version: f32,
    file_type: i32,
    author: [u8; 32],
    description: [u8; 256],
    records: i32,
}

/// File header of a saved game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileHeader {
    pub format: i32,
    pub author: String,
    pub description: String,
    /// Content file names. Sizes are not known to the importer.
    pub masters: Vec<String>,
}

impl FileHeader {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.write_hn_i32(b"FORM", self.format)?;

        let mut hedr = Hedr {
            version: HEADER_VERSION,
            file_type: 0,
            author: [0; 32],
            description: [0; 256],
            records: 0,
        };
        copy_truncated(&mut hedr.author, &self.author);
        copy_truncated(&mut hedr.description, &self.description);
        writer.write_hn_struct(b"HEDR", &hedr)?;

        for master in &self.masters {
            writer.write_hn_string(b"MAST", master)?;
            writer.start_sub(b"DATA")?;
            writer.write_u64(0)?;
            writer.end_sub()?;
        }
        Ok(())
    }
}

fn copy_truncated(dest: &mut [u8], value: &str) {
    let len = value.len().min(dest.len());
    dest[..len].copy_from_slice(&value.as_bytes()[..len]);
}

/// `TSTM`: in-game time.
#[derive(Debug, Clone, Copy, Default, PartialEq, IntoBytes, Immutable)]
#[repr(C)]
pub struct TimeStamp {
    pub hour: f32,
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

/// Class of the player: a content class or a custom one made in chargen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerClass {
    Id(String),
    Custom(String),
}

impl Default for PlayerClass {
    fn default() -> Self {
        PlayerClass::Id(String::new())
    }
}

/// `SAVE`: summary shown in the load menu.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedGame {
    pub content_files: Vec<String>,
    pub player_cell: String,
    pub player_name: String,
    pub player_level: i32,
    pub player_class: PlayerClass,
    pub in_game_time: TimeStamp,
    /// Seconds of real time played.
    pub time_played: f64,
    pub description: String,
}

impl SavedGame {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        for file in &self.content_files {
            writer.write_hn_string(b"DEPE", file)?;
        }
        writer.write_hn_string(b"PLCE", &self.player_cell)?;
        writer.write_hn_string(b"PLNA", &self.player_name)?;
        writer.write_hn_i32(b"PLLE", self.player_level)?;
        match &self.player_class {
            PlayerClass::Id(id) => writer.write_hn_string(b"PLCL", id)?,
            PlayerClass::Custom(name) => writer.write_hn_string(b"PLCN", name)?,
        }
        writer.write_hn_struct(b"TSTM", &self.in_game_time)?;
        writer.write_hn_f64(b"TIME", self.time_played)?;
        writer.write_hn_string(b"DESC", &self.description)?;
        Ok(())
    }
}
