//! `SCPT`: state of a global script.

use morrowsave_common::{ChunkReader, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::scri::ScriptLocals;
use crate::Result;

/// `SCHD`: script header as found in content files.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct ScriptHeader {
    pub name: [u8; 32],
    pub num_shorts: i32,
    pub num_longs: i32,
    pub num_floats: i32,
    pub script_data_size: i32,
    pub string_table_size: i32,
}

impl ScriptHeader {
    pub const SIZE: usize = 52;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scpt {
    pub name: String,
    pub locals: ScriptLocals,
    pub running: bool,
    /// Reference the script is targeted at, if any.
    pub target: Option<i32>,
}

impl Scpt {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let header: ScriptHeader = reader.read_hn_struct(b"SCHD")?;
        let name = reader.decode_text(&header.name);
        let locals = ScriptLocals::load(reader)?;
        let target = reader.read_hno_struct(b"RNAM")?;
        Ok(Scpt {
            name,
            locals,
            running: target.is_some(),
            target,
        })
    }
}
