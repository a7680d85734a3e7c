//! Placed object references inside a `CELL` record.

use morrowsave_common::{ChunkReader, Position};
use tracing::debug;

use crate::actor::ActorData;
use crate::Result;

/// Reference number of a placed object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefNum {
    pub index: u32,
    /// Index of the content file, `-1` for objects created in game.
    pub content_file: i32,
}

impl RefNum {
    /// Split a legacy `FRMR` value whose top byte is the one-based plugin
    /// index.
    pub fn from_legacy(value: u32) -> Self {
        let plugin_index = (value >> 24) as i32;
        Self {
            index: value & 0x00ff_ffff,
            content_file: plugin_index - 1,
        }
    }
}

/// Optional reference properties shared by placed objects and items.
///
/// Read in a loop that stops at the first tag it does not know.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellRefData {
    pub blocked: Option<i8>,
    pub scale: Option<f32>,
    pub owner: Option<String>,
    pub global_variable: Option<String>,
    pub soul: Option<String>,
    pub faction: Option<String>,
    pub faction_rank: Option<i32>,
    pub enchantment_charge: Option<f32>,
    pub charge: Option<i32>,
    pub gold_value: Option<i32>,
    pub door_dest: Option<Position>,
    pub dest_cell: Option<String>,
    pub lock_level: Option<i32>,
    pub key: Option<String>,
    pub trap: Option<String>,
    pub position: Option<Position>,
}

impl CellRefData {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let mut data = CellRefData::default();
        while reader.has_more_subs() {
            let tag = reader.next_sub_name()?;
            match tag.as_bytes() {
                b"UNAM" => data.blocked = Some(reader.read_h_struct()?),
                b"XSCL" => data.scale = Some(reader.read_h_struct()?),
                b"ANAM" => data.owner = Some(reader.read_h_string()?),
                b"BNAM" => data.global_variable = Some(reader.read_h_string()?),
                b"XSOL" => data.soul = Some(reader.read_h_string()?),
                b"CNAM" => data.faction = Some(reader.read_h_string()?),
                b"INDX" => data.faction_rank = Some(reader.read_h_struct()?),
                b"XCHG" => data.enchantment_charge = Some(reader.read_h_struct()?),
                b"INTV" => data.charge = Some(reader.read_h_struct()?),
                b"NAM9" => data.gold_value = Some(reader.read_h_struct()?),
                b"DODT" => data.door_dest = Some(reader.read_h_struct()?),
                b"DNAM" => data.dest_cell = Some(reader.read_h_string()?),
                b"FLTV" => data.lock_level = Some(reader.read_h_struct()?),
                b"KNAM" => data.key = Some(reader.read_h_string()?),
                b"TNAM" => data.trap = Some(reader.read_h_string()?),
                b"DATA" => data.position = Some(reader.read_h_struct()?),
                _ => {
                    reader.cache_sub_name();
                    break;
                }
            }
        }
        Ok(data)
    }
}

/// One placed object: a `FRMR` subrecord and everything up to the next one.
#[derive(Debug, Clone, Default)]
pub struct CellRef {
    pub ref_num: RefNum,
    /// Base id, with an eight digit hex instance index appended for
    /// objects that have change records.
    pub indexed_ref_id: String,
    pub actor_data: ActorData,
    pub enabled: bool,
    pub position: Position,
    pub deleted: bool,
}

impl CellRef {
    /// Read a placed object whose `FRMR` tag was just consumed.
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let frmr: u32 = reader.read_h_struct()?;
        let indexed_ref_id = reader.read_hn_string(b"NAME")?;
        let actor_data = ActorData::load(reader)?;

        if reader.is_next_sub(b"LVCR")? {
            // levelled creature spawners only
            reader.skip_h_sub()?;
        }

        let enabled = reader.read_hno_struct::<u8>(b"ZNAM")?.map_or(true, |z| z != 0);

        // DATA is missing on levelled spawners and sometimes doubled
        let mut position = actor_data.refdata.position.unwrap_or_default();
        while let Some(pos) = reader.read_hno_struct::<Position>(b"DATA")? {
            position = pos;
        }

        let mut deleted = false;
        if let Some(dele) = reader.read_hno_struct::<u32>(b"DELE")? {
            // only the top byte is initialized
            deleted = ((dele >> 24) & 0x2) != 0;
        }

        if reader.is_next_sub(b"MVRF")? {
            reader.skip_h_sub()?;
            reader.expect_sub(b"CNDT")?;
            reader.skip_h_sub()?;
        }

        let cellref = CellRef {
            ref_num: RefNum::from_legacy(frmr),
            indexed_ref_id,
            actor_data,
            enabled,
            position,
            deleted,
        };
        cellref.skip_trailing(reader)?;
        Ok(cellref)
    }

    fn skip_trailing(&self, reader: &mut ChunkReader<'_>) -> Result<()> {
        while let Some(tag) = reader.peek_sub_name()? {
            if tag == b"FRMR" || tag == b"NAM8" || tag == b"MPCD" {
                break;
            }
            reader.next_sub_name()?;
            reader.skip_h_sub()?;
            debug!(id = %self.indexed_ref_id, %tag, "skipped unknown reference subrecord");
        }
        Ok(())
    }
}
