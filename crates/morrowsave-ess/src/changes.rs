//! Change records: per-instance state of NPCs (`NPCC`), creatures (`CREC`)
//! and containers (`CNTC`).
//!
//! Each one is keyed by the record `NAME` (the base id) and an instance
//! index, and is merged into the placed object with the same key.

use morrowsave_common::{ChunkReader, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::inventory::Inventory;
use crate::Result;

/// `NPDT` of an `NPCC` record.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct NpccData {
    pub disposition: u8,
    pub unknown: u8,
    pub reputation: u8,
    pub unknown2: u8,
    pub index: i32,
}

/// NPC changes.
#[derive(Debug, Clone)]
pub struct Npcc {
    pub npdt: NpccData,
    pub inventory: Inventory,
}

impl Npcc {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let npdt = reader.read_hn_struct(b"NPDT")?;
        skip_ai_packages(reader)?;
        let inventory = Inventory::load(reader)?;
        Ok(Npcc { npdt, inventory })
    }
}

/// Creature changes.
#[derive(Debug, Clone)]
pub struct Crec {
    pub index: i32,
    /// Same as the creature's `XSCL`, which cannot change in game.
    pub scale: Option<f32>,
    pub inventory: Inventory,
}

impl Crec {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let index = reader.read_hn_struct(b"INDX")?;
        let scale = reader.read_hno_struct(b"XSCL")?;
        skip_ai_packages(reader)?;
        let inventory = Inventory::load(reader)?;
        Ok(Crec {
            index,
            scale,
            inventory,
        })
    }
}

/// Container changes.
#[derive(Debug, Clone)]
pub struct Cntc {
    pub index: i32,
    pub inventory: Inventory,
}

impl Cntc {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let index = reader.read_hn_struct(b"INDX")?;
        let inventory = Inventory::load(reader)?;
        Ok(Cntc { index, inventory })
    }
}

// AI packages are regenerated by the engine.
fn skip_ai_packages(reader: &mut ChunkReader<'_>) -> Result<()> {
    while let Some(tag) = reader.peek_sub_name()? {
        if !matches!(tag.as_bytes(), b"AI_W" | b"AI_E" | b"AI_T" | b"AI_F" | b"AI_A" | b"CNDT") {
            break;
        }
        reader.next_sub_name()?;
        reader.skip_h_sub()?;
    }
    Ok(())
}
