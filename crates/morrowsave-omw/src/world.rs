//! World-level records: weather, global map, markers, stolen items, quests,
//! global scripts and kill counts.

use std::collections::BTreeMap;
use std::io::Write;

use morrowsave_common::ChunkWriter;

use crate::cellid::CellId;
use crate::locals::Locals;
use crate::Result;

/// `WTHR`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherState {
    pub current_region: String,
    pub current_weather: String,
    pub next_weather: String,
    pub time_passed: f32,
    /// Game seconds left in the current transition.
    pub remaining_transition_time: f32,
    pub hour: f32,
    pub wind_speed: f32,
    pub fast_forward: bool,
    pub masser_phase: i32,
    pub secunda_phase: i32,
}

impl WeatherState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.write_hn_string(b"CREG", &self.current_region)?;
        writer.write_hn_string(b"CWTH", &self.current_weather)?;
        writer.write_hn_string(b"NWTH", &self.next_weather)?;
        writer.write_hn_f32(b"RTTM", self.remaining_transition_time)?;
        writer.write_hn_f32(b"HOUR", self.hour)?;
        writer.write_hn_f32(b"WNDS", self.wind_speed)?;
        writer.write_hn_f64(b"TMPS", f64::from(self.time_passed))?;
        writer.write_hn_bool(b"FIRS", self.fast_forward)?;
        writer.write_hn_i32(b"MPHS", self.masser_phase)?;
        writer.write_hn_i32(b"SPHS", self.secunda_phase)?;
        Ok(())
    }
}

/// Cell grid extents covered by the global map image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

/// `GMAP`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalMap {
    pub bounds: Bounds,
    /// Raw image data.
    pub image: Vec<u8>,
    pub marked_cells: Vec<(i32, i32)>,
}

impl GlobalMap {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        let b = self.bounds;
        writer.start_sub(b"BNDS")?;
        for v in [b.min_x, b.max_x, b.min_y, b.max_y] {
            writer.write_i32(v)?;
        }
        writer.end_sub()?;

        writer.write_hn_bytes(b"DATA", &self.image)?;

        for &(x, y) in &self.marked_cells {
            writer.start_sub(b"MRK_")?;
            writer.write_i32(x)?;
            writer.write_i32(y)?;
            writer.end_sub()?;
        }
        Ok(())
    }
}

/// `MARK`: a note on the local map.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomMarker {
    pub world_x: f32,
    pub world_y: f32,
    pub cell: CellId,
    pub note: String,
}

impl CustomMarker {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.write_hn_f32(b"POSX", self.world_x)?;
        writer.write_hn_f32(b"POSY", self.world_y)?;
        self.cell.save(writer)?;
        if !self.note.is_empty() {
            writer.write_hn_string(b"NOTE", &self.note)?;
        }
        Ok(())
    }
}

/// Owner of a stolen item and whether it is a faction.
pub type StolenOwner = (String, bool);

/// `STLN`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StolenItems {
    /// Item id to owners and the count taken from each.
    pub items: BTreeMap<String, BTreeMap<StolenOwner, i32>>,
}

impl StolenItems {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        for (item, owners) in &self.items {
            writer.write_hn_string(b"NAME", item)?;
            for ((owner, is_faction), count) in owners {
                let tag = if *is_faction { b"FNAM" } else { b"ONAM" };
                writer.write_hn_string(tag, owner)?;
                writer.write_hn_i32(b"COUN", *count)?;
            }
        }
        Ok(())
    }
}

/// `QUES`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestState {
    pub topic: String,
    pub state: i32,
    pub finished: bool,
}

impl QuestState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.write_hn_string(b"YETO", &self.topic)?;
        writer.write_hn_i32(b"QSTA", self.state)?;
        writer.write_hn_bool(b"QFIN", self.finished)?;
        Ok(())
    }
}

/// `GSCR`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalScript {
    pub id: String,
    pub locals: Locals,
    pub running: bool,
}

impl GlobalScript {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.write_hn_string(b"NAME", &self.id)?;
        self.locals.save(writer)?;
        if self.running {
            writer.write_hn_i32(b"RUN_", 1)?;
        }
        Ok(())
    }
}

/// `DCOU`: deaths per actor id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeathCounter {
    pub deaths: BTreeMap<String, i32>,
}

impl DeathCounter {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        for (id, count) in &self.deaths {
            writer.write_hn_string(b"ID__", id)?;
            writer.write_hn_i32(b"COUN", *count)?;
        }
        Ok(())
    }
}
