//! Actor statistics.

use std::collections::BTreeMap;
use std::io::Write;

use morrowsave_common::ChunkWriter;

use crate::Result;

/// A value type a [`StatState`] can hold.
pub trait StatValue: Copy + Default + PartialEq {
    fn write<W: Write>(self, writer: &mut ChunkWriter<W>, tag: &[u8; 4]) -> morrowsave_common::Result<()>;
}

impl StatValue for i32 {
    fn write<W: Write>(self, writer: &mut ChunkWriter<W>, tag: &[u8; 4]) -> morrowsave_common::Result<()> {
        writer.write_hn_i32(tag, self)
    }
}

impl StatValue for f32 {
    fn write<W: Write>(self, writer: &mut ChunkWriter<W>, tag: &[u8; 4]) -> morrowsave_common::Result<()> {
        writer.write_hn_f32(tag, self)
    }
}

/// Base, modified and current value of one statistic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatState<T> {
    pub base: T,
    pub modified: T,
    pub current: T,
    /// Skill progress, only used by skills.
    pub progress: f32,
}

impl<T: StatValue> StatState<T> {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        self.base.write(writer, b"STAV")?;
        self.modified.write(writer, b"STAM")?;
        self.current.write(writer, b"STAC")?;
        if self.progress != 0.0 {
            writer.write_hn_f32(b"STAP", self.progress)?;
        }
        Ok(())
    }
}

/// Weapon or spell readiness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(i32)]
pub enum DrawState {
    #[default]
    Nothing = 0,
    Weapon = 1,
    Spell = 2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatureStats {
    pub attributes: [StatState<i32>; 8],
    /// Health, magicka, fatigue.
    pub dynamic: [StatState<f32>; 3],
    pub gold_pool: i32,
    pub dead: bool,
    pub talked_to: bool,
    pub attacked: bool,
    pub level: i32,
    pub actor_id: i32,
    pub draw_state: DrawState,
    /// Set when the source had no stats block; the engine then computes
    /// stats from the template.
    pub missing_acdt: bool,
    pub spells: Vec<String>,
}

impl Default for CreatureStats {
    fn default() -> Self {
        Self {
            attributes: [StatState::default(); 8],
            dynamic: [StatState::default(); 3],
            gold_pool: 0,
            dead: false,
            talked_to: false,
            attacked: false,
            level: 1,
            actor_id: -1,
            draw_state: DrawState::Nothing,
            missing_acdt: false,
            spells: Vec::new(),
        }
    }
}

impl CreatureStats {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        for attribute in &self.attributes {
            attribute.save(writer)?;
        }
        for dynamic in &self.dynamic {
            dynamic.save(writer)?;
        }

        if self.gold_pool != 0 {
            writer.write_hn_i32(b"GOLD", self.gold_pool)?;
        }
        if self.dead {
            writer.write_hn_bool(b"DEAD", true)?;
        }
        if self.talked_to {
            writer.write_hn_bool(b"TALK", true)?;
        }
        if self.attacked {
            writer.write_hn_bool(b"ATKD", true)?;
        }
        writer.write_hn_i32(b"LEVL", self.level)?;
        writer.write_hn_i32(b"ACID", self.actor_id)?;
        if self.draw_state != DrawState::Nothing {
            writer.write_hn_i32(b"DRAW", self.draw_state as i32)?;
        }
        if self.missing_acdt {
            writer.write_hn_bool(b"NOAC", true)?;
        }
        for spell in &self.spells {
            writer.write_hn_string(b"SPEL", spell)?;
        }
        Ok(())
    }
}

/// Membership in one faction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactionEntry {
    pub expelled: bool,
    pub rank: i32,
    pub reputation: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NpcStats {
    /// Keyed by lowercase faction id.
    pub factions: BTreeMap<String, FactionEntry>,
    pub disposition: i32,
    pub reputation: i32,
    pub skills: [StatState<i32>; 27],
    pub bounty: i32,
    pub werewolf_kills: i32,
    pub level_progress: i32,
    pub skill_increase: [i32; 8],
    pub spec_increase: [i32; 3],
    /// Lowercase ids of books that taught a skill.
    pub used_ids: Vec<String>,
    pub time_to_start_drowning: f32,
}

impl Default for NpcStats {
    fn default() -> Self {
        Self {
            factions: BTreeMap::new(),
            disposition: 0,
            reputation: 0,
            skills: [StatState::default(); 27],
            bounty: 0,
            werewolf_kills: 0,
            level_progress: 0,
            skill_increase: [0; 8],
            spec_increase: [0; 3],
            used_ids: Vec::new(),
            time_to_start_drowning: 20.0,
        }
    }
}

impl NpcStats {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        for (id, faction) in &self.factions {
            writer.write_hn_string(b"FACT", id)?;
            if faction.expelled {
                writer.write_hn_bool(b"FAEX", true)?;
            }
            if faction.rank >= 0 {
                writer.write_hn_i32(b"FARA", faction.rank)?;
            }
            if faction.reputation != 0 {
                writer.write_hn_i32(b"FARE", faction.reputation)?;
            }
        }

        if self.disposition != 0 {
            writer.write_hn_i32(b"DISP", self.disposition)?;
        }
        if self.reputation != 0 {
            writer.write_hn_i32(b"REPU", self.reputation)?;
        }
        for skill in &self.skills {
            skill.save(writer)?;
        }
        if self.bounty != 0 {
            writer.write_hn_i32(b"BOUN", self.bounty)?;
        }
        if self.werewolf_kills != 0 {
            writer.write_hn_i32(b"WKIL", self.werewolf_kills)?;
        }
        if self.level_progress != 0 {
            writer.write_hn_i32(b"LPRO", self.level_progress)?;
        }
        for increase in self.skill_increase {
            writer.write_hn_i32(b"INCR", increase)?;
        }
        for increase in self.spec_increase {
            writer.write_hn_i32(b"SPEC", increase)?;
        }
        for id in &self.used_ids {
            writer.write_hn_string(b"USED", id)?;
        }
        writer.write_hn_f32(b"DRTI", self.time_to_start_drowning)?;
        Ok(())
    }
}
