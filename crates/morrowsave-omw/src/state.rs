//! Object states with custom data: NPCs, creatures and containers.

use std::io::Write;

use morrowsave_common::ChunkWriter;

use crate::inventory::InventoryState;
use crate::object::ObjectState;
use crate::stats::{CreatureStats, NpcStats};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NpcState {
    pub object: ObjectState,
    pub inventory: InventoryState,
    pub npc_stats: NpcStats,
    pub creature_stats: CreatureStats,
}

impl NpcState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        self.object.save(writer, false)?;
        self.inventory.save(writer)?;
        self.npc_stats.save(writer)?;
        self.creature_stats.save(writer)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatureState {
    pub object: ObjectState,
    pub inventory: InventoryState,
    pub creature_stats: CreatureStats,
}

impl CreatureState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        self.object.save(writer, false)?;
        self.inventory.save(writer)?;
        self.creature_stats.save(writer)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerState {
    pub object: ObjectState,
    pub inventory: InventoryState,
}

impl ContainerState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        self.object.save(writer, false)?;
        self.inventory.save(writer)
    }
}
