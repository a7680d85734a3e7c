//! `CSTA`: per-cell state and the objects placed in it.

use std::io::Write;

use morrowsave_common::{ChunkWriter, Tag};

use crate::cellid::CellId;
use crate::object::ObjectState;
use crate::state::{ContainerState, CreatureState, NpcState};
use crate::Result;

/// A placed object, by the kind of state it carries.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacedObject {
    Generic(ObjectState),
    Npc(NpcState),
    Container(ContainerState),
    Creature(CreatureState),
}

impl PlacedObject {
    /// `OBJE` value: `0` for generic objects, the base record tag otherwise.
    pub fn type_code(&self) -> i32 {
        match self {
            PlacedObject::Generic(_) => 0,
            PlacedObject::Npc(_) => Tag::new(b"NPC_").to_u32() as i32,
            PlacedObject::Container(_) => Tag::new(b"CONT").to_u32() as i32,
            PlacedObject::Creature(_) => Tag::new(b"CREA").to_u32() as i32,
        }
    }

    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.write_hn_i32(b"OBJE", self.type_code())?;
        match self {
            PlacedObject::Generic(state) => state.save(writer, false),
            PlacedObject::Npc(state) => state.save(writer),
            PlacedObject::Container(state) => state.save(writer),
            PlacedObject::Creature(state) => state.save(writer),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellState {
    pub id: CellId,
    pub water_level: f32,
    /// Explored texels, one RGBA value each.
    pub fog_of_war: Option<Vec<u32>>,
    pub objects: Vec<PlacedObject>,
}

impl CellState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        self.id.save(writer)?;
        if !self.id.is_exterior() {
            writer.write_hn_f32(b"WLVL", self.water_level)?;
        }

        let has_fog = self.fog_of_war.is_some();
        writer.write_hn_i32(b"HFOW", i32::from(has_fog))?;
        if let Some(texels) = &self.fog_of_war {
            writer.start_sub(b"FOGT")?;
            for &texel in texels {
                writer.write_u32(texel)?;
            }
            writer.end_sub()?;
        }

        for object in &self.objects {
            object.save(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes() {
        assert_eq!(PlacedObject::Generic(ObjectState::blank()).type_code(), 0);
        assert_eq!(
            PlacedObject::Creature(CreatureState::default()).type_code(),
            i32::from_le_bytes(*b"CREA")
        );
    }
}
