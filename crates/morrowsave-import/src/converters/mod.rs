//! Per-record-kind converters.
//!
//! Each legacy record kind the importer understands has one converter.
//! A converter folds every record of its kind into either its own buffer
//! or the shared [`Context`] while the input is read, then writes its
//! target records once the whole input is known. Converters are grouped
//! into [`Stage`]s that fix the order of the write pass.

pub mod cell;
pub mod map;
pub mod proj;
pub mod records;

use std::io::Write;

use morrowsave_common::{ChunkReader, ChunkWriter, Tag};
use morrowsave_ess::{Cell, Fmap, Proj};

pub use cell::Cells;
pub use map::WorldMap;
pub use proj::Projectiles;
pub use records::{
    weather_name, Dialogues, Game, Kills, PlayerData, PlayerReference, Scripts, Stolen, Templates,
};

use crate::context::Context;
use crate::Result;

/// Write pass a converter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Content records the target expects before any state refers to them.
    Templates,
    /// Cells, player side records and world state.
    World,
    /// Records that refer to actor ids handed out while writing cells.
    Late,
}

#[derive(Debug)]
pub enum Converter {
    Templates(Templates),
    Npc,
    Creature,
    NpcChanges,
    CreatureChanges,
    ContainerChanges,
    Faction,
    ActiveSpells,
    Dropped,
    PlayerReference(PlayerReference),
    PlayerData(PlayerData),
    Map(WorldMap),
    Cells(Cells),
    Kills(Kills),
    Stolen(Stolen),
    Game(Game),
    Dialogues(Dialogues),
    Scripts(Scripts),
    Projectiles(Projectiles),
}

impl Converter {
    /// Converter for a legacy record kind, `None` for kinds that are skipped.
    pub fn for_tag(tag: Tag) -> Option<Self> {
        let converter = match tag.as_bytes() {
            b"GLOB" | b"BOOK" | b"CLAS" | b"ALCH" | b"SPEL" | b"ARMO" | b"WEAP" | b"CLOT"
            | b"ENCH" | b"LEVC" | b"LEVI" => Converter::Templates(Templates::default()),
            b"NPC_" => Converter::Npc,
            b"CREA" => Converter::Creature,
            b"NPCC" => Converter::NpcChanges,
            b"CREC" => Converter::CreatureChanges,
            b"CNTC" => Converter::ContainerChanges,
            b"FACT" => Converter::Faction,
            b"SPLM" => Converter::ActiveSpells,
            b"INFO" | b"QUES" | b"JOUR" => Converter::Dropped,
            b"REFR" => Converter::PlayerReference(PlayerReference::default()),
            b"PCDT" => Converter::PlayerData(PlayerData::default()),
            b"FMAP" => Converter::Map(WorldMap::default()),
            b"CELL" => Converter::Cells(Cells::default()),
            b"KLST" => Converter::Kills(Kills::default()),
            b"STLN" => Converter::Stolen(Stolen::default()),
            b"GAME" => Converter::Game(Game::default()),
            b"DIAL" => Converter::Dialogues(Dialogues::default()),
            b"SCPT" => Converter::Scripts(Scripts::default()),
            b"PROJ" => Converter::Projectiles(Projectiles::default()),
            _ => return None,
        };
        Some(converter)
    }

    pub fn stage(&self) -> Stage {
        match self {
            Converter::Templates(_) => Stage::Templates,
            Converter::Projectiles(_) => Stage::Late,
            _ => Stage::World,
        }
    }

    /// Decode one record whose header was just read.
    ///
    /// Leaves the reader inside the record; the caller skips whatever
    /// subrecords the decoder did not consume.
    pub fn read(&mut self, reader: &mut ChunkReader<'_>, flags: u32, ctx: &mut Context) -> Result<()> {
        match self {
            Converter::Templates(templates) => templates.read(reader, flags, ctx),
            Converter::Npc => records::read_npc(reader, flags, ctx),
            Converter::Creature => records::read_creature(reader, flags, ctx),
            Converter::NpcChanges => records::read_npc_changes(reader, ctx),
            Converter::CreatureChanges => records::read_creature_changes(reader, ctx),
            Converter::ContainerChanges => records::read_container_changes(reader, ctx),
            Converter::Faction => records::read_faction(reader, flags, ctx),
            Converter::ActiveSpells => records::read_active_spells(reader, ctx),
            Converter::Dropped => records::read_dropped(reader),
            Converter::PlayerReference(refr) => refr.read(reader, ctx),
            Converter::PlayerData(pcdt) => pcdt.read(reader, ctx),
            Converter::Map(map) => {
                map.read(Fmap::load(reader)?);
                Ok(())
            }
            Converter::Cells(cells) => {
                cells.read(Cell::load(reader)?, ctx);
                Ok(())
            }
            Converter::Kills(kills) => kills.read(reader, ctx),
            Converter::Stolen(stolen) => stolen.read(reader),
            Converter::Game(game) => game.read(reader),
            Converter::Dialogues(dialogues) => dialogues.read(reader),
            Converter::Scripts(scripts) => scripts.read(reader),
            Converter::Projectiles(projectiles) => {
                projectiles.read(Proj::load(reader)?);
                Ok(())
            }
        }
    }

    /// Write the target records for everything read.
    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>, ctx: &mut Context) -> Result<()> {
        match self {
            Converter::Templates(templates) => templates.write(writer),
            Converter::PlayerReference(refr) => refr.write(writer, ctx),
            Converter::PlayerData(pcdt) => pcdt.write(writer),
            Converter::Map(map) => map.write(writer, ctx),
            Converter::Cells(cells) => cells.write(writer, ctx),
            Converter::Kills(kills) => kills.write(writer),
            Converter::Stolen(stolen) => stolen.write(writer),
            Converter::Game(game) => game.write(writer, ctx),
            Converter::Dialogues(dialogues) => dialogues.write(writer),
            Converter::Scripts(scripts) => scripts.write(writer),
            Converter::Projectiles(projectiles) => projectiles.write(writer, ctx),
            // Folded into the context or dropped.
            Converter::Npc
            | Converter::Creature
            | Converter::NpcChanges
            | Converter::CreatureChanges
            | Converter::ContainerChanges
            | Converter::Faction
            | Converter::ActiveSpells
            | Converter::Dropped => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages() {
        let stage = |tag: &[u8; 4]| Converter::for_tag(Tag::new(tag)).map(|c| c.stage());
        assert_eq!(stage(b"GLOB"), Some(Stage::Templates));
        assert_eq!(stage(b"LEVI"), Some(Stage::Templates));
        assert_eq!(stage(b"CELL"), Some(Stage::World));
        assert_eq!(stage(b"NPCC"), Some(Stage::World));
        assert_eq!(stage(b"PROJ"), Some(Stage::Late));
        assert_eq!(stage(b"XYZW"), None);
        assert!(Stage::Templates < Stage::World && Stage::World < Stage::Late);
    }
}
