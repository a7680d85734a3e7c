//! `REFR`: the player placement.

use morrowsave_common::{ChunkReader, Position};

use crate::actor::ActorData;
use crate::cellref::RefNum;
use crate::Result;

/// Indexed ref id the legacy format uses for the player.
pub const PLAYER_REF_ID: &str = "PlayerSaveGame";

#[derive(Debug, Clone)]
pub struct Refr {
    pub ref_num: RefNum,
    pub ref_id: String,
    pub actor_data: ActorData,
    pub position: Position,
}

impl Refr {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let frmr: u32 = reader.read_hn_struct(b"FRMR")?;
        let ref_id = reader.read_hn_string(b"NAME")?;
        let actor_data = ActorData::load(reader)?;

        let mut position = actor_data.refdata.position.unwrap_or_default();
        while let Some(pos) = reader.read_hno_struct::<Position>(b"DATA")? {
            position = pos;
        }

        Ok(Refr {
            ref_num: RefNum::from_legacy(frmr),
            ref_id,
            actor_data,
            position,
        })
    }

    pub fn is_player(&self) -> bool {
        self.ref_id == PLAYER_REF_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::{ChunkWriter, Encoding};

    #[test]
    fn test_player_placement() {
        let pos = Position {
            pos: [-9000.0, 17000.0, 120.0],
            rot: [0.0, 0.0, 3.0],
        };
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"REFR").unwrap();
        writer.write_hn_u32(b"FRMR", 0x0000_0001).unwrap();
        writer.write_hn_string(b"NAME", "PlayerSaveGame").unwrap();
        writer.write_hn_string(b"WNAM", "fireball").unwrap();
        writer.write_hn_struct(b"DATA", &pos).unwrap();
        writer.end_record(b"REFR").unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = ChunkReader::new(&data, Encoding::Win1252);
        reader.next_record_name().unwrap();
        reader.record_header().unwrap();
        let refr = Refr::load(&mut reader).unwrap();
        assert!(refr.is_player());
        assert_eq!(refr.position, pos);
        assert_eq!(refr.actor_data.selected_spell, "fireball");
        assert!(!reader.has_more_subs());
    }
}
