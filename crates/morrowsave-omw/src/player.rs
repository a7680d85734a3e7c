//! `PLAY`: the player.

use std::io::Write;

use morrowsave_common::{ChunkWriter, Position};

use crate::cellid::CellId;
use crate::state::NpcState;
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub object: NpcState,
    pub cell_id: CellId,
    pub last_known_exterior_position: [f32; 3],
    pub mark: Option<(Position, CellId)>,
    pub birthsign: String,
    pub current_crime_id: i32,
    pub paid_crime_id: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            object: NpcState::default(),
            cell_id: CellId::default(),
            last_known_exterior_position: [0.0; 3],
            mark: None,
            birthsign: String::new(),
            current_crime_id: -1,
            paid_crime_id: -1,
        }
    }
}

impl Player {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        self.object.save(writer)?;
        self.cell_id.save(writer)?;

        writer.write_hn_struct(b"LKEP", &self.last_known_exterior_position)?;

        if let Some((position, cell)) = &self.mark {
            writer.write_hn_struct(b"MARK", position)?;
            cell.save(writer)?;
        }

        writer.write_hn_string(b"SIGN", &self.birthsign)?;
        writer.write_hn_i32(b"CURD", self.current_crime_id)?;
        writer.write_hn_i32(b"PAYD", self.paid_crime_id)?;
        Ok(())
    }
}
