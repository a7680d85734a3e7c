//! `CELL`: a visited cell, its placed objects, fog of war and map notes.

use morrowsave_common::ChunkReader;
use tracing::debug;

use crate::cellref::CellRef;
use crate::Result;

/// Fog of war bitmap edge in pixels.
pub const FOG_SIZE: usize = 16;

/// Pixel value of an explored fog texel.
pub const FOG_EXPLORED: u32 = 0xffff_ffff;
/// Pixel value of an unexplored fog texel.
pub const FOG_UNEXPLORED: u32 = 0x0000_00ff;

/// Flag bits of the cell `DATA` subrecord.
pub mod flags {
    pub const INTERIOR: u32 = 0x01;
    /// Set by the engine on exterior cells the player has seen.
    pub const VISITED: u32 = 0x20;
}

/// `MPCD` + `MPNT`: a note the player put on the local map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapNote {
    pub position: [f32; 3],
    pub note: String,
}

#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub name: String,
    pub flags: u32,
    pub grid_x: i32,
    pub grid_y: i32,
    pub water_level: Option<f32>,
    pub region: Option<String>,
    /// RGBA texels, row by row. Empty when the cell had no `NAM8`.
    pub fog_of_war: Vec<u32>,
    pub refs: Vec<CellRef>,
    pub notes: Vec<MapNote>,
}

impl Cell {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let mut cell = Cell {
            name: reader.read_hn_string(b"NAME")?,
            ..Default::default()
        };

        reader.expect_sub(b"DATA")?;
        reader.sub_header()?;
        cell.flags = reader.read_u32()?;
        cell.grid_x = reader.read_i32()?;
        cell.grid_y = reader.read_i32()?;
        reader.skip_sub_body()?;

        cell.load_header_subs(reader)?;

        while reader.has_more_subs() {
            let tag = reader.next_sub_name()?;
            match tag.as_bytes() {
                b"NAM8" => {
                    let bytes = reader.read_h_bytes()?;
                    cell.fog_of_war = expand_fog(bytes);
                }
                b"MVRF" => {
                    reader.skip_h_sub()?;
                    reader.expect_sub(b"CNDT")?;
                    reader.skip_h_sub()?;
                }
                b"FRMR" => cell.refs.push(CellRef::load(reader)?),
                b"MPCD" => {
                    let position = reader.read_h_struct()?;
                    let note = reader.read_hn_string(b"MPNT")?;
                    cell.notes.push(MapNote { position, note });
                }
                _ => {
                    reader.skip_h_sub()?;
                    debug!(cell = %cell.name, %tag, "skipped unknown cell subrecord");
                }
            }
        }

        Ok(cell)
    }

    fn load_header_subs(&mut self, reader: &mut ChunkReader<'_>) -> Result<()> {
        while let Some(tag) = reader.peek_sub_name()? {
            match tag.as_bytes() {
                b"INTV" => {
                    reader.next_sub_name()?;
                    // old saves store the water level as an integer
                    self.water_level = Some(reader.read_h_struct::<i32>()? as f32);
                }
                b"WHGT" => {
                    reader.next_sub_name()?;
                    self.water_level = Some(reader.read_h_struct()?);
                }
                b"RGNN" => {
                    reader.next_sub_name()?;
                    self.region = Some(reader.read_h_string()?);
                }
                b"AMBI" | b"NAM5" | b"NAM0" => {
                    reader.next_sub_name()?;
                    reader.skip_h_sub()?;
                }
                _ => break,
            }
        }
        Ok(())
    }

    pub fn is_interior(&self) -> bool {
        self.flags & flags::INTERIOR != 0
    }

    /// Whether an exterior cell belongs on the global map.
    pub fn is_explored(&self) -> bool {
        !self.is_interior() && (self.flags & flags::VISITED != 0 || !self.fog_of_war.is_empty())
    }
}

/// Expand a 1-bit fog bitmap to one texel per bit.
///
/// Interior cells prefix the bitmap with four unknown bytes.
fn expand_fog(bytes: &[u8]) -> Vec<u32> {
    let bits = if bytes.len() == 36 { &bytes[4..] } else { bytes };
    let mut texels = vec![FOG_UNEXPLORED; FOG_SIZE * FOG_SIZE];
    for x in 0..FOG_SIZE {
        for y in 0..FOG_SIZE {
            let pos = x * FOG_SIZE + y;
            let explored = bits
                .get(pos / 8)
                .is_some_and(|byte| byte & (1 << (pos % 8)) != 0);
            if explored {
                texels[pos] = FOG_EXPLORED;
            }
        }
    }
    texels
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::{ChunkWriter, Encoding, Position};

    fn cell_data(writer: &mut ChunkWriter<Vec<u8>>, flags: u32, x: i32, y: i32) {
        writer.start_sub(b"DATA").unwrap();
        writer.write_u32(flags).unwrap();
        writer.write_i32(x).unwrap();
        writer.write_i32(y).unwrap();
        writer.end_sub().unwrap();
    }

    fn load(data: &[u8]) -> Cell {
        let mut reader = ChunkReader::new(data, Encoding::Win1252);
        reader.next_record_name().unwrap();
        reader.record_header().unwrap();
        let cell = Cell::load(&mut reader).unwrap();
        assert!(!reader.has_more_subs());
        cell
    }

    #[test]
    fn test_exterior_cell_with_refs_and_fog() {
        let mut fog = [0u8; 32];
        fog[0] = 0b0000_0101;
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"CELL").unwrap();
        writer.write_hn_string(b"NAME", "").unwrap();
        cell_data(&mut writer, 0, -2, 5);
        writer.write_hn_string(b"RGNN", "Bitter Coast Region").unwrap();
        writer.write_hn_bytes(b"NAM8", &fog).unwrap();
        writer.write_hn_u32(b"FRMR", 0x0100_0001).unwrap();
        writer.write_hn_string(b"NAME", "rat_0100000001").unwrap();
        writer.write_hn_struct(b"DATA", &Position::default()).unwrap();
        writer.write_hn_u32(b"FRMR", 0x0000_0002).unwrap();
        writer.write_hn_string(b"NAME", "flora_kelp_01").unwrap();
        writer.write_hn_bytes(b"ND3D", &[0]).unwrap();
        writer.write_hn_struct(b"MPCD", &[1.0f32, 2.0, 3.0]).unwrap();
        writer.write_hn_string(b"MPNT", "hidden cave").unwrap();
        writer.end_record(b"CELL").unwrap();
        let data = writer.into_inner().unwrap();

        let cell = load(&data);
        assert!(!cell.is_interior());
        assert!(cell.is_explored());
        assert_eq!((cell.grid_x, cell.grid_y), (-2, 5));
        assert_eq!(cell.region.as_deref(), Some("Bitter Coast Region"));
        assert_eq!(cell.refs.len(), 2);
        assert_eq!(cell.refs[1].indexed_ref_id, "flora_kelp_01");
        assert_eq!(cell.notes, vec![MapNote { position: [1.0, 2.0, 3.0], note: "hidden cave".into() }]);

        assert_eq!(cell.fog_of_war.len(), 256);
        assert_eq!(cell.fog_of_war[0], FOG_EXPLORED);
        assert_eq!(cell.fog_of_war[1], FOG_UNEXPLORED);
        assert_eq!(cell.fog_of_war[2], FOG_EXPLORED);
    }

    #[test]
    fn test_interior_fog_prefix_and_moved_refs() {
        let mut fog = [0u8; 36];
        fog[4] = 0b1000_0000;
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"CELL").unwrap();
        writer.write_hn_string(b"NAME", "Seyda Neen, Census and Excise Office").unwrap();
        cell_data(&mut writer, flags::INTERIOR, 0, 0);
        writer.write_hn_f32(b"WHGT", -128.0).unwrap();
        writer.write_hn_u32(b"MVRF", 7).unwrap();
        writer.write_hn_bytes(b"CNDT", &[0; 8]).unwrap();
        writer.write_hn_bytes(b"NAM8", &fog).unwrap();
        writer.end_record(b"CELL").unwrap();
        let data = writer.into_inner().unwrap();

        let cell = load(&data);
        assert!(cell.is_interior());
        assert!(!cell.is_explored());
        assert_eq!(cell.water_level, Some(-128.0));
        assert!(cell.refs.is_empty());
        assert_eq!(cell.fog_of_war[7], FOG_EXPLORED);
        assert_eq!(cell.fog_of_war.iter().filter(|&&t| t == FOG_EXPLORED).count(), 1);
    }

    #[test]
    fn test_visited_flag_marks_explored() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"CELL").unwrap();
        writer.write_hn_string(b"NAME", "").unwrap();
        cell_data(&mut writer, flags::VISITED, 3, 3);
        writer.end_record(b"CELL").unwrap();
        let data = writer.into_inner().unwrap();

        assert!(load(&data).is_explored());
    }
}
