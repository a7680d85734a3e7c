//! Reference data of placed objects and inventory items.

use std::io::Write;

use morrowsave_common::{ChunkWriter, Position};

use crate::Result;

/// Reference number: instance index plus originating content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefNum {
    pub index: u32,
    /// `-1` for objects created in game.
    pub content_file: i32,
}

impl Default for RefNum {
    fn default() -> Self {
        Self {
            index: 0,
            content_file: -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellRef {
    pub ref_num: RefNum,
    pub ref_id: String,
    pub scale: f32,
    pub owner: String,
    pub global_variable: String,
    pub soul: String,
    pub faction: String,
    /// `-2` when unset.
    pub faction_rank: i32,
    /// `-1` when unset.
    pub charge: i32,
    /// `-1` when unset.
    pub enchantment_charge: f32,
    pub gold_value: i32,
    pub door_dest: Option<Position>,
    pub dest_cell: String,
    pub lock_level: i32,
    pub key: String,
    pub trap: String,
    /// `-1` when unset.
    pub reference_blocked: i8,
    pub position: Position,
}

impl Default for CellRef {
    fn default() -> Self {
        Self {
            ref_num: RefNum::default(),
            ref_id: String::new(),
            scale: 1.0,
            owner: String::new(),
            global_variable: String::new(),
            soul: String::new(),
            faction: String::new(),
            faction_rank: -2,
            charge: -1,
            enchantment_charge: -1.0,
            gold_value: 1,
            door_dest: None,
            dest_cell: String::new(),
            lock_level: 0,
            key: String::new(),
            trap: String::new(),
            reference_blocked: -1,
            position: Position::default(),
        }
    }
}

impl CellRef {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>, in_inventory: bool) -> Result<()> {
        writer.start_sub(b"FRMR")?;
        writer.write_u32(self.ref_num.index)?;
        writer.write_i32(self.ref_num.content_file)?;
        writer.end_sub()?;

        writer.write_hn_string(b"NAME", &self.ref_id)?;

        if self.scale != 1.0 {
            writer.write_hn_f32(b"XSCL", self.scale)?;
        }

        if !in_inventory {
            write_non_empty(writer, b"ANAM", &self.owner)?;
        }
        write_non_empty(writer, b"BNAM", &self.global_variable)?;
        write_non_empty(writer, b"XSOL", &self.soul)?;

        if !in_inventory {
            write_non_empty(writer, b"CNAM", &self.faction)?;
            if self.faction_rank != -2 {
                writer.write_hn_i32(b"INDX", self.faction_rank)?;
            }
        }

        if self.enchantment_charge != -1.0 {
            writer.write_hn_f32(b"XCHG", self.enchantment_charge)?;
        }
        if self.charge != -1 {
            writer.write_hn_i32(b"INTV", self.charge)?;
        }
        if self.gold_value != 1 {
            writer.write_hn_i32(b"NAM9", self.gold_value)?;
        }

        if !in_inventory {
            if let Some(dest) = &self.door_dest {
                writer.write_hn_struct(b"DODT", dest)?;
                write_non_empty(writer, b"DNAM", &self.dest_cell)?;
            }
            if self.lock_level != 0 {
                writer.write_hn_i32(b"FLTV", self.lock_level)?;
            }
            write_non_empty(writer, b"KNAM", &self.key)?;
            write_non_empty(writer, b"TNAM", &self.trap)?;
            if self.reference_blocked != -1 {
                writer.write_hn_bytes(b"UNAM", &self.reference_blocked.to_le_bytes())?;
            }
            writer.write_hn_struct(b"DATA", &self.position)?;
        }

        Ok(())
    }
}

fn write_non_empty<W: Write>(writer: &mut ChunkWriter<W>, tag: &[u8; 4], value: &str) -> Result<()> {
    if !value.is_empty() {
        writer.write_hn_string(tag, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::{ChunkReader, Encoding};

    fn subrecord_names(cellref: &CellRef, in_inventory: bool) -> Vec<String> {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"TEST").unwrap();
        cellref.save(&mut writer, in_inventory).unwrap();
        writer.end_record(b"TEST").unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = ChunkReader::new(&data, Encoding::Win1252);
        reader.next_record_name().unwrap();
        reader.record_header().unwrap();
        reader
            .skip_remaining_subs()
            .unwrap()
            .into_iter()
            .map(|tag| tag.to_string())
            .collect()
    }

    #[test]
    fn test_defaults_are_omitted() {
        let cellref = CellRef {
            ref_id: "chest_small_01".into(),
            ..Default::default()
        };
        assert_eq!(subrecord_names(&cellref, false), ["FRMR", "NAME", "DATA"]);
        assert_eq!(subrecord_names(&cellref, true), ["FRMR", "NAME"]);
    }

    #[test]
    fn test_placement_only_fields_skipped_in_inventory() {
        let cellref = CellRef {
            ref_id: "misc_soulgem_grand".into(),
            owner: "fargoth".into(),
            soul: "golden saint".into(),
            charge: 10,
            ..Default::default()
        };
        assert_eq!(
            subrecord_names(&cellref, false),
            ["FRMR", "NAME", "ANAM", "XSOL", "INTV", "DATA"]
        );
        assert_eq!(subrecord_names(&cellref, true), ["FRMR", "NAME", "XSOL", "INTV"]);
    }
}
