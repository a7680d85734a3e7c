//! Inventories of actors and containers.

use std::collections::BTreeMap;
use std::io::Write;

use morrowsave_common::ChunkWriter;

use crate::object::ObjectState;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryState {
    pub items: Vec<ObjectState>,
    /// Item list index to equipment slot.
    pub equipped: BTreeMap<i32, i32>,
    /// Item list index, `-1` for none.
    pub selected_enchant_item: i32,
}

impl Default for InventoryState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            equipped: BTreeMap::new(),
            selected_enchant_item: -1,
        }
    }
}

impl InventoryState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        let len = self.items.len();
        let check = |index: i32| {
            if usize::try_from(index).is_ok_and(|i| i < len) {
                Ok(())
            } else {
                Err(Error::EquippedIndex { index, len })
            }
        };

        writer.write_hn_u32(b"ICNT", len as u32)?;
        for item in &self.items {
            writer.write_hn_i32(b"IOBJ", 0)?;
            item.save(writer, true)?;
        }

        for (&index, &slot) in &self.equipped {
            check(index)?;
            writer.start_sub(b"EQUI")?;
            writer.write_i32(index)?;
            writer.write_i32(slot)?;
            writer.end_sub()?;
        }

        if self.selected_enchant_item != -1 {
            check(self.selected_enchant_item)?;
            writer.write_hn_i32(b"SELE", self.selected_enchant_item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipped_index_must_exist() {
        let mut inventory = InventoryState::default();
        inventory.items.push(ObjectState::default());
        inventory.equipped.insert(0, 3);
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"TEST").unwrap();
        inventory.save(&mut writer).unwrap();

        inventory.equipped.insert(1, 4);
        let err = inventory.save(&mut writer).unwrap_err();
        assert!(matches!(err, Error::EquippedIndex { index: 1, len: 1 }));
    }
}
