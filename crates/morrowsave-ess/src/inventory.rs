//! Inventory lists of actors and containers.

use morrowsave_common::{ChunkReader, FromBytes, Immutable, IntoBytes, KnownLayout};
use tracing::debug;

use crate::cellref::CellRefData;
use crate::scri::ScriptLocals;
use crate::{Error, Result};

/// `NPCO`: item count and id.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct ContItem {
    /// Negative for restocking items.
    pub count: i32,
    pub item: [u8; 32],
}

/// One entry of an inventory list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryItem {
    pub id: String,
    pub count: i32,
    /// Slot index among the slots this item can go in, `-1` when not
    /// equipped.
    pub relative_equipment_slot: i32,
    pub scri: ScriptLocals,
    pub refdata: CellRefData,
    /// `XHLT`, `-1` when absent.
    pub charge: i32,
}

/// Items of an actor or container, followed by equipment assignments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    pub items: Vec<InventoryItem>,
}

impl Inventory {
    /// Read items and equipment up to the end of the record.
    ///
    /// Subrecords outside the inventory grammar are skipped wherever they
    /// appear between items.
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let mut items = Vec::new();
        let mut equipment = Vec::new();

        while let Some(tag) = reader.peek_sub_name()? {
            match tag.as_bytes() {
                b"NPCO" => {
                    reader.next_sub_name()?;
                    load_item(reader, &mut items)?;
                }
                b"WIDX" => {
                    // the same item can be equipped twice (two rings) and is
                    // then stacked in the list; only one slot survives
                    reader.next_sub_name()?;
                    reader.sub_header()?;
                    let index = reader.read_i32()?;
                    let slot = reader.read_i32()?;
                    reader.skip_sub_body()?;
                    equipment.push((index, slot));
                }
                _ => {
                    reader.next_sub_name()?;
                    reader.skip_h_sub()?;
                    debug!(%tag, "skipped subrecord in inventory");
                }
            }
        }

        let len = items.len();
        for (index, slot) in equipment {
            let entry = usize::try_from(index)
                .ok()
                .and_then(|i| items.get_mut(i))
                .ok_or(Error::EquipmentIndex { index, len })?;
            entry.relative_equipment_slot = slot;
        }

        Ok(Inventory { items })
    }
}

/// One `NPCO` whose tag was just read, plus its per-item subrecords.
fn load_item(reader: &mut ChunkReader<'_>, items: &mut Vec<InventoryItem>) -> Result<()> {
    let cont: ContItem = reader.read_h_struct()?;
    let mut item = InventoryItem {
        id: reader.decode_text(&cont.item),
        count: cont.count,
        relative_equipment_slot: -1,
        charge: -1,
        ..Default::default()
    };

    // XIDX splits the stack into separately tracked single items
    let mut separate_stacks = false;
    for _ in 0..cont.count.unsigned_abs() {
        let new_stack = reader.is_next_sub(b"XIDX")?;
        if new_stack {
            let _index: u32 = reader.read_h_struct()?;
            separate_stacks = true;
            item.count = 1;
        }

        item.scri = ScriptLocals::load(reader)?;
        item.refdata = CellRefData::load(reader)?;
        item.charge = reader.read_hno_struct::<i32>(b"XHLT")?.unwrap_or(-1);

        if !new_stack {
            break;
        }
        items.push(item.clone());
    }

    if !separate_stacks {
        items.push(item);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::{ChunkWriter, Encoding};

    fn npco(writer: &mut ChunkWriter<Vec<u8>>, count: i32, id: &str) {
        let mut cont = ContItem::read_from_bytes(&[0u8; 36]).unwrap();
        cont.count = count;
        cont.item[..id.len()].copy_from_slice(id.as_bytes());
        writer.write_hn_struct(b"NPCO", &cont).unwrap();
    }

    fn widx(writer: &mut ChunkWriter<Vec<u8>>, index: i32, slot: i32) {
        writer.start_sub(b"WIDX").unwrap();
        writer.write_i32(index).unwrap();
        writer.write_i32(slot).unwrap();
        writer.end_sub().unwrap();
    }

    fn load(data: &[u8]) -> Result<Inventory> {
        let mut reader = ChunkReader::new(data, Encoding::Win1252);
        reader.next_record_name().unwrap();
        reader.record_header().unwrap();
        Inventory::load(&mut reader)
    }

    #[test]
    fn test_stacks_and_equipment() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"NPCC").unwrap();
        npco(&mut writer, -5, "Gold_001");
        npco(&mut writer, 2, "iron dagger");
        writer.write_hn_u32(b"XIDX", 1).unwrap();
        writer.write_hn_i32(b"XHLT", 300).unwrap();
        writer.write_hn_u32(b"XIDX", 2).unwrap();
        writer.write_hn_string(b"XSOL", "ancestor_ghost").unwrap();
        widx(&mut writer, 1, 0);
        writer.end_record(b"NPCC").unwrap();
        let data = writer.into_inner().unwrap();

        let inventory = load(&data).unwrap();
        assert_eq!(inventory.items.len(), 3);
        assert_eq!(inventory.items[0].id, "Gold_001");
        assert_eq!(inventory.items[0].count, -5);
        assert_eq!(inventory.items[0].relative_equipment_slot, -1);

        assert_eq!(inventory.items[1].count, 1);
        assert_eq!(inventory.items[1].charge, 300);
        assert_eq!(inventory.items[1].relative_equipment_slot, 0);
        assert_eq!(inventory.items[2].charge, -1);
        assert_eq!(inventory.items[2].refdata.soul.as_deref(), Some("ancestor_ghost"));
    }

    #[test]
    fn test_unknown_subrecords_between_items() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"CNTC").unwrap();
        writer.write_hn_bytes(b"ZZZZ", &[1, 2, 3]).unwrap();
        npco(&mut writer, 1, "Gold_001");
        writer.write_hn_u32(b"YYYY", 7).unwrap();
        npco(&mut writer, 1, "ring");
        widx(&mut writer, 1, 3);
        writer.end_record(b"CNTC").unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = ChunkReader::new(&data, Encoding::Win1252);
        reader.next_record_name().unwrap();
        reader.record_header().unwrap();
        let inventory = Inventory::load(&mut reader).unwrap();
        let ids: Vec<&str> = inventory.items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["Gold_001", "ring"]);
        assert_eq!(inventory.items[1].relative_equipment_slot, 3);
        assert!(!reader.has_more_subs());
    }

    #[test]
    fn test_equipment_index_out_of_range() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"NPCC").unwrap();
        npco(&mut writer, 1, "ring");
        widx(&mut writer, 1, 0);
        writer.end_record(b"NPCC").unwrap();
        let data = writer.into_inner().unwrap();

        let err = load(&data).unwrap_err();
        assert!(matches!(err, Error::EquipmentIndex { index: 1, len: 1 }));
    }
}
