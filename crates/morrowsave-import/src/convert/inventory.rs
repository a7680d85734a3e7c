//! Inventory lists.

use morrowsave_ess::Inventory;
use morrowsave_omw::{InventoryState, ObjectState};

use super::{cellref, script};

/// Convert every item and record the slot of equipped ones.
///
/// Slots are keyed by list position, so a stack can only occupy one slot.
/// Two identical rings worn together end up with one of them unequipped.
pub fn convert_inventory(inventory: &Inventory, state: &mut InventoryState) {
    for (index, item) in inventory.items.iter().enumerate() {
        let mut object = ObjectState::default();
        cellref::convert_refdata(&item.refdata, &mut object.cell_ref);
        object.cell_ref.ref_id.clone_from(&item.id);
        object.cell_ref.charge = item.charge;
        object.count = item.count.saturating_abs();
        object.locals = script::convert_locals(&item.scri);
        state.items.push(object);

        if item.relative_equipment_slot >= 0 {
            state.equipped.insert(index as i32, item.relative_equipment_slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_ess::{CellRefData, InventoryItem};

    fn item(id: &str, count: i32, slot: i32) -> InventoryItem {
        InventoryItem {
            id: id.into(),
            count,
            relative_equipment_slot: slot,
            charge: -1,
            ..Default::default()
        }
    }

    #[test]
    fn test_items_and_equipment() {
        let inventory = Inventory {
            items: vec![
                item("Gold_001", 120, -1),
                item("iron dagger", 1, 16),
                item("potion_restore_health", -5, -1),
            ],
        };
        let mut state = InventoryState::default();
        convert_inventory(&inventory, &mut state);

        assert_eq!(state.items.len(), 3);
        assert_eq!(state.items[0].cell_ref.ref_id, "Gold_001");
        assert_eq!(state.items[0].count, 120);
        assert_eq!(state.items[2].count, 5);
        assert_eq!(state.equipped.len(), 1);
        assert_eq!(state.equipped.get(&1), Some(&16));
    }

    #[test]
    fn test_item_charge_and_soul() {
        let mut gem = item("misc_soulgem_grand", 1, -1);
        gem.refdata = CellRefData {
            soul: Some("golden saint".into()),
            enchantment_charge: Some(200.0),
            ..Default::default()
        };
        gem.charge = 30;
        let mut state = InventoryState::default();
        convert_inventory(&Inventory { items: vec![gem] }, &mut state);

        let out = &state.items[0].cell_ref;
        assert_eq!(out.soul, "golden saint");
        assert_eq!(out.enchantment_charge, 200.0);
        assert_eq!(out.charge, 30);
    }
}
