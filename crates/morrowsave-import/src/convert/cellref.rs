//! Placement data shared by placed objects and inventory items.

use morrowsave_ess::CellRefData;
use morrowsave_omw::{CellRef, ObjectState, RefNum};

use super::{actor, script};

/// Copy every field the legacy reference carried over the defaults.
pub fn convert_refdata(data: &CellRefData, out: &mut CellRef) {
    if let Some(blocked) = data.blocked {
        out.reference_blocked = blocked;
    }
    if let Some(scale) = data.scale {
        out.scale = scale;
    }
    let strings = [
        (&data.owner, &mut out.owner),
        (&data.global_variable, &mut out.global_variable),
        (&data.soul, &mut out.soul),
        (&data.faction, &mut out.faction),
        (&data.dest_cell, &mut out.dest_cell),
        (&data.key, &mut out.key),
        (&data.trap, &mut out.trap),
    ];
    for (value, field) in strings {
        if let Some(value) = value {
            field.clone_from(value);
        }
    }
    if let Some(rank) = data.faction_rank {
        out.faction_rank = rank;
    }
    if let Some(charge) = data.enchantment_charge {
        out.enchantment_charge = charge;
    }
    if let Some(charge) = data.charge {
        out.charge = charge;
    }
    if let Some(value) = data.gold_value {
        out.gold_value = value;
    }
    if data.door_dest.is_some() {
        out.door_dest = data.door_dest;
    }
    if let Some(level) = data.lock_level {
        out.lock_level = level;
    }
    if let Some(position) = data.position {
        out.position = position;
    }
}

/// Fill the object state of a placed object from its `FRMR` group.
///
/// The ref id is left to the caller, which knows whether the legacy id was
/// indexed.
pub fn convert_cellref(cellref: &morrowsave_ess::CellRef, state: &mut ObjectState) {
    convert_refdata(&cellref.actor_data.refdata, &mut state.cell_ref);

    state.enabled = cellref.enabled;
    state.position = cellref.position;
    state.cell_ref.position = cellref.position;
    state.cell_ref.ref_num = RefNum {
        index: cellref.ref_num.index,
        content_file: cellref.ref_num.content_file,
    };
    if cellref.deleted {
        state.count = 0;
    }

    state.locals = script::convert_locals(&cellref.actor_data.scri);
    if let Some(anis) = &cellref.actor_data.anis {
        actor::convert_anis(anis, &mut state.animation_state);
    }
}
