//! `CELL`: visited cells and the objects placed in them.
//!
//! Cells are only buffered while reading. Placed objects are matched with
//! their change records when the cells are written, by which time every
//! `NPCC`, `CREC` and `CNTC` record has been read.

use std::collections::BTreeMap;
use std::io::Write;

use morrowsave_common::ChunkWriter;
use morrowsave_ess::{templates, Cell, PLAYER_REF_ID};
use morrowsave_omw::{
    CellId, CellState, ContainerState, CreatureState, CustomMarker, NpcState, ObjectState,
    PlacedObject,
};
use tracing::debug;

use crate::context::Context;
use crate::convert;
use crate::refid::{split_indexed_ref_id, RefKey};
use crate::Result;

#[derive(Debug, Default)]
pub struct Cells {
    /// Interior cells by lowercase name.
    interiors: BTreeMap<String, Cell>,
    exteriors: BTreeMap<(i32, i32), Cell>,
}

fn cell_id(cell: &Cell) -> CellId {
    if cell.is_interior() {
        CellId::interior(cell.name.as_str())
    } else {
        CellId::exterior(cell.grid_x, cell.grid_y)
    }
}

impl Cells {
    pub fn read(&mut self, cell: Cell, ctx: &mut Context) {
        let id = cell_id(&cell);

        if cell.is_explored() {
            ctx.explored_cells.insert((cell.grid_x, cell.grid_y));
        }
        if !cell.name.is_empty() && cell.name.eq_ignore_ascii_case(&ctx.player_cell_name) {
            ctx.player.cell_id = id.clone();
        }
        for note in &cell.notes {
            ctx.markers.push(CustomMarker {
                world_x: note.position[0],
                world_y: note.position[1],
                cell: id.clone(),
                note: note.note.clone(),
            });
        }

        if cell.is_interior() {
            self.interiors.insert(cell.name.to_lowercase(), cell);
        } else {
            self.exteriors.insert((cell.grid_x, cell.grid_y), cell);
        }
    }

    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>, ctx: &mut Context) -> Result<()> {
        for cell in self.interiors.values().chain(self.exteriors.values()) {
            let state = convert_cell(cell, ctx)?;
            writer.start_record(b"CSTA")?;
            state.save(writer)?;
            writer.end_record(b"CSTA")?;
            ctx.summary.cells_written += 1;
        }

        for marker in &ctx.markers {
            writer.start_record(b"MARK")?;
            marker.save(writer)?;
            writer.end_record(b"MARK")?;
        }
        Ok(())
    }
}

fn convert_cell(cell: &Cell, ctx: &mut Context) -> Result<CellState> {
    let mut state = CellState {
        id: cell_id(cell),
        water_level: cell.water_level.unwrap_or(0.0),
        fog_of_war: None,
        objects: Vec::with_capacity(cell.refs.len()),
    };
    // Interior fog depends on map bounds the legacy format never stored.
    if !cell.is_interior() && !cell.fog_of_war.is_empty() {
        state.fog_of_war = Some(cell.fog_of_war.clone());
    }

    for cellref in &cell.refs {
        if cellref.indexed_ref_id == PLAYER_REF_ID {
            continue;
        }
        let object = place(cellref, ctx)?;
        match &object {
            PlacedObject::Generic(_) => ctx.summary.generic_objects += 1,
            PlacedObject::Npc(_) => ctx.summary.npcs += 1,
            PlacedObject::Container(_) => ctx.summary.containers += 1,
            PlacedObject::Creature(_) => ctx.summary.creatures += 1,
        }
        state.objects.push(object);
    }
    Ok(state)
}

/// Pick the kind of a placed object from the change record it matches.
fn place(cellref: &morrowsave_ess::CellRef, ctx: &mut Context) -> Result<PlacedObject> {
    let Some((index, base_id)) = split_indexed_ref_id(&cellref.indexed_ref_id) else {
        return Ok(PlacedObject::Generic(generic(cellref, cellref.indexed_ref_id.to_lowercase())));
    };
    let key = RefKey::new(index, base_id);

    if let Some(npcc) = ctx.npc_changes.remove(&key) {
        let mut npc = NpcState::default();
        convert::convert_actor_stats(&cellref.actor_data, &mut npc.creature_stats);
        convert::convert_npc_data(&cellref.actor_data, &mut npc.npc_stats);
        convert::convert_npcc(&npcc, &mut npc);
        if let Some(level) = template_level(ctx.npcs.get(&key.id), templates::npc_level)? {
            npc.creature_stats.level = level;
        }
        convert::convert_cellref(cellref, &mut npc.object);
        npc.object.cell_ref.ref_id.clone_from(&key.id);
        npc.creature_stats.actor_id = ctx.register_or_get_actor_id(&key);
        return Ok(PlacedObject::Npc(npc));
    }

    if let Some(cntc) = ctx.container_changes.remove(&key) {
        let mut container = ContainerState::default();
        convert::convert_inventory(&cntc.inventory, &mut container.inventory);
        convert::convert_cellref(cellref, &mut container.object);
        container.object.cell_ref.ref_id.clone_from(&key.id);
        return Ok(PlacedObject::Container(container));
    }

    if let Some(crec) = ctx.creature_changes.remove(&key) {
        let mut creature = CreatureState::default();
        convert::convert_actor_stats(&cellref.actor_data, &mut creature.creature_stats);
        convert::convert_inventory(&crec.inventory, &mut creature.inventory);
        if let Some(level) = template_level(ctx.creatures.get(&key.id), templates::creature_level)? {
            creature.creature_stats.level = level;
        }
        convert::convert_cellref(cellref, &mut creature.object);
        if let Some(scale) = crec.scale {
            creature.object.cell_ref.scale = scale;
        }
        creature.object.cell_ref.ref_id.clone_from(&key.id);
        creature.creature_stats.actor_id = ctx.register_or_get_actor_id(&key);
        return Ok(PlacedObject::Creature(creature));
    }

    debug!(id = %cellref.indexed_ref_id, "no change record, placing as generic object");
    Ok(PlacedObject::Generic(generic(cellref, key.id)))
}

fn generic(cellref: &morrowsave_ess::CellRef, ref_id: String) -> ObjectState {
    let mut object = ObjectState::blank();
    convert::convert_cellref(cellref, &mut object);
    object.cell_ref.ref_id = ref_id;
    object
}

fn template_level(
    template: Option<&morrowsave_ess::PassThrough>,
    level: fn(&morrowsave_ess::PassThrough) -> morrowsave_ess::Result<Option<i32>>,
) -> Result<Option<i32>> {
    match template {
        Some(record) => Ok(level(record)?),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::{Encoding, Position};
    use morrowsave_ess::cell::flags;
    use morrowsave_ess::{ActorData, Crec, Inventory, MapNote, RefNum};

    fn cellref(id: &str) -> morrowsave_ess::CellRef {
        morrowsave_ess::CellRef {
            ref_num: RefNum {
                index: 4,
                content_file: 0,
            },
            indexed_ref_id: id.into(),
            actor_data: ActorData::default(),
            enabled: true,
            position: Position::default(),
            deleted: false,
        }
    }

    fn interior(name: &str, refs: Vec<morrowsave_ess::CellRef>) -> Cell {
        Cell {
            name: name.into(),
            flags: flags::INTERIOR,
            refs,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_cell_and_markers() {
        let mut ctx = Context::new(Encoding::Win1252);
        ctx.player_cell_name = "Seyda Neen, Census and Excise Office".into();
        let mut cell = interior("seyda neen, census and excise office", Vec::new());
        cell.notes.push(MapNote {
            position: [5.0, 6.0, 7.0],
            note: "desk".into(),
        });

        let mut cells = Cells::default();
        cells.read(cell, &mut ctx);

        assert_eq!(ctx.player.cell_id, CellId::interior("seyda neen, census and excise office"));
        assert_eq!(ctx.markers.len(), 1);
        assert_eq!(ctx.markers[0].world_x, 5.0);
        assert_eq!(ctx.markers[0].note, "desk");
    }

    #[test]
    fn test_exterior_fog_and_explored() {
        let mut ctx = Context::new(Encoding::Win1252);
        let cell = Cell {
            flags: flags::VISITED,
            grid_x: -2,
            grid_y: 3,
            fog_of_war: vec![0xff; 256],
            ..Default::default()
        };
        let mut cells = Cells::default();
        cells.read(cell, &mut ctx);
        assert!(ctx.explored_cells.contains(&(-2, 3)));

        let state = convert_cell(&cells.exteriors[&(-2, 3)], &mut ctx).unwrap();
        assert!(state.id.is_exterior());
        assert_eq!(state.fog_of_war.map(|fog| fog.len()), Some(256));
    }

    #[test]
    fn test_interior_fog_dropped() {
        let mut ctx = Context::new(Encoding::Win1252);
        let mut cell = interior("Arrille's Tradehouse", Vec::new());
        cell.fog_of_war = vec![0xff; 256];
        let state = convert_cell(&cell, &mut ctx).unwrap();
        assert!(state.fog_of_war.is_none());
    }

    #[test]
    fn test_creature_merge() {
        let mut ctx = Context::new(Encoding::Win1252);
        ctx.creature_changes.insert(
            RefKey::new(1, "rat"),
            Crec {
                index: 1,
                scale: Some(1.5),
                inventory: Inventory::default(),
            },
        );
        let cell = interior("cave", vec![cellref("Rat00000001")]);
        let state = convert_cell(&cell, &mut ctx).unwrap();

        let PlacedObject::Creature(creature) = &state.objects[0] else {
            panic!("expected a creature, got {:?}", state.objects[0]);
        };
        assert_eq!(creature.object.cell_ref.ref_id, "rat");
        assert_eq!(creature.object.cell_ref.scale, 1.5);
        assert_eq!(creature.creature_stats.actor_id, 1);
        assert!(ctx.creature_changes.is_empty());
        assert_eq!(ctx.summary.creatures, 1);
    }

    #[test]
    fn test_unmatched_refs_are_generic() {
        let mut ctx = Context::new(Encoding::Win1252);
        let cell = interior(
            "cave",
            vec![cellref("Barrel_01"), cellref("Chest_Small_00000002"), cellref(PLAYER_REF_ID)],
        );
        let state = convert_cell(&cell, &mut ctx).unwrap();

        assert_eq!(state.objects.len(), 2);
        let ids: Vec<_> = state
            .objects
            .iter()
            .map(|object| match object {
                PlacedObject::Generic(state) => {
                    assert!(!state.has_custom_state);
                    state.cell_ref.ref_id.clone()
                }
                other => panic!("expected a generic object, got {other:?}"),
            })
            .collect();
        assert_eq!(ids, ["barrel_01", "chest_small_"]);
        assert_eq!(ctx.summary.generic_objects, 2);
        assert_eq!(ctx.next_actor_id(), 1);
    }
}
