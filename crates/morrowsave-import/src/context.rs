//! State shared by every converter during one import run.

use std::collections::{BTreeMap, BTreeSet};

use morrowsave_common::Encoding;
use morrowsave_ess::{ActiveSpell, Cntc, Crec, Npcc, PassThrough, PLAYER_REF_ID};
use morrowsave_omw::{ControlsState, CustomMarker, DialogueState, Player};

use crate::refid::RefKey;
use crate::summary::ImportSummary;

/// Everything decoded so far that later records or the write pass need.
#[derive(Debug)]
pub struct Context {
    pub encoding: Encoding,

    pub player: Player,
    /// The `NPC_` record with id `player`.
    pub player_base: Option<PassThrough>,
    pub custom_player_class_name: Option<String>,
    pub player_cell_name: String,
    pub player_name: String,

    pub dialogue_state: DialogueState,
    pub controls_state: ControlsState,

    /// Exterior cells that go on the global map.
    pub explored_cells: BTreeSet<(i32, i32)>,

    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub hour: f32,

    pub npc_changes: BTreeMap<RefKey, Npcc>,
    pub creature_changes: BTreeMap<RefKey, Crec>,
    pub container_changes: BTreeMap<RefKey, Cntc>,

    /// Content templates overridden by the save, by lowercase id.
    pub npcs: BTreeMap<String, PassThrough>,
    pub creatures: BTreeMap<String, PassThrough>,

    /// Active spells by `SPLM` index.
    pub active_spells: BTreeMap<i32, ActiveSpell>,
    pub markers: Vec<CustomMarker>,

    pub summary: ImportSummary,

    actor_id_map: BTreeMap<RefKey, i32>,
    next_actor_id: i32,
}

impl Context {
    pub fn new(encoding: Encoding) -> Self {
        let mut ctx = Self {
            encoding,
            player: Player::default(),
            player_base: None,
            custom_player_class_name: None,
            player_cell_name: String::new(),
            player_name: String::new(),
            dialogue_state: DialogueState::default(),
            controls_state: ControlsState::default(),
            explored_cells: BTreeSet::new(),
            day: 0,
            month: 0,
            year: 0,
            hour: 0.0,
            npc_changes: BTreeMap::new(),
            creature_changes: BTreeMap::new(),
            container_changes: BTreeMap::new(),
            npcs: BTreeMap::new(),
            creatures: BTreeMap::new(),
            active_spells: BTreeMap::new(),
            markers: Vec::new(),
            summary: ImportSummary::default(),
            actor_id_map: BTreeMap::new(),
            next_actor_id: 0,
        };
        ctx.player.object.creature_stats.actor_id = ctx.generate_actor_id();
        ctx.player.object.object.cell_ref.ref_id = "player".to_string();
        ctx
    }

    fn generate_actor_id(&mut self) -> i32 {
        let id = self.next_actor_id;
        self.next_actor_id += 1;
        self.summary.actor_ids_issued += 1;
        id
    }

    /// The id the next actor would be given.
    pub fn next_actor_id(&self) -> i32 {
        self.next_actor_id
    }

    pub fn player_actor_id(&self) -> i32 {
        self.player.object.creature_stats.actor_id
    }

    /// Actor id of a placed object, created on first sight.
    pub fn register_or_get_actor_id(&mut self, key: &RefKey) -> i32 {
        if let Some(&id) = self.actor_id_map.get(key) {
            return id;
        }
        let id = self.generate_actor_id();
        self.actor_id_map.insert(key.clone(), id);
        id
    }

    /// Actor id of an already placed object named by its indexed ref id.
    pub fn resolve_actor_id(&self, indexed_ref_id: &str) -> Option<i32> {
        if indexed_ref_id == PLAYER_REF_ID {
            return Some(self.player_actor_id());
        }
        let key = RefKey::from_indexed(indexed_ref_id)?;
        self.actor_id_map.get(&key).copied()
    }

    /// Decode a fixed-width text field.
    pub fn fixed_string(&self, bytes: &[u8]) -> String {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        self.encoding.decode(&bytes[..end])
    }
}
