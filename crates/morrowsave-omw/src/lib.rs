//! OpenMW saved game records.
//!
//! Plain data aggregates mirroring the records of an `.omwsave` file, each
//! with a `save` method that writes its subrecords into an open record of
//! a [`ChunkWriter`](morrowsave_common::ChunkWriter). Record framing is
//! left to the caller, so the same aggregate can be embedded in several
//! records (a [`CellId`] inside `PLAY`, `CSTA` and `MARK`, for example).

mod error;

pub mod cell;
pub mod cellid;
pub mod cellref;
pub mod controls;
pub mod dialogue;
pub mod header;
pub mod inventory;
pub mod locals;
pub mod object;
pub mod player;
pub mod projectile;
pub mod state;
pub mod stats;
pub mod world;

pub use error::{Error, Result};

// Re-export commonly used types at crate root
pub use cell::{CellState, PlacedObject};
pub use cellid::CellId;
pub use cellref::{CellRef, RefNum};
pub use controls::{ControlsFlags, ControlsState};
pub use dialogue::DialogueState;
pub use header::{FileHeader, PlayerClass, SavedGame, TimeStamp, FORMAT_VERSION};
pub use inventory::InventoryState;
pub use locals::{Locals, Variant};
pub use object::{AnimationState, ObjectState, ScriptedAnimation};
pub use player::Player;
pub use projectile::{BaseProjectileState, MagicBoltState, ProjectileState};
pub use state::{ContainerState, CreatureState, NpcState};
pub use stats::{CreatureStats, DrawState, FactionEntry, NpcStats, StatState};
pub use world::{
    Bounds, CustomMarker, DeathCounter, GlobalMap, GlobalScript, QuestState, StolenItems, WeatherState,
};
