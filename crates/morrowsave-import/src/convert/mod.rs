//! Field remappers from legacy aggregates to target aggregates.
//!
//! These are plain functions over decoded data. They never touch the
//! reader or writer and never consult the cross-reference table.

pub mod actor;
pub mod cellref;
pub mod inventory;
pub mod player;
pub mod script;

pub use actor::{
    convert_acdt, convert_acsc, convert_actor_stats, convert_anis, convert_npc_data,
    translate_dynamic_index,
};
pub use cellref::{convert_cellref, convert_refdata};
pub use inventory::convert_inventory;
pub use player::{convert_faction, convert_npcc, convert_pcdt, PlayerToggles};
pub use script::{convert_locals, convert_scpt};
