//! Decoders for the legacy Morrowind saved game format.
//!
//! A `.ess` file is a content-file style record stream: a `TES3` header
//! followed by records that either override content records (`NPC_`,
//! `SPEL`, `GLOB`, ...) or describe runtime state with no content
//! counterpart (`CELL` changes, `NPCC`/`CREC`/`CNTC` deltas, `PCDT`,
//! `SPLM`, ...).
//!
//! Each module decodes one record kind. Decoders are called after the
//! record header has been read and leave the reader at a subrecord
//! boundary; [`ChunkReader::skip_remaining_subs`] takes care of anything
//! they do not understand.
//!
//! # Example
//!
//! ```no_run
//! use morrowsave_common::{ChunkReader, Encoding};
//! use morrowsave_ess::{Cell, Header};
//!
//! let data = std::fs::read("quiksave.ess")?;
//! let mut reader = ChunkReader::new(&data, Encoding::Win1252);
//! let header = Header::load(&mut reader)?;
//! println!("{} in {}", header.player_name, header.current_cell);
//!
//! while reader.has_more_recs() {
//!     let tag = reader.next_record_name()?;
//!     reader.record_header()?;
//!     if tag == b"CELL" {
//!         let cell = Cell::load(&mut reader)?;
//!         println!("{}: {} refs", cell.name, cell.refs.len());
//!     }
//!     reader.skip_record()?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`ChunkReader::skip_remaining_subs`]: morrowsave_common::ChunkReader::skip_remaining_subs

mod error;

pub mod actor;
pub mod anim;
pub mod cell;
pub mod cellref;
pub mod changes;
pub mod dialogue;
pub mod fmap;
pub mod game;
pub mod header;
pub mod inventory;
pub mod klst;
pub mod passthrough;
pub mod pcdt;
pub mod proj;
pub mod refr;
pub mod scpt;
pub mod scri;
pub mod splm;
pub mod stln;
pub mod templates;

pub use error::{Error, Result};

// Re-export commonly used types at crate root
pub use actor::{Acdt, AcdtFlags, Acsc, AcscFlags, ActorData, Anis};
pub use cell::{Cell, MapNote};
pub use cellref::{CellRef, CellRefData, RefNum};
pub use changes::{Cntc, Crec, Npcc};
pub use dialogue::{Dial, Info, Jour, Ques};
pub use fmap::Fmap;
pub use game::GameState;
pub use header::{Header, Master};
pub use inventory::{Inventory, InventoryItem};
pub use klst::KillCounter;
pub use passthrough::PassThrough;
pub use pcdt::{Pcdt, PlayerFlags};
pub use proj::{Proj, Projectile};
pub use refr::{Refr, PLAYER_REF_ID};
pub use scpt::Scpt;
pub use scri::ScriptLocals;
pub use splm::{ActiveSpell, Splm};
pub use stln::{Owner, StolenItem};
