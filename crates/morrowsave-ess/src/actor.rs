//! Actor state shared by the player `REFR` and placed objects in cells.

use bitflags::bitflags;
use morrowsave_common::{ChunkReader, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::cellref::CellRefData;
use crate::scri::ScriptLocals;
use crate::Result;

/// `ACDT`: actor stats.
///
/// Pairs are stored as `[current, base]`. Level changes are not stored at
/// all, except for the player where they live in the `NPC_` record.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Acdt {
    pub unknown: [u8; 12],
    pub flags: u32,
    /// Seconds left before drowning.
    pub breath_meter: f32,
    pub unknown2: [u8; 20],
    /// Health, magicka, fatigue.
    pub dynamic: [[f32; 2]; 3],
    pub unknown3: [u8; 16],
    pub attributes: [[f32; 2]; 8],
    pub magic_effects: [f32; 27],
    pub unknown4: [u8; 4],
    pub gold_pool: u32,
    pub count_down: u8,
    pub unknown5: [u8; 3],
}

impl Acdt {
    pub const SIZE: usize = 264;

    pub fn flags(&self) -> AcdtFlags {
        AcdtFlags::from_bits_retain(self.flags)
    }
}

bitflags! {
    /// Flag word of [`Acdt`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AcdtFlags: u32 {
        const TALKED_TO_PLAYER = 0x4;
        const ATTACKED = 0x100;
        const UNKNOWN = 0x200;
    }
}

/// `ACSC`: secondary actor state.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Acsc {
    pub unknown1: [u8; 17],
    pub flags: u8,
    pub unknown2: [u8; 22],
    pub corpse_clear_countdown: u8,
    pub unknown3: [u8; 71],
}

impl Acsc {
    pub const SIZE: usize = 112;

    pub fn flags(&self) -> AcscFlags {
        AcscFlags::from_bits_retain(self.flags)
    }
}

bitflags! {
    /// Flag byte of [`Acsc`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AcscFlags: u8 {
        const DEAD = 0x2;
    }
}

/// `ANIS`: scripted animation state.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Anis {
    pub group_index: u8,
    pub unknown: [u8; 3],
    pub time: f32,
}

/// Actor subrecords, in file order.
#[derive(Debug, Clone, Default)]
pub struct ActorData {
    pub refdata: CellRefData,
    pub acdt: Option<Acdt>,
    pub acsc: Option<Acsc>,
    /// `[base, current]` per skill. All zero when `CHRD` is absent.
    pub skills: [[i32; 2]; 27],
    /// Creature combat, magic and stealth; cannot change in game.
    pub combat_stats: Option<[[i32; 2]; 3]>,
    pub selected_spell: String,
    pub selected_enchant_item: String,
    pub scri: ScriptLocals,
    pub anis: Option<Anis>,
}

impl ActorData {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        // activation flags, then two unknowns
        for tag in [b"ACTN", b"STPR", b"MNAM"] {
            if reader.is_next_sub(tag)? {
                reader.skip_h_sub()?;
            }
        }

        let mut data = ActorData {
            refdata: CellRefData::load(reader)?,
            ..Default::default()
        };

        data.acdt = reader.read_hno_struct(b"ACDT")?;
        data.acsc = reader.read_hno_struct(b"ACSC")?;
        if reader.is_next_sub(b"ACSL")? {
            reader.skip_h_sub_size(Acsc::SIZE)?;
        }

        // links to other objects, usually "PlayerSaveGame"
        for tag in [b"CSTN", b"LSTN", b"CSHN", b"LSHN"] {
            if reader.is_next_sub(tag)? {
                reader.skip_h_sub()?;
            }
        }
        while reader.is_next_sub(b"TGTN")? {
            reader.skip_h_sub()?;
        }
        while reader.is_next_sub(b"FGTN")? {
            reader.skip_h_sub()?;
        }
        if reader.is_next_sub(b"AADT")? {
            reader.skip_h_sub()?;
        }
        for tag in [b"PWPC", b"PWPS"] {
            if reader.is_next_sub(tag)? {
                reader.skip_h_sub()?;
            }
        }

        if reader.is_next_sub(b"WNAM")? {
            let id = reader.read_h_string()?;
            match reader.read_hno_string(b"XNAM")? {
                Some(item) => data.selected_enchant_item = item,
                None => data.selected_spell = id,
            }
            if reader.is_next_sub(b"YNAM")? {
                reader.skip_h_sub()?;
            }
        }

        // used powers: id[32] and a timestamp in hours that cannot be
        // converted reliably
        while reader.is_next_sub(b"APUD")? {
            reader.skip_h_sub()?;
        }

        if let Some(skills) = reader.read_hno_struct(b"CHRD")? {
            data.skills = skills;
        }
        data.combat_stats = reader.read_hno_struct(b"CRED")?;

        data.scri = ScriptLocals::load(reader)?;

        if reader.is_next_sub(b"ND3D")? {
            reader.skip_h_sub()?;
        }
        data.anis = reader.read_hno_struct(b"ANIS")?;

        Ok(data)
    }
}
