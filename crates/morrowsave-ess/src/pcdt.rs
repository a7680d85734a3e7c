//! `PCDT`: player data that has no place in the `NPC_` or `REFR` records.

use bitflags::bitflags;
use morrowsave_common::{ChunkReader, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::Result;

bitflags! {
    /// Controls, camera and draw state of the player.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlayerFlags: i32 {
        const VIEW_SWITCH_DISABLED = 0x1;
        const CONTROLS_DISABLED = 0x4;
        const SLEEPING = 0x10;
        const WAITING = 0x40;
        const WEAPON_DRAWN = 0x80;
        const SPELL_DRAWN = 0x100;
        const IN_JAIL = 0x200;
        const JUMPING_DISABLED = 0x1000;
        const LOOKING_DISABLED = 0x2000;
        const VANITY_MODE_DISABLED = 0x4000;
        const WEAPON_DRAWING_DISABLED = 0x8000;
        const SPELL_DRAWING_DISABLED = 0x10000;
        const THIRD_PERSON = 0x20000;
        const TELEPORTING_DISABLED = 0x40000;
        const LEVITATION_DISABLED = 0x80000;
    }
}

/// `FNAM`: faction membership.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct FactionMembership {
    pub rank: u8,
    pub unknown1: [u8; 3],
    pub reputation: i32,
    /// `0x2`: expelled.
    pub flags: u8,
    pub unknown2: [u8; 3],
    pub faction_name: [u8; 32],
}

impl FactionMembership {
    pub const EXPELLED: u8 = 0x2;
}

/// Location of the last Mark spell.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct MarkLocation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Z angle in radians.
    pub rot_z: f32,
    /// Always `(0, 0)` for interiors.
    pub cell_x: i32,
    pub cell_y: i32,
}

/// `PNAM`: the bulk of the player data.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct PlayerData {
    pub player_flags: i32,
    pub level_progress: u32,
    /// Non-uniformly scaled.
    pub skill_progress: [f32; 27],
    /// Skill increases per attribute.
    pub skill_increases: [u8; 8],
    pub telekinesis_range_bonus: i32,
    /// `0.0..=1.0`.
    pub vision_bonus: f32,
    pub detect_key_magnitude: f32,
    pub detect_enchantment_magnitude: f32,
    pub detect_animal_magnitude: f32,
    pub mark_location: MarkLocation,
    pub unknown3: [u8; 4],
    pub vertical_rotation: [[f32; 3]; 3],
    /// Skill increases per specialization.
    pub spec_increases: [u8; 3],
    pub unknown4: u8,
}

impl PlayerData {
    pub const SIZE: usize = 212;

    pub fn flags(&self) -> PlayerFlags {
        PlayerFlags::from_bits_retain(self.player_flags)
    }
}

/// `ENAM`: last exterior cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct ExteriorCell {
    pub cell_x: i32,
    pub cell_y: i32,
}

#[derive(Debug, Clone)]
pub struct Pcdt {
    pub known_topics: Vec<String>,
    /// Cell name of the Mark spell. Can also be the default cell name or
    /// a region name.
    pub mark_cell: Option<String>,
    pub pnam: PlayerData,
    pub bounty: i32,
    pub birthsign: String,
    pub last_exterior: Option<ExteriorCell>,
    pub factions: Vec<FactionMembership>,
}

impl Pcdt {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let mut known_topics = Vec::new();
        while reader.is_next_sub(b"DNAM")? {
            known_topics.push(reader.read_h_string()?);
        }
        let mark_cell = reader.read_hno_string(b"MNAM")?;

        let pnam = reader.read_hn_struct(b"PNAM")?;

        // SNAM, NAM9 unknown; RNAM is the rest state
        for tag in [b"SNAM", b"NAM9", b"RNAM"] {
            if reader.is_next_sub(tag)? {
                reader.skip_h_sub()?;
            }
        }

        let bounty = reader.read_hno_struct(b"CNAM")?.unwrap_or(0);
        let birthsign = reader.read_hno_string(b"BNAM")?.unwrap_or_default();

        // last used alchemy apparatus
        for tag in [b"NAM0", b"NAM1", b"NAM2", b"NAM3"] {
            if reader.is_next_sub(tag)? {
                reader.skip_h_sub()?;
            }
        }

        let last_exterior = reader.read_hno_struct(b"ENAM")?;
        if reader.is_next_sub(b"LNAM")? {
            reader.skip_h_sub()?;
        }

        let mut factions = Vec::new();
        while let Some(fnam) = reader.read_hno_struct(b"FNAM")? {
            factions.push(fnam);
        }

        // attack animation, quick keys, animation state, werewolf stats
        for tag in [b"AADT", b"KNAM", b"ANIS", b"WERE"] {
            if reader.is_next_sub(tag)? {
                reader.skip_h_sub()?;
            }
        }

        Ok(Pcdt {
            known_topics,
            mark_cell,
            pnam,
            bounty,
            birthsign,
            last_exterior,
            factions,
        })
    }
}
