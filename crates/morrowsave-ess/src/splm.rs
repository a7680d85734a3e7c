//! `SPLM`: active spells and their effects.

use morrowsave_common::{ChunkReader, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::Result;

/// `SPDT`: the spell itself.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct SpellData {
    /// 0 = spell, 1 = enchantment, 2 = potion, 3 = ingredient.
    pub kind: i32,
    pub id: [u8; 32],
    pub unknown: [u8; 16],
    pub caster_id: [u8; 32],
    pub source_id: [u8; 32],
    pub unknown2: [u8; 44],
}

impl SpellData {
    pub const SIZE: usize = 160;
}

/// `NPDT`: one effect on one actor.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EffectData {
    pub affected_actor_id: [u8; 32],
    pub unknown: [u8; 8],
    pub magnitude: i32,
    pub seconds_active: f32,
    pub unknown2: [u8; 8],
}

impl EffectData {
    pub const SIZE: usize = 56;
}

/// `INAM`: item the effect is tied to.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EffectItem {
    pub unknown: i32,
    pub unknown2: u8,
    pub item_id: [u8; 35],
}

/// `CNAM`: script or summon linked to the effect.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EffectCaster {
    pub unknown: i32,
    pub id: [u8; 32],
}

#[derive(Debug, Clone)]
pub struct ActiveEffect {
    pub npdt: EffectData,
    pub item: Option<EffectItem>,
    pub caster: Option<EffectCaster>,
    pub vnam: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct ActiveSpell {
    pub index: i32,
    pub spdt: SpellData,
    pub target: Option<String>,
    pub effects: Vec<ActiveEffect>,
}

#[derive(Debug, Clone, Default)]
pub struct Splm {
    pub spells: Vec<ActiveSpell>,
}

impl Splm {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let mut spells = Vec::new();
        while reader.is_next_sub(b"NAME")? {
            let index = reader.read_h_struct()?;
            let spdt = reader.read_hn_struct(b"SPDT")?;
            let target = reader.read_hno_string(b"TNAM")?;

            let mut effects = Vec::new();
            while let Some(npdt) = reader.read_hno_struct(b"NPDT")? {
                effects.push(ActiveEffect {
                    npdt,
                    item: reader.read_hno_struct(b"INAM")?,
                    caster: reader.read_hno_struct(b"CNAM")?,
                    vnam: reader.read_hno_struct(b"VNAM")?,
                });
            }

            // zero or more bytes, meaning unknown
            if reader.is_next_sub(b"XNAM")? {
                reader.skip_h_sub()?;
            }

            spells.push(ActiveSpell {
                index,
                spdt,
                target,
                effects,
            });
        }
        Ok(Splm { spells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::{ChunkWriter, Encoding};

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<SpellData>(), SpellData::SIZE);
        assert_eq!(std::mem::size_of::<EffectData>(), EffectData::SIZE);
        assert_eq!(std::mem::size_of::<EffectItem>(), 40);
        assert_eq!(std::mem::size_of::<EffectCaster>(), 36);
    }

    #[test]
    fn test_spells_with_effects() {
        let mut spdt = SpellData::read_from_bytes(&[0u8; SpellData::SIZE]).unwrap();
        spdt.id[..8].copy_from_slice(b"fireball");
        let npdt = EffectData::read_from_bytes(&[0u8; EffectData::SIZE]).unwrap();

        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"SPLM").unwrap();
        writer.write_hn_i32(b"NAME", 3).unwrap();
        writer.write_hn_struct(b"SPDT", &spdt).unwrap();
        writer.write_hn_string(b"TNAM", "PlayerSaveGame").unwrap();
        writer.write_hn_struct(b"NPDT", &npdt).unwrap();
        writer.write_hn_i32(b"VNAM", 1).unwrap();
        writer.write_hn_struct(b"NPDT", &npdt).unwrap();
        writer.write_hn_u8(b"XNAM", 0).unwrap();
        writer.write_hn_i32(b"NAME", 4).unwrap();
        writer.write_hn_struct(b"SPDT", &spdt).unwrap();
        writer.end_record(b"SPLM").unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = ChunkReader::new(&data, Encoding::Win1252);
        reader.next_record_name().unwrap();
        reader.record_header().unwrap();
        let splm = Splm::load(&mut reader).unwrap();

        assert_eq!(splm.spells.len(), 2);
        assert_eq!(splm.spells[0].index, 3);
        assert_eq!(splm.spells[0].target.as_deref(), Some("PlayerSaveGame"));
        assert_eq!(splm.spells[0].effects.len(), 2);
        assert_eq!(splm.spells[0].effects[0].vnam, Some(1));
        assert_eq!(splm.spells[1].index, 4);
        assert!(splm.spells[1].effects.is_empty());
        assert!(!reader.has_more_subs());
    }
}
