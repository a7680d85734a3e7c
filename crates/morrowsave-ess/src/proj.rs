//! `PROJ`: arrows, bolts and spell projectiles in flight.

use morrowsave_common::{ChunkReader, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::Result;

/// `PNAM`: one projectile.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Projectile {
    pub attack_strength: f32,
    pub speed: f32,
    pub unknown: [u8; 8],
    pub flight_time: f32,
    /// Index of the linked `SPLM` entry; zero for physical projectiles.
    pub splm_index: i32,
    pub unknown2: [u8; 4],
    pub velocity: [f32; 3],
    pub position: [f32; 3],
    pub unknown3: [u8; 36],
    pub actor_id: [u8; 32],
    pub arrow_id: [u8; 32],
    pub bow_id: [u8; 32],
}

impl Projectile {
    pub const SIZE: usize = 184;

    pub fn is_magic(&self) -> bool {
        self.splm_index != 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Proj {
    pub projectiles: Vec<Projectile>,
}

impl Proj {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let mut projectiles = Vec::new();
        while let Some(pnam) = reader.read_hno_struct(b"PNAM")? {
            projectiles.push(pnam);
        }
        Ok(Proj { projectiles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::{ChunkWriter, Encoding};

    #[test]
    fn test_layout_size() {
        assert_eq!(std::mem::size_of::<Projectile>(), Projectile::SIZE);
    }

    #[test]
    fn test_repeated_projectiles() {
        let mut arrow = Projectile::read_from_bytes(&[0u8; Projectile::SIZE]).unwrap();
        arrow.speed = 1500.0;
        let mut bolt = arrow;
        bolt.splm_index = 3;

        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"PROJ").unwrap();
        writer.write_hn_struct(b"PNAM", &arrow).unwrap();
        writer.write_hn_struct(b"PNAM", &bolt).unwrap();
        writer.end_record(b"PROJ").unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = ChunkReader::new(&data, Encoding::Win1252);
        reader.next_record_name().unwrap();
        reader.record_header().unwrap();
        let proj = Proj::load(&mut reader).unwrap();
        assert_eq!(proj.projectiles.len(), 2);
        assert!(!proj.projectiles[0].is_magic());
        assert!(proj.projectiles[1].is_magic());
    }
}
