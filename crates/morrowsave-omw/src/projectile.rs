//! `PROJ` and `MPRJ`: projectiles in flight.

use std::io::Write;

use morrowsave_common::ChunkWriter;

use crate::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseProjectileState {
    pub id: String,
    pub position: [f32; 3],
    /// Quaternion as `x, y, z, w`.
    pub orientation: [f32; 4],
    pub actor_id: i32,
}

impl BaseProjectileState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.write_hn_string(b"ID__", &self.id)?;
        writer.write_hn_struct(b"VEC3", &self.position)?;
        writer.write_hn_struct(b"QUAT", &self.orientation)?;
        writer.write_hn_i32(b"ACTO", self.actor_id)?;
        Ok(())
    }
}

/// Arrow, bolt or thrown weapon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectileState {
    pub base: BaseProjectileState,
    pub bow_id: String,
    pub velocity: [f32; 3],
    pub attack_strength: f32,
}

impl ProjectileState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        self.base.save(writer)?;
        writer.write_hn_string(b"BOW_", &self.bow_id)?;
        writer.write_hn_struct(b"VEL_", &self.velocity)?;
        writer.write_hn_f32(b"STR_", self.attack_strength)?;
        Ok(())
    }
}

/// Spell projectile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MagicBoltState {
    pub base: BaseProjectileState,
    pub spell_id: String,
    pub speed: f32,
    pub slot: i32,
}

impl MagicBoltState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        self.base.save(writer)?;
        writer.write_hn_string(b"SPEL", &self.spell_id)?;
        writer.write_hn_f32(b"SPED", self.speed)?;
        writer.write_hn_i32(b"SLOT", self.slot)?;
        Ok(())
    }
}

/// Rotation taking the forward axis `(0, 1, 0)` onto `direction`, as an
/// `x, y, z, w` quaternion.
pub fn orientation_towards(direction: [f32; 3]) -> [f32; 4] {
    let len = (direction[0].powi(2) + direction[1].powi(2) + direction[2].powi(2)).sqrt();
    if len == 0.0 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let [x, y, z] = direction.map(|c| c / len);

    // cross((0, 1, 0), d) and dot((0, 1, 0), d)
    let (cx, cy, cz) = (z, 0.0, -x);
    let dot = y;

    if dot < -1.0 + 1e-6 {
        // opposite: half turn about any perpendicular axis
        return [0.0, 0.0, 1.0, 0.0];
    }
    let s = ((1.0 + dot) * 2.0).sqrt();
    [cx / s, cy / s, cz / s, s * 0.5]
}
