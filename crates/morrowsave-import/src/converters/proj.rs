//! `PROJ`: projectiles in flight.
//!
//! Written after the cells, since casters are named by indexed ref id and
//! only placed actors have an actor id.

use std::io::Write;

use morrowsave_common::ChunkWriter;
use morrowsave_ess::{Proj, Projectile};
use morrowsave_omw::projectile::orientation_towards;
use morrowsave_omw::{BaseProjectileState, MagicBoltState, ProjectileState};
use tracing::warn;

use crate::context::Context;
use crate::Result;

/// Legacy bolt speeds are in thousandths of a unit.
const MAGIC_BOLT_SPEED_SCALE: f32 = 0.001;

#[derive(Debug, Default)]
pub struct Projectiles {
    projectiles: Vec<Projectile>,
}

impl Projectiles {
    pub fn read(&mut self, proj: Proj) {
        self.projectiles.extend(proj.projectiles);
    }

    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>, ctx: &mut Context) -> Result<()> {
        for pnam in &self.projectiles {
            let caster = ctx.fixed_string(&pnam.actor_id);
            let Some(actor_id) = ctx.resolve_actor_id(&caster) else {
                warn!(%caster, "projectile caster was never placed, skipping projectile");
                ctx.summary.skipped_projectiles += 1;
                continue;
            };
            let base = BaseProjectileState {
                id: ctx.fixed_string(&pnam.arrow_id),
                position: pnam.position,
                orientation: orientation_towards(pnam.velocity),
                actor_id,
            };

            if !pnam.is_magic() {
                let state = ProjectileState {
                    base,
                    bow_id: ctx.fixed_string(&pnam.bow_id),
                    velocity: pnam.velocity,
                    attack_strength: pnam.attack_strength,
                };
                writer.start_record(b"PROJ")?;
                state.save(writer)?;
                writer.end_record(b"PROJ")?;
                continue;
            }

            let spell_id = ctx
                .active_spells
                .get(&pnam.splm_index)
                .map(|spell| ctx.fixed_string(&spell.spdt.id));
            let Some(spell_id) = spell_id else {
                warn!(index = pnam.splm_index, "magic bolt links to no active spell, skipping projectile");
                ctx.summary.skipped_projectiles += 1;
                continue;
            };
            let state = MagicBoltState {
                base,
                spell_id,
                speed: pnam.speed * MAGIC_BOLT_SPEED_SCALE,
                slot: 0,
            };
            writer.start_record(b"MPRJ")?;
            state.save(writer)?;
            writer.end_record(b"MPRJ")?;
        }
        Ok(())
    }
}
