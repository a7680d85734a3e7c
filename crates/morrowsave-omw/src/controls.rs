//! `INPU`: which player controls scripts have disabled.

use std::io::Write;

use bitflags::bitflags;
use morrowsave_common::ChunkWriter;

use crate::Result;

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ControlsFlags: i32 {
        const VIEW_SWITCH_DISABLED = 0x1;
        const CONTROLS_DISABLED = 0x4;
        const JUMPING_DISABLED = 0x1000;
        const LOOKING_DISABLED = 0x2000;
        const VANITY_MODE_DISABLED = 0x4000;
        const WEAPON_DRAWING_DISABLED = 0x8000;
        const SPELL_DRAWING_DISABLED = 0x10000;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlsState {
    pub flags: ControlsFlags,
}

impl ControlsState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        if !self.flags.is_empty() {
            writer.write_hn_i32(b"CFLG", self.flags.bits())?;
        }
        Ok(())
    }
}
