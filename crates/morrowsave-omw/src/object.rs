//! State shared by every placed object.

use std::io::Write;

use morrowsave_common::{ChunkWriter, Position};

use crate::cellref::CellRef;
use crate::locals::Locals;
use crate::Result;

/// One scripted animation (`PlayGroup` / `LoopGroup`).
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedAnimation {
    /// Lowercase animation group.
    pub group: String,
    pub time: f32,
    pub absolute: bool,
    pub loop_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationState {
    pub scripted_anims: Vec<ScriptedAnimation>,
}

impl AnimationState {
    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        for anim in &self.scripted_anims {
            writer.write_hn_string(b"ANIS", &anim.group)?;
            if anim.time > 0.0 {
                writer.write_hn_f32(b"TIME", anim.time)?;
            }
            if anim.absolute {
                writer.write_hn_bool(b"ABST", true)?;
            }
            writer.start_sub(b"COUN")?;
            writer.write_u64(anim.loop_count)?;
            writer.end_sub()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectState {
    pub cell_ref: CellRef,
    pub locals: Locals,
    pub enabled: bool,
    pub count: i32,
    pub position: Position,
    /// `false` for plain objects, where no subclass state follows.
    pub has_custom_state: bool,
    pub animation_state: AnimationState,
}

impl Default for ObjectState {
    fn default() -> Self {
        Self {
            cell_ref: CellRef::default(),
            locals: Locals::default(),
            enabled: true,
            count: 1,
            position: Position::default(),
            has_custom_state: true,
            animation_state: AnimationState::default(),
        }
    }
}

impl ObjectState {
    /// Plain placed object with no actor or container state.
    pub fn blank() -> Self {
        Self {
            has_custom_state: false,
            ..Default::default()
        }
    }

    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>, in_inventory: bool) -> Result<()> {
        self.cell_ref.save(writer, in_inventory)?;

        if !self.locals.is_empty() {
            writer.write_hn_i32(b"HLOC", 1)?;
            self.locals.save(writer)?;
        }

        if !self.enabled && !in_inventory {
            writer.write_hn_i32(b"ENAB", 0)?;
        }
        if self.count != 1 {
            writer.write_hn_i32(b"COUN", self.count)?;
        }
        if !in_inventory {
            writer.write_hn_struct(b"POS_", &self.position)?;
        }
        if !self.has_custom_state {
            writer.write_hn_bool(b"HCUS", false)?;
        }

        self.animation_state.save(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locals::Variant;
    use morrowsave_common::{ChunkReader, Encoding, Tag};

    #[test]
    fn test_object_state_subrecords() {
        let state = ObjectState {
            locals: Locals {
                variables: vec![(String::new(), Variant::Short(1))],
            },
            enabled: false,
            count: 0,
            animation_state: AnimationState {
                scripted_anims: vec![ScriptedAnimation {
                    group: "idle2".into(),
                    time: 0.0,
                    absolute: true,
                    loop_count: u64::MAX,
                }],
            },
            ..ObjectState::blank()
        };

        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"TEST").unwrap();
        state.save(&mut writer, false).unwrap();
        writer.end_record(b"TEST").unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = ChunkReader::new(&data, Encoding::Win1252);
        reader.next_record_name().unwrap();
        reader.record_header().unwrap();
        let names = reader.skip_remaining_subs().unwrap();
        let expected: Vec<Tag> = [
            b"FRMR", b"NAME", b"DATA", b"HLOC", b"LOCA", b"STTV", b"ENAB", b"COUN", b"POS_",
            b"HCUS", b"ANIS", b"ABST", b"COUN",
        ]
        .iter()
        .map(|t| Tag::new(t))
        .collect();
        assert_eq!(names, expected);
    }
}
