//! Script local variables.

use std::io::Write;

use morrowsave_common::ChunkWriter;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Variant {
    Short(i16),
    Long(i32),
    Float(f32),
}

/// Local variables in declaration order.
///
/// Names are left empty when the source only had values; the engine then
/// matches them to the script's declarations by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Locals {
    pub variables: Vec<(String, Variant)>,
}

impl Locals {
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        for (name, value) in &self.variables {
            writer.write_hn_string(b"LOCA", name)?;
            match *value {
                Variant::Short(v) => writer.write_hn_bytes(b"STTV", &v.to_le_bytes())?,
                Variant::Long(v) => writer.write_hn_i32(b"INTV", v)?,
                Variant::Float(v) => writer.write_hn_f32(b"FLTV", v)?,
            }
        }
        Ok(())
    }
}
