//! Script name and local variable values attached to an object.

use morrowsave_common::ChunkReader;

use crate::{Error, Result};

/// `SCRI` group: the script and the values of its locals.
///
/// The format stores no variable names, only values in declaration order
/// per type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptLocals {
    pub script: Option<String>,
    pub shorts: Vec<i16>,
    pub longs: Vec<i32>,
    pub floats: Vec<f32>,
}

impl ScriptLocals {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let mut locals = ScriptLocals {
            script: reader.read_hno_string(b"SCRI")?,
            ..Default::default()
        };

        let (mut num_shorts, mut num_longs, mut num_floats) = (0, 0, 0);
        if reader.is_next_sub(b"SLCS")? {
            reader.sub_header()?;
            num_shorts = count(reader.read_i32()?, "short count")?;
            num_longs = count(reader.read_i32()?, "long count")?;
            num_floats = count(reader.read_i32()?, "float count")?;
            reader.skip_sub_body()?;
        }

        if reader.is_next_sub(b"SLSD")? {
            reader.sub_header()?;
            for _ in 0..num_shorts {
                locals.shorts.push(reader.read_i16()?);
            }
            reader.skip_sub_body()?;
        }
        if reader.is_next_sub(b"SLLD")? {
            reader.sub_header()?;
            for _ in 0..num_longs {
                locals.longs.push(reader.read_i32()?);
            }
            reader.skip_sub_body()?;
        }
        if reader.is_next_sub(b"SLFD")? {
            reader.sub_header()?;
            for _ in 0..num_floats {
                locals.floats.push(reader.read_f32()?);
            }
            reader.skip_sub_body()?;
        }

        Ok(locals)
    }

    pub fn is_empty(&self) -> bool {
        self.shorts.is_empty() && self.longs.is_empty() && self.floats.is_empty()
    }
}

fn count(value: i32, field: &'static str) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::InvalidValue {
        field,
        value: value.into(),
    })
}
