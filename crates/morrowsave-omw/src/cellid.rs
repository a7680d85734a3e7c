//! Cell identifiers.

use std::io::Write;

use morrowsave_common::ChunkWriter;

use crate::Result;

/// Worldspace name of the exterior.
pub const DEFAULT_WORLDSPACE: &str = "sys::default";

/// Width of an exterior cell in world units.
pub const CELL_SIZE: f32 = 8192.0;

/// An interior cell by name, or an exterior cell by grid index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellId {
    /// Cell name for interiors, [`DEFAULT_WORLDSPACE`] for exteriors.
    pub worldspace: String,
    /// Grid index, only for exteriors.
    pub index: Option<(i32, i32)>,
}

impl CellId {
    pub fn interior(name: impl Into<String>) -> Self {
        Self {
            worldspace: name.into(),
            index: None,
        }
    }

    pub fn exterior(x: i32, y: i32) -> Self {
        Self {
            worldspace: DEFAULT_WORLDSPACE.to_string(),
            index: Some((x, y)),
        }
    }

    /// Exterior cell containing a world position.
    pub fn containing(x: f32, y: f32) -> Self {
        Self::exterior((x / CELL_SIZE).floor() as i32, (y / CELL_SIZE).floor() as i32)
    }

    pub fn is_exterior(&self) -> bool {
        self.index.is_some()
    }

    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.write_hn_string(b"SPAC", &self.worldspace)?;
        if let Some((x, y)) = self.index {
            writer.start_sub(b"CIDX")?;
            writer.write_i32(x)?;
            writer.write_i32(y)?;
            writer.end_sub()?;
        }
        Ok(())
    }
}

impl Default for CellId {
    fn default() -> Self {
        Self::exterior(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_cell() {
        assert_eq!(CellId::containing(100.0, 100.0), CellId::exterior(0, 0));
        assert_eq!(CellId::containing(-1.0, 8192.0), CellId::exterior(-1, 1));
        assert_eq!(CellId::containing(-8193.0, -16384.0), CellId::exterior(-2, -2));
    }
}
