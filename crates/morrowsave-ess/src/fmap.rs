//! `FMAP`: the world map painted while exploring.

use morrowsave_common::{ChunkReader, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::Result;

/// `MAPH`: map dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct MapHeader {
    /// Width and height in pixels.
    pub size: u32,
    pub value: u32,
}

/// Cell width in map pixels.
pub const PIXELS_PER_CELL: u32 = 18;

#[derive(Debug, Clone, PartialEq)]
pub struct Fmap {
    pub header: MapHeader,
    /// RGB pixels, kept raw.
    pub data: Vec<u8>,
}

impl Fmap {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let header = reader.read_hn_struct(b"MAPH")?;
        reader.expect_sub(b"MAPD")?;
        let data = reader.read_h_bytes()?.to_vec();
        Ok(Fmap { header, data })
    }

    /// Number of cells along each edge of the map.
    pub fn num_cells(&self) -> u32 {
        self.header.size / PIXELS_PER_CELL
    }
}
