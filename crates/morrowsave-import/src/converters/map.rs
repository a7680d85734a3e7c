//! `FMAP`: the global map.

use std::io::Write;

use morrowsave_common::ChunkWriter;
use morrowsave_ess::Fmap;
use morrowsave_omw::{Bounds, GlobalMap};

use crate::context::Context;
use crate::Result;

#[derive(Debug, Default)]
pub struct WorldMap {
    map: Option<Fmap>,
}

/// Cell bounds of a square map `cells` wide, centred on the origin.
///
/// The y axis runs from the top of the image down, so it is the x range
/// mirrored.
pub fn map_bounds(cells: i32) -> Bounds {
    Bounds {
        min_x: -cells / 2,
        max_x: (cells - 1) / 2,
        min_y: -(cells - 1) / 2,
        max_y: cells / 2,
    }
}

fn explored_bounds(ctx: &Context) -> Bounds {
    let mut cells = ctx.explored_cells.iter();
    let Some(&(x, y)) = cells.next() else {
        return Bounds::default();
    };
    cells.fold(
        Bounds {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        },
        |b, &(x, y)| Bounds {
            min_x: b.min_x.min(x),
            max_x: b.max_x.max(x),
            min_y: b.min_y.min(y),
            max_y: b.max_y.max(y),
        },
    )
}

impl WorldMap {
    pub fn read(&mut self, fmap: Fmap) {
        self.map = Some(fmap);
    }

    /// Without an `FMAP` the map is still written when cells were explored,
    /// with an empty image.
    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>, ctx: &Context) -> Result<()> {
        if self.map.is_none() && ctx.explored_cells.is_empty() {
            return Ok(());
        }
        let cells = self
            .map
            .as_ref()
            .map_or(0, |fmap| i32::try_from(fmap.num_cells()).unwrap_or(i32::MAX));
        let bounds = if cells > 0 {
            map_bounds(cells)
        } else {
            explored_bounds(ctx)
        };

        let map = GlobalMap {
            bounds,
            image: self.map.as_ref().map(|fmap| fmap.data.clone()).unwrap_or_default(),
            marked_cells: ctx.explored_cells.iter().copied().collect(),
        };
        writer.start_record(b"GMAP")?;
        map.save(writer)?;
        writer.end_record(b"GMAP")?;
        Ok(())
    }
}
