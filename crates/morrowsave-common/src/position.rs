use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// World position and Euler rotation, as stored by both save formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Position {
    pub pos: [f32; 3],
    pub rot: [f32; 3],
}

impl Position {
    pub const SIZE: usize = 24;
}
