//! `KLST`: kill counter.

use morrowsave_common::ChunkReader;

use crate::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KillCounter {
    /// Actor id and number of kills, in file order.
    pub kills: Vec<(String, i32)>,
    pub werewolf_kills: i32,
}

impl KillCounter {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let mut kills = Vec::new();
        while reader.is_next_sub(b"KNAM")? {
            let id = reader.read_h_string()?;
            let count = reader.read_hn_struct(b"CNAM")?;
            kills.push((id, count));
        }
        let werewolf_kills = reader.read_hno_struct(b"INTV")?.unwrap_or(0);
        Ok(KillCounter {
            kills,
            werewolf_kills,
        })
    }
}
