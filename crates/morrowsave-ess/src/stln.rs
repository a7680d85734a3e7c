//! `STLN`: stolen item ledger.

use morrowsave_common::ChunkReader;

use crate::Result;

/// Who an item was stolen from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Faction(String),
    Npc(String),
}

/// One stolen item and every owner it was taken from. Ids are lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StolenItem {
    pub item: String,
    pub owners: Vec<Owner>,
}

impl StolenItem {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let item = reader.read_hn_string(b"NAME")?.to_lowercase();
        let mut owners = Vec::new();
        while let Some(tag) = reader.peek_sub_name()? {
            if tag == b"FNAM" {
                reader.next_sub_name()?;
                owners.push(Owner::Faction(reader.read_h_string()?.to_lowercase()));
            } else if tag == b"ONAM" {
                reader.next_sub_name()?;
                owners.push(Owner::Npc(reader.read_h_string()?.to_lowercase()));
            } else {
                break;
            }
        }
        Ok(StolenItem { item, owners })
    }
}
