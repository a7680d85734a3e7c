//! `DIAS`: known topics and changed faction reactions.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use morrowsave_common::ChunkWriter;

use crate::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogueState {
    /// Lowercase topic ids.
    pub known_topics: Vec<String>,
    /// Faction to other faction to reaction, all lowercase.
    pub changed_faction_reaction: BTreeMap<String, BTreeMap<String, i32>>,
}

impl DialogueState {
    pub fn add_topic(&mut self, topic: String) {
        if !self.known_topics.contains(&topic) {
            self.known_topics.push(topic);
        }
    }

    pub fn save<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        let mut seen = BTreeSet::new();
        for topic in &self.known_topics {
            if seen.insert(topic) {
                writer.write_hn_string(b"TOPI", topic)?;
            }
        }

        for (faction, reactions) in &self.changed_faction_reaction {
            writer.write_hn_string(b"FACT", faction)?;
            for (other, value) in reactions {
                writer.write_hn_string(b"REA2", other)?;
                writer.write_hn_i32(b"INTV", *value)?;
            }
        }
        Ok(())
    }
}
