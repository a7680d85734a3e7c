//! Counters reported at the end of a run.

use std::fmt;

use morrowsave_common::Tag;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub records_read: usize,
    /// Distinct record tags with no converter, in first-seen order.
    pub unknown_tags: Vec<Tag>,
    pub records_written: usize,
    pub cells_written: usize,
    pub generic_objects: usize,
    pub npcs: usize,
    pub creatures: usize,
    pub containers: usize,
    pub actor_ids_issued: usize,
    /// Change records whose object was never placed.
    pub unmerged_deltas: usize,
    pub skipped_projectiles: usize,
}

impl ImportSummary {
    pub fn placed_objects(&self) -> usize {
        self.generic_objects + self.npcs + self.creatures + self.containers
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Records read:     {}", self.records_read)?;
        writeln!(f, "Records written:  {}", self.records_written)?;
        writeln!(f, "Cells:            {}", self.cells_written)?;
        writeln!(
            f,
            "Placed objects:   {} ({} generic, {} NPCs, {} creatures, {} containers)",
            self.placed_objects(),
            self.generic_objects,
            self.npcs,
            self.creatures,
            self.containers
        )?;
        writeln!(f, "Actor ids issued: {}", self.actor_ids_issued)?;
        writeln!(f, "Unmerged deltas:  {}", self.unmerged_deltas)?;
        writeln!(f, "Skipped projectiles: {}", self.skipped_projectiles)?;
        if !self.unknown_tags.is_empty() {
            let tags: Vec<String> = self.unknown_tags.iter().map(Tag::to_string).collect();
            write!(f, "Unknown records:  {}", tags.join(", "))?;
        }
        Ok(())
    }
}
