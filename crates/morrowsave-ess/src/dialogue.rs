//! Dialogue, journal and quest records.
//!
//! Only `DIAL` carries anything the target keeps; the other three are
//! decoded so that their grammar is checked, then dropped.

use morrowsave_common::ChunkReader;

use crate::Result;

/// `DIAL`: journal progress of one topic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dial {
    pub kind: Option<i32>,
    pub deleted: bool,
    /// Journal index, `0` when the quest was never started.
    pub index: i32,
}

impl Dial {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let kind = reader.read_hno_struct(b"DATA")?;
        let deleted = reader.read_hno_struct::<i32>(b"DELE")?.is_some();
        let index = reader.read_hno_struct(b"XIDX")?.unwrap_or(0);
        Ok(Dial {
            kind,
            deleted,
            index,
        })
    }
}

/// `INFO`: a dialogue response that was said.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    pub info: String,
    pub actor: String,
}

impl Info {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let info = reader.read_hn_string(b"INAM")?;
        let actor = reader.read_hn_string(b"ACDT")?;
        Ok(Info { info, actor })
    }
}

/// `QUES`: journal entries of one quest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ques {
    pub entries: Vec<String>,
}

impl Ques {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let mut entries = Vec::new();
        while reader.is_next_sub(b"DATA")? {
            entries.push(reader.read_h_string()?);
        }
        Ok(Ques { entries })
    }
}

/// `JOUR`: journal text as HTML.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Jour {
    pub text: String,
}

impl Jour {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        let text = reader.read_hn_string(b"NAME")?;
        Ok(Jour { text })
    }
}
