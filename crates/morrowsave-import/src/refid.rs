//! Indexed reference ids and the composite key derived from them.
//!
//! Objects with change records are named in the legacy format by their
//! base id followed by an eight digit hex instance index, for example
//! `rat_0100000001`. Ids created in game are plain decimal numbers and
//! never have change records.

use std::fmt;

/// Width of the hex instance index.
const INDEX_DIGITS: usize = 8;

/// Case-insensitive identity of one placed object instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefKey {
    pub index: u32,
    /// Lowercase base id.
    pub id: String,
}

impl RefKey {
    pub fn new(index: u32, id: &str) -> Self {
        Self {
            index,
            id: id.to_lowercase(),
        }
    }

    /// Key of an indexed ref id, if it is one.
    pub fn from_indexed(indexed: &str) -> Option<Self> {
        split_indexed_ref_id(indexed).map(|(index, id)| Self::new(index, id))
    }

    /// The indexed ref id this key would be written as.
    pub fn to_indexed(&self) -> String {
        format!("{}{:08X}", self.id, self.index)
    }
}

impl fmt::Display for RefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.id, self.index)
    }
}

/// Whether `id` carries a base id and an instance index.
pub fn is_indexed_ref_id(id: &str) -> bool {
    if id.len() <= INDEX_DIGITS || id.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let split = id.len() - INDEX_DIGITS;
    id.is_char_boundary(split) && id[split..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Split an indexed ref id into its instance index and verbatim base id.
pub fn split_indexed_ref_id(id: &str) -> Option<(u32, &str)> {
    if !is_indexed_ref_id(id) {
        return None;
    }
    let (base, digits) = id.split_at(id.len() - INDEX_DIGITS);
    let index = u32::from_str_radix(digits, 16).ok()?;
    Some((index, base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_ids() {
        assert!(is_indexed_ref_id("rat_0100000001"));
        assert!(is_indexed_ref_id("chest_small_0100000aBc"));
        assert!(!is_indexed_ref_id("00000001"));
        assert!(!is_indexed_ref_id("123456789012"));
        assert!(!is_indexed_ref_id("flora_kelp_01"));
        assert!(!is_indexed_ref_id("PlayerSaveGame"));
    }

    #[test]
    fn test_split_keeps_prefix_verbatim() {
        assert_eq!(split_indexed_ref_id("Rat_01000000FF"), Some((0xff, "Rat_01")));
        assert_eq!(split_indexed_ref_id("fargoth"), None);
    }

    #[test]
    fn test_key_round_trip() {
        for id in ["rat_0100000001", "Daedroth_DEADBEEF", "x0000000a"] {
            let key = RefKey::from_indexed(id).unwrap();
            let indexed = key.to_indexed();
            assert!(is_indexed_ref_id(&indexed));
            assert_eq!(RefKey::from_indexed(&indexed), Some(key.clone()));
            assert!(indexed.eq_ignore_ascii_case(id));
        }
    }

    #[test]
    fn test_key_is_case_insensitive() {
        assert_eq!(RefKey::new(1, "Rat_01"), RefKey::new(1, "rat_01"));
        assert_ne!(RefKey::new(1, "rat_01"), RefKey::new(2, "rat_01"));
    }
}
