//! Four-character record and subrecord codes.

use std::fmt;

/// A four-character code naming a record or subrecord (`CELL`, `NAME`, ...).
///
/// Ordering follows the little-endian integer value of the code, which is
/// the order records of the same emission stage are written in.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Create a tag from its four bytes.
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }

    /// The raw bytes of the tag.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// The tag as a little-endian integer.
    pub const fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_u32().cmp(&other.to_u32())
    }
}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl PartialEq<&[u8; 4]> for Tag {
    fn eq(&self, other: &&[u8; 4]) -> bool {
        &self.0 == *other
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_order_is_little_endian() {
        // 'A' in the last byte outweighs 'Z' in the first
        assert!(Tag::new(b"ZAAA") < Tag::new(b"AAAB"));
        assert_eq!(Tag::new(b"CELL").to_u32(), u32::from_le_bytes(*b"CELL"));
    }

    #[test]
    fn test_display_escapes_binary() {
        assert_eq!(Tag::new(b"NPC_").to_string(), "NPC_");
        assert_eq!(Tag::new(&[0, b'A', b'B', b'C']).to_string(), "\\x00ABC");
    }

    #[test]
    fn test_compare_with_bytes() {
        assert!(Tag::new(b"FRMR") == b"FRMR");
    }
}
