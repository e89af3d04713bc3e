//! Counting set bits in a bit string under fill / empty / invert updates.
//!
//! The backing sequence is any byte string of `'0'` and `'1'` characters.
//! Any byte other than `'1'` reads as unset.

use std::fmt;

use super::LazyOps;
use crate::segment::Segment;

/// A range update on a bit string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitOp {
    /// Set every bit.
    Fill,
    /// Clear every bit.
    Empty,
    /// Flip every bit.
    Invert,
}

impl BitOp {
    /// Single-letter tag: `F`, `E` or `I`.
    pub fn tag(self) -> char {
        match self {
            BitOp::Fill => 'F',
            BitOp::Empty => 'E',
            BitOp::Invert => 'I',
        }
    }
}

/// Error returned when a tag names no [`BitOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownBitOp(pub char);

impl fmt::Display for UnknownBitOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown bit operation {:?}", self.0)
    }
}

impl std::error::Error for UnknownBitOp {}

impl TryFrom<char> for BitOp {
    type Error = UnknownBitOp;

    fn try_from(tag: char) -> Result<BitOp, UnknownBitOp> {
        match tag {
            'F' => Ok(BitOp::Fill),
            'E' => Ok(BitOp::Empty),
            'I' => Ok(BitOp::Invert),
            other => Err(UnknownBitOp(other)),
        }
    }
}

impl TryFrom<u8> for BitOp {
    type Error = UnknownBitOp;

    fn try_from(tag: u8) -> Result<BitOp, UnknownBitOp> {
        BitOp::try_from(tag as char)
    }
}

/// Aggregates a bit string into the number of set bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitCount;

impl<C: AsRef<[u8]> + ?Sized> LazyOps<C> for BitCount {
    type Value = usize;
    type Delta = BitOp;

    fn access(&self, sequence: &C, index: usize) -> usize {
        (sequence.as_ref()[index] == b'1') as usize
    }

    fn merge(&self, left: &usize, right: &usize) -> usize {
        left + right
    }

    fn apply(&self, segment: Segment, value: &usize, delta: &BitOp) -> usize {
        match delta {
            BitOp::Fill => segment.len(),
            BitOp::Empty => 0,
            BitOp::Invert => segment.len() - value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::SegTree;

    #[test]
    fn tags_round_trip() {
        for op in [BitOp::Fill, BitOp::Empty, BitOp::Invert] {
            assert_eq!(BitOp::try_from(op.tag()), Ok(op));
        }
        assert_eq!(BitOp::try_from(b'S'), Err(UnknownBitOp('S')));
        assert_eq!(UnknownBitOp('x').to_string(), "unknown bit operation 'x'");
    }

    #[test]
    fn counts_initial_bits() {
        let mut tree = SegTree::new("0110100111", BitCount).unwrap();
        assert_eq!(tree.query(0..=9), Some(6));
        assert_eq!(tree.query(1..=2), Some(2));
        assert_eq!(tree.query(3..=6), Some(1));
    }

    #[test]
    fn fill_empty_invert() {
        let mut tree = SegTree::new(vec![b'0'; 8], BitCount).unwrap();
        tree.update(2..=5, BitOp::Fill);
        assert_eq!(tree.query(0..=7), Some(4));
        tree.update(3..=3, BitOp::Empty);
        assert_eq!(tree.query(2..=5), Some(3));
        tree.update(0..=7, BitOp::Invert);
        assert_eq!(tree.query(0..=7), Some(5));
    }

    #[test]
    fn invert_twice_is_identity() {
        let mut tree = SegTree::new(String::from("1100101"), BitCount).unwrap();
        tree.update(0..=6, BitOp::Invert);
        tree.update(0..=6, BitOp::Invert);
        assert_eq!(tree.query(0..=6), Some(4));
        assert_eq!(tree.values(), vec![1, 1, 0, 0, 1, 0, 1]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_by_name() {
        let json = serde_json::to_string(&[BitOp::Fill, BitOp::Invert]).unwrap();
        assert_eq!(json, r#"["Fill","Invert"]"#);
    }
}
