//! Inclusive index ranges.
//!
//! Every node of a segment tree covers a `Segment` of the backing sequence,
//! and every query or update is expressed as one. Both bounds are inclusive,
//! so a single element `i` is `Segment::new(i, i)`.

use std::fmt;
use std::ops::RangeInclusive;

/// An inclusive range `[lower, upper]` of sequence indices.
///
/// A segment with `lower > upper` is empty. Empty segments never overlap
/// anything and are contained in everything.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub lower: usize,
    pub upper: usize,
}

impl Segment {
    pub const fn new(lower: usize, upper: usize) -> Segment {
        return Segment { lower, upper };
    }

    /// The segment covering a single index.
    pub const fn point(index: usize) -> Segment {
        return Segment { lower: index, upper: index };
    }

    /// Number of indices covered.
    pub const fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        return self.upper - self.lower + 1;
    }

    pub const fn is_empty(&self) -> bool {
        return self.lower > self.upper;
    }

    pub const fn is_point(&self) -> bool {
        return self.lower == self.upper;
    }

    /// Floor of `(lower + upper) / 2`, without overflowing.
    pub const fn mid(&self) -> usize {
        return self.lower + (self.upper - self.lower) / 2;
    }

    /// Split at `mid()`: the left half keeps the extra index of an
    /// odd-length segment.
    pub const fn halves(&self) -> (Segment, Segment) {
        let mid = self.mid();
        return (
            Segment { lower: self.lower, upper: mid },
            Segment { lower: mid + 1, upper: self.upper },
        );
    }

    /// Whether the two segments share at least one index.
    pub const fn overlaps(&self, other: &Segment) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        return self.lower <= other.upper && other.lower <= self.upper;
    }

    /// Whether every index of `other` lies in `self`.
    pub const fn contains(&self, other: &Segment) -> bool {
        if other.is_empty() {
            return true;
        }
        return self.lower <= other.lower && other.upper <= self.upper;
    }

    pub fn intersect(&self, other: &Segment) -> Option<Segment> {
        if !self.overlaps(other) {
            return None;
        }
        return Some(Segment {
            lower: self.lower.max(other.lower),
            upper: self.upper.min(other.upper),
        });
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        return self.lower..=self.upper;
    }
}

impl From<RangeInclusive<usize>> for Segment {
    fn from(range: RangeInclusive<usize>) -> Segment {
        return Segment::new(*range.start(), *range.end());
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Segment {
        return Segment::point(index);
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
