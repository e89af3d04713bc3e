//! Range add over range sum.
//!
//! Additive deltas fold into one another, so this operation set opts into
//! [`LazyOps::compose`] and a push never has to cascade.

use super::LazyOps;
use crate::segment::Segment;

/// Sums `i64` elements; deltas add a constant to every element of a range.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeAdd;

impl<C: AsRef<[i64]> + ?Sized> LazyOps<C> for RangeAdd {
    type Value = i64;
    type Delta = i64;

    fn access(&self, sequence: &C, index: usize) -> i64 {
        sequence.as_ref()[index]
    }

    fn merge(&self, left: &i64, right: &i64) -> i64 {
        left + right
    }

    fn apply(&self, segment: Segment, value: &i64, delta: &i64) -> i64 {
        value + delta * segment.len() as i64
    }

    fn compose(&self, older: &i64, newer: &i64) -> Option<i64> {
        Some(older + newer)
    }
}
