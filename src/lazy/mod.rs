//! Segment trees with lazy range updates.
//!
//! A [`SegTree`] is parameterized by an operation set implementing
//! [`LazyOps`]: how to read an element, how to merge two aggregates, and how a
//! range update changes an aggregate. Ready-made operation sets live in
//! [`bits`] and [`add`]; [`FnOps`] wraps plain closures.
//!
//! # Pending deltas
//!
//! An update that covers a whole node is applied to that node and parked in
//! the children's pending slots. When a child already holds an older delta the
//! default rule materializes the older one into the child's value, stores the
//! newer one, and sends the older one further down. This keeps the order of
//! updates intact for any delta type, including non-commuting ones such as
//! "fill" followed by "invert".
//!
//! Operation sets whose deltas can be folded together override
//! [`LazyOps::compose`], which turns the cascade into a single store.

pub mod add;
pub mod bits;
mod seg_tree;

pub use seg_tree::BuildError;
pub use seg_tree::SegTree;
pub use seg_tree::Slot;

use std::fmt;
use std::marker::PhantomData;

use crate::segment::Segment;

/// The operations a [`SegTree`] is built from.
///
/// `C` is the backing container the tree reads its leaves from.
pub trait LazyOps<C: ?Sized> {
    /// Aggregate stored in every node.
    type Value: Clone;
    /// Range update.
    type Delta: Clone;

    /// Leaf aggregate for the element at `index`.
    fn access(&self, sequence: &C, index: usize) -> Self::Value;

    /// Combine the aggregates of two adjacent segments, `left` first.
    /// Must be associative; need not be commutative.
    fn merge(&self, left: &Self::Value, right: &Self::Value) -> Self::Value;

    /// Aggregate of `segment` after `delta` is applied to every element of it.
    ///
    /// Must be total over the delta domain. Panicking is the right answer for
    /// a delta that cannot occur.
    fn apply(&self, segment: Segment, value: &Self::Value, delta: &Self::Delta) -> Self::Value;

    /// A single delta equivalent to `older` followed by `newer`, if one exists.
    ///
    /// Returning `None` (the default) keeps the deltas separate.
    fn compose(&self, older: &Self::Delta, newer: &Self::Delta) -> Option<Self::Delta> {
        let _ = (older, newer);
        None
    }
}

/// An operation set made of three functions.
pub struct FnOps<T, U, A, M, P> {
    access: A,
    merge: M,
    apply: P,
    _marker: PhantomData<fn() -> (T, U)>,
}

impl<T, U, A, M, P> FnOps<T, U, A, M, P> {
    pub fn new<C: ?Sized>(access: A, merge: M, apply: P) -> Self
    where
        A: Fn(&C, usize) -> T,
        M: Fn(&T, &T) -> T,
        P: Fn(Segment, &T, &U) -> T,
    {
        FnOps { access, merge, apply, _marker: PhantomData }
    }
}

impl<C, T, U, A, M, P> LazyOps<C> for FnOps<T, U, A, M, P>
where
    C: ?Sized,
    T: Clone,
    U: Clone,
    A: Fn(&C, usize) -> T,
    M: Fn(&T, &T) -> T,
    P: Fn(Segment, &T, &U) -> T,
{
    type Value = T;
    type Delta = U;

    fn access(&self, sequence: &C, index: usize) -> T {
        (self.access)(sequence, index)
    }

    fn merge(&self, left: &T, right: &T) -> T {
        (self.merge)(left, right)
    }

    fn apply(&self, segment: Segment, value: &T, delta: &U) -> T {
        (self.apply)(segment, value, delta)
    }
}

impl<T, U, A, M, P> fmt::Debug for FnOps<T, U, A, M, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOps").finish_non_exhaustive()
    }
}
