//! The lazy segment tree itself.
//!
//! Structure:
//! - Nodes live in a `BinaryTree` arena, built bottom-up once
//! - Each node stores its aggregate and an optional pending delta
//! - A node's segment is never stored; it is recomputed on the way down by
//!   splitting the parent's segment at its midpoint
//!
//! Operations:
//! - build: O(n)
//! - query: O(log n)
//! - update: O(log n), plus any cascade of older pending deltas

use std::fmt;

use super::FnOps;
use super::LazyOps;
use crate::profiling;
use crate::segment::Segment;
use crate::sequence::Sequence;
use crate::tree::BinaryTree;
use crate::tree::NodeIdx;

/// Error returned when a tree cannot be built over a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// There are no elements to build over.
    EmptySequence,
    /// More leaves were requested than the sequence has elements.
    SizeExceedsSequence { size: usize, len: usize },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptySequence => write!(f, "cannot build a segment tree over zero elements"),
            BuildError::SizeExceedsSequence { size, len } => {
                write!(f, "tree size {} exceeds sequence length {}", size, len)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Per-node state: the aggregate and the delta not yet applied to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot<T, U> {
    pub value: T,
    pub pending: Option<U>,
}

/// A segment tree over the first `size` elements of a sequence.
pub struct SegTree<C, O: LazyOps<C>> {
    sequence: C,
    ops: O,
    size: usize,
    arena: BinaryTree<Slot<O::Value, O::Delta>>,
    root: NodeIdx,
}

impl<C: Sequence, O: LazyOps<C>> SegTree<C, O> {
    /// Build a tree covering every element of `sequence`.
    pub fn new(sequence: C, ops: O) -> Result<Self, BuildError> {
        let size = sequence.len();
        return Self::with_size(sequence, size, ops);
    }

    /// Build a tree covering indices `0..size` of `sequence`.
    pub fn with_size(sequence: C, size: usize, ops: O) -> Result<Self, BuildError> {
        if size == 0 {
            return Err(BuildError::EmptySequence);
        }
        let len = sequence.len();
        if size > len {
            return Err(BuildError::SizeExceedsSequence { size, len });
        }

        let mut arena = BinaryTree::with_capacity(2 * size - 1);
        let root = build(&mut arena, &sequence, &ops, Segment::new(0, size - 1));
        arena.set_root(root);

        return Ok(SegTree { sequence, ops, size, arena, root });
    }
}

impl<C, T, U, A, M, P> SegTree<C, FnOps<T, U, A, M, P>>
where
    C: Sequence,
    T: Clone,
    U: Clone,
    A: Fn(&C, usize) -> T,
    M: Fn(&T, &T) -> T,
    P: Fn(Segment, &T, &U) -> T,
{
    /// Build a tree from three functions instead of a [`LazyOps`] type.
    pub fn from_fns(sequence: C, access: A, merge: M, apply: P) -> Result<Self, BuildError> {
        return Self::new(sequence, FnOps::new::<C>(access, merge, apply));
    }
}

/// Build the subtree covering `segment`, returning its root.
fn build<C, O: LazyOps<C>>(
    arena: &mut BinaryTree<Slot<O::Value, O::Delta>>,
    sequence: &C,
    ops: &O,
    segment: Segment,
) -> NodeIdx {
    if segment.is_point() {
        let value = ops.access(sequence, segment.lower);
        return arena.push_leaf(Slot { value, pending: None });
    }

    let (left_seg, right_seg) = segment.halves();
    let left = build(arena, sequence, ops, left_seg);
    let right = build(arena, sequence, ops, right_seg);
    let value = ops.merge(&arena.value(left).value, &arena.value(right).value);
    return arena.push(Slot { value, pending: None }, Some(left), Some(right));
}

impl<C, O: LazyOps<C>> SegTree<C, O> {
    /// Number of leaves, fixed at construction.
    pub fn size(&self) -> usize {
        return self.size;
    }

    /// The segment covered by the root, `[0, size - 1]`.
    pub fn domain(&self) -> Segment {
        return Segment::new(0, self.size - 1);
    }

    /// Height counted in nodes; a single leaf has height 1.
    pub fn height(&self) -> usize {
        return self.arena.height();
    }

    pub fn sequence(&self) -> &C {
        return &self.sequence;
    }

    pub fn ops(&self) -> &O {
        return &self.ops;
    }

    /// Read-only view of the node arena.
    pub fn skeleton(&self) -> &BinaryTree<Slot<O::Value, O::Delta>> {
        return &self.arena;
    }

    /// Number of nodes currently holding a pending delta.
    pub fn pending_count(&self) -> usize {
        return self.arena.preorder().filter(|&idx| self.arena.value(idx).pending.is_some()).count();
    }

    /// Merged aggregate over `range ∩ [0, size - 1]`, or `None` if that is empty.
    pub fn query(&mut self, range: impl Into<Segment>) -> Option<O::Value> {
        let range = range.into();
        if range.is_empty() {
            return None;
        }
        return self.query_node(self.root, self.domain(), range);
    }

    /// Aggregate of the single element at `index`.
    pub fn get(&mut self, index: usize) -> Option<O::Value> {
        return self.query(Segment::point(index));
    }

    /// Apply `delta` to every element in `range ∩ [0, size - 1]`.
    pub fn update(&mut self, range: impl Into<Segment>, delta: O::Delta) {
        let range = range.into();
        if range.is_empty() {
            return;
        }
        self.update_node(self.root, self.domain(), range, &delta);
    }

    /// Push every pending delta all the way down to the leaves.
    pub fn flush_all(&mut self) {
        self.flush_subtree(self.root, self.domain());
    }

    /// Current leaf aggregates, left to right.
    pub fn values(&mut self) -> Vec<O::Value> {
        self.flush_all();
        return self.arena.leaves().map(|idx| self.arena.value(idx).value.clone()).collect();
    }

    fn query_node(&mut self, node: NodeIdx, segment: Segment, range: Segment) -> Option<O::Value> {
        if !segment.overlaps(&range) {
            return None;
        }

        self.flush(node, segment);

        if range.contains(&segment) {
            return Some(self.arena.value(node).value.clone());
        }

        let (left, right) = self.arena.children(node);
        let (left_seg, right_seg) = segment.halves();
        let left = left.and_then(|l| self.query_node(l, left_seg, range));
        let right = right.and_then(|r| self.query_node(r, right_seg, range));

        return match (left, right) {
            (Some(l), Some(r)) => Some(self.ops.merge(&l, &r)),
            (l, None) => l,
            (None, r) => r,
        };
    }

    fn update_node(&mut self, node: NodeIdx, segment: Segment, range: Segment, delta: &O::Delta) {
        // Flush before the overlap test: a parent re-merging after a partial
        // update reads this node's value even when it was not touched.
        self.flush(node, segment);

        if !segment.overlaps(&range) {
            return;
        }

        if range.contains(&segment) {
            let slot = self.arena.value_mut(node);
            slot.value = self.ops.apply(segment, &slot.value, delta);
            self.push_children(node, segment, delta);
            return;
        }

        let (Some(left), Some(right)) = self.arena.children(node) else {
            return;
        };
        let (left_seg, right_seg) = segment.halves();
        self.update_node(left, left_seg, range, delta);
        self.update_node(right, right_seg, range, delta);

        let value = self.ops.merge(&self.arena.value(left).value, &self.arena.value(right).value);
        self.arena.value_mut(node).value = value;
    }

    /// Apply this node's pending delta to its value and hand it to the children.
    fn flush(&mut self, node: NodeIdx, segment: Segment) {
        let Some(delta) = self.arena.value_mut(node).pending.take() else {
            return;
        };
        profiling::flush();

        self.push_children(node, segment, &delta);
        let slot = self.arena.value_mut(node);
        slot.value = self.ops.apply(segment, &slot.value, &delta);
    }

    fn push_children(&mut self, node: NodeIdx, segment: Segment, delta: &O::Delta) {
        let (Some(left), Some(right)) = self.arena.children(node) else {
            return;
        };
        let (left_seg, right_seg) = segment.halves();
        self.push(left, left_seg, delta);
        self.push(right, right_seg, delta);
    }

    /// Park `delta` in this node's pending slot.
    ///
    /// An older delta already parked there is either composed with the new
    /// one or applied to the node and pushed one level further down, so it is
    /// never lost and always lands before `delta`.
    fn push(&mut self, node: NodeIdx, segment: Segment, delta: &O::Delta) {
        profiling::push();

        let slot = self.arena.value_mut(node);
        let Some(existing) = slot.pending.take() else {
            slot.pending = Some(delta.clone());
            return;
        };

        if let Some(composed) = self.ops.compose(&existing, delta) {
            profiling::compose();
            slot.pending = Some(composed);
            return;
        }

        slot.value = self.ops.apply(segment, &slot.value, &existing);
        slot.pending = Some(delta.clone());

        if !self.arena.is_leaf(node) {
            profiling::cascade();
            self.push_children(node, segment, &existing);
        }
    }

    fn flush_subtree(&mut self, node: NodeIdx, segment: Segment) {
        self.flush(node, segment);
        let (Some(left), Some(right)) = self.arena.children(node) else {
            return;
        };
        let (left_seg, right_seg) = segment.halves();
        self.flush_subtree(left, left_seg);
        self.flush_subtree(right, right_seg);
    }
}

impl<C, O> fmt::Debug for SegTree<C, O>
where
    O: LazyOps<C>,
    O::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegTree")
            .field("size", &self.size)
            .field("height", &self.height())
            .field("pending", &self.pending_count())
            .field("root", &self.arena.value(self.root).value)
            .finish()
    }
}
