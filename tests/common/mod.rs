//! Shared helpers for the integration tests.
//!
//! `Oracle` is the naive reference: a flat array of leaf aggregates, updated
//! one element at a time and folded left to right on every query.

#![allow(dead_code)]

use lazytree::lazy::{FnOps, LazyOps, SegTree};
use lazytree::segment::Segment;

/// Flat-array reference model of a segment tree.
#[derive(Clone, Debug)]
pub struct Oracle<T> {
    pub values: Vec<T>,
}

impl<T: Clone> Oracle<T> {
    /// Read the leaves the same way the tree did at build time.
    pub fn from_tree<C, O>(tree: &SegTree<C, O>) -> Oracle<T>
    where
        O: LazyOps<C, Value = T>,
    {
        let values = (0..tree.size()).map(|i| tree.ops().access(tree.sequence(), i)).collect();
        Oracle { values }
    }

    fn clamp(&self, range: Segment) -> Option<Segment> {
        Segment::new(0, self.values.len() - 1).intersect(&range)
    }

    pub fn update<C, O>(&mut self, tree: &SegTree<C, O>, range: Segment, delta: &O::Delta)
    where
        O: LazyOps<C, Value = T>,
    {
        let Some(range) = self.clamp(range) else { return };
        for i in range.indices() {
            self.values[i] = tree.ops().apply(Segment::point(i), &self.values[i], delta);
        }
    }

    pub fn query<C, O>(&self, tree: &SegTree<C, O>, range: Segment) -> Option<T>
    where
        O: LazyOps<C, Value = T>,
    {
        let range = self.clamp(range)?;
        let mut acc = self.values[range.lower].clone();
        for i in range.lower + 1..=range.upper {
            acc = tree.ops().merge(&acc, &self.values[i]);
        }
        Some(acc)
    }
}

/// Update for the ordered-list operation set below.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    Assign(u8),
    Increment,
}

/// Boxed closures so the fixture can be named in signatures.
pub type ListOps = FnOps<
    Vec<u8>,
    Edit,
    Box<dyn Fn(&Vec<u8>, usize) -> Vec<u8>>,
    Box<dyn Fn(&Vec<u8>, &Vec<u8>) -> Vec<u8>>,
    Box<dyn Fn(Segment, &Vec<u8>, &Edit) -> Vec<u8>>,
>;

/// Aggregates a segment into the ordered list of its elements.
///
/// Concatenation is associative but not commutative, and `Assign` does not
/// commute with `Increment`, so any reordering of merges or deltas shows up.
pub fn list_ops() -> ListOps {
    FnOps::new::<Vec<u8>>(
        Box::new(|seq: &Vec<u8>, i: usize| vec![seq[i]]) as Box<dyn Fn(&Vec<u8>, usize) -> Vec<u8>>,
        Box::new(|a: &Vec<u8>, b: &Vec<u8>| {
            let mut out = a.clone();
            out.extend_from_slice(b);
            out
        }) as Box<dyn Fn(&Vec<u8>, &Vec<u8>) -> Vec<u8>>,
        Box::new(|seg: Segment, value: &Vec<u8>, edit: &Edit| match edit {
            Edit::Assign(x) => vec![*x; seg.len()],
            Edit::Increment => value.iter().map(|v| v.wrapping_add(1)).collect(),
        }) as Box<dyn Fn(Segment, &Vec<u8>, &Edit) -> Vec<u8>>,
    )
}

pub fn list_tree(seq: Vec<u8>) -> SegTree<Vec<u8>, ListOps> {
    SegTree::new(seq, list_ops()).unwrap()
}

/// `⌈log2(n)⌉` for `n >= 1`.
pub fn ceil_log2(n: usize) -> usize {
    (usize::BITS - (n - 1).leading_zeros()) as usize
}
