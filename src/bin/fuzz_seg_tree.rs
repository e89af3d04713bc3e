//! AFL fuzz harness for the lazy segment tree
//!
//! This harness checks the tree against a flat array after every operation:
//! 1. Queries return the fold of the covered elements
//! 2. Updates touch exactly the covered elements, in order
//! 3. Out-of-range and inverted ranges change nothing
//!
//! Model: the first input byte picks the size, the rest is a stream of
//! update and query commands on a bit string.

use afl::fuzz;
use lazytree::lazy::SegTree;
use lazytree::lazy::bits::{BitCount, BitOp};
use lazytree::segment::Segment;

const MAX_SIZE: usize = 200;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Apply a bit operation to a range
    Update { op: BitOp, lower: u8, upper: u8 },
    /// Compare a range aggregate with the naive count
    Query { lower: u8, upper: u8 },
    /// Flush everything and compare every leaf
    Flush,
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 5;
        let rest = &bytes[1..];

        match op_type {
            0..=2 if rest.len() >= 2 => {
                let op = match op_type {
                    0 => BitOp::Fill,
                    1 => BitOp::Empty,
                    _ => BitOp::Invert,
                };
                Some((FuzzOp::Update { op, lower: rest[0], upper: rest[1] }, &rest[2..]))
            }
            3 if rest.len() >= 2 => Some((FuzzOp::Query { lower: rest[0], upper: rest[1] }, &rest[2..])),
            4 => Some((FuzzOp::Flush, rest)),
            _ => None,
        }
    }
}

fn naive_count(bits: &[u8], range: Segment) -> Option<usize> {
    let range = Segment::new(0, bits.len() - 1).intersect(&range)?;
    Some(bits[range.lower..=range.upper].iter().filter(|&&b| b == b'1').count())
}

fn main() {
    fuzz!(|data: &[u8]| {
        let Some((&size_byte, mut remaining)) = data.split_first() else {
            return;
        };
        let size = (size_byte as usize % MAX_SIZE) + 1;
        let mut naive = vec![b'0'; size];
        let Ok(mut tree) = SegTree::new(naive.clone(), BitCount) else {
            return;
        };

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Update { op, lower, upper } => {
                    let range = Segment::new(lower as usize, upper as usize);
                    tree.update(range, op);
                    if let Some(range) = Segment::new(0, size - 1).intersect(&range) {
                        for bit in &mut naive[range.lower..=range.upper] {
                            *bit = match op {
                                BitOp::Fill => b'1',
                                BitOp::Empty => b'0',
                                BitOp::Invert => if *bit == b'1' { b'0' } else { b'1' },
                            };
                        }
                    }
                }

                FuzzOp::Query { lower, upper } => {
                    let range = Segment::new(lower as usize, upper as usize);
                    assert_eq!(
                        tree.query(range), naive_count(&naive, range),
                        "Query mismatch on {} (size {})",
                        range, size
                    );
                }

                FuzzOp::Flush => {
                    tree.flush_all();
                    assert_eq!(tree.pending_count(), 0, "Pending slots survived a flush");
                }
            }
        }

        // Final leaf-by-leaf comparison
        let expected: Vec<usize> = naive.iter().map(|&b| (b == b'1') as usize).collect();
        assert_eq!(tree.values(), expected, "Leaf mismatch (size {})", size);
    });
}
