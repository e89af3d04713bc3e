//! Lazytree - segment trees with lazy range updates.
//!
//! # Quick Start
//!
//! ```
//! use lazytree::lazy::SegTree;
//! use lazytree::lazy::bits::{BitCount, BitOp};
//!
//! // Count set bits in a bit string
//! let mut tree = SegTree::new(vec![b'0'; 8], BitCount).unwrap();
//!
//! tree.update(2..=5, BitOp::Fill);
//! assert_eq!(tree.query(0..=7), Some(4));
//!
//! tree.update(3..=3, BitOp::Empty);
//! assert_eq!(tree.query(2..=5), Some(3));
//!
//! tree.update(0..=7, BitOp::Invert);
//! assert_eq!(tree.query(0..=7), Some(5));
//! ```
//!
//! Custom aggregates can be plugged in with closures:
//!
//! ```
//! use lazytree::lazy::SegTree;
//! use lazytree::segment::Segment;
//!
//! let mut max = SegTree::from_fns(
//!     vec![3, 1, 4, 1, 5, 9, 2, 6],
//!     |seq: &Vec<i32>, i: usize| seq[i],
//!     |a: &i32, b: &i32| *a.max(b),
//!     |_: Segment, value: &i32, add: &i32| value + add,
//! )
//! .unwrap();
//!
//! assert_eq!(max.query(0..=3), Some(4));
//! max.update(0..=1, 10);
//! assert_eq!(max.query(0..=3), Some(13));
//! assert_eq!(max.query(20..=30), None);
//! ```

pub mod lazy;
pub mod profiling;
pub mod segment;
pub mod sequence;
pub mod tree;
