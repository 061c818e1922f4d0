//! Top module for dynamic sequences.
//!
//! # Introduction
//!
//! Let $`A = (a_0, a_1, \dots, a_{n-1})`$ be a sequence of $`n`$ elements drawn from
//! a fixed-size arena of capacity $`N`$.
//! Our sequences support the following queries:
//!
//! - $`\textrm{Access}(i)`$ returns $`a_i`$ (implemented by [`Access`]).
//! - $`\textrm{Update}(i, x)`$ modifies $`a_i \gets x`$.
//! - $`\textrm{Insert}(i, x)`$ puts $`x`$ before $`a_i`$, shifting the rest.
//! - $`\textrm{Remove}(i)`$ deletes $`a_i`$, shifting the rest.
//!
//! When $`A`$ is kept in ascending order, membership and position queries
//! are answered with a binary search over positions.
//!
//! # Data structures
//!
//! | Implementation | [Access](Access) | Update | Insert/Remove |
//! | --- | :-: | :-: | :-: |
//! | [`TieredSequence`] | $`O(k)`$ | $`O(k)`$ | $`O(c_k + k \sum_{d} c_d)`$ |
//!
//! Here $`(c_1, \dots, c_k)`$ is the [`LayerSchema`] of the sequence.
//! The cost of an insertion depends on the schema but not on $`n`$.
//!
//! # Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use dysuc::sequences::{TieredSequence, prelude::*};
//!
//! let mut seq = TieredSequence::<u32>::with_value_bits(20)?;
//! seq.push(5)?;
//! seq.insert(0, 334)?;
//!
//! assert_eq!(seq.num_vals(), 2);
//! assert_eq!(seq.access(0), Some(334));
//! assert_eq!(seq.access(2), None);
//! # Ok(())
//! # }
//! ```
pub mod layer_schema;
pub mod prelude;
pub mod tiered_sequence;

pub use layer_schema::{LayerSchema, LayerSchemaBuilder};
pub use tiered_sequence::TieredSequence;

/// Interface for reporting basic statistics of sequences.
pub trait NumVals {
    /// Returns the number of elements stored.
    fn num_vals(&self) -> usize;
}

/// Interface for accessing elements on sequences.
pub trait Access<T> {
    /// Returns the `pos`-th element, or [`None`] if out of bounds.
    fn access(&self, pos: usize) -> Option<T>;
}

/// Binary search over positions `[0, len)` whose elements are read by `get`.
///
/// Returns `Ok(i)` for the first probed `i` holding `elem`,
/// or `Err(i)` with the position `elem` would be inserted at.
pub(crate) fn probe_sorted<T, F>(len: usize, get: F, elem: &T) -> Result<usize, usize>
where
    T: Ord,
    F: Fn(usize) -> T,
{
    let (mut left, mut right) = (0, len);
    while left < right {
        let mid = left + (right - left) / 2;
        match elem.cmp(&get(mid)) {
            std::cmp::Ordering::Less => right = mid,
            std::cmp::Ordering::Equal => return Ok(mid),
            std::cmp::Ordering::Greater => left = mid + 1,
        }
    }
    Err(left)
}
