//! Top module for bit vectors.
//!
//! # Introduction
//!
//! Let $`S \subseteq \{ 0,1,\dots,u-1 \}`$ be a set of positions
//! at which bits are set in a bit vector of length $`u`$.
//! Our bit vectors support the following queries:
//!
//! - $`\textrm{Access}(i)`$ returns `true` if $`i \in S`$ or `false` otherwise (implemented by [`Access`]).
//! - $`\textrm{Rank}(i)`$ returns the cardinality of $`\{ x \in S \mid x \leq i \}`$ (implemented by [`Rank`]).
//! - $`\textrm{Select}(k)`$ returns the $`k`$-th smallest position in $`S`$ (implemented by [`Select`]).
//! - $`\textrm{Update}(i)`$ inserts/removes $`i`$ to/from $`S`$.
//!
//! Note that Rank is *inclusive* of the queried position throughout this crate.
//!
//! # Data structures
//!
//! | Implementations | Access | Rank | Select | Update | Set algebra | Memory (bits) |
//! | --- | :-: | :-: | :-: | :-: | :-: | :-: |
//! | [`DynamicRankBitset`] | $`O(1)`$ | $`O(\lg \frac{u}{64})`$ | $`O(\lg \frac{u}{64})`$ | $`O(\lg \frac{u}{64})`$ | $`O(\frac{u}{64} \lg \frac{u}{64})`$ | $`2u`$ |
//!
//! [`DynamicRankBitset`] keeps a Fenwick tree over the popcounts of its words,
//! so that every update, including whole-word updates from set algebra,
//! keeps rank/select answers exact without rescanning the bit array.
//!
//! # Examples
//!
//! [`prelude`] allows you to import the common traits easily.
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use dysuc::bit_vectors::{DynamicRankBitset, prelude::*};
//!
//! let mut bv = DynamicRankBitset::from_bits([true, false, false, true]);
//!
//! assert_eq!(bv.num_bits(), 4);
//! assert_eq!(bv.num_ones(), 2);
//!
//! assert_eq!(bv.access(1), Some(false));
//! assert_eq!(bv.rank1(2), Some(1));
//! assert_eq!(bv.select1(1), Some(3));
//!
//! assert!(!bv.set(1)?);
//! assert_eq!(bv.rank1(2), Some(2));
//! # Ok(())
//! # }
//! ```
pub mod dynamic_rank_bitset;
pub mod fenwick;
pub mod prelude;

pub use dynamic_rank_bitset::DynamicRankBitset;
pub use fenwick::FenwickTree;

/// Interface for reporting basic statistics in a bit vector.
pub trait NumBits {
    /// Returns the number of bits stored.
    fn num_bits(&self) -> usize;

    /// Returns the number of bits set.
    fn num_ones(&self) -> usize;

    /// Returns the number of bits unset.
    #[inline(always)]
    fn num_zeros(&self) -> usize {
        self.num_bits() - self.num_ones()
    }
}

/// Interface for accessing elements on bit arrays.
pub trait Access {
    /// Returns the `pos`-th bit, or [`None`] if out of bounds.
    fn access(&self, pos: usize) -> Option<bool>;
}

/// Interface for rank queries on bit vectors.
///
/// Let $`S \subseteq \{ 0,1,\dots,u-1 \}`$ be a set of positions
/// at which bits are set in a bit vector of length $`u`$.
pub trait Rank {
    /// Returns the cardinality of $`\{ x \in S \mid x \leq i \}`$,
    /// or [`None`] if $`u \leq i`$.
    fn rank1(&self, i: usize) -> Option<usize>;

    /// Returns the cardinality of $`\{ x \not\in S \mid 0 \leq x \leq i \}`$,
    /// or [`None`] if $`u \leq i`$.
    fn rank0(&self, i: usize) -> Option<usize>;
}

/// Interface for select queries on bit vectors.
///
/// Let $`S \subseteq \{ 0,1,\dots,u-1 \}`$ be a set of positions
/// at which bits are set in a bit vector of length $`u`$.
pub trait Select {
    /// Returns the $`k`$-th smallest position in $`S`$, or
    /// [`None`] if out of bounds.
    fn select1(&self, k: usize) -> Option<usize>;

    /// Returns the $`k`$-th smallest integer $`x`$ such that $`x \not\in S`$ and $`0 \leq x < u`$, or
    /// [`None`] if out of bounds.
    fn select0(&self, k: usize) -> Option<usize>;
}
