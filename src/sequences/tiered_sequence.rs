//! Fixed-capacity ordered sequence organized as nested rotated layers.
#![cfg(target_pointer_width = "64")]

pub mod iter;
mod node;

use anyhow::Result;

use crate::sequences::{self, LayerSchema};
use crate::sequences::prelude::*;
use crate::Error;
use iter::Iter;
use node::Node;

/// Fixed-capacity ordered sequence organized as nested rotated layers,
/// supporting positional insert/remove without shifting the whole sequence.
///
/// The physical layout is fixed by a [`LayerSchema`] `(c1, …, ck)`: the root has
/// `c1` children, each of which has `c2` children, and so on down to leaves
/// holding `ck` contiguous elements. Every node keeps a rotation offset, so a
/// node entirely covered by a shift is rotated instead of being rewritten.
/// Nodes are allocated lazily as the sequence grows. Because the rotations
/// spread vacated slots over the whole ring, removals do not release nodes
/// one by one; they are all released once the sequence becomes empty, either
/// by [`Self::remove()`] of the last element or by [`Self::clear()`].
///
/// # Complexity
///
/// - [`Self::get()`], [`Self::update()`]: $`O(k)`$
/// - [`Self::insert()`], [`Self::remove()`]: $`O(c_k + k \sum_{d} c_d)`$ (independent of the length)
/// - [`Self::index_sorted()`], [`Self::contains_sorted()`]: $`O(k \lg n)`$
///
/// # Sorted operations
///
/// The `*_sorted` methods assume that the sequence is in ascending order.
/// Mixing them with unordered positional inserts is allowed but gives
/// unspecified (memory-safe) answers.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use dysuc::sequences::TieredSequence;
///
/// let mut seq = TieredSequence::<u16>::with_value_bits(16)?;
/// seq.insert_sorted(5)?;
/// seq.insert_sorted(1)?;
/// seq.insert_sorted(3)?;
///
/// assert_eq!(seq.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
/// assert_eq!(seq.index_sorted(3), 1);
/// assert!(!seq.contains_sorted(9));
/// assert_eq!(seq.index_sorted(9), 3);
///
/// assert_eq!(seq.update(1, 99)?, 3);
/// assert_eq!(seq.iter().collect::<Vec<_>>(), vec![1, 99, 5]);
/// # Ok(())
/// # }
/// ```
///
/// # References
///
///  - M. T. Goodrich and J. G. Kloss II, "Tiered vectors: Efficient dynamic arrays
///    for rank-based sequences," In WADS, 1999.
///  - P. Bille, A. R. Christiansen, M. B. Ettienne, and I. L. Gørtz,
///    "Fast dynamic arrays," In ESA, 2017.
#[derive(Clone)]
pub struct TieredSequence<T> {
    schema: LayerSchema,
    root: Node<T>,
    len: usize,
}

impl<T> TieredSequence<T>
where
    T: Copy + Default,
{
    /// Creates a new empty sequence laid out by `schema`.
    ///
    /// # Errors
    ///
    /// An error [`Error::ElementTooNarrow`] is returned if `schema` declares a
    /// value domain wider than `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use dysuc::sequences::{LayerSchema, TieredSequence};
    ///
    /// let schema = LayerSchema::builder().layer(4).layer(8).build()?;
    /// let seq = TieredSequence::<u64>::new(schema)?;
    /// assert_eq!(seq.capacity(), 32);
    /// assert!(seq.is_empty());
    ///
    /// let wide = LayerSchema::for_value_bits(20)?;
    /// assert!(TieredSequence::<u16>::new(wide).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(schema: LayerSchema) -> Result<Self> {
        let element_bits = std::mem::size_of::<T>() * 8;
        if let Some(value_bits) = schema.value_bits() {
            if element_bits < value_bits {
                return Err(Error::ElementTooNarrow {
                    value_bits,
                    element_bits,
                }
                .into());
            }
        }
        log::debug!(
            "creating a tiered sequence over layers {:?} (capacity {})",
            schema.layers(),
            schema.capacity()
        );
        let root = Node::new(&schema, 0);
        Ok(Self {
            schema,
            root,
            len: 0,
        })
    }

    /// Creates a new empty sequence with the preset schema for `bits`-bit values.
    ///
    /// # Errors
    ///
    /// An error is returned if no preset exists for `bits`
    /// or if `T` cannot hold `bits`-bit values.
    pub fn with_value_bits(bits: usize) -> Result<Self> {
        Self::new(LayerSchema::for_value_bits(bits)?)
    }

    /// Returns the number of elements.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the sequence is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed number of elements the sequence can hold.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.schema.capacity()
    }

    /// Returns the layer schema.
    #[inline(always)]
    pub const fn schema(&self) -> &LayerSchema {
        &self.schema
    }

    /// Returns the `idx`-th element.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if `self.len() <= idx`.
    #[inline(always)]
    pub fn get(&self, idx: usize) -> Result<T> {
        self.check_idx(idx)?;
        Ok(self.root.get(&self.schema, 0, idx))
    }

    /// Replaces the `idx`-th element with `elem`, returning the previous one.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if `self.len() <= idx`.
    #[inline(always)]
    pub fn update(&mut self, idx: usize, elem: T) -> Result<T> {
        self.check_idx(idx)?;
        Ok(self.root.set(&self.schema, 0, idx, elem))
    }

    /// Inserts `elem` at position `idx`, shifting the elements at `idx..` by one.
    ///
    /// # Errors
    ///
    /// The sequence is left unchanged and an error is returned if
    ///
    ///  - `self.len() < idx` ([`Error::OutOfRange`]), or
    ///  - `self.len() == self.capacity()` ([`Error::CapacityExhausted`]).
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use dysuc::sequences::{LayerSchema, TieredSequence};
    ///
    /// let mut seq = TieredSequence::<u32>::new(LayerSchema::builder().layer(2).build()?)?;
    /// seq.insert(0, 7)?;
    /// seq.insert(0, 6)?;
    /// assert!(seq.insert(1, 8).is_err());
    /// assert_eq!(seq.iter().collect::<Vec<_>>(), vec![6, 7]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, idx: usize, elem: T) -> Result<()> {
        if self.len < idx {
            return Err(Error::out_of_range(idx, self.len + 1));
        }
        if self.len == self.capacity() {
            log::debug!("rejected insertion into a full tiered sequence");
            return Err(Error::CapacityExhausted {
                capacity: self.capacity(),
            }
            .into());
        }
        // Slot `len` is free, so what falls out of it is garbage.
        self.root.shift_insert(&self.schema, 0, idx, self.len, elem);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the `idx`-th element, shifting the elements at `idx+1..` down by one.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if `self.len() <= idx`.
    pub fn remove(&mut self, idx: usize) -> Result<T> {
        self.check_idx(idx)?;
        let removed = self
            .root
            .shift_remove(&self.schema, 0, idx, self.len - 1, T::default());
        self.len -= 1;
        if self.len == 0 {
            self.root = Node::new(&self.schema, 0);
        }
        Ok(removed)
    }

    /// Appends `elem` at the end.
    ///
    /// # Errors
    ///
    /// An error [`Error::CapacityExhausted`] is returned if the sequence is full.
    #[inline(always)]
    pub fn push(&mut self, elem: T) -> Result<()> {
        self.insert(self.len, elem)
    }

    /// Removes and returns the last element, or [`None`] if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.remove(self.len - 1).ok()
    }

    /// Removes all the elements, releasing the allocated nodes.
    ///
    /// Shrinking by [`Self::remove()`] keeps the nodes allocated while
    /// the sequence is non-empty, so call this to reclaim memory after a
    /// large sequence has been mostly drained.
    pub fn clear(&mut self) {
        self.root = Node::new(&self.schema, 0);
        self.len = 0;
    }

    /// Creates an iterator for enumerating elements in order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    #[inline(always)]
    fn check_idx(&self, idx: usize) -> Result<()> {
        if self.len <= idx {
            return Err(Error::out_of_range(idx, self.len));
        }
        Ok(())
    }
}

impl<T> TieredSequence<T>
where
    T: Copy + Default + Ord,
{
    /// Inserts `elem` keeping the ascending order, returning the position it was put at.
    ///
    /// The position is found by the same binary search as [`Self::index_sorted()`];
    /// if an equal element is hit, `elem` goes right after it.
    ///
    /// # Errors
    ///
    /// An error [`Error::CapacityExhausted`] is returned if the sequence is full,
    /// in which case it is left unchanged.
    pub fn insert_sorted(&mut self, elem: T) -> Result<usize> {
        let idx = match self.search_sorted(&elem) {
            Ok(found) => found + 1,
            Err(idx) => idx,
        };
        self.insert(idx, elem)?;
        Ok(idx)
    }

    /// Checks if `elem` is in the sorted sequence.
    pub fn contains_sorted(&self, elem: T) -> bool {
        self.search_sorted(&elem).is_ok()
    }

    /// Returns a position holding `elem` in the sorted sequence, or
    /// `self.len()` if absent.
    ///
    /// With duplicates, the first position hit by the binary search is
    /// returned, which is not necessarily the leftmost one.
    pub fn index_sorted(&self, elem: T) -> usize {
        self.search_sorted(&elem).unwrap_or(self.len)
    }

    /// Removes one occurrence of `elem` from the sorted sequence,
    /// returning `true` if it was present.
    pub fn remove_sorted(&mut self, elem: T) -> bool {
        match self.search_sorted(&elem) {
            Ok(idx) => self.remove(idx).is_ok(),
            Err(_) => false,
        }
    }

    fn search_sorted(&self, elem: &T) -> std::result::Result<usize, usize> {
        sequences::probe_sorted(self.len, |i| self.root.get(&self.schema, 0, i), elem)
    }
}

impl<T> NumVals for TieredSequence<T>
where
    T: Copy + Default,
{
    fn num_vals(&self) -> usize {
        self.len()
    }
}

impl<T> Access<T> for TieredSequence<T>
where
    T: Copy + Default,
{
    fn access(&self, pos: usize) -> Option<T> {
        self.get(pos).ok()
    }
}

impl<T> std::fmt::Debug for TieredSequence<T>
where
    T: Copy + Default + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieredSequence")
            .field("layers", &self.schema.layers())
            .field("len", &self.len)
            .field("elems", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
