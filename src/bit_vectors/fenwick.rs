//! Fenwick (binary indexed) tree over non-negative counts.
#![cfg(target_pointer_width = "64")]

use crate::broadword;

/// Fenwick tree maintaining prefix sums of a fixed-length array of counts.
///
/// [`DynamicRankBitset`](crate::bit_vectors::DynamicRankBitset) keeps one over the
/// popcounts of its words. Point updates, prefix sums, and searches all run in
/// $`O(\lg n)`$ time.
///
/// # Examples
///
/// ```
/// use dysuc::bit_vectors::FenwickTree;
///
/// let mut ft = FenwickTree::from_counts([3, 0, 2, 5]);
/// assert_eq!(ft.prefix_sum(3), 5);
///
/// ft.add(1, 4);
/// assert_eq!(ft.prefix_sum(3), 9);
/// assert_eq!(ft.search(3), Some((1, 0)));
/// ```
///
/// # References
///
///  - P. M. Fenwick, "A new data structure for cumulative frequency tables,"
///    Software: Practice and Experience, 1994.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenwickTree {
    // 1-based; tree[0] is unused.
    tree: Vec<usize>,
}

impl Default for FenwickTree {
    fn default() -> Self {
        Self::new(0)
    }
}

impl FenwickTree {
    /// Creates a new tree of `len` zero counts.
    pub fn new(len: usize) -> Self {
        Self {
            tree: vec![0; len + 1],
        }
    }

    /// Creates a new tree over `counts` in linear time.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut tree = vec![0];
        tree.extend(counts);
        let n = tree.len() - 1;
        for i in 1..=n {
            let parent = i + lowbit(i);
            if parent <= n {
                tree[parent] += tree[i];
            }
        }
        Self { tree }
    }

    /// Returns the number of counts.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tree.len() - 1
    }

    /// Checks if the tree holds no counts.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `delta` to the `i`-th count.
    ///
    /// # Panics
    ///
    /// It will panic if `self.len() <= i`, or in debug builds if a count underflows.
    #[inline(always)]
    pub fn add(&mut self, i: usize, delta: isize) {
        assert!(i < self.len(), "index {i} out of {}.", self.len());
        let mut j = i + 1;
        while j < self.tree.len() {
            self.tree[j] = self.tree[j].wrapping_add_signed(delta);
            debug_assert!(self.tree[j] as isize >= 0);
            j += lowbit(j);
        }
    }

    /// Returns the sum of the first `i` counts, i.e., of indices in `[0, i)`.
    ///
    /// # Panics
    ///
    /// It will panic if `self.len() < i`.
    #[inline(always)]
    pub fn prefix_sum(&self, i: usize) -> usize {
        assert!(i <= self.len(), "prefix {i} out of {}.", self.len());
        let mut sum = 0;
        let mut j = i;
        while j != 0 {
            sum += self.tree[j];
            j -= lowbit(j);
        }
        sum
    }

    /// Returns the sum of all counts.
    #[inline(always)]
    pub fn total(&self) -> usize {
        self.prefix_sum(self.len())
    }

    /// Finds the smallest index `i` such that `self.prefix_sum(i + 1) > k`,
    /// returning `(i, k - self.prefix_sum(i))`, or [`None`] if `self.total() <= k`.
    pub fn search(&self, k: usize) -> Option<(usize, usize)> {
        self.descend(k, |_, sum| sum)
    }

    /// Same as [`Self::search`] but over the complemented counts `unit - count`,
    /// where every count is assumed to be at most `unit`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dysuc::bit_vectors::FenwickTree;
    ///
    /// // Complemented counts are [1, 4, 2, 0].
    /// let ft = FenwickTree::from_counts([3, 0, 2, 4]);
    /// assert_eq!(ft.search_complement(0, 4), Some((0, 0)));
    /// assert_eq!(ft.search_complement(1, 4), Some((1, 0)));
    /// assert_eq!(ft.search_complement(6, 4), Some((2, 1)));
    /// assert_eq!(ft.search_complement(7, 4), None);
    /// ```
    pub fn search_complement(&self, k: usize, unit: usize) -> Option<(usize, usize)> {
        self.descend(k, |span, sum| span * unit - sum)
    }

    fn descend<F>(&self, mut k: usize, weight: F) -> Option<(usize, usize)>
    where
        F: Fn(usize, usize) -> usize,
    {
        let n = self.len();
        let mut pos = 0;
        let mut step = 1 << broadword::msb(n as u64)?;
        while step != 0 {
            let next = pos + step;
            if next <= n {
                let w = weight(step, self.tree[next]);
                if w <= k {
                    pos = next;
                    k -= w;
                }
            }
            step >>= 1;
        }
        (pos < n).then_some((pos, k))
    }
}

#[inline(always)]
const fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}
