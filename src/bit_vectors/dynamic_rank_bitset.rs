//! Fixed-length bit vector with an updatable rank/select index and set algebra.
#![cfg(target_pointer_width = "64")]

pub mod ones;
mod set_ops;

use anyhow::Result;

use crate::bit_vectors::prelude::*;
use crate::bit_vectors::FenwickTree;
use crate::broadword::{self, WORD_LEN};
use crate::utils::{self, MatrixView};
use crate::Error;
use ones::Ones;

/// Fixed-length bit vector with an updatable rank/select index and set algebra.
///
/// The bit array is stored in 64-bit words, and a [`FenwickTree`] over the
/// popcounts of the words answers prefix counts. Every mutation, whether of a
/// single bit or of a whole word, rewrites the word and the index together, so
/// [`Self::rank()`] is exact at any time.
///
/// The length is fixed at construction; there is no grow/shrink operation.
///
/// # Complexity
///
/// Let $`w = \lceil u / 64 \rceil`$ be the number of words.
///
/// - [`Self::get()`]: $`O(1)`$
/// - [`Self::set()`], [`Self::clear()`], [`Self::toggle()`], [`Self::update_block()`]: $`O(\lg w)`$
/// - [`Self::rank()`], [`Self::select1()`], [`Self::select0()`]: $`O(\lg w)`$
/// - [`Self::merge()`] and the other set-algebra operations: $`O(w \lg w)`$ in the worst case
///
/// # Thread safety
///
/// There is no internal synchronization. Reads take `&self` and never touch
/// internal state; writes take `&mut self`. Sharing across threads therefore
/// requires the usual external lock around writers.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use dysuc::bit_vectors::DynamicRankBitset;
///
/// let mut bv = DynamicRankBitset::new(128);
/// bv.set(3)?;
/// bv.set(64)?;
/// bv.set(127)?;
///
/// assert_eq!(bv.count_ones(), 3);
/// assert_eq!(bv.rank(64)?, 2);
/// assert_eq!(bv.rank(2)?, 0);
///
/// // Mutations report the previous value.
/// assert!(bv.clear(64)?);
/// assert!(!bv.clear(64)?);
/// assert_eq!(bv.rank(127)?, 2);
/// # Ok(())
/// # }
/// ```
///
/// # Credits
///
/// The word-level Fenwick index follows the dynamic rank/select structures of
/// the [sux](https://github.com/vigna/sux) library.
///
/// # References
///
///  - S. Marchini and S. Vigna, "Compact Fenwick trees for dynamic ranking and selection,"
///    Software: Practice and Experience, 2020.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct DynamicRankBitset {
    words: Vec<u64>,
    index: FenwickTree,
    size: usize,
}

impl DynamicRankBitset {
    /// Creates a new vector of `size` unset bits.
    ///
    /// # Arguments
    ///
    ///  - `size`: Number of bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use dysuc::bit_vectors::DynamicRankBitset;
    ///
    /// let bv = DynamicRankBitset::new(100);
    /// assert_eq!(bv.size(), 100);
    /// assert_eq!(bv.num_blocks(), 2);
    /// assert_eq!(bv.count_ones(), 0);
    /// ```
    pub fn new(size: usize) -> Self {
        let num_words = utils::ceiled_divide(size, WORD_LEN);
        log::debug!("allocating a rank bitset of {size} bits in {num_words} words");
        Self {
            words: vec![0; num_words],
            index: FenwickTree::new(num_words),
            size,
        }
    }

    /// Creates a new vector from input bit stream `bits`.
    ///
    /// # Arguments
    ///
    ///  - `bits`: Bit stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use dysuc::bit_vectors::DynamicRankBitset;
    ///
    /// let bv = DynamicRankBitset::from_bits([false, true, true]);
    /// assert_eq!(bv.size(), 3);
    /// assert_eq!(bv.count_ones(), 2);
    /// ```
    pub fn from_bits<I>(bits: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut words = vec![];
        let mut size = 0;
        for bit in bits {
            let pos_in_word = size % WORD_LEN;
            if pos_in_word == 0 {
                words.push(0);
            }
            if let Some(last) = words.last_mut() {
                *last |= (bit as u64) << pos_in_word;
            }
            size += 1;
        }
        Self::from_words(words, size)
    }

    /// Creates a new vector of `size` bits in which the positions in `ones` are set.
    ///
    /// # Arguments
    ///
    ///  - `size`: Number of bits.
    ///  - `ones`: Positions of set bits, in any order and possibly duplicated.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if a position is no less than `size`.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use dysuc::bit_vectors::DynamicRankBitset;
    ///
    /// let bv = DynamicRankBitset::from_ones(8, [1, 2, 2, 6])?;
    /// assert_eq!(bv.count_ones(), 3);
    /// assert!(DynamicRankBitset::from_ones(8, [8]).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_ones<I>(size: usize, ones: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut words = vec![0; utils::ceiled_divide(size, WORD_LEN)];
        for pos in ones {
            if size <= pos {
                return Err(Error::out_of_range(pos, size));
            }
            words[pos / WORD_LEN] |= 1 << (pos % WORD_LEN);
        }
        Ok(Self::from_words(words, size))
    }

    fn from_words(words: Vec<u64>, size: usize) -> Self {
        let index = FenwickTree::from_counts(words.iter().map(|&w| broadword::popcount(w)));
        log::debug!(
            "built a rank bitset of {size} bits with {} ones",
            index.total()
        );
        Self { words, index, size }
    }

    /// Returns the number of bits, fixed at construction.
    #[inline(always)]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Checks if the vector holds no bits.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the `i`-th bit.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if `self.size() <= i`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dysuc::bit_vectors::DynamicRankBitset;
    ///
    /// let bv = DynamicRankBitset::from_bits([true, false]);
    /// assert!(bv.get(0).unwrap());
    /// assert!(!bv.get(1).unwrap());
    /// assert!(bv.get(2).is_err());
    /// ```
    #[inline(always)]
    pub fn get(&self, i: usize) -> Result<bool> {
        self.check_pos(i)?;
        Ok((self.words[i / WORD_LEN] >> (i % WORD_LEN)) & 1 == 1)
    }

    /// Sets the `i`-th bit, returning its value before the call.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if `self.size() <= i`.
    #[inline(always)]
    pub fn set(&mut self, i: usize) -> Result<bool> {
        self.check_pos(i)?;
        let block = i / WORD_LEN;
        let prev = self.replace_word(block, self.words[block] | (1 << (i % WORD_LEN)));
        Ok((prev >> (i % WORD_LEN)) & 1 == 1)
    }

    /// Unsets the `i`-th bit, returning its value before the call.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if `self.size() <= i`.
    #[inline(always)]
    pub fn clear(&mut self, i: usize) -> Result<bool> {
        self.check_pos(i)?;
        let block = i / WORD_LEN;
        let prev = self.replace_word(block, self.words[block] & !(1 << (i % WORD_LEN)));
        Ok((prev >> (i % WORD_LEN)) & 1 == 1)
    }

    /// Flips the `i`-th bit, returning its value before the call.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if `self.size() <= i`.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use dysuc::bit_vectors::DynamicRankBitset;
    ///
    /// let mut bv = DynamicRankBitset::new(4);
    /// assert!(!bv.toggle(2)?);
    /// assert!(bv.toggle(2)?);
    /// assert!(!bv.get(2)?);
    /// # Ok(())
    /// # }
    /// ```
    #[inline(always)]
    pub fn toggle(&mut self, i: usize) -> Result<bool> {
        self.check_pos(i)?;
        let block = i / WORD_LEN;
        let prev = self.replace_word(block, self.words[block] ^ (1 << (i % WORD_LEN)));
        Ok((prev >> (i % WORD_LEN)) & 1 == 1)
    }

    /// Returns the number of set bits in positions `[0, i]`, inclusive.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if `self.size() <= i`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dysuc::bit_vectors::DynamicRankBitset;
    ///
    /// let bv = DynamicRankBitset::from_bits([true, false, true]);
    /// assert_eq!(bv.rank(0).unwrap(), 1);
    /// assert_eq!(bv.rank(1).unwrap(), 1);
    /// assert_eq!(bv.rank(2).unwrap(), 2);
    /// assert!(bv.rank(3).is_err());
    /// ```
    #[inline(always)]
    pub fn rank(&self, i: usize) -> Result<usize> {
        self.check_pos(i)?;
        let (block, pos_in_word) = (i / WORD_LEN, i % WORD_LEN);
        let in_word = self.words[block] & broadword::low_mask(pos_in_word + 1);
        Ok(self.index.prefix_sum(block) + broadword::popcount(in_word))
    }

    /// Returns the number of unset bits in positions `[0, i]`, inclusive.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if `self.size() <= i`.
    #[inline(always)]
    pub fn rank0(&self, i: usize) -> Result<usize> {
        Ok(i + 1 - self.rank(i)?)
    }

    /// Returns the number of set bits.
    #[inline(always)]
    pub fn count_ones(&self) -> usize {
        self.index.total()
    }

    /// Returns the number of unset bits.
    #[inline(always)]
    pub fn count_zeros(&self) -> usize {
        self.size - self.count_ones()
    }

    /// Returns the position of the `k`-th (0-based) set bit, or
    /// [`None`] if `self.count_ones() <= k`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dysuc::bit_vectors::DynamicRankBitset;
    ///
    /// let bv = DynamicRankBitset::from_ones(200, [5, 70, 199]).unwrap();
    /// assert_eq!(bv.select1(0), Some(5));
    /// assert_eq!(bv.select1(2), Some(199));
    /// assert_eq!(bv.select1(3), None);
    /// ```
    pub fn select1(&self, k: usize) -> Option<usize> {
        let (block, k_in_word) = self.index.search(k)?;
        let pos_in_word = broadword::select_in_word(self.words[block], k_in_word)?;
        Some(block * WORD_LEN + pos_in_word)
    }

    /// Returns the position of the `k`-th (0-based) unset bit, or
    /// [`None`] if `self.count_zeros() <= k`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dysuc::bit_vectors::DynamicRankBitset;
    ///
    /// let bv = DynamicRankBitset::from_bits([true, false, true, false]);
    /// assert_eq!(bv.select0(0), Some(1));
    /// assert_eq!(bv.select0(1), Some(3));
    /// assert_eq!(bv.select0(2), None);
    /// ```
    pub fn select0(&self, k: usize) -> Option<usize> {
        let (block, k_in_word) = self.index.search_complement(k, WORD_LEN)?;
        let pos_in_word = broadword::select_in_word(!self.words[block], k_in_word)?;
        // Padding bits of the last word are zeros, so the hit can land past the end.
        Some(block * WORD_LEN + pos_in_word).filter(|&pos| pos < self.size)
    }

    /// Returns the number of 64-bit blocks backing the vector.
    #[inline(always)]
    pub fn num_blocks(&self) -> usize {
        self.words.len()
    }

    /// Returns the `i`-th raw block, holding bits `[64 i, 64 i + 64)`.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if `self.num_blocks() <= i`.
    #[inline(always)]
    pub fn get_block(&self, i: usize) -> Result<u64> {
        self.words
            .get(i)
            .copied()
            .ok_or_else(|| Error::out_of_range(i, self.num_blocks()))
    }

    /// Overwrites the `i`-th raw block with `value`, keeping the rank index in sync.
    ///
    /// Bits of the last block beyond [`Self::size()`] are ignored.
    ///
    /// # Errors
    ///
    /// An error [`Error::OutOfRange`] is returned if `self.num_blocks() <= i`.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use dysuc::bit_vectors::DynamicRankBitset;
    ///
    /// let mut bv = DynamicRankBitset::new(70);
    /// bv.update_block(1, u64::MAX)?;
    /// assert_eq!(bv.get_block(1)?, 0b111111);
    /// assert_eq!(bv.count_ones(), 6);
    /// # Ok(())
    /// # }
    /// ```
    #[inline(always)]
    pub fn update_block(&mut self, i: usize, value: u64) -> Result<()> {
        if self.num_blocks() <= i {
            return Err(Error::out_of_range(i, self.num_blocks()));
        }
        self.replace_word(i, value);
        Ok(())
    }

    /// Creates an iterator enumerating positions of set bits in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use dysuc::bit_vectors::DynamicRankBitset;
    ///
    /// let bv = DynamicRankBitset::from_ones(300, [1, 3, 42, 299]).unwrap();
    /// assert_eq!(bv.ones().collect::<Vec<_>>(), vec![1, 3, 42, 299]);
    /// ```
    pub fn ones(&self) -> Ones<'_> {
        Ones::new(self)
    }

    /// Gets the slice of raw words.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Writes `word` into the `block`-th word, masking padding bits and
    /// forwarding the popcount change to the index. Returns the old word.
    #[inline(always)]
    fn replace_word(&mut self, block: usize, word: u64) -> u64 {
        let word = word & self.block_mask(block);
        let prev = self.words[block];
        if prev != word {
            self.words[block] = word;
            let delta = broadword::popcount(word) as isize - broadword::popcount(prev) as isize;
            if delta != 0 {
                self.index.add(block, delta);
            }
        }
        prev
    }

    #[inline(always)]
    fn block_mask(&self, block: usize) -> u64 {
        if block + 1 == self.words.len() {
            broadword::low_mask(self.size - block * WORD_LEN)
        } else {
            u64::MAX
        }
    }

    #[inline(always)]
    fn check_pos(&self, i: usize) -> Result<()> {
        if self.size <= i {
            return Err(Error::out_of_range(i, self.size));
        }
        Ok(())
    }
}

impl NumBits for DynamicRankBitset {
    /// Returns the number of bits stored (just wrapping [`Self::size()`]).
    fn num_bits(&self) -> usize {
        self.size()
    }

    /// Returns the number of bits set (just wrapping [`Self::count_ones()`]).
    fn num_ones(&self) -> usize {
        self.count_ones()
    }
}

impl Access for DynamicRankBitset {
    fn access(&self, pos: usize) -> Option<bool> {
        self.get(pos).ok()
    }
}

impl Rank for DynamicRankBitset {
    fn rank1(&self, i: usize) -> Option<usize> {
        self.rank(i).ok()
    }

    fn rank0(&self, i: usize) -> Option<usize> {
        DynamicRankBitset::rank0(self, i).ok()
    }
}

impl Select for DynamicRankBitset {
    fn select1(&self, k: usize) -> Option<usize> {
        DynamicRankBitset::select1(self, k)
    }

    fn select0(&self, k: usize) -> Option<usize> {
        DynamicRankBitset::select0(self, k)
    }
}

impl std::fmt::Debug for DynamicRankBitset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: Vec<u8> = (0..self.size)
            .map(|i| ((self.words[i / WORD_LEN] >> (i % WORD_LEN)) & 1) as u8)
            .collect();
        f.debug_struct("DynamicRankBitset")
            .field("bits", &MatrixView::new(&bits, 16))
            .field("size", &self.size)
            .field("ones", &self.count_ones())
            .finish()
    }
}
