//! Iterator on positions of set bits.
use super::DynamicRankBitset;
use crate::broadword::{self, WORD_LEN};

/// Iterator for enumerating positions of set bits in ascending order,
/// created by [`DynamicRankBitset::ones()`].
pub struct Ones<'a> {
    bv: &'a DynamicRankBitset,
    block: usize,
    buf: u64,
    rest: usize,
}

impl<'a> Ones<'a> {
    /// Creates a new iterator.
    pub fn new(bv: &'a DynamicRankBitset) -> Self {
        Self {
            bv,
            block: 0,
            buf: bv.words.first().copied().unwrap_or(0),
            rest: bv.count_ones(),
        }
    }
}

impl Iterator for Ones<'_> {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        while self.buf == 0 {
            self.block += 1;
            self.buf = *self.bv.words.get(self.block)?;
        }
        let pos_in_word = broadword::lsb(self.buf)?;
        self.buf &= self.buf - 1;
        self.rest -= 1;
        Some(self.block * WORD_LEN + pos_in_word)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest, Some(self.rest))
    }
}

impl ExactSizeIterator for Ones<'_> {}
