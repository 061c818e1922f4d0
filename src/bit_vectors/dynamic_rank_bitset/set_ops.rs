//! Word-granular set algebra between bitsets of equal size.
use anyhow::Result;

use super::DynamicRankBitset;
use crate::Error;

impl DynamicRankBitset {
    /// Sets `self` to `self | other`.
    ///
    /// # Errors
    ///
    /// An error [`Error::SizeMismatch`] is returned if `self.size() != other.size()`,
    /// in which case `self` is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use dysuc::bit_vectors::DynamicRankBitset;
    ///
    /// let mut a = DynamicRankBitset::from_ones(8, [1, 2])?;
    /// let b = DynamicRankBitset::from_ones(8, [2, 3])?;
    /// a.merge(&b)?;
    /// assert_eq!(a.ones().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        self.combine(other, |a, b| a | b)
    }

    /// Sets `self` to `self & other`.
    ///
    /// # Errors
    ///
    /// An error [`Error::SizeMismatch`] is returned if `self.size() != other.size()`,
    /// in which case `self` is left untouched.
    pub fn intersect(&mut self, other: &Self) -> Result<()> {
        self.combine(other, |a, b| a & b)
    }

    /// Sets `self` to `self & !other`.
    ///
    /// # Errors
    ///
    /// An error [`Error::SizeMismatch`] is returned if `self.size() != other.size()`,
    /// in which case `self` is left untouched.
    pub fn difference(&mut self, other: &Self) -> Result<()> {
        self.combine(other, |a, b| a & !b)
    }

    /// Sets `self` to `self ^ other`.
    ///
    /// # Errors
    ///
    /// An error [`Error::SizeMismatch`] is returned if `self.size() != other.size()`,
    /// in which case `self` is left untouched.
    pub fn symmetric_difference(&mut self, other: &Self) -> Result<()> {
        self.combine(other, |a, b| a ^ b)
    }

    /// Returns a new bitset holding `self | other`.
    ///
    /// # Errors
    ///
    /// An error [`Error::SizeMismatch`] is returned if `self.size() != other.size()`.
    pub fn to_merged(&self, other: &Self) -> Result<Self> {
        let mut res = self.clone();
        res.merge(other)?;
        Ok(res)
    }

    /// Returns a new bitset holding `self & other`.
    ///
    /// # Errors
    ///
    /// An error [`Error::SizeMismatch`] is returned if `self.size() != other.size()`.
    pub fn to_intersected(&self, other: &Self) -> Result<Self> {
        let mut res = self.clone();
        res.intersect(other)?;
        Ok(res)
    }

    /// Returns a new bitset holding `self & !other`.
    ///
    /// # Errors
    ///
    /// An error [`Error::SizeMismatch`] is returned if `self.size() != other.size()`.
    pub fn to_difference(&self, other: &Self) -> Result<Self> {
        let mut res = self.clone();
        res.difference(other)?;
        Ok(res)
    }

    /// Returns a new bitset holding `self ^ other`.
    ///
    /// # Errors
    ///
    /// An error [`Error::SizeMismatch`] is returned if `self.size() != other.size()`.
    pub fn to_symmetric_difference(&self, other: &Self) -> Result<Self> {
        let mut res = self.clone();
        res.symmetric_difference(other)?;
        Ok(res)
    }

    fn combine<F>(&mut self, other: &Self, op: F) -> Result<()>
    where
        F: Fn(u64, u64) -> u64,
    {
        if self.size() != other.size() {
            return Err(Error::SizeMismatch {
                left: self.size(),
                right: other.size(),
            }
            .into());
        }
        let mut changed = 0;
        for (block, &b) in other.words.iter().enumerate() {
            let a = self.words[block];
            if self.replace_word(block, op(a, b)) != self.words[block] {
                changed += 1;
            }
        }
        log::trace!(
            "combined {} blocks, {changed} changed",
            self.num_blocks()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    const N: usize = 10000;
    const SIZE: usize = 1 << 15;

    fn gen_random_bitset(size: usize, p: f64, seed: u64) -> (Vec<bool>, DynamicRankBitset) {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        let bits: Vec<bool> = (0..size).map(|_| rng.gen_bool(p)).collect();
        let bv = DynamicRankBitset::from_bits(bits.iter().cloned());
        (bits, bv)
    }

    fn assert_matches(bits: &[bool], bv: &DynamicRankBitset) {
        let expected: Vec<usize> = (0..bits.len()).filter(|&i| bits[i]).collect();
        assert_eq!(bv.ones().collect::<Vec<_>>(), expected);
        assert_eq!(bv.count_ones(), expected.len());
        if !bits.is_empty() {
            assert_eq!(bv.rank(bits.len() - 1).unwrap(), expected.len());
        }
        let mut ones = 0;
        for (i, &b) in bits.iter().enumerate() {
            ones += b as usize;
            if i % 97 == 0 {
                assert_eq!(bv.rank(i).unwrap(), ones, "rank({i})");
            }
        }
    }

    fn strided(offset: usize) -> DynamicRankBitset {
        DynamicRankBitset::from_ones(SIZE, (0..(3 * N)).skip(offset).step_by(3)).unwrap()
    }

    #[test]
    fn test_merge_example() {
        let mut a = DynamicRankBitset::from_ones(8, [1, 2]).unwrap();
        let b = DynamicRankBitset::from_ones(8, [2, 3]).unwrap();
        a.merge(&b).unwrap();
        assert_eq!(a.ones().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(a.rank(7).unwrap(), 3);
    }

    #[test]
    fn test_union() {
        let mut bitset = strided(0);
        let bitset2 = strided(1);
        let res = bitset.to_merged(&bitset2).unwrap();
        bitset.merge(&bitset2).unwrap();
        for i in 0..3 * N {
            assert_eq!(bitset.get(i).unwrap(), i % 3 != 2, "position {i}");
        }
        assert_eq!(bitset, res);
        assert_eq!(bitset.count_ones(), 2 * N);
    }

    #[test]
    fn test_intersection() {
        let mut bitset = strided(0);
        bitset.merge(&strided(1)).unwrap();
        let mut bitset2 = strided(1);
        bitset2.merge(&strided(2)).unwrap();
        let res = bitset.to_intersected(&bitset2).unwrap();
        bitset.intersect(&bitset2).unwrap();
        for i in 0..3 * N {
            assert_eq!(bitset.get(i).unwrap(), i % 3 == 1, "position {i}");
        }
        assert_eq!(bitset, res);
        assert_eq!(bitset.count_ones(), N);
    }

    #[test]
    fn test_difference() {
        let mut bitset = strided(0);
        bitset.merge(&strided(1)).unwrap();
        let bitset2 = strided(1);
        let res = bitset.to_difference(&bitset2).unwrap();
        bitset.difference(&bitset2).unwrap();
        assert_eq!(bitset, strided(0));
        assert_eq!(bitset, res);
    }

    #[test]
    fn test_symmetric_difference() {
        let mut bitset = strided(0);
        bitset.merge(&strided(1)).unwrap();
        let mut bitset2 = strided(1);
        bitset2.merge(&strided(2)).unwrap();
        let res = bitset.to_symmetric_difference(&bitset2).unwrap();
        bitset.symmetric_difference(&bitset2).unwrap();
        let mut expected = strided(0);
        expected.merge(&strided(2)).unwrap();
        assert_eq!(bitset, expected);
        assert_eq!(bitset, res);
    }

    #[test]
    fn test_self_identities() {
        let (_, a) = gen_random_bitset(1000, 0.4, 3);
        assert_eq!(a.to_intersected(&a).unwrap(), a);
        assert_eq!(a.to_merged(&a).unwrap(), a);
        assert_eq!(a.to_difference(&a).unwrap().count_ones(), 0);
        assert_eq!(a.to_symmetric_difference(&a).unwrap().count_ones(), 0);
    }

    #[test]
    fn test_merge_commutative_associative() {
        let (_, a) = gen_random_bitset(777, 0.2, 10);
        let (_, b) = gen_random_bitset(777, 0.2, 11);
        let (_, c) = gen_random_bitset(777, 0.2, 12);
        assert_eq!(a.to_merged(&b).unwrap(), b.to_merged(&a).unwrap());
        assert_eq!(
            a.to_merged(&b).unwrap().to_merged(&c).unwrap(),
            a.to_merged(&b.to_merged(&c).unwrap()).unwrap()
        );
    }

    #[test]
    fn test_random_against_model() {
        for seed in 0..10 {
            let size = 500 + 61 * seed as usize;
            let (mut bits, mut bv) = gen_random_bitset(size, 0.5, seed);
            let (other_bits, other) = gen_random_bitset(size, 0.3, seed + 100);
            match seed % 4 {
                0 => {
                    bv.merge(&other).unwrap();
                    bits.iter_mut().zip(&other_bits).for_each(|(a, &b)| *a |= b);
                }
                1 => {
                    bv.intersect(&other).unwrap();
                    bits.iter_mut().zip(&other_bits).for_each(|(a, &b)| *a &= b);
                }
                2 => {
                    bv.difference(&other).unwrap();
                    bits.iter_mut().zip(&other_bits).for_each(|(a, &b)| *a &= !b);
                }
                _ => {
                    bv.symmetric_difference(&other).unwrap();
                    bits.iter_mut().zip(&other_bits).for_each(|(a, &b)| *a ^= b);
                }
            }
            assert_matches(&bits, &bv);
        }
    }

    #[test]
    fn test_size_mismatch() {
        let mut a = DynamicRankBitset::from_ones(8, [1]).unwrap();
        let b = DynamicRankBitset::new(16);
        let e = a.merge(&b);
        assert_eq!(
            e.err().map(|x| x.to_string()),
            Some("sizes of operands must match, but got 8 and 16.".to_string())
        );
        let e = a.symmetric_difference(&b).unwrap_err();
        assert_eq!(
            e.downcast_ref::<Error>(),
            Some(&Error::SizeMismatch { left: 8, right: 16 })
        );
        assert!(a.intersect(&b).is_err());
        assert!(a.difference(&b).is_err());
        assert!(a.to_merged(&b).is_err());
        assert_eq!(a.ones().collect::<Vec<_>>(), vec![1]);
    }
}
