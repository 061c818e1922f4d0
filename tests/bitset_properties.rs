//! Property-based tests of `DynamicRankBitset` against a `Vec<bool>` model.

use dysuc::bit_vectors::{prelude::*, DynamicRankBitset};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum BitOp {
    Set(usize),
    Clear(usize),
    Toggle(usize),
    Block(usize, u64),
}

fn bits_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..700)
}

fn ops_strategy() -> impl Strategy<Value = Vec<BitOp>> {
    prop::collection::vec(
        prop_oneof![
            any::<usize>().prop_map(BitOp::Set),
            any::<usize>().prop_map(BitOp::Clear),
            any::<usize>().prop_map(BitOp::Toggle),
            (any::<usize>(), any::<u64>()).prop_map(|(i, w)| BitOp::Block(i, w)),
        ],
        0..200,
    )
}

fn assert_consistent(model: &[bool], bv: &DynamicRankBitset) -> Result<(), TestCaseError> {
    let mut ones = 0;
    let mut zeros = 0;
    for (i, &b) in model.iter().enumerate() {
        prop_assert_eq!(bv.get(i).unwrap(), b);
        if b {
            prop_assert_eq!(bv.select1(ones), Some(i));
            ones += 1;
        } else {
            prop_assert_eq!(bv.select0(zeros), Some(i));
            zeros += 1;
        }
        prop_assert_eq!(bv.rank(i).unwrap(), ones);
        prop_assert_eq!(bv.rank0(i).unwrap(), zeros);
    }
    prop_assert_eq!(bv.count_ones(), ones);
    prop_assert_eq!(bv.count_zeros(), zeros);
    prop_assert_eq!(bv.select1(ones), None);
    prop_assert_eq!(bv.select0(zeros), None);
    Ok(())
}

proptest! {
    #[test]
    fn prop_updates_keep_rank_exact(bits in bits_strategy(), ops in ops_strategy()) {
        let mut model = bits.clone();
        let mut bv = DynamicRankBitset::from_bits(bits);
        let size = model.len();
        for op in ops {
            match op {
                BitOp::Set(i) => {
                    let i = i % size;
                    prop_assert_eq!(bv.set(i).unwrap(), model[i]);
                    model[i] = true;
                }
                BitOp::Clear(i) => {
                    let i = i % size;
                    prop_assert_eq!(bv.clear(i).unwrap(), model[i]);
                    model[i] = false;
                }
                BitOp::Toggle(i) => {
                    let i = i % size;
                    prop_assert_eq!(bv.toggle(i).unwrap(), model[i]);
                    model[i] = !model[i];
                }
                BitOp::Block(i, w) => {
                    let block = i % bv.num_blocks();
                    bv.update_block(block, w).unwrap();
                    for j in 0..64 {
                        let pos = block * 64 + j;
                        if pos < size {
                            model[pos] = (w >> j) & 1 == 1;
                        }
                    }
                }
            }
        }
        assert_consistent(&model, &bv)?;
    }

    #[test]
    fn prop_set_algebra_matches_model(
        pair in (1usize..600).prop_flat_map(|n| (
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(any::<bool>(), n),
        )),
        op in 0u8..4,
    ) {
        let (a, b) = pair;
        let mut bv = DynamicRankBitset::from_bits(a.iter().cloned());
        let other = DynamicRankBitset::from_bits(b.iter().cloned());
        let f: fn(bool, bool) -> bool = match op {
            0 => |x, y| x | y,
            1 => |x, y| x & y,
            2 => |x, y| x & !y,
            _ => |x, y| x ^ y,
        };
        match op {
            0 => bv.merge(&other).unwrap(),
            1 => bv.intersect(&other).unwrap(),
            2 => bv.difference(&other).unwrap(),
            _ => bv.symmetric_difference(&other).unwrap(),
        }
        let model: Vec<bool> = a.iter().zip(&b).map(|(&x, &y)| f(x, y)).collect();
        assert_consistent(&model, &bv)?;
    }

    #[test]
    fn prop_size_mismatch_leaves_receiver(a in bits_strategy(), extra in 1usize..100) {
        let mut bv = DynamicRankBitset::from_bits(a.iter().cloned());
        let before = bv.clone();
        let other = DynamicRankBitset::new(a.len() + extra);
        prop_assert!(bv.merge(&other).is_err());
        prop_assert!(bv.intersect(&other).is_err());
        prop_assert!(bv.difference(&other).is_err());
        prop_assert!(bv.symmetric_difference(&other).is_err());
        prop_assert_eq!(bv, before);
    }

    #[test]
    fn prop_ones_matches_select(bits in bits_strategy()) {
        let bv = DynamicRankBitset::from_bits(bits);
        let ones: Vec<usize> = bv.ones().collect();
        prop_assert_eq!(ones.len(), bv.num_ones());
        for (k, &pos) in ones.iter().enumerate() {
            prop_assert_eq!(bv.select1(k), Some(pos));
        }
    }
}
