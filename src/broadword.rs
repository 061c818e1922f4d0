//! Word-level bit tricks.
#![cfg(target_pointer_width = "64")]

/// The number of bits in a word.
pub const WORD_LEN: usize = 64;

const ONES_STEP_4: u64 = 0x1111_1111_1111_1111;
const ONES_STEP_8: u64 = 0x0101_0101_0101_0101;
const MSBS_STEP_8: u64 = 0x80 * ONES_STEP_8;

// SELECT_IN_BYTE[256 * k + x] is the position of the k-th set bit of byte x.
const SELECT_IN_BYTE: [u8; 2048] = build_select_in_byte();

const fn build_select_in_byte() -> [u8; 2048] {
    let mut table = [8u8; 2048];
    let mut x = 0;
    while x < 256 {
        let mut k = 0;
        let mut i = 0;
        while i < 8 {
            if (x >> i) & 1 == 1 {
                table[256 * k + x] = i as u8;
                k += 1;
            }
            i += 1;
        }
        x += 1;
    }
    table
}

/// Returns the number of set bits in `x`.
#[inline(always)]
pub const fn popcount(x: u64) -> usize {
    x.count_ones() as usize
}

/// Returns the position of the lowest set bit, or [`None`] if `x == 0`.
///
/// # Examples
///
/// ```
/// use dysuc::broadword::lsb;
///
/// assert_eq!(lsb(0b1100), Some(2));
/// assert_eq!(lsb(0), None);
/// ```
#[inline(always)]
pub const fn lsb(x: u64) -> Option<usize> {
    if x != 0 {
        Some(x.trailing_zeros() as usize)
    } else {
        None
    }
}

/// Returns the position of the highest set bit, or [`None`] if `x == 0`.
///
/// # Examples
///
/// ```
/// use dysuc::broadword::msb;
///
/// assert_eq!(msb(0b1100), Some(3));
/// assert_eq!(msb(0), None);
/// ```
#[inline(always)]
pub const fn msb(x: u64) -> Option<usize> {
    if x != 0 {
        Some(63 - x.leading_zeros() as usize)
    } else {
        None
    }
}

/// Returns the position of the `k`-th (0-based) set bit in `x`, or
/// [`None`] if `popcount(x) <= k`.
///
/// # Examples
///
/// ```
/// use dysuc::broadword::select_in_word;
///
/// assert_eq!(select_in_word(0b10110, 0), Some(1));
/// assert_eq!(select_in_word(0b10110, 2), Some(4));
/// assert_eq!(select_in_word(0b10110, 3), None);
/// ```
#[inline(always)]
pub fn select_in_word(x: u64, k: usize) -> Option<usize> {
    if popcount(x) <= k {
        return None;
    }
    // Byte-wise prefix popcounts, one per byte lane.
    let mut byte_sums = x - ((x & (0xa * ONES_STEP_4)) >> 1);
    byte_sums = (byte_sums & (3 * ONES_STEP_4)) + ((byte_sums >> 2) & (3 * ONES_STEP_4));
    byte_sums = (byte_sums + (byte_sums >> 4)) & (0x0f * ONES_STEP_8);
    byte_sums = byte_sums.wrapping_mul(ONES_STEP_8);

    let k_step_8 = k as u64 * ONES_STEP_8;
    let geq_k_step_8 = ((k_step_8 | MSBS_STEP_8) - byte_sums) & MSBS_STEP_8;
    let place = popcount(geq_k_step_8) * 8;
    let byte_rank = k - (((byte_sums << 8) >> place) & 0xff) as usize;
    let byte = ((x >> place) & 0xff) as usize;
    Some(place + SELECT_IN_BYTE[256 * byte_rank + byte] as usize)
}

/// Returns a word whose lowest `len` bits are set.
///
/// # Examples
///
/// ```
/// use dysuc::broadword::low_mask;
///
/// assert_eq!(low_mask(0), 0);
/// assert_eq!(low_mask(3), 0b111);
/// assert_eq!(low_mask(64), u64::MAX);
/// ```
#[inline(always)]
pub const fn low_mask(len: usize) -> u64 {
    if len < WORD_LEN {
        (1 << len) - 1
    } else {
        u64::MAX
    }
}
