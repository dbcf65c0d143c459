//! Broadword rank/select kernels over a single 64-bit word.
//!
//! Bit `i` of a word carries weight $2^i$, so position 0 is the least
//! significant bit. Every kernel here is branch-free bit-parallel arithmetic
//! over the word's eight byte lanes: no loop walks individual bits or bytes.
//!
//! # Theory
//!
//! `select1` follows Vigna's broadword selection:
//! 1. Sideways addition leaves the population of each byte in its lane, and a
//!    multiplication by [`L8`] turns those into inclusive prefix sums.
//! 2. An unsigned lane-wise `<=` against the rank replicated into every lane
//!    counts how many bytes lie entirely below the target: that count is the
//!    target byte.
//! 3. The target byte is replicated, masked so lane `k` keeps only bit `k`,
//!    and the same prefix-sum plus compare trick resolves the bit inside it.
//!
//! # References
//!
//! - Vigna, S. (2008). "Broadword implementation of rank/select queries."

/// Number of bit positions in a word.
pub const WORD_BITS: usize = 64;

/// `log2(WORD_BITS)`: `i >> WORD_SHIFT == i / WORD_BITS`.
pub const WORD_SHIFT: usize = 6;

/// Internal select result for "fewer set bits than requested".
///
/// Lies outside `0..WORD_BITS`; callers only ever see `None`.
const SELECT_NOT_FOUND: usize = 72;

// Population-count masks. Each one isolates the low half of every 2-, 4- or
// 8-bit lane so the sideways additions cannot carry across lanes.

/// `0101...`: low bit of every 2-bit lane.
pub const M1: u64 = 0x5555_5555_5555_5555;
/// `0011...`: low half of every 4-bit lane.
pub const M2: u64 = 0x3333_3333_3333_3333;
/// `00001111...`: low half of every byte lane.
pub const M4: u64 = 0x0F0F_0F0F_0F0F_0F0F;
/// `1` in every byte lane; multiplying by it sums all lanes into the top
/// byte and leaves inclusive prefix sums in the others.
pub const L8: u64 = 0x0101_0101_0101_0101;

// Select masks. Byte-lane comparisons keep their verdict in the lane's high
// bit, so operands are confined to the low seven bits of each lane.

/// `1010...`: high bit of every 2-bit lane.
const M1_HIGH: u64 = 0xAAAA_AAAA_AAAA_AAAA;
/// High bit of every byte lane; carries lane-wise comparison results.
pub const H8: u64 = 0x8080_8080_8080_8080;
/// Bit `k` of byte lane `k`. Applied to a replicated byte it leaves exactly
/// one of that byte's bits in each lane.
const BYTE_BIT_PROBE: u64 = 0x8040_2010_0804_0201;
/// Mask for a single byte lane.
const BYTE_MASK: u64 = 0xFF;

/// Lane-wise unsigned `x <= y` over byte lanes holding values below 128.
///
/// Sets the high bit of every lane where the comparison holds.
#[inline]
fn le8(x: u64, y: u64) -> u64 {
    (((y | H8) - (x & !H8)) ^ x ^ y) & H8
}

/// Lane-wise unsigned `x < y` over byte lanes.
#[inline]
fn lt8(x: u64, y: u64) -> u64 {
    (((x | H8) - (y & !H8)) ^ x ^ !y) & H8
}

/// Number of set bits in `w`, in `0..=64`.
#[inline]
pub fn count(w: u64) -> usize {
    let w = w - ((w >> 1) & M1);
    let w = (w & M2) + ((w >> 2) & M2);
    let w = (w + (w >> 4)) & M4;
    (w.wrapping_mul(L8) >> 56) as usize
}

/// Number of set bits in positions `[0, i)`.
///
/// `rank1(w, 64) == count(w)`; any `i >= 64` behaves like 64.
#[inline]
pub fn rank1(w: u64, i: usize) -> usize {
    if i >= WORD_BITS {
        return count(w);
    }
    count(w & ((1u64 << i) - 1))
}

/// Number of unset bits in positions `[0, i)`.
#[inline]
pub fn rank0(w: u64, i: usize) -> usize {
    rank1(!w, i)
}

fn select_broadword(x: u64, c: usize) -> usize {
    if c >= WORD_BITS {
        return SELECT_NOT_FOUND;
    }
    let c = c as u64;

    let s0 = x - ((x & M1_HIGH) >> 1);
    let s1 = (s0 & M2) + ((s0 >> 2) & M2);
    let prefix = ((s1 + (s1 >> 4)) & M4).wrapping_mul(L8);

    let bytes_below = (le8(prefix, c * L8) >> 7).wrapping_mul(L8);
    let shift = ((bytes_below >> 53) & !0b111) as u32;
    if shift as usize >= WORD_BITS {
        return SELECT_NOT_FOUND;
    }

    let rest = c - (((prefix << 8) >> shift) & BYTE_MASK);
    let byte = ((x >> shift) & BYTE_MASK).wrapping_mul(L8) & BYTE_BIT_PROBE;
    let byte_prefix = (lt8(0, byte) >> 7).wrapping_mul(L8);
    let bit = (le8(byte_prefix, rest * L8) >> 7).wrapping_mul(L8) >> 56;

    shift as usize + bit as usize
}

/// Position of the `(c+1)`-th set bit of `w`, or `None` when `c >= count(w)`.
#[inline]
pub fn select1(w: u64, c: usize) -> Option<usize> {
    match select_broadword(w, c) {
        SELECT_NOT_FOUND => None,
        i => Some(i),
    }
}

/// Position of the `(c+1)`-th unset bit of `w`.
#[inline]
pub fn select0(w: u64, c: usize) -> Option<usize> {
    select1(!w, c)
}

/// Leading zero count; 64 for a zero word.
pub fn leading_zeros(w: u64) -> usize {
    if w == 0 {
        return WORD_BITS;
    }
    (WORD_BITS - 1) - select_broadword(w, count(w) - 1)
}

/// Trailing zero count; 64 for a zero word.
pub fn trailing_zeros(w: u64) -> usize {
    if w == 0 {
        return WORD_BITS;
    }
    select_broadword(w, 0)
}

/// Select over a word slice: position of the `(c+1)`-th set bit.
pub fn select1_words(words: &[u64], mut c: usize) -> Option<usize> {
    for (i, &w) in words.iter().enumerate() {
        let ones = count(w);
        if c < ones {
            return select1(w, c).map(|p| i * WORD_BITS + p);
        }
        c -= ones;
    }
    None
}

/// Select over a word slice: position of the `(c+1)`-th unset bit.
pub fn select0_words(words: &[u64], mut c: usize) -> Option<usize> {
    for (i, &w) in words.iter().enumerate() {
        let zeros = count(!w);
        if c < zeros {
            return select0(w, c).map(|p| i * WORD_BITS + p);
        }
        c -= zeros;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> u64 {
        u64::from_str_radix(s, 2).unwrap()
    }

    #[test]
    fn test_count_matches_hardware() {
        for w in [0, 1, u64::MAX, M1, M2, M4, H8, 0xDEAD_BEEF_0BAD_F00D] {
            assert_eq!(count(w), w.count_ones() as usize, "w={w:#x}");
        }
    }

    #[test]
    fn test_rank1_literal() {
        let w = bits("01010100101001010101");
        let want = [(0, 0), (1, 1), (2, 1), (4, 2), (8, 4), (16, 7), (19, 9), (20, 9)];
        for (i, r) in want {
            assert_eq!(rank1(w, i), r, "i={i}");
            assert_eq!(rank1(w, i) + rank0(w, i), i);
        }

        let w = bits("10010001000100101011");
        let want = [(1, 1), (2, 2), (4, 3), (8, 4), (16, 6), (19, 7), (20, 8)];
        for (i, r) in want {
            assert_eq!(rank1(w, i), r, "i={i}");
        }

        assert_eq!(rank1(u64::MAX, 63), 63);
        assert_eq!(rank1(u64::MAX, 64), 64);
        assert_eq!(rank1(0, 1), 0);
    }

    #[test]
    fn test_select1_literal() {
        let w = bits("10100000100101101001");
        for (c, p) in [0, 3, 5, 6, 8, 11, 17].into_iter().enumerate() {
            assert_eq!(select1(w, c), Some(p), "c={c}");
        }
        assert_eq!(select1(w, 7), None);

        let w = bits("01010100101001010101");
        assert_eq!(select1(w, 1), Some(2));
        assert_eq!(select1(w, 2), Some(4));
        assert_eq!(select1(w, 3), Some(6));
    }

    #[test]
    fn test_select_edges() {
        assert_eq!(select1(0, 0), None);
        assert_eq!(select1(1 << 63, 0), Some(63));
        assert_eq!(select1(1 << 63, 1), None);
        for c in 0..64 {
            assert_eq!(select1(u64::MAX, c), Some(c));
        }
        assert_eq!(select1(u64::MAX, 64), None);
        assert_eq!(select1(u64::MAX, usize::MAX), None);

        // Bits at positions 7 and 8 straddle the first byte boundary.
        assert_eq!(select1(0b1_1000_0000, 0), Some(7));
        assert_eq!(select1(0b1_1000_0000, 1), Some(8));

        assert_eq!(select0(u64::MAX, 0), None);
        assert_eq!(select0(0b1011, 0), Some(2));
        assert_eq!(select0(0b1011, 1), Some(4));
    }

    #[test]
    fn test_zero_counts() {
        assert_eq!(leading_zeros(0), 64);
        assert_eq!(trailing_zeros(0), 64);
        assert_eq!(leading_zeros(1), 63);
        assert_eq!(trailing_zeros(1 << 63), 63);
        assert_eq!(leading_zeros(0b1_0010), 59);
        assert_eq!(trailing_zeros(0b1_0010), 1);
        assert_eq!(leading_zeros(u64::MAX), 0);
    }

    #[test]
    fn test_select_words() {
        let words = [0b1011, 0, 1 << 5];
        assert_eq!(select1_words(&words, 0), Some(0));
        assert_eq!(select1_words(&words, 2), Some(3));
        assert_eq!(select1_words(&words, 3), Some(128 + 5));
        assert_eq!(select1_words(&words, 4), None);
        assert_eq!(select1_words(&[], 0), None);

        assert_eq!(select0_words(&words, 0), Some(2));
        assert_eq!(select0_words(&[u64::MAX, 0], 0), Some(64));
        assert_eq!(select0_words(&[u64::MAX], 0), None);
    }
}
