//! Ascending iteration over the set positions of a word sequence.

use std::iter::FusedIterator;

use crate::word::{self, WORD_BITS};

/// Single-pass cursor over the set bits of a borrowed word slice.
///
/// Produced by [`DenseBits::ones`](crate::DenseBits::ones). The borrow keeps
/// the source from being mutated while the cursor is alive.
#[derive(Clone, Debug)]
pub struct Ones<'a> {
    words: &'a [u64],
    /// Word holding the next candidate bit.
    index: usize,
    /// First bit of `words[index]` not yet visited; may be `WORD_BITS`.
    offset: usize,
}

impl<'a> Ones<'a> {
    pub(crate) fn new(words: &'a [u64]) -> Self {
        let (index, offset) = match word::select1_words(words, 0) {
            Some(first) => (first / WORD_BITS, first % WORD_BITS),
            None => (words.len(), 0),
        };
        Self {
            words,
            index,
            offset,
        }
    }
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(&w) = self.words.get(self.index) {
            let rest = if self.offset < WORD_BITS {
                w & (u64::MAX << self.offset)
            } else {
                0
            };
            if rest != 0 {
                let bit = word::trailing_zeros(rest);
                self.offset = bit + 1;
                return Some(self.index * WORD_BITS + bit);
            }
            self.index += 1;
            self.offset = 0;
        }
        None
    }
}

impl FusedIterator for Ones<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ones_skips_zero_words() {
        let words = [0, 0b1001, 0, 0, 1 << 63, 0];
        let got: Vec<usize> = Ones::new(&words).collect();
        assert_eq!(got, vec![64, 67, 4 * 64 + 63]);
    }

    #[test]
    fn test_ones_empty_and_full() {
        assert_eq!(Ones::new(&[]).next(), None);
        assert_eq!(Ones::new(&[0, 0]).count(), 0);

        let got: Vec<usize> = Ones::new(&[u64::MAX]).collect();
        assert_eq!(got, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_ones_fused() {
        let mut it = Ones::new(&[1]);
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}
