//! Growable dense bit vector with rank/select support.
//!
//! Storage is a plain sequence of words: position `i` lives in word
//! `i / 64`, bit `i % 64`. There is no auxiliary index, so rank and select
//! are linear in the number of words. For the 16-bit domain this is at most
//! [`MAX_WORDS`] words, which keeps every query inside a few cache lines of
//! per-word popcounts.
//!
//! # Growth
//!
//! The vector only grows. Setting a bit past the current end extends storage
//! by amortized doubling, capped at [`MAX_WORDS`]. Reads past the end behave
//! as if the missing words were all zero.

use crate::error::{Error, Result};
use crate::iter::Ones;
use crate::word::{self, WORD_BITS, WORD_SHIFT};

/// Size of the fixed key domain covered by one container.
pub const DOMAIN_BITS: usize = 1 << 16;

/// Storage cap in words: the whole domain plus one guard word.
pub const MAX_WORDS: usize = DOMAIN_BITS / WORD_BITS + 1;

/// Word index and single-bit mask for position `i`.
#[inline]
fn locate(i: usize) -> (usize, u64) {
    (i >> WORD_SHIFT, 1u64 << (i % WORD_BITS))
}

/// A dense, growable bit vector.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DenseBits {
    words: Vec<u64>,
}

impl std::fmt::Debug for DenseBits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DenseBits")
            .field("words", &self.words.len())
            .field("capacity", &self.words.capacity())
            .field("ones", &self.count())
            .finish()
    }
}

impl DenseBits {
    /// Create an empty bit vector with no storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bit vector over a copy of `words`.
    ///
    /// Any length is accepted for reads; growth through
    /// [`insert`](Self::insert) stays capped at [`MAX_WORDS`].
    pub fn from_words(words: &[u64]) -> Self {
        Self {
            words: words.to_vec(),
        }
    }

    /// The underlying words.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Length in bits (64 × word count).
    pub fn len(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    /// Return true if no words are stored.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Heap memory held by the word storage, in bytes.
    pub fn heap_bytes(&self) -> usize {
        self.words.capacity() * std::mem::size_of::<u64>()
    }

    /// Return true if bit `i` is set.
    pub fn get(&self, i: usize) -> bool {
        let (q, mask) = locate(i);
        self.words.get(q).is_some_and(|&w| w & mask != 0)
    }

    /// Total number of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|&w| word::count(w)).sum()
    }

    /// Fraction of set bits over the stored capacity; 0 when empty.
    pub fn density(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        self.count() as f64 / self.len() as f64
    }

    /// Number of set bits in `[0, i)`.
    pub fn rank1(&self, i: usize) -> usize {
        let q = i >> WORD_SHIFT;
        let r = i % WORD_BITS;
        let whole = q.min(self.words.len());
        let mut rank: usize = self.words[..whole].iter().map(|&w| word::count(w)).sum();
        if let Some(&w) = self.words.get(q) {
            rank += word::rank1(w, r);
        }
        rank
    }

    /// Number of unset bits in `[0, i)`.
    pub fn rank0(&self, i: usize) -> usize {
        i - self.rank1(i)
    }

    /// Position of the `c`-th set bit (0-indexed), by a linear word scan.
    pub fn select1(&self, c: usize) -> Option<usize> {
        word::select1_words(&self.words, c)
    }

    /// Position of the `c`-th unset bit (0-indexed) within stored words.
    pub fn select0(&self, c: usize) -> Option<usize> {
        word::select0_words(&self.words, c)
    }

    /// Position of the `c`-th set bit by binary search over `rank1`.
    ///
    /// Agrees with [`select1`](Self::select1) for every `c`.
    pub fn select_search(&self, c: usize) -> Option<usize> {
        let bits = self.len();
        let (mut lo, mut hi) = (0, bits);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.rank1(mid + 1) > c {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        (lo < bits && self.get(lo)).then_some(lo)
    }

    /// Set bit `i`, growing storage if needed.
    ///
    /// Returns `Ok(false)` if the bit was already set, and
    /// [`Error::CapacityExceeded`] if `i` lies past the storage cap.
    pub fn try_insert(&mut self, i: usize) -> Result<bool> {
        let (q, mask) = locate(i);
        if q >= self.words.len() {
            self.grow(q, i)?;
        }
        let w = &mut self.words[q];
        if *w & mask != 0 {
            return Ok(false);
        }
        *w |= mask;
        Ok(true)
    }

    /// Set bit `i`; returns whether it was newly set.
    ///
    /// # Panics
    ///
    /// Panics if `i` lies past the storage cap.
    pub fn insert(&mut self, i: usize) -> bool {
        match self.try_insert(i) {
            Ok(added) => added,
            Err(e) => panic!("bucketbits: {e}"),
        }
    }

    /// Clear bit `i`; returns whether it was set.
    pub fn remove(&mut self, i: usize) -> bool {
        let (q, mask) = locate(i);
        match self.words.get_mut(q) {
            Some(w) if *w & mask != 0 => {
                *w &= !mask;
                true
            }
            _ => false,
        }
    }

    /// Iterate over set positions in ascending order.
    pub fn ones(&self) -> Ones<'_> {
        Ones::new(&self.words)
    }

    fn grow(&mut self, q: usize, position: usize) -> Result<()> {
        if q >= MAX_WORDS {
            return Err(Error::CapacityExceeded {
                position,
                max: MAX_WORDS * WORD_BITS,
            });
        }
        let target = (self.words.len() * 2).clamp(q + 1, MAX_WORDS);
        log::trace!("dense storage grows {} -> {} words", self.words.len(), target);
        self.words.resize(target, 0);
        Ok(())
    }
}
