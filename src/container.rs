//! Adaptive set over the 16-bit domain.
//!
//! A [`Container`] holds a subset of `0..65536` in whichever of two layouts is
//! smaller for its current cardinality:
//!
//! - **Sparse**: a [`SortedKeys`] array at 2 bytes per member.
//! - **Dense**: a [`DenseBits`] bitmap, 8 KiB for the full domain.
//!
//! The two cost the same at 4096 members, so the container stays sparse up to
//! [`SPARSE_MAX`] members and dense beyond it. The switch happens inside the
//! `insert`/`remove` call that crosses the threshold, and the old layout is
//! dropped before that call returns.

use std::fmt;
use std::iter::{Copied, FusedIterator};
use std::slice;

use crate::bitvec::{DenseBits, DOMAIN_BITS};
use crate::error::{Error, Result};
use crate::iter::Ones;
use crate::sorted::SortedKeys;

/// Largest cardinality kept in the sparse layout.
pub const SPARSE_MAX: usize = 4096;

/// The live layout. Exactly one exists at a time.
#[derive(Clone)]
enum Repr {
    Sparse(SortedKeys),
    Dense(DenseBits),
}

/// A set of `u16` keys that switches between sorted-array and bitmap storage.
#[derive(Clone)]
pub struct Container {
    len: usize,
    repr: Repr,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.is_dense() { "dense" } else { "sparse" };
        f.debug_struct("Container")
            .field("len", &self.len)
            .field("mode", &mode)
            .field("heap_bytes", &self.heap_bytes())
            .finish()
    }
}

impl Container {
    /// Create an empty container in the sparse layout.
    pub fn new() -> Self {
        Self {
            len: 0,
            repr: Repr::Sparse(SortedKeys::new()),
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if there are no members.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return true if the bitmap layout is live.
    pub fn is_dense(&self) -> bool {
        matches!(self.repr, Repr::Dense(_))
    }

    /// The sorted-array layout, if live.
    pub fn sparse(&self) -> Option<&SortedKeys> {
        match &self.repr {
            Repr::Sparse(keys) => Some(keys),
            Repr::Dense(_) => None,
        }
    }

    /// The bitmap layout, if live.
    pub fn dense(&self) -> Option<&DenseBits> {
        match &self.repr {
            Repr::Dense(bits) => Some(bits),
            Repr::Sparse(_) => None,
        }
    }

    /// Heap memory held by the live layout, in bytes.
    pub fn heap_bytes(&self) -> usize {
        match &self.repr {
            Repr::Sparse(keys) => keys.heap_bytes(),
            Repr::Dense(bits) => bits.heap_bytes(),
        }
    }

    /// Return true if `x` is a member.
    pub fn contains(&self, x: u16) -> bool {
        match &self.repr {
            Repr::Sparse(keys) => keys.test(x),
            Repr::Dense(bits) => bits.get(x as usize),
        }
    }

    /// Number of members strictly below `i`.
    ///
    /// Any `i >= 65536` yields the cardinality.
    pub fn rank1(&self, i: usize) -> usize {
        if i >= DOMAIN_BITS {
            return self.len;
        }
        match &self.repr {
            Repr::Sparse(keys) => keys.rank(i),
            Repr::Dense(bits) => bits.rank1(i),
        }
    }

    /// Number of non-members strictly below `i`.
    pub fn rank0(&self, i: usize) -> usize {
        i.min(DOMAIN_BITS) - self.rank1(i)
    }

    /// The member of rank `rank` (0-indexed), or
    /// [`Error::RankOutOfRange`] unless `rank < len()`.
    pub fn try_select1(&self, rank: usize) -> Result<u16> {
        let out_of_range = Error::RankOutOfRange {
            rank,
            cardinality: self.len,
        };
        if rank >= self.len {
            return Err(out_of_range);
        }
        let pos = match &self.repr {
            Repr::Sparse(keys) => keys.get(rank),
            Repr::Dense(bits) => bits.select_search(rank).map(|p| p as u16),
        };
        pos.ok_or(out_of_range)
    }

    /// The member of rank `rank` (0-indexed).
    ///
    /// # Panics
    ///
    /// Panics unless `rank < len()`; asking for a rank the container does not
    /// have is a caller bug.
    pub fn select1(&self, rank: usize) -> u16 {
        match self.try_select1(rank) {
            Ok(x) => x,
            Err(e) => panic!("bucketbits: {e}"),
        }
    }

    /// Add `x`; returns false if it was already a member.
    pub fn insert(&mut self, x: u16) -> bool {
        let added = match &mut self.repr {
            Repr::Sparse(keys) => keys.insert(x),
            Repr::Dense(bits) => bits.insert(x as usize),
        };
        if added {
            self.len += 1;
            if self.len > SPARSE_MAX {
                self.densify();
            }
        }
        added
    }

    /// Remove `x`; returns false if it was not a member.
    pub fn remove(&mut self, x: u16) -> bool {
        let removed = match &mut self.repr {
            Repr::Sparse(keys) => keys.remove(x),
            Repr::Dense(bits) => bits.remove(x as usize),
        };
        if removed {
            self.len -= 1;
            if self.len <= SPARSE_MAX {
                self.sparsify();
            }
        }
        removed
    }

    /// Iterate over members in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        match &self.repr {
            Repr::Sparse(keys) => Iter::Sparse(keys.as_slice().iter().copied()),
            Repr::Dense(bits) => Iter::Dense(bits.ones()),
        }
    }

    fn densify(&mut self) {
        let Repr::Sparse(keys) = &self.repr else {
            return;
        };
        let mut bits = DenseBits::new();
        for &key in keys.as_slice() {
            if !bits.insert(key as usize) {
                migration_failed(key, "dense");
            }
        }
        debug_assert_eq!(bits.count(), self.len);
        log::debug!(
            "container -> dense: len={} heap_bytes={}",
            self.len,
            bits.heap_bytes()
        );
        self.repr = Repr::Dense(bits);
    }

    fn sparsify(&mut self) {
        let Repr::Dense(bits) = &self.repr else {
            return;
        };
        let mut keys = SortedKeys::with_capacity(self.len);
        for pos in bits.ones() {
            let key = pos as u16;
            if !keys.insert(key) {
                migration_failed(key, "sparse");
            }
        }
        debug_assert_eq!(keys.len(), self.len);
        log::debug!(
            "container -> sparse: len={} heap_bytes={}",
            self.len,
            keys.heap_bytes()
        );
        self.repr = Repr::Sparse(keys);
    }
}

#[cold]
fn migration_failed(key: u16, target: &'static str) -> ! {
    panic!(
        "bucketbits: {}",
        Error::DuplicateOnMigration { key, target }
    )
}

impl FromIterator<u16> for Container {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let mut container = Self::new();
        container.extend(iter);
        container
    }
}

impl Extend<u16> for Container {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, iter: I) {
        for x in iter {
            self.insert(x);
        }
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = u16;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Ascending iterator over the members of a [`Container`].
#[derive(Clone, Debug)]
pub enum Iter<'a> {
    /// Walks the sorted keys directly.
    Sparse(Copied<slice::Iter<'a, u16>>),
    /// Walks the set bits of the bitmap.
    Dense(Ones<'a>),
}

impl Iterator for Iter<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        match self {
            Iter::Sparse(it) => it.next(),
            Iter::Dense(it) => it.next().map(|p| p as u16),
        }
    }
}

impl FusedIterator for Iter<'_> {}
