//! Sorted array of 16-bit keys.
//!
//! The sparse representation of a [`Container`](crate::Container): each
//! element is the position of one set bit. Storage costs two bytes per key.

/// A strictly ascending, duplicate-free sequence of `u16` keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortedKeys {
    keys: Vec<u16>,
}

impl SortedKeys {
    /// Create an empty key set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty key set with room for `n` keys.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            keys: Vec::with_capacity(n),
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Return true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in ascending order.
    pub fn as_slice(&self) -> &[u16] {
        &self.keys
    }

    /// Key at index `i` in ascending order.
    pub fn get(&self, i: usize) -> Option<u16> {
        self.keys.get(i).copied()
    }

    /// Heap memory held by the key storage, in bytes.
    pub fn heap_bytes(&self) -> usize {
        self.keys.capacity() * std::mem::size_of::<u16>()
    }

    /// Binary search: `Ok(index)` if present, otherwise the insertion point.
    fn search(&self, x: u16) -> Result<usize, usize> {
        self.keys.binary_search(&x)
    }

    /// Return true if `x` is present. O(log n).
    pub fn test(&self, x: u16) -> bool {
        self.search(x).is_ok()
    }

    /// Number of keys strictly below `x`.
    pub fn rank(&self, x: usize) -> usize {
        self.keys.partition_point(|&k| (k as usize) < x)
    }

    /// Insert `x`; returns false if it was already present.
    pub fn insert(&mut self, x: u16) -> bool {
        match self.search(x) {
            Ok(_) => false,
            Err(i) => {
                self.keys.insert(i, x);
                true
            }
        }
    }

    /// Remove `x`; returns false if it was absent.
    ///
    /// Storage is shrunk once less than half of it is in use.
    pub fn remove(&mut self, x: u16) -> bool {
        match self.search(x) {
            Ok(i) => {
                self.keys.remove(i);
                if self.keys.len() * 2 < self.keys.capacity() {
                    self.keys.shrink_to_fit();
                }
                true
            }
            Err(_) => false,
        }
    }
}
