//! # Adaptive Rank/Select Buckets
//!
//! *Broadword rank/select over words, and a 16-bit set that picks its own layout.*
//!
//! ## Intuition First
//!
//! Picture a parking garage with 65,536 numbered spots. When only a handful
//! of cars are parked, the cheapest record is a short sorted list of the
//! occupied spot numbers. When the garage fills up, that list grows longer
//! than a simple wall chart with one light per spot. A good attendant keeps
//! whichever record is smaller and swaps from one to the other the moment the
//! crossover point is passed.
//!
//! [`Container`] is that attendant. Underneath it sit two plainer tools: a
//! sorted key list ([`SortedKeys`]) and a word-packed bitmap ([`DenseBits`]),
//! whose counting queries are answered by broadword kernels in [`word`].
//!
//! ## The Problem
//!
//! Compressed bitsets and sparse indexes split a wide key space into 16-bit
//! slices. Each slice must answer:
//! - `contains(x)`: is `x` a member?
//! - `rank1(i)`: how many members lie strictly below `i`?
//! - `select1(k)`: which member has rank `k`?
//!
//! A sorted array costs 2 bytes per member; a bitmap costs a flat 8 KiB. The
//! two meet at 4096 members.
//!
//! ## Mathematical Formulation
//!
//! For a bit vector $B$ and position $i$:
//! - $\mathrm{rank}_1(B, i) = |\{j < i : B_j = 1\}|$, and
//!   $\mathrm{rank}_0(B, i) = i - \mathrm{rank}_1(B, i)$.
//! - $\mathrm{select}_1(B, k) = \min\{p : \mathrm{rank}_1(B, p + 1) = k + 1\}$.
//!
//! ## Complexity Analysis
//!
//! | Operation | Word | `DenseBits` | `SortedKeys` |
//! |---|---|---|---|
//! | rank | $O(1)$ | $O(w)$ | $O(\log n)$ |
//! | select | $O(1)$ | $O(w)$ linear, $O(w \log N)$ search | $O(1)$ |
//! | insert/remove | - | $O(1)$ amortized | $O(n)$ |
//!
//! where $w$ is the word count (at most 1025) and $N = 64w$.
//!
//! ## What Could Go Wrong
//!
//! 1. **Thrashing at the threshold**: alternating insert/remove of one key
//!    around 4096 members migrates on every call. Each migration is bounded
//!    by the domain size, so the cost is large but finite.
//! 2. **Select past the end**: [`Container::select1`] panics on a rank it
//!    does not hold; use [`Container::try_select1`] when the rank comes from
//!    untrusted input.
//!
//! ## References
//!
//! - Vigna, S. (2008). "Broadword implementation of rank/select queries."
//! - Chambi, S., et al. (2016). "Better bitmap performance with Roaring bitmaps."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitvec;
pub mod container;
pub mod error;
pub mod iter;
pub mod sorted;
pub mod word;

pub use bitvec::DenseBits;
pub use container::Container;
pub use error::{Error, Result};
pub use iter::Ones;
pub use sorted::SortedKeys;
