//! Error types for rank/select structures.

use thiserror::Error;

/// Contract violations reported by rank/select structures.
///
/// Absent keys and selects past the end of a plain bit vector are ordinary
/// outcomes (`false` / `None`) and never produce an `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A container select was asked for a rank outside `[0, cardinality)`.
    #[error("select rank {rank} out of range [0, {cardinality})")]
    RankOutOfRange {
        /// The requested rank.
        rank: usize,
        /// The container's cardinality at the time of the call.
        cardinality: usize,
    },

    /// A dense bit vector was asked to grow past its storage cap.
    #[error("position {position} exceeds dense capacity of {max} bits")]
    CapacityExceeded {
        /// The position being set.
        position: usize,
        /// Number of addressable bits at the cap.
        max: usize,
    },

    /// A key was already present while copying between representations.
    #[error("key {key} duplicated while migrating to {target} representation")]
    DuplicateOnMigration {
        /// The key reported as already present.
        key: u16,
        /// Name of the representation being built.
        target: &'static str,
    },
}

/// A specialized Result type for rank/select operations.
pub type Result<T> = std::result::Result<T, Error>;
