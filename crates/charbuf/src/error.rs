use thiserror::Error;

use crate::pool::AllocationError;

/// Errors surfaced by buffer operations.
///
/// Arguments are validated before any slot is touched, so an `Err` always
/// leaves the buffer exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An insertion index pointed beyond the written prefix.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The buffer length at the time of the call.
        len: usize,
    },
    /// A `start`/`count` window extended beyond the written prefix.
    #[error("window at {start} spanning {count} is out of bounds for length {len}")]
    RangeOutOfBounds {
        /// First slot of the requested window.
        start: usize,
        /// Number of slots in the requested window.
        count: usize,
        /// The buffer length at the time of the call.
        len: usize,
    },
    /// The memory pool could not satisfy a growth request.
    ///
    /// Fatal from the buffer's point of view: growth is not retried.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}
