//! Error types for handle validation failures.
//!
//! Every variant is a detected programming defect, not a recoverable
//! condition. The `try_*` operation surface propagates these as values;
//! the bare fail-fast surface converts them into a located diagnostic
//! line and terminates the process.

use std::error::Error;
use std::fmt;

/// Errors detected by handle validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandleError {
    /// The system allocator could not satisfy the request.
    AllocationFailed {
        /// Number of elements requested.
        requested: usize,
    },
    /// An index outside `[0, len)` was used for element access.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Element count of the allocation.
        len: usize,
    },
    /// Element access through a retired or untracked handle.
    UseAfterFree,
    /// Release of an already-retired or untracked handle.
    DoubleFree,
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested } => {
                write!(f, "memory allocation failed ({requested} elements requested)")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for handle of length {len}")
            }
            Self::UseAfterFree => write!(f, "use after free"),
            Self::DoubleFree => write!(f, "double free"),
        }
    }
}

impl Error for HandleError {}
