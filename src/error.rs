//! Error type shared by every fallible `RingDeque` operation.

/// The error type for rejected deque operations.
///
/// Every operation that returns this error fails before touching the deque,
/// so the container is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeError {
    /// A logical index or position was outside the valid range.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The length it was checked against.
        len: usize,
    },
    /// An element was requested from an empty deque.
    EmptyContainer,
    /// An argument violated the operation's precondition.
    InvalidArgument(&'static str),
}

impl core::fmt::Display for DequeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for deque of length {len}")
            }
            Self::EmptyContainer => f.write_str("deque is empty"),
            Self::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
        }
    }
}

impl std::error::Error for DequeError {}
