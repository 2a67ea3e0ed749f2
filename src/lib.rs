//! # `ring-deque` - Ring Buffer Double-Ended Queue
//!
//! A double-ended, randomly indexable, growable sequence backed by a
//! circular buffer over a single contiguous array.
//!
//! ## Key Features
//!
//! - **Amortized O(1) ends**: push and pop at either end without shifting
//! - **O(1) random access**: `get`/`set` by logical index
//! - **Middle edits**: linear-time `insert_at` and `remove_at`
//! - **Copy-out slicing**: `slice`, `sliding_windows`, `grouped_chunks`, `copy_into`
//!
//! ## Architecture
//!
//! The backing array length is always a power of two (at least
//! [`DEFAULT_CAPACITY`]), so wrapping a physical index is `x & (capacity - 1)`.
//! Two cursors delimit the live region: `start` (first element) and `end`
//! (one past the last). One slot always stays free so that `start == end`
//! unambiguously means "empty".
//!
//! ### Capacity Policy
//!
//! - Growth happens eagerly inside the mutating call that needs it, doubling
//!   the array and laying the contents out from slot 0.
//! - Popping never shrinks the array.
//! - [`RingDeque::trim_to_capacity`] shrinks to the smallest fitting power of two.
//! - [`RingDeque::clear`] releases the array entirely and starts over at
//!   [`DEFAULT_CAPACITY`].
//!
//! ### Errors
//!
//! Fallible operations return [`DequeError`] and leave the deque untouched on
//! failure. The `Index`/`IndexMut` impls panic instead, like slices do.
//!
//! ### Logging
//!
//! With the `tracing` feature, regrowth, trimming, clearing and interior
//! edits emit `TRACE` events.
//!
//! ## Example
//!
//! ```rust
//! use ring_deque::RingDeque;
//!
//! let mut dq = RingDeque::new();
//! for i in 1..=7 {
//!     dq.push_back(i);
//! }
//! assert_eq!(dq.capacity(), 8);
//!
//! // The eighth element no longer fits next to the free slot.
//! dq.push_back(8);
//! assert_eq!(dq.capacity(), 16);
//!
//! dq.remove_at(2, 3).unwrap();
//! assert_eq!(dq.iter().copied().collect::<Vec<_>>(), [1, 2, 6, 7, 8]);
//!
//! dq.insert_at(2, [9, 10]).unwrap();
//! assert_eq!(dq.iter().copied().collect::<Vec<_>>(), [1, 2, 9, 10, 6, 7, 8]);
//!
//! assert_eq!(dq.pop_front(), Ok(1));
//! assert_eq!(dq[0], 2);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod ring_deque;
mod trace;

pub use error::DequeError;
pub use ring_deque::{capacity_for, IntoIter, Iter, IterMut, RingDeque, SlidingWindows, DEFAULT_CAPACITY};

const _: () = {
    use core::mem;

    // Boxed slice (pointer + length) and the two cursors.
    assert!(mem::size_of::<RingDeque<u64>>() == mem::size_of::<usize>() * 4);
    assert!(DEFAULT_CAPACITY.is_power_of_two());
};
