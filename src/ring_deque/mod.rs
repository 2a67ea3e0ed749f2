//! `RingDeque` — a growable double-ended queue over a power-of-two ring buffer.
//!
//! Vertical split:
//! - `buffer`: raw slot storage + capacity policy
//! - `edit`: middle insertion/removal
//! - `slicing`: copies out of the deque (slices, windows, `copy_into`)
//! - `iter`: iterators and std trait adapters
//! - `tests`: module tests
//!
//! The backing array always has a power-of-two length so that wrapping a
//! physical index is a single mask. One slot is always left free: with
//! `start == end` meaning empty, a completely full ring would be
//! indistinguishable from an empty one.
//!
//! Performance Characteristics:
//! - Push/Pop at either end: amortized O(1)
//! - `get`/`set`: O(1)
//! - `insert_at`/`remove_at` in the interior: O(n)
//! - Growth: doubles, re-linearizing the contents with at most two copies

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::error::DequeError;
use crate::trace::trace_event;

mod buffer;
mod edit;
mod iter;
mod slicing;
#[cfg(test)]
mod tests;

use buffer::RingBuffer;
pub use buffer::{capacity_for, DEFAULT_CAPACITY};
pub use iter::{IntoIter, Iter, IterMut};
pub use slicing::SlidingWindows;

/// A double-ended, randomly indexable, growable sequence.
///
/// `RingDeque` performs no internal synchronization. It is `Send`/`Sync`
/// exactly when `T` is, like `Vec<T>`; sharing one between threads for
/// mutation requires external locking.
pub struct RingDeque<T> {
    buf: RingBuffer<T>,
    /// Physical index of logical element 0.
    start: usize,
    /// Physical index one past the last element, wrapped.
    end: usize,
}

impl<T> RingDeque<T> {
    /// Creates an empty deque with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_buffer(RingBuffer::with_capacity(DEFAULT_CAPACITY))
    }

    /// Creates an empty deque able to hold `hint` elements without regrowing.
    pub fn with_capacity(hint: usize) -> Self {
        Self::with_buffer(RingBuffer::with_capacity(capacity_for(hint)))
    }

    #[inline]
    fn with_buffer(buf: RingBuffer<T>) -> Self {
        Self { buf, start: 0, end: 0 }
    }

    /// Number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.end.wrapping_sub(self.start) & self.buf.mask()
    }

    /// Returns `true` if empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length of the backing array. At most `capacity() - 1` elements fit
    /// before the next regrow.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Maps a logical index to its physical slot.
    #[inline(always)]
    fn phys(&self, idx: usize) -> usize {
        self.start.wrapping_add(idx) & self.buf.mask()
    }

    #[inline]
    fn check_index(&self, idx: usize) -> Result<(), DequeError> {
        let len = self.len();
        if idx < len {
            Ok(())
        } else {
            Err(DequeError::IndexOutOfRange { index: idx, len })
        }
    }

    /// Returns a shared reference to the element at `idx`.
    ///
    /// # Errors
    /// `IndexOutOfRange` unless `idx < len()`.
    #[inline]
    pub fn get(&self, idx: usize) -> Result<&T, DequeError> {
        self.check_index(idx)?;
        // SAFETY: `idx < len`, so the slot lies in the live region.
        Ok(unsafe { self.buf.get(self.phys(idx)) })
    }

    /// Returns an exclusive reference to the element at `idx`.
    ///
    /// # Errors
    /// `IndexOutOfRange` unless `idx < len()`.
    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Result<&mut T, DequeError> {
        self.check_index(idx)?;
        let phys = self.phys(idx);
        // SAFETY: `idx < len`, so the slot lies in the live region.
        Ok(unsafe { self.buf.get_mut(phys) })
    }

    /// Overwrites the element at `idx`, returning the value it replaced.
    ///
    /// # Errors
    /// `IndexOutOfRange` unless `idx < len()`.
    #[inline]
    pub fn set(&mut self, idx: usize, value: T) -> Result<T, DequeError> {
        Ok(core::mem::replace(self.get_mut(idx)?, value))
    }

    /// Returns the first element, if any.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0).ok()
    }

    /// Returns the last element, if any.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|last| self.get(last).ok())
    }

    /// Appends an element, regrowing first if the ring is full.
    pub fn push_back(&mut self, value: T) {
        self.grow_if_full();
        self.buf.write(self.end, value);
        self.end = (self.end + 1) & self.buf.mask();
    }

    /// Prepends an element, regrowing first if the ring is full.
    pub fn push_front(&mut self, value: T) {
        self.grow_if_full();
        self.start = self.start.wrapping_sub(1) & self.buf.mask();
        self.buf.write(self.start, value);
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    /// `EmptyContainer` if the deque is empty.
    #[inline]
    pub fn pop_back(&mut self) -> Result<T, DequeError> {
        self.take_back().ok_or(DequeError::EmptyContainer)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    /// `EmptyContainer` if the deque is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, DequeError> {
        self.take_front().ok_or(DequeError::EmptyContainer)
    }

    pub(crate) fn take_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.end = self.end.wrapping_sub(1) & self.buf.mask();
        // SAFETY: the deque was non-empty, so the old last slot was live; it
        // is outside the live region now.
        Some(unsafe { self.buf.read(self.end) })
    }

    pub(crate) fn take_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let head = self.start;
        self.start = (self.start + 1) & self.buf.mask();
        // SAFETY: the deque was non-empty, so `head` was live; it is outside
        // the live region now.
        Some(unsafe { self.buf.read(head) })
    }

    /// Drops every element and releases the backing array, returning to a
    /// fresh deque of [`DEFAULT_CAPACITY`].
    ///
    /// Capacity is not retained: `capacity()` is [`DEFAULT_CAPACITY`] afterwards.
    pub fn clear(&mut self) {
        trace_event!(released = self.capacity(), len = self.len(), "clearing deque");
        self.truncate(0);
        self.buf = RingBuffer::with_capacity(DEFAULT_CAPACITY);
        self.start = 0;
        self.end = 0;
    }

    /// Reallocates to the smallest capacity that holds the current elements,
    /// laid out from slot 0.
    pub fn trim_to_capacity(&mut self) {
        let target = capacity_for(self.len());
        trace_event!(from = self.capacity(), to = target, "trimming deque");
        self.relocate(target);
    }

    /// Ensures `additional` more elements fit without regrowing.
    ///
    /// # Panics
    /// Panics if the required capacity overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        let Some(needed) = self.len().checked_add(additional) else {
            buffer::capacity_overflow();
        };
        if needed >= self.capacity() {
            self.relocate(capacity_for(needed));
        }
    }

    #[inline]
    fn grow_if_full(&mut self) {
        let len = self.len();
        if len == self.buf.mask() {
            self.relocate(capacity_for(len + 1));
        }
    }

    /// Moves the live region into a fresh array of `capacity` slots with
    /// `start = 0`.
    fn relocate(&mut self, capacity: usize) {
        let len = self.len();
        debug_assert!(len < capacity);
        trace_event!(from = self.capacity(), to = capacity, len, "relocating ring buffer");
        let mut fresh = RingBuffer::with_capacity(capacity);
        // SAFETY: exactly the `len` slots from `start` are live and `fresh`
        // has room for them. The old buffer is dropped below without
        // touching its slots, so ownership moves exactly once.
        unsafe { self.buf.move_linear_into(self.start, len, &mut fresh) };
        self.buf = fresh;
        self.start = 0;
        self.end = len;
    }

    /// The elements as two slices in logical order. The second slice is
    /// empty unless the live region wraps past the end of the array.
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        // SAFETY: the wrapped range `[start, start + len)` is exactly the live region.
        unsafe { self.buf.slices(self.start, self.len()) }
    }

    /// Mutable counterpart of [`RingDeque::as_slices`].
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let len = self.len();
        // SAFETY: the wrapped range `[start, start + len)` is exactly the live region.
        unsafe { self.buf.slices_mut(self.start, len) }
    }
}

impl<T> Default for RingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RingDeque<T> {
    fn drop(&mut self) {
        let (front, back) = self.as_mut_slices();
        // SAFETY: both slices cover live elements only, and the backing
        // array is released right after without reading them again.
        unsafe {
            core::ptr::drop_in_place(front);
            core::ptr::drop_in_place(back);
        }
    }
}

impl<T: Clone> Clone for RingDeque<T> {
    /// Copies the backing array slot for slot, keeping `start`/`end` and the
    /// capacity. Elements are cloned with `T::clone`.
    fn clone(&self) -> Self {
        let mut out = Self {
            buf: RingBuffer::with_capacity(self.capacity()),
            start: self.start,
            end: self.start,
        };
        let mask = out.buf.mask();
        for item in self {
            out.buf.write(out.end, item.clone());
            out.end = (out.end + 1) & mask;
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for RingDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RingDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingDeque<T> {}

impl<T> Index<usize> for RingDeque<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        match self.get(idx) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for RingDeque<T> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        match self.get_mut(idx) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> From<Vec<T>> for RingDeque<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}
