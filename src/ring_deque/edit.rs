//! Insertion and removal away from the ends.

use core::mem;

use super::RingDeque;
use crate::error::DequeError;
use crate::trace::trace_event;

impl<T> RingDeque<T> {
    /// Shortens the deque to `len` elements, dropping the rest. Does nothing
    /// if the deque is already that short.
    pub fn truncate(&mut self, len: usize) {
        let old_len = self.len();
        if len >= old_len {
            return;
        }
        // Shrink first so a panicking destructor can at worst leak.
        self.end = self.phys(len);
        if mem::needs_drop::<T>() {
            for idx in len..old_len {
                let phys = self.phys(idx);
                // SAFETY: `idx` was live before `end` moved and is unreachable now.
                unsafe { self.buf.drop_slot(phys) };
            }
        }
    }

    /// Drops the first `count` elements by advancing `start`.
    fn advance_front(&mut self, count: usize) {
        debug_assert!(count <= self.len());
        let old_start = self.start;
        self.start = self.phys(count);
        if mem::needs_drop::<T>() {
            let mask = self.buf.mask();
            for offset in 0..count {
                // SAFETY: the slot was live before `start` moved and is unreachable now.
                unsafe { self.buf.drop_slot(old_start.wrapping_add(offset) & mask) };
            }
        }
    }

    /// Moves the `count` elements at `[idx, idx + count)` to the tail by
    /// shifting everything after them left, one slot exchange at a time.
    /// Afterwards the moved elements occupy `[len - count, len)`.
    fn shift_to_tail(&mut self, idx: usize, count: usize) {
        let len = self.len();
        for dst in idx..len - count {
            let (a, b) = (self.phys(dst), self.phys(dst + count));
            self.buf.swap(a, b);
        }
    }

    /// Inserts `elements` so that the first of them ends up at `idx`.
    ///
    /// At `idx == 0` the elements are pushed to the front in reverse, at
    /// `idx == len()` they are appended. Anywhere else the suffix
    /// `[idx, len)` is lifted out, the elements appended and the suffix
    /// appended back, so the cost is linear in `len() - idx` plus the number
    /// of inserted elements.
    ///
    /// # Errors
    /// `IndexOutOfRange` unless `idx <= len()`.
    ///
    /// ```rust
    /// use ring_deque::RingDeque;
    ///
    /// let mut dq: RingDeque<i32> = [1, 2, 6, 7, 8].into_iter().collect();
    /// dq.insert_at(2, [9, 10]).unwrap();
    /// assert_eq!(dq.iter().copied().collect::<Vec<_>>(), [1, 2, 9, 10, 6, 7, 8]);
    /// ```
    pub fn insert_at<I>(&mut self, idx: usize, elements: I) -> Result<(), DequeError>
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.len();
        if idx > len {
            return Err(DequeError::IndexOutOfRange { index: idx, len });
        }

        if idx == 0 {
            let items: Vec<T> = elements.into_iter().collect();
            self.reserve(items.len());
            for item in items.into_iter().rev() {
                self.push_front(item);
            }
            return Ok(());
        }

        if idx == len {
            self.extend(elements);
            return Ok(());
        }

        trace_event!(idx, moved = len - idx, "interior insert");
        let mut suffix = Vec::with_capacity(len - idx);
        while self.len() > idx {
            suffix.extend(self.take_back());
        }
        self.extend(elements);
        self.reserve(suffix.len());
        while let Some(item) = suffix.pop() {
            self.push_back(item);
        }
        Ok(())
    }

    /// Removes up to `count` elements starting at `idx`, dropping them.
    ///
    /// `count` is clamped to the elements available from `idx`. Removals
    /// that reach the tail or start at the head only move a cursor; an
    /// interior removal shifts the suffix left by `count`.
    ///
    /// # Errors
    /// `IndexOutOfRange` unless `idx < len()`. A `count` of zero is always
    /// accepted and changes nothing.
    pub fn remove_at(&mut self, idx: usize, count: usize) -> Result<(), DequeError> {
        if count == 0 {
            return Ok(());
        }
        self.check_index(idx)?;
        let len = self.len();
        let count = count.min(len - idx);

        if idx + count == len {
            self.truncate(idx);
        } else if idx == 0 {
            self.advance_front(count);
        } else {
            trace_event!(idx, count, moved = len - idx - count, "interior remove");
            self.shift_to_tail(idx, count);
            self.truncate(len - count);
        }
        Ok(())
    }

    /// Removes and returns the element at `idx`.
    ///
    /// # Errors
    /// `IndexOutOfRange` unless `idx < len()`.
    pub fn remove_one(&mut self, idx: usize) -> Result<T, DequeError> {
        self.check_index(idx)?;
        if idx == 0 {
            return self.pop_front();
        }
        self.shift_to_tail(idx, 1);
        self.pop_back()
    }
}
