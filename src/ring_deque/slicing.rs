//! Copies out of a deque: slices, sliding windows and `copy_into`.
//!
//! Everything here clones elements into independent storage; nothing
//! returned shares a backing array with the source deque.

use core::iter::FusedIterator;

use super::RingDeque;
use crate::error::DequeError;

impl<T: Clone> RingDeque<T> {
    /// Returns a new deque holding clones of the elements in `[from, to)`.
    ///
    /// Both bounds are clamped into `[0, len()]`, so out-of-range and
    /// negative bounds are accepted. An empty or inverted range yields an
    /// empty deque; the full range yields a clone.
    ///
    /// ```rust
    /// use ring_deque::RingDeque;
    ///
    /// let dq: RingDeque<u8> = (0..6).collect();
    /// assert_eq!(dq.slice(-5, 11), dq);
    /// assert!(dq.slice(3, 3).is_empty());
    /// assert_eq!(dq.slice(1, 4).iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn slice(&self, from: isize, to: isize) -> RingDeque<T> {
        let len = self.len();
        let clamp = |bound: isize| usize::try_from(bound).map_or(0, |bound| bound.min(len));
        self.slice_clamped(clamp(from), clamp(to))
    }

    /// `slice` for bounds already inside `[0, len()]`.
    fn slice_clamped(&self, from: usize, to: usize) -> RingDeque<T> {
        if from >= to {
            return RingDeque::new();
        }
        if from == 0 && to == self.len() {
            return self.clone();
        }
        let mut out = RingDeque::with_capacity(to - from);
        out.extend(self.iter().skip(from).take(to - from).cloned());
        out
    }

    /// Lazily yields `slice(i, i + window)` for `i = 0, step, 2 * step, ...`
    /// while `i < len()`. The last window is shorter when it runs past the end.
    ///
    /// # Errors
    /// `InvalidArgument` if `window` or `step` is zero.
    pub fn sliding_windows(&self, window: usize, step: usize) -> Result<SlidingWindows<'_, T>, DequeError> {
        if window == 0 {
            return Err(DequeError::InvalidArgument("window must be at least 1"));
        }
        if step == 0 {
            return Err(DequeError::InvalidArgument("step must be at least 1"));
        }
        Ok(SlidingWindows {
            deque: self,
            window,
            step,
            next: Some(0),
        })
    }

    /// Consecutive non-overlapping chunks of `size` elements; the last chunk
    /// may be shorter.
    ///
    /// # Errors
    /// `InvalidArgument` if `size` is zero.
    pub fn grouped_chunks(&self, size: usize) -> Result<SlidingWindows<'_, T>, DequeError> {
        self.sliding_windows(size, size)
    }

    /// Clones elements in logical order into `dest[dest_start..]`, starting
    /// from the front, and returns how many were written.
    ///
    /// Writes `min(len(), max_items, dest.len() - dest_start)` elements using
    /// at most two contiguous copies.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `dest_start > dest.len()`.
    pub fn copy_into(&self, dest: &mut [T], dest_start: usize, max_items: usize) -> Result<usize, DequeError> {
        if dest_start > dest.len() {
            return Err(DequeError::IndexOutOfRange {
                index: dest_start,
                len: dest.len(),
            });
        }
        let count = self.len().min(max_items).min(dest.len() - dest_start);
        let (front, back) = self.as_slices();
        let head = count.min(front.len());
        let (dest_head, dest_tail) = dest[dest_start..dest_start + count].split_at_mut(head);
        dest_head.clone_from_slice(&front[..head]);
        dest_tail.clone_from_slice(&back[..count - head]);
        Ok(count)
    }
}

/// Iterator returned by [`RingDeque::sliding_windows`] and
/// [`RingDeque::grouped_chunks`].
#[derive(Debug)]
pub struct SlidingWindows<'a, T> {
    deque: &'a RingDeque<T>,
    window: usize,
    step: usize,
    /// Start of the next window; `None` once the position overflowed.
    next: Option<usize>,
}

impl<T> SlidingWindows<'_, T> {
    fn remaining(&self) -> usize {
        let len = self.deque.len();
        match self.next {
            Some(pos) if pos < len => (len - pos).div_ceil(self.step),
            _ => 0,
        }
    }
}

impl<T: Clone> Iterator for SlidingWindows<'_, T> {
    type Item = RingDeque<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.deque.len();
        let from = self.next.filter(|&pos| pos < len)?;
        self.next = from.checked_add(self.step);
        let to = from.saturating_add(self.window).min(len);
        Some(self.deque.slice_clamped(from, to))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for SlidingWindows<'_, T> {}

impl<T: Clone> FusedIterator for SlidingWindows<'_, T> {}
