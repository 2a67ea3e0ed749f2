//! Raw power-of-two slot storage behind `RingDeque`.
//!
//! `RingBuffer` knows nothing about which slots are live; the owning deque
//! tracks that through its `start`/`end` cursors and is responsible for every
//! read, write and drop of an element.

use core::mem::MaybeUninit;
use core::ptr;

/// Capacity of a freshly constructed or cleared deque.
pub const DEFAULT_CAPACITY: usize = 8;

/// Returns the backing capacity needed to hold `len` elements.
///
/// This is the smallest power of two strictly greater than `len` (one slot is
/// always left free), never below [`DEFAULT_CAPACITY`].
///
/// # Panics
/// Panics if the result would not fit in `usize`.
///
/// ```rust
/// use ring_deque::capacity_for;
///
/// assert_eq!(capacity_for(0), 8);
/// assert_eq!(capacity_for(7), 8);
/// assert_eq!(capacity_for(8), 16);
/// assert_eq!(capacity_for(100), 128);
/// ```
#[inline]
pub fn capacity_for(len: usize) -> usize {
    match len.checked_add(1).and_then(usize::checked_next_power_of_two) {
        Some(capacity) => capacity.max(DEFAULT_CAPACITY),
        None => capacity_overflow(),
    }
}

#[cold]
#[inline(never)]
pub(super) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

/// Fixed-size array of possibly uninitialized slots.
pub(super) struct RingBuffer<T> {
    slots: Box<[MaybeUninit<T>]>,
}

impl<T> RingBuffer<T> {
    /// Allocates `capacity` uninitialized slots. `capacity` must be a power of two.
    pub(super) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        let slots = core::iter::repeat_with(MaybeUninit::uninit)
            .take(capacity)
            .collect();
        Self { slots }
    }

    #[inline(always)]
    pub(super) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// `capacity - 1`; reduces `x mod capacity` to `x & mask`.
    #[inline(always)]
    pub(super) fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    /// Writes `value` into slot `phys` without dropping the previous contents.
    #[inline]
    pub(super) fn write(&mut self, phys: usize, value: T) {
        self.slots[phys].write(value);
    }

    /// Moves the value out of slot `phys`.
    ///
    /// # Safety
    /// The slot must be initialized, and the caller must treat it as
    /// uninitialized afterwards.
    #[inline]
    pub(super) unsafe fn read(&self, phys: usize) -> T {
        ptr::read(self.slots.get_unchecked(phys).as_ptr())
    }

    /// # Safety
    /// The slot must be initialized.
    #[inline]
    pub(super) unsafe fn get(&self, phys: usize) -> &T {
        self.slots.get_unchecked(phys).assume_init_ref()
    }

    /// # Safety
    /// The slot must be initialized.
    #[inline]
    pub(super) unsafe fn get_mut(&mut self, phys: usize) -> &mut T {
        self.slots.get_unchecked_mut(phys).assume_init_mut()
    }

    /// Drops the value in slot `phys` in place.
    ///
    /// # Safety
    /// The slot must be initialized, and the caller must treat it as
    /// uninitialized afterwards.
    #[inline]
    pub(super) unsafe fn drop_slot(&mut self, phys: usize) {
        self.slots.get_unchecked_mut(phys).assume_init_drop();
    }

    /// Exchanges the contents of two slots. Never reads either value.
    #[inline]
    pub(super) fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Lengths of the two contiguous runs making up `len` slots from `start`.
    #[inline]
    fn split_run(&self, start: usize, len: usize) -> (usize, usize) {
        let first = len.min(self.capacity() - start);
        (first, len - first)
    }

    /// The live region `[start, start + len)` as two slices in logical order.
    ///
    /// # Safety
    /// Every slot in the wrapped range must be initialized.
    pub(super) unsafe fn slices(&self, start: usize, len: usize) -> (&[T], &[T]) {
        let (first, second) = self.split_run(start, len);
        let base = self.slots.as_ptr().cast::<T>();
        (
            core::slice::from_raw_parts(base.add(start), first),
            core::slice::from_raw_parts(base, second),
        )
    }

    /// Mutable counterpart of [`RingBuffer::slices`].
    ///
    /// # Safety
    /// Every slot in the wrapped range must be initialized.
    pub(super) unsafe fn slices_mut(&mut self, start: usize, len: usize) -> (&mut [T], &mut [T]) {
        let (first, second) = self.split_run(start, len);
        let base = self.slots.as_mut_ptr().cast::<T>();
        // The runs never overlap: `second <= start` because `len < capacity`.
        (
            core::slice::from_raw_parts_mut(base.add(start), first),
            core::slice::from_raw_parts_mut(base, second),
        )
    }

    /// Moves the live region `[start, start + len)` into `dest` starting at
    /// slot 0, using at most two contiguous copies.
    ///
    /// # Safety
    /// Every slot in the wrapped range must be initialized, `dest` must have
    /// room for `len` elements, and the caller must treat the source slots as
    /// uninitialized afterwards.
    pub(super) unsafe fn move_linear_into(&self, start: usize, len: usize, dest: &mut RingBuffer<T>) {
        debug_assert!(len <= dest.capacity());
        let (first, second) = self.split_run(start, len);
        let src = self.slots.as_ptr();
        let dst = dest.slots.as_mut_ptr();
        ptr::copy_nonoverlapping(src.add(start), dst, first);
        ptr::copy_nonoverlapping(src, dst.add(first), second);
    }
}
