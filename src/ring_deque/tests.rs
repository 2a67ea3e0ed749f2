use super::*;
use std::cell::Cell;
use std::rc::Rc;

fn assert_invariants<T>(dq: &RingDeque<T>) {
    let cap = dq.capacity();
    assert!(cap.is_power_of_two(), "capacity {cap} is not a power of two");
    assert!(cap >= DEFAULT_CAPACITY);
    assert!(dq.start < cap && dq.end < cap);
    assert!(dq.len() < cap, "len {} leaves no free slot in {cap}", dq.len());
}

fn contents<T: Clone>(dq: &RingDeque<T>) -> Vec<T> {
    dq.iter().cloned().collect()
}

/// A deque whose live region wraps: `start` sits near the end of the array.
fn wrapped(values: &[i32]) -> RingDeque<i32> {
    let mut dq = RingDeque::new();
    for _ in 0..6 {
        dq.push_back(0);
    }
    for _ in 0..6 {
        dq.pop_front().unwrap();
    }
    for &v in values {
        dq.push_back(v);
    }
    dq
}

struct DropCounter(Rc<Cell<usize>>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn capacity_for_rounds_past_len() {
    assert_eq!(capacity_for(0), 8);
    assert_eq!(capacity_for(1), 8);
    assert_eq!(capacity_for(7), 8);
    assert_eq!(capacity_for(8), 16);
    assert_eq!(capacity_for(15), 16);
    assert_eq!(capacity_for(16), 32);
    assert_eq!(capacity_for(1000), 1024);
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn capacity_for_overflow_panics() {
    capacity_for(usize::MAX);
}

#[test]
fn new_and_with_capacity() {
    let dq: RingDeque<u8> = RingDeque::new();
    assert!(dq.is_empty());
    assert_eq!(dq.len(), 0);
    assert_eq!(dq.capacity(), DEFAULT_CAPACITY);

    let dq: RingDeque<u8> = RingDeque::with_capacity(8);
    assert_eq!(dq.capacity(), 16);
    let dq: RingDeque<u8> = RingDeque::with_capacity(3);
    assert_eq!(dq.capacity(), 8);
    assert_invariants(&dq);
}

#[test]
fn concrete_scenario() {
    let mut dq = RingDeque::new();
    for i in 1..=7 {
        dq.push_back(i);
    }
    assert_eq!(dq.len(), 7);
    assert_eq!(dq.capacity(), 8);

    dq.push_back(8);
    assert_eq!(dq.len(), 8);
    assert_eq!(dq.capacity(), 16);
    for i in 0..8 {
        assert_eq!(*dq.get(i).unwrap(), i + 1);
    }

    dq.remove_at(2, 3).unwrap();
    assert_eq!(contents(&dq), [1, 2, 6, 7, 8]);

    dq.insert_at(2, [9, 10]).unwrap();
    assert_eq!(contents(&dq), [1, 2, 9, 10, 6, 7, 8]);
    assert_invariants(&dq);
}

#[test]
fn growth_preserves_wrapped_order() {
    let mut dq = wrapped(&[]);
    assert_eq!(dq.start, 6);
    for i in 0..7 {
        dq.push_back(i);
    }
    // The live region now wraps: 6, 7, 0, 1, ...
    assert!(dq.end < dq.start);
    dq.push_back(7);
    assert_eq!(dq.capacity(), 16);
    assert_eq!(dq.start, 0);
    assert_eq!(contents(&dq), (0..8).collect::<Vec<_>>());
    assert_invariants(&dq);
}

#[test]
fn push_front_wraps_and_grows() {
    let mut dq = RingDeque::new();
    dq.push_front(1);
    assert_eq!(dq.start, DEFAULT_CAPACITY - 1);
    for i in 2..=20 {
        dq.push_front(i);
        assert_invariants(&dq);
    }
    assert_eq!(contents(&dq), (1..=20).rev().collect::<Vec<_>>());
    assert_eq!(dq.front(), Some(&20));
    assert_eq!(dq.back(), Some(&1));
}

#[test]
fn fifo_survives_many_wraps() {
    let mut dq = RingDeque::new();
    dq.push_back(0);
    dq.push_back(1);
    dq.push_back(2);
    for i in 3..1000 {
        dq.push_back(i);
        assert_eq!(dq.pop_front(), Ok(i - 3));
    }
    assert_eq!(dq.capacity(), DEFAULT_CAPACITY);
    assert_eq!(contents(&dq), [997, 998, 999]);
}

#[test]
fn pops_on_empty_fail() {
    let mut dq: RingDeque<i32> = RingDeque::new();
    assert_eq!(dq.pop_back(), Err(DequeError::EmptyContainer));
    assert_eq!(dq.pop_front(), Err(DequeError::EmptyContainer));
    assert_eq!(dq.front(), None);
    assert_eq!(dq.back(), None);
}

#[test]
fn pops_do_not_shrink() {
    let mut dq: RingDeque<i32> = (0..100).collect();
    let cap = dq.capacity();
    while dq.pop_back().is_ok() {}
    assert!(dq.is_empty());
    assert_eq!(dq.capacity(), cap);
}

#[test]
fn get_and_set_bounds() {
    let mut dq = wrapped(&[10, 20, 30]);
    assert_eq!(dq.get(3), Err(DequeError::IndexOutOfRange { index: 3, len: 3 }));
    assert_eq!(dq.set(5, 0), Err(DequeError::IndexOutOfRange { index: 5, len: 3 }));

    assert_eq!(dq.set(2, 33), Ok(30));
    *dq.get_mut(0).unwrap() += 1;
    assert_eq!(contents(&dq), [11, 20, 33]);
    assert_eq!(dq.len(), 3);
    assert_eq!(dq[1], 20);
    dq[1] = 22;
    assert_eq!(dq[1], 22);
}

#[test]
#[should_panic(expected = "index 4 out of range for deque of length 2")]
fn index_out_of_range_panics() {
    let dq: RingDeque<i32> = (0..2).collect();
    let _value = dq[4];
}

#[test]
fn clear_releases_capacity() {
    let drops = Rc::new(Cell::new(0));
    let mut dq = RingDeque::new();
    for _ in 0..40 {
        dq.push_back(DropCounter(drops.clone()));
    }
    assert_eq!(dq.capacity(), 64);
    dq.clear();
    assert_eq!(drops.get(), 40);
    assert!(dq.is_empty());
    assert_eq!(dq.capacity(), DEFAULT_CAPACITY);
    dq.push_back(DropCounter(drops.clone()));
    assert_eq!(dq.len(), 1);
}

#[test]
fn trim_to_capacity_shrinks_and_linearizes() {
    let mut dq: RingDeque<i32> = (0..100).collect();
    for _ in 0..95 {
        dq.pop_front().unwrap();
    }
    assert_eq!(dq.capacity(), 128);
    dq.trim_to_capacity();
    assert_eq!(dq.capacity(), 8);
    assert_eq!(dq.start, 0);
    assert_eq!(contents(&dq), [95, 96, 97, 98, 99]);
    assert_invariants(&dq);

    let mut full: RingDeque<i32> = RingDeque::with_capacity(100);
    full.extend(0..8);
    full.trim_to_capacity();
    assert_eq!(full.capacity(), 16);
}

#[test]
fn reserve_grows_once() {
    let mut dq = wrapped(&[1, 2]);
    dq.reserve(50);
    assert_eq!(dq.capacity(), 64);
    assert_eq!(dq.start, 0);
    assert_eq!(contents(&dq), [1, 2]);
    dq.reserve(10);
    assert_eq!(dq.capacity(), 64);
}

#[test]
fn slice_clamps_bounds() {
    let dq = wrapped(&[0, 1, 2, 3, 4]);
    let n = dq.len() as isize;

    let full = dq.slice(-5, n + 5);
    assert_eq!(full, dq);
    assert_eq!(full.capacity(), dq.capacity());

    for k in -2..n + 2 {
        assert!(dq.slice(k, k).is_empty());
    }
    assert!(dq.slice(4, 1).is_empty());
    assert_eq!(contents(&dq.slice(1, 4)), [1, 2, 3]);
    assert_eq!(contents(&dq.slice(3, 100)), [3, 4]);
    assert_eq!(contents(&dq.slice(-1, 2)), [0, 1]);
}

#[test]
fn slice_is_independent() {
    let mut dq: RingDeque<i32> = (0..10).collect();
    let mut part = dq.slice(2, 5);
    part.set(0, 100).unwrap();
    dq.set(3, 300).unwrap();
    assert_eq!(contents(&part), [100, 3, 4]);
    assert_eq!(contents(&dq.slice(2, 5)), [2, 300, 4]);
}

#[test]
fn sliding_windows_include_partial_tail() {
    let dq: RingDeque<i32> = (0..5).collect();
    let windows: Vec<Vec<i32>> = dq
        .sliding_windows(3, 2)
        .unwrap()
        .map(|w| contents(&w))
        .collect();
    assert_eq!(windows, vec![vec![0, 1, 2], vec![2, 3, 4], vec![4]]);

    let mut iter = dq.sliding_windows(2, 1).unwrap();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.by_ref().count(), 5);
    assert!(iter.next().is_none());
}

#[test]
fn grouped_chunks_split_evenly_then_remainder() {
    let dq = wrapped(&[1, 2, 3, 4, 5, 6, 7]);
    let chunks: Vec<Vec<i32>> = dq.grouped_chunks(3).unwrap().map(|c| contents(&c)).collect();
    assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);

    let empty: RingDeque<i32> = RingDeque::new();
    assert_eq!(empty.grouped_chunks(4).unwrap().count(), 0);
}

#[test]
fn windows_reject_zero_arguments() {
    let dq: RingDeque<i32> = (0..5).collect();
    assert!(matches!(dq.sliding_windows(0, 1), Err(DequeError::InvalidArgument(_))));
    assert!(matches!(dq.sliding_windows(1, 0), Err(DequeError::InvalidArgument(_))));
    assert!(matches!(dq.grouped_chunks(0), Err(DequeError::InvalidArgument(_))));
}

#[test]
fn copy_into_handles_wrap_and_bounds() {
    let dq = wrapped(&[1, 2, 3, 4, 5]);
    let (front, back) = dq.as_slices();
    assert_eq!((front.len(), back.len()), (2, 3));

    let mut dest = [0; 8];
    assert_eq!(dq.copy_into(&mut dest, 1, usize::MAX), Ok(5));
    assert_eq!(dest, [0, 1, 2, 3, 4, 5, 0, 0]);

    let mut dest = [0; 4];
    assert_eq!(dq.copy_into(&mut dest, 2, 10), Ok(2));
    assert_eq!(dest, [0, 0, 1, 2]);

    let mut dest = [0; 4];
    assert_eq!(dq.copy_into(&mut dest, 0, 3), Ok(3));
    assert_eq!(dest, [1, 2, 3, 0]);

    assert_eq!(dq.copy_into(&mut dest, 4, 3), Ok(0));
    assert_eq!(
        dq.copy_into(&mut dest, 5, 3),
        Err(DequeError::IndexOutOfRange { index: 5, len: 4 })
    );
}

#[test]
fn remove_at_tail_and_head_move_cursors() {
    let mut dq = wrapped(&[0, 1, 2, 3, 4, 5]);
    let cap = dq.capacity();
    dq.remove_at(4, 10).unwrap();
    assert_eq!(contents(&dq), [0, 1, 2, 3]);
    dq.remove_at(0, 2).unwrap();
    assert_eq!(contents(&dq), [2, 3]);
    assert_eq!(dq.capacity(), cap);
    assert_invariants(&dq);
}

#[test]
fn remove_at_interior_shifts_suffix() {
    let mut dq = wrapped(&[0, 1, 2, 3, 4, 5]);
    dq.remove_at(1, 2).unwrap();
    assert_eq!(contents(&dq), [0, 3, 4, 5]);
    dq.remove_at(2, 1).unwrap();
    assert_eq!(contents(&dq), [0, 3, 5]);
    assert_invariants(&dq);
}

#[test]
fn remove_at_checks_index() {
    let mut dq: RingDeque<i32> = (0..3).collect();
    assert_eq!(dq.remove_at(3, 1), Err(DequeError::IndexOutOfRange { index: 3, len: 3 }));
    assert_eq!(dq.remove_at(3, 0), Ok(()));
    assert_eq!(dq.remove_at(1, 0), Ok(()));
    assert_eq!(contents(&dq), [0, 1, 2]);
    assert_eq!(dq.remove_one(7), Err(DequeError::IndexOutOfRange { index: 7, len: 3 }));
}

#[test]
fn remove_one_then_insert_restores() {
    let original: Vec<i32> = (0..6).collect();
    for idx in 0..original.len() {
        let mut dq = wrapped(&original);
        let removed = dq.remove_one(idx).unwrap();
        assert_eq!(removed, original[idx]);
        assert_eq!(dq.len(), original.len() - 1);
        dq.insert_at(idx, [removed]).unwrap();
        assert_eq!(contents(&dq), original);
    }
}

#[test]
fn insert_at_front_keeps_input_order() {
    let mut dq = wrapped(&[5, 6]);
    dq.insert_at(0, [1, 2, 3, 4]).unwrap();
    assert_eq!(contents(&dq), [1, 2, 3, 4, 5, 6]);
    dq.insert_at(6, [7, 8]).unwrap();
    assert_eq!(contents(&dq), [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(
        dq.insert_at(9, [0]),
        Err(DequeError::IndexOutOfRange { index: 9, len: 8 })
    );
    assert_invariants(&dq);
}

#[test]
fn insert_at_interior_grows() {
    let mut dq: RingDeque<i32> = (0..6).collect();
    dq.insert_at(3, 100..110).unwrap();
    let mut expected: Vec<i32> = (0..3).collect();
    expected.extend(100..110);
    expected.extend(3..6);
    assert_eq!(contents(&dq), expected);
    assert_invariants(&dq);
}

#[test]
fn truncate_drops_tail() {
    let drops = Rc::new(Cell::new(0));
    let mut dq: RingDeque<DropCounter> = (0..6).map(|_| DropCounter(drops.clone())).collect();
    dq.truncate(10);
    assert_eq!(drops.get(), 0);
    dq.truncate(2);
    assert_eq!(drops.get(), 4);
    assert_eq!(dq.len(), 2);
}

#[test]
fn clone_keeps_layout_and_is_independent() {
    let mut dq = wrapped(&[1, 2, 3, 4]);
    let copy = dq.clone();
    assert_eq!(copy.start, dq.start);
    assert_eq!(copy.end, dq.end);
    assert_eq!(copy.capacity(), dq.capacity());

    dq.set(0, 99).unwrap();
    dq.push_back(5);
    assert_eq!(contents(&copy), [1, 2, 3, 4]);
    assert_eq!(contents(&dq), [99, 2, 3, 4, 5]);
}

#[test]
fn clone_shares_element_identity() {
    let shared = Rc::new(7);
    let mut dq = RingDeque::new();
    dq.push_back(shared.clone());
    let copy = dq.clone();
    assert!(Rc::ptr_eq(copy.front().unwrap(), &shared));
    assert_eq!(Rc::strong_count(&shared), 3);
}

#[test]
fn every_element_dropped_once() {
    let drops = Rc::new(Cell::new(0));
    {
        let mut dq = RingDeque::new();
        for _ in 0..20 {
            dq.push_back(DropCounter(drops.clone()));
            dq.push_front(DropCounter(drops.clone()));
        }
        drop(dq.pop_front());
        drop(dq.pop_back());
        assert_eq!(drops.get(), 2);
        dq.remove_at(0, 3).unwrap();
        dq.remove_at(5, 4).unwrap();
        dq.remove_at(20, 100).unwrap();
        drop(dq.remove_one(3));
        assert_eq!(drops.get(), 2 + 3 + 4 + 11 + 1);
    }
    assert_eq!(drops.get(), 40);
}

#[test]
fn into_iter_drains_both_ends() {
    let dq = wrapped(&[1, 2, 3, 4]);
    let mut it = dq.into_iter();
    assert_eq!(it.len(), 4);
    assert_eq!(it.next(), Some(1));
    assert_eq!(it.next_back(), Some(4));
    assert_eq!(it.collect::<Vec<_>>(), [2, 3]);
}

#[test]
fn iterators_cross_the_wrap() {
    let mut dq = wrapped(&[1, 2, 3, 4, 5]);
    assert_eq!(dq.iter().rev().copied().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
    assert_eq!(dq.iter().nth(3), Some(&4));
    assert_eq!(dq.iter().len(), 5);
    for x in &mut dq {
        *x *= 10;
    }
    assert_eq!(contents(&dq), [10, 20, 30, 40, 50]);
    assert_eq!(format!("{dq:?}"), "[10, 20, 30, 40, 50]");
}

#[test]
fn zero_sized_elements() {
    let mut dq = RingDeque::new();
    for _ in 0..100 {
        dq.push_back(());
    }
    assert_eq!(dq.len(), 100);
    dq.remove_at(10, 50).unwrap();
    assert_eq!(dq.len(), 50);
    assert_eq!(dq.pop_front(), Ok(()));
}
