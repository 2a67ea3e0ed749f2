//! Basic RingDeque usage example

use ring_deque::{DequeError, RingDeque};

fn main() -> Result<(), DequeError> {
    println!("RingDeque Basic Usage Example");
    println!("=============================");

    let mut dq = RingDeque::new();
    for i in 1..=7 {
        dq.push_back(i);
    }
    println!("After 7 pushes: {:?} (capacity {})", dq, dq.capacity());

    dq.push_back(8);
    println!("After the 8th push: {:?} (capacity {})", dq, dq.capacity());

    // Work at both ends
    dq.push_front(0);
    let back = dq.pop_back()?;
    println!("push_front(0), pop_back() -> {back}: {dq:?}");

    // Middle edits
    dq.remove_at(2, 3)?;
    println!("remove_at(2, 3): {dq:?}");
    dq.insert_at(2, [9, 10])?;
    println!("insert_at(2, [9, 10]): {dq:?}");
    let removed = dq.remove_one(0)?;
    println!("remove_one(0) -> {removed}: {dq:?}");

    // Copies out
    println!("slice(1, 4): {:?}", dq.slice(1, 4));
    for (n, chunk) in dq.grouped_chunks(3)?.enumerate() {
        println!("  chunk {n}: {chunk:?}");
    }
    let mut dest = [0; 4];
    let written = dq.copy_into(&mut dest, 0, usize::MAX)?;
    println!("copy_into wrote {written}: {dest:?}");

    // Capacity management
    dq.trim_to_capacity();
    println!("After trim: capacity {}", dq.capacity());
    dq.clear();
    println!("After clear: len {}, capacity {}", dq.len(), dq.capacity());

    match dq.pop_front() {
        Err(err) => println!("pop_front on empty deque: {err}"),
        Ok(v) => println!("unexpected value {v}"),
    }

    Ok(())
}
