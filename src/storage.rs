use std::{mem::MaybeUninit, ptr};

fn circular_add(a: usize, b: usize, len: usize) -> usize {
    (a + b) % len
}

/// Fixed-size ring of slots.
///
/// Slots `head, head + 1, .., head + count - 1` (modulo the capacity) are initialized, the rest
/// are vacant.
pub(crate) struct Slots<T> {
    slots: Box<[MaybeUninit<T>]>,
    head: usize,  // next slot to read
    tail: usize,  // next slot to write
    count: usize, // number of occupied slots
}

// Drops a slice of elements, even while unwinding from a panic in another element's drop.
struct DropSlice<T>(*mut [T]);

impl<T> Drop for DropSlice<T> {
    fn drop(&mut self) {
        unsafe { ptr::drop_in_place(self.0) }
    }
}

impl<T> Drop for Slots<T> {
    fn drop(&mut self) {
        // The occupied range is at most two contiguous runs: head to the end, then the wrapped part
        let front_len = self.count.min(self.capacity() - self.head);
        let back_len = self.count - front_len;
        let base = self.slots.as_mut_ptr().cast::<T>();
        // Safety: occupied slots are initialized and dropped only here.  Dropping a slice keeps
        // dropping the remaining elements if one of them panics, and the guard drops the back run
        // if the front run panics.
        unsafe {
            let _back = DropSlice(ptr::slice_from_raw_parts_mut(base, back_len));
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                base.add(self.head),
                front_len,
            ));
        }
    }
}

impl<T> Slots<T> {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: (0..capacity).map(|_| MaybeUninit::uninit()).collect(),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Store `value` in the tail slot, or hand it back if every slot is occupied.
    pub fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        self.slots[self.tail].write(value);
        self.tail = circular_add(self.tail, 1, self.capacity());
        self.count += 1;
        Ok(())
    }

    /// Take the value out of the head slot, leaving it vacant.
    pub fn pop(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        // Safety: the head slot is occupied, and is marked vacant right after the read
        let value = unsafe { self.slots[self.head].assume_init_read() };
        self.head = circular_add(self.head, 1, self.capacity());
        self.count -= 1;
        Some(value)
    }
}
