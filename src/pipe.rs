//! Bounded non-blocking pipes.
//!
//! A [`Pipe`] is a FIFO of fixed capacity shared by one producer and one consumer.  Every
//! operation returns immediately: a write to a full pipe or a read from an empty pipe reports
//! failure instead of waiting, and callers that want to wait must poll.
use crate::{
    access::AccessMode,
    error::{Empty, Full, ZeroCapacity},
    storage::Slots,
    Accessor, CommandGroup,
};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex, MutexGuard,
};

/// Identifies a pipe for the lifetime of the process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PipeId(u64);

impl PipeId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl core::fmt::Display for PipeId {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        write!(f, "pipe#{}", self.0)
    }
}

/// A bounded FIFO channel carrying values of type `T`.
///
/// The pipe owns every element written to it until the element is read.  Elements still in the
/// pipe when it is dropped are dropped with it.
pub struct Pipe<T> {
    id: PipeId,
    capacity: usize,
    slots: Mutex<Slots<T>>,
}

impl<T> Pipe<T> {
    /// Create a pipe holding at most `capacity` elements.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "`capacity` must be greater than 0");
        Self::with_slots(Slots::new(capacity))
    }

    /// Create a pipe holding at most `capacity` elements, failing if `capacity` is 0.
    pub fn try_new(capacity: usize) -> Result<Self, ZeroCapacity> {
        if capacity == 0 {
            Err(ZeroCapacity)
        } else {
            Ok(Self::with_slots(Slots::new(capacity)))
        }
    }

    fn with_slots(slots: Slots<T>) -> Self {
        let id = PipeId::next();
        log::trace!("created {} with capacity {}", id, slots.capacity());
        Self {
            id,
            capacity: slots.capacity(),
            slots: Mutex::new(slots),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots<T>> {
        self.slots.lock().expect("another thread panicked")
    }

    /// The identifier of this pipe.
    pub fn id(&self) -> PipeId {
        self.id
    }

    /// The maximum number of elements that fit in the pipe.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of elements currently in the pipe.
    ///
    /// This is a snapshot, and may be stale by the time it is used if another thread is accessing
    /// the pipe.
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the pipe currently contains no elements.
    ///
    /// Like [`size`](`Self::size`), this is only a snapshot.
    pub fn is_empty(&self) -> bool {
        self.lock().len() == 0
    }

    /// Returns `true` if the pipe currently has no vacant slots.
    ///
    /// Like [`size`](`Self::size`), this is only a snapshot.
    pub fn is_full(&self) -> bool {
        self.lock().is_full()
    }

    /// Attempt to move `value` into the pipe.
    ///
    /// If the pipe is full, the value is returned in the error.
    pub fn try_write(&self, value: T) -> Result<(), Full<T>> {
        let result = self.lock().push(value).map_err(Full);
        if result.is_err() {
            log::trace!("{} is full", self.id);
        }
        result
    }

    /// Attempt to copy `value` into the pipe, returning `true` on success.
    ///
    /// The value is cloned before the pipe is locked, so a panicking `clone` leaves the pipe
    /// unchanged.
    pub fn write(&self, value: &T) -> bool
    where
        T: Clone,
    {
        self.try_write(value.clone()).is_ok()
    }

    /// Attempt to take the oldest element out of the pipe.
    pub fn try_read(&self) -> Result<T, Empty> {
        let value = self.lock().pop();
        value.ok_or_else(|| {
            log::trace!("{} is empty", self.id);
            Empty
        })
    }

    /// Attempt to move the oldest element of the pipe into `out`, returning `true` on success.
    ///
    /// If the pipe is empty, `out` is left unchanged.
    pub fn read(&self, out: &mut T) -> bool {
        match self.try_read() {
            Ok(value) => {
                *out = value;
                true
            }
            Err(Empty) => false,
        }
    }

    /// Create an accessor to this pipe, registering it with `command_group`.
    ///
    /// See [`Accessor::new`].
    pub fn access<M: AccessMode>(&self, command_group: &mut CommandGroup) -> Accessor<'_, T, M> {
        Accessor::new(self, command_group)
    }
}

impl<T> Drop for Pipe<T> {
    fn drop(&mut self) {
        if let Ok(slots) = self.slots.get_mut() {
            log::trace!("dropping {} with {} elements", self.id, slots.len());
        }
    }
}

impl<T> core::fmt::Debug for Pipe<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        let slots = self.lock();
        f.debug_struct("Pipe")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("size", &slots.len())
            .finish()
    }
}
