//! Handles through which kernels access pipes.

use crate::{
    access::{AccessMode, Readable, Writable},
    error::{Empty, Full},
    CommandGroup, Pipe, PipeId,
};
use core::{
    cell::Cell,
    marker::PhantomData,
    ops::{Shl, Shr},
};
use static_assertions::{assert_impl_all, assert_not_impl_any};

/// A handle to a [`Pipe`], restricted to the operations permitted by the access mode `M`.
///
/// Accessors borrow their pipe, so they can't outlive it, and are cheap to clone so they can be
/// moved into kernel closures.  Each accessor remembers whether its most recent read or write
/// succeeded.  The flag is updated through a shared reference, so an accessor captured by an
/// `Fn` closure can still be used:
///
/// ```
/// use kernel_pipe::{CommandGroup, Pipe, Read, Write};
///
/// let pipe = Pipe::new(2);
/// let mut command_group = CommandGroup::new();
/// let writer = pipe.access::<Write>(&mut command_group);
/// let reader = pipe.access::<Read>(&mut command_group);
///
/// let produce = move |value: i32| writer.write(value).is_ok();
/// assert!(produce(1));
/// assert!(produce(2));
/// assert!(!produce(3));
///
/// let mut value = 0;
/// assert!((&reader >> &mut value).is_ok());
/// assert_eq!(value, 1);
/// ```
///
/// Operations the mode doesn't permit don't exist:
///
/// ```compile_fail
/// use kernel_pipe::{CommandGroup, Pipe, Read};
///
/// let pipe = Pipe::<i32>::new(1);
/// let mut command_group = CommandGroup::new();
/// let reader = pipe.access::<Read>(&mut command_group);
/// reader.write(1);
/// ```
///
/// ```compile_fail
/// use kernel_pipe::{CommandGroup, Pipe, Write};
///
/// let pipe = Pipe::<i32>::new(1);
/// let mut command_group = CommandGroup::new();
/// let writer = pipe.access::<Write>(&mut command_group);
/// let mut value = 0;
/// writer.read(&mut value);
/// ```
pub struct Accessor<'p, T, M> {
    pipe: &'p Pipe<T>,
    ok: Cell<bool>, // success of the last read or write
    mode: PhantomData<M>,
}

assert_impl_all!(Accessor<'static, u32, crate::Write>: Send, Clone);
assert_not_impl_any!(Accessor<'static, u32, crate::ReadWrite>: Sync, Copy);
assert_impl_all!(Pipe<u32>: Send, Sync);
assert_not_impl_any!(Pipe<std::rc::Rc<u32>>: Send, Sync);

impl<'p, T, M: AccessMode> Accessor<'p, T, M> {
    /// Create an accessor to `pipe`, registering the access with `command_group`.
    pub fn new(pipe: &'p Pipe<T>, command_group: &mut CommandGroup) -> Self {
        command_group.require(pipe.id(), M::MODE);
        Self {
            pipe,
            ok: Cell::new(false),
            mode: PhantomData,
        }
    }
}

impl<'p, T, M> Accessor<'p, T, M> {
    /// Returns `true` if the most recent read or write through this accessor succeeded.
    ///
    /// An accessor that has never been used returns `false`.
    pub fn is_ok(&self) -> bool {
        self.ok.get()
    }

    /// The identifier of the accessed pipe.
    pub fn pipe_id(&self) -> PipeId {
        self.pipe.id()
    }

    /// See [`Pipe::capacity`].
    pub fn capacity(&self) -> usize {
        self.pipe.capacity()
    }

    /// See [`Pipe::size`].
    pub fn size(&self) -> usize {
        self.pipe.size()
    }

    /// See [`Pipe::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.pipe.is_empty()
    }

    /// See [`Pipe::is_full`].
    pub fn is_full(&self) -> bool {
        self.pipe.is_full()
    }
}

impl<'p, T, M: Writable> Accessor<'p, T, M> {
    /// Attempt to write `value` to the pipe.
    ///
    /// Returns this accessor, so writes can be chained.  A failed write drops `value` and is
    /// only reported by [`is_ok`](`Self::is_ok`); chained writes are still attempted.
    pub fn write(&self, value: T) -> &Self {
        self.ok.set(self.pipe.try_write(value).is_ok());
        self
    }

    /// Attempt to write a copy of `value` to the pipe.
    ///
    /// Behaves like [`write`](`Self::write`), but leaves `value` with the caller.  See
    /// [`Pipe::write`].
    pub fn write_cloned(&self, value: &T) -> &Self
    where
        T: Clone,
    {
        self.ok.set(self.pipe.write(value));
        self
    }

    /// Attempt to write `value` to the pipe, returning it if the pipe is full.
    pub fn try_write(&self, value: T) -> Result<(), Full<T>> {
        let result = self.pipe.try_write(value);
        self.ok.set(result.is_ok());
        result
    }
}

impl<'p, T, M: Readable> Accessor<'p, T, M> {
    /// Attempt to read the oldest element of the pipe into `out`.
    ///
    /// Returns this accessor, so reads can be chained.  If the pipe is empty, `out` is left
    /// unchanged and the failure is only reported by [`is_ok`](`Self::is_ok`).
    pub fn read(&self, out: &mut T) -> &Self {
        self.ok.set(self.pipe.read(out));
        self
    }

    /// Attempt to read the oldest element of the pipe.
    pub fn try_read(&self) -> Result<T, Empty> {
        let result = self.pipe.try_read();
        self.ok.set(result.is_ok());
        result
    }
}

impl<'a, 'p, T, M: Writable> Shl<T> for &'a Accessor<'p, T, M> {
    type Output = &'a Accessor<'p, T, M>;

    /// Equivalent to [`Accessor::write`].
    fn shl(self, value: T) -> Self::Output {
        self.write(value)
    }
}

impl<'a, 'o, 'p, T, M: Readable> Shr<&'o mut T> for &'a Accessor<'p, T, M> {
    type Output = &'a Accessor<'p, T, M>;

    /// Equivalent to [`Accessor::read`].
    fn shr(self, out: &'o mut T) -> Self::Output {
        self.read(out)
    }
}

impl<'p, T, M> From<&Accessor<'p, T, M>> for bool {
    fn from(accessor: &Accessor<'p, T, M>) -> bool {
        accessor.is_ok()
    }
}

impl<'p, T, M> Clone for Accessor<'p, T, M> {
    fn clone(&self) -> Self {
        Self {
            pipe: self.pipe,
            ok: self.ok.clone(),
            mode: PhantomData,
        }
    }
}

impl<'p, T, M: AccessMode> core::fmt::Debug for Accessor<'p, T, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        f.debug_struct("Accessor")
            .field("pipe", &self.pipe.id())
            .field("mode", &M::MODE)
            .field("ok", &self.ok.get())
            .finish()
    }
}
