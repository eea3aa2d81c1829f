//! Access modes for pipe accessors.
//!
//! Modes exist both as values ([`Mode`]), which command groups record for dependency tracking,
//! and as types ([`Read`], [`Write`], [`ReadWrite`]), which restrict the operations an
//! [`Accessor`](crate::Accessor) exposes.

/// Value-based access mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Read only
    Read,
    /// Write only
    Write,
    /// Read and write
    ReadWrite,
}

impl Mode {
    /// Returns `true` if this mode permits reading.
    pub fn is_readable(&self) -> bool {
        matches!(self, Mode::Read | Mode::ReadWrite)
    }

    /// Returns `true` if this mode permits writing.
    pub fn is_writable(&self) -> bool {
        matches!(self, Mode::Write | Mode::ReadWrite)
    }

    /// The smallest mode permitting everything either mode permits.
    pub fn union(self, other: Mode) -> Mode {
        if self == other {
            self
        } else {
            Mode::ReadWrite
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        let name = match self {
            Mode::Read => "read",
            Mode::Write => "write",
            Mode::ReadWrite => "read_write",
        };
        f.write_str(name)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Type-based access mode.
///
/// This trait is sealed; the only modes are [`Read`], [`Write`] and [`ReadWrite`].
pub trait AccessMode: sealed::Sealed {
    /// The equivalent value-based mode.
    const MODE: Mode;
}

/// A mode that permits reading.
pub trait Readable: AccessMode {}

/// A mode that permits writing.
pub trait Writable: AccessMode {}

/// Read-only access.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Read;

/// Write-only access.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Write;

/// Read and write access.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReadWrite;

impl sealed::Sealed for Read {}
impl sealed::Sealed for Write {}
impl sealed::Sealed for ReadWrite {}

impl AccessMode for Read {
    const MODE: Mode = Mode::Read;
}

impl AccessMode for Write {
    const MODE: Mode = Mode::Write;
}

impl AccessMode for ReadWrite {
    const MODE: Mode = Mode::ReadWrite;
}

impl Readable for Read {}
impl Readable for ReadWrite {}
impl Writable for Write {}
impl Writable for ReadWrite {}
