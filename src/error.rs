//! Errors produced by pipes.

/// Error produced when a pipe is full and a write would block.
///
/// Contains the value that could not be written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Return the value that was rejected.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::fmt::Display for Full<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        write!(f, "pipe is full")
    }
}

impl<T: core::fmt::Debug> std::error::Error for Full<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl<T> core::convert::From<Full<T>> for std::io::Error {
    fn from(e: Full<T>) -> Self {
        Self::new(std::io::ErrorKind::WouldBlock, e.to_string())
    }
}

/// Error produced when a pipe is empty and a read would block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Empty;

impl core::fmt::Display for Empty {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        write!(f, "pipe is empty")
    }
}

impl std::error::Error for Empty {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl core::convert::From<Empty> for std::io::Error {
    fn from(e: Empty) -> Self {
        Self::new(std::io::ErrorKind::WouldBlock, e)
    }
}

/// Error produced when a pipe is constructed without any slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ZeroCapacity;

impl core::fmt::Display for ZeroCapacity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        write!(f, "pipe capacity must be greater than 0")
    }
}

impl std::error::Error for ZeroCapacity {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl core::convert::From<ZeroCapacity> for std::io::Error {
    fn from(e: ZeroCapacity) -> Self {
        Self::new(std::io::ErrorKind::InvalidInput, e)
    }
}
