#![cfg_attr(docsrs, feature(doc_cfg))]
//! Kernel-pipe provides bounded, non-blocking pipes for streaming values between kernels.
//!
//! A [`Pipe`] is shared by one producer and one consumer, each holding an [`Accessor`] whose
//! access mode is part of its type.  Reads and writes never wait: they succeed, or report that
//! the pipe is momentarily empty or full.

mod accessor;
pub use accessor::*;

pub mod access;
pub use access::{Read, ReadWrite, Write};

mod command_group;
pub use command_group::*;

pub mod error;

mod pipe;
pub use pipe::*;

mod storage;
