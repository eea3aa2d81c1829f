//! Scheduling scopes that track which pipes a kernel accesses.

use crate::{access::Mode, PipeId};

/// An access to a pipe requested by a command group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Requirement {
    /// The pipe being accessed.
    pub pipe: PipeId,
    /// How the pipe is accessed.
    pub mode: Mode,
}

/// The scope within which accessors are created.
///
/// Every accessor registers its pipe and mode here so that a runtime can order the kernels that
/// produce into and consume from each pipe.  Pipes never consult the command group when reading
/// or writing.
#[derive(Clone, Debug, Default)]
pub struct CommandGroup {
    requirements: Vec<Requirement>,
}

impl CommandGroup {
    /// Create an empty command group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `pipe` is accessed with `mode`.
    ///
    /// A pipe accessed more than once is recorded once, with the union of the modes.
    pub(crate) fn require(&mut self, pipe: PipeId, mode: Mode) {
        log::trace!("requiring {} access to {}", mode, pipe);
        if let Some(existing) = self.requirements.iter_mut().find(|r| r.pipe == pipe) {
            existing.mode = existing.mode.union(mode);
        } else {
            self.requirements.push(Requirement { pipe, mode });
        }
    }

    /// The pipes accessed by this command group, in order of first access.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// The mode with which `pipe` is accessed, if it is accessed at all.
    pub fn mode_of(&self, pipe: PipeId) -> Option<Mode> {
        self.requirements
            .iter()
            .find(|r| r.pipe == pipe)
            .map(|r| r.mode)
    }
}
