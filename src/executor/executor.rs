use nix::sys::wait::WaitStatus;

use crate::parser::Command;

pub type ExecStatus = Result<WaitStatus, ExecError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    #[error("fork failed: {0}")]
    Fork(nix::Error),
    #[error("wait failed: {0}")]
    Wait(nix::Error),
    #[error("nothing to execute")]
    EmptyCommand,
}

impl ExecError {
    /// Process creation failure takes the whole shell down.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExecError::Fork(_))
    }
}

/// Launches an external command and blocks until it terminates.
pub trait Executor {
    fn exec(&mut self, cmd: &Command) -> ExecStatus;
}
