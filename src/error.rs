use std::io;

use crate::executor::ExecError;
use crate::parser::ParseError;

/// Failures that end the session with a non-zero status.
#[derive(thiserror::Error, Debug)]
pub enum ShellError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("execution error: {0}")]
    Exec(#[from] ExecError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
