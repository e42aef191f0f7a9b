use std::ffi::{CString, NulError, OsStr, OsString};
use std::fmt;
use std::os::unix::ffi::{OsStrExt, OsStringExt};

const DELIMITER: u8 = b' ';

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not enough memory for argv[]")]
    Allocation,
}

/// One parsed input line: `argv[0]` is the program, the rest are its arguments.
///
/// The argument vector always keeps one free slot past the last argument, the
/// place `execv` expects its terminating null. Indexing at or past `len()`
/// yields `None`. Arguments keep the exact bytes that were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    argv: Vec<OsString>,
}

impl Command {
    pub fn name(&self) -> Option<&OsStr> {
        self.get(0)
    }

    pub fn get(&self, idx: usize) -> Option<&OsStr> {
        self.argv.get(idx).map(|s| s.as_os_str())
    }

    /// The full argument vector, program name included.
    pub fn args(&self) -> &[OsString] {
        &self.argv
    }

    pub fn len(&self) -> usize {
        self.argv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.argv.capacity()
    }

    pub fn to_c_argv(&self) -> Result<Vec<CString>, NulError> {
        self.argv.iter().map(|arg| CString::new(arg.as_bytes())).collect()
    }
}

/// Lossy; for diagnostics only.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.argv.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Splits `line` on runs of spaces.
///
/// Capacity starts at one slot and doubles whenever the next argument would
/// take the slot reserved for the terminator.
pub fn parse_line(line: &[u8]) -> Result<Command, ParseError> {
    let mut argv: Vec<OsString> = Vec::new();
    argv.try_reserve_exact(1).map_err(|_| ParseError::Allocation)?;

    for word in line.split(|&b| b == DELIMITER).filter(|w| !w.is_empty()) {
        if argv.len() + 1 >= argv.capacity() {
            let doubled = argv.capacity() * 2;
            argv.try_reserve_exact(doubled - argv.len())
                .map_err(|_| ParseError::Allocation)?;
        }
        argv.push(OsString::from_vec(word.to_vec()));
    }

    let cmd = Command { argv };
    log::debug!("parsed argv: {:?}", cmd.args());
    Ok(cmd)
}
