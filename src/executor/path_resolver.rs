use std::env;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

pub struct PathResolver {
    var: String,
}

impl PathResolver {
    /// `var` names the environment variable holding the search path.
    pub fn new(var: impl Into<String>) -> Self {
        PathResolver { var: var.into() }
    }

    /// Resolves against the search path currently in the environment.
    pub fn resolve(&self, command: &OsStr) -> Option<PathBuf> {
        let search_path = env::var_os(&self.var);
        resolve_in(command, search_path.as_deref())
    }
}

/// A name containing `/` is taken as a path as is, without checking that it
/// exists. Otherwise each non-empty `:`-separated directory of `search_path`
/// is tried in order and the first existing `<dir>/<command>` wins.
pub fn resolve_in(command: &OsStr, search_path: Option<&OsStr>) -> Option<PathBuf> {
    if command.as_bytes().contains(&b'/') {
        return Some(PathBuf::from(command));
    }

    let search_path = search_path.filter(|p| !p.is_empty())?;
    for dir in search_path.as_bytes().split(|&b| b == b':').filter(|d| !d.is_empty()) {
        let candidate = Path::new(OsStr::from_bytes(dir)).join(command);
        log::debug!("trying {}", candidate.display());
        if candidate.exists() {
            return Some(candidate);
        }
    }

    None
}
