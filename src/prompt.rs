use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use nix::unistd::{getuid, User};

/// Renders `<relative-cwd>: <username>$ `.
pub struct ShellPrompt {
    user: String,
    home: Option<PathBuf>,
}

impl ShellPrompt {
    /// Looks up the invoking user's name and home directory.
    pub fn current_user() -> Self {
        let entry = match User::from_uid(getuid()) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("passwd lookup failed: {}", e);
                None
            }
        };
        let (user, home) = match entry {
            Some(u) => (u.name, Some(u.dir)),
            None => (env::var("USER").unwrap_or_default(), None),
        };
        Self::with_identity(user, home)
    }

    pub fn with_identity(user: String, home: Option<PathBuf>) -> Self {
        ShellPrompt { user, home }
    }

    pub fn render(&self, cwd: Option<&Path>) -> String {
        let dir = match cwd {
            Some(cwd) => relative_cwd(cwd, self.home.as_deref()),
            None => "?".to_string(),
        };
        format!("{}: {}$ ", dir, self.user)
    }

    pub fn show_prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let cwd = env::current_dir().ok();
        write!(out, "{}", self.render(cwd.as_deref()))?;
        out.flush()
    }
}

/// `~` for the home directory, `/` for the root, otherwise the last path segment.
pub fn relative_cwd(cwd: &Path, home: Option<&Path>) -> String {
    if home == Some(cwd) {
        return "~".to_string();
    }
    match cwd.file_name() {
        Some(name) if !name.is_empty() => name.to_string_lossy().into_owned(),
        _ => "/".to_string(),
    }
}
