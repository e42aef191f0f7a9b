use std::env;
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;

use crate::parser::Command;

/// In-process commands. These never run in a forked child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    ChangeDirectory,
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Ran in-process (an empty command counts); read the next line.
    Handled,
    /// Not a builtin; launch it as an external program.
    NotBuiltin,
    /// End the session.
    Terminate,
}

/// Ordered name table, built once at startup and looked up linearly.
pub struct BuiltinManager {
    commands: Vec<(&'static str, Builtin)>,
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: Vec::with_capacity(2),
        };
        mgr.register("cd", Builtin::ChangeDirectory);
        mgr.register("exit", Builtin::Terminate);
        mgr
    }

    pub fn register(&mut self, name: &'static str, builtin: Builtin) {
        match self.commands.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = builtin,
            None => self.commands.push((name, builtin)),
        }
    }

    pub fn lookup(&self, name: impl AsRef<OsStr>) -> Option<Builtin> {
        let name = name.as_ref();
        self.commands
            .iter()
            .find(|(n, _)| OsStr::new(n) == name)
            .map(|&(_, builtin)| builtin)
    }

    #[cfg(test)]
    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|&(n, _)| n)
    }

    /// Runs `cmd` if it names a builtin. Diagnostics go to `err`.
    pub fn dispatch<E: Write>(&self, cmd: &Command, err: &mut E) -> Dispatch {
        let Some(name) = cmd.name() else {
            return Dispatch::Handled;
        };

        match self.lookup(name) {
            Some(Builtin::ChangeDirectory) => {
                change_directory(cmd.get(1), err);
                Dispatch::Handled
            }
            Some(Builtin::Terminate) => Dispatch::Terminate,
            None => Dispatch::NotBuiltin,
        }
    }
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}

fn change_directory<E: Write>(target: Option<&OsStr>, err: &mut E) {
    let Some(target) = target.map(Path::new) else {
        let _ = writeln!(err, "cd: missing operand");
        return;
    };
    match env::set_current_dir(target) {
        Ok(()) => log::debug!("cd: now in {}", target.display()),
        Err(e) => {
            let _ = writeln!(err, "cd: {}: {}", target.display(), e);
        }
    }
}

/// Serializes tests that move the process working directory.
#[cfg(test)]
pub(crate) fn cwd_lock() -> std::sync::MutexGuard<'static, ()> {
    static CWD: std::sync::Mutex<()> = std::sync::Mutex::new(());
    CWD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
