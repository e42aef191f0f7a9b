use std::convert::Infallible;
use std::ffi::{CString, OsStr};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use nix::errno::Errno;
use nix::sys::wait::waitpid;
use nix::unistd::{execv, fork, ForkResult, Pid};

use super::executor::{ExecError, ExecStatus, Executor};
use super::path_resolver::PathResolver;
use crate::parser::Command;

/// Exit status of a child whose command could not be found or launched.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Forks, resolves and `execv`s in the child, and waits in the parent.
pub struct ForkExecutor {
    resolver: PathResolver,
}

impl ForkExecutor {
    pub fn new(resolver: PathResolver) -> Self {
        ForkExecutor { resolver }
    }

    fn exec_child(&self, name: &OsStr, cmd: &Command) -> ! {
        let Some(path) = self.resolver.resolve(name) else {
            child_exit(name, "command not found");
        };
        match replace_image(&path, cmd) {
            Ok(never) => match never {},
            Err(msg) => child_exit(name, &msg),
        }
    }
}

impl Executor for ForkExecutor {
    fn exec(&mut self, cmd: &Command) -> ExecStatus {
        let Some(name) = cmd.name() else {
            return Err(ExecError::EmptyCommand);
        };

        // The child must not inherit unflushed prompt text.
        let _ = io::stdout().flush();

        // SAFETY: the child only resolves the path, builds the argument
        // vector and then execs or `_exit`s.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => self.exec_child(name, cmd),
            Ok(ForkResult::Parent { child }) => wait_for(child),
            Err(e) => Err(ExecError::Fork(e)),
        }
    }
}

fn replace_image(path: &Path, cmd: &Command) -> Result<Infallible, String> {
    let path = CString::new(path.as_os_str().as_bytes()).map_err(|e| e.to_string())?;
    let argv = cmd.to_c_argv().map_err(|e| e.to_string())?;
    execv(&path, &argv).map_err(|e| e.desc().to_string())
}

/// Blocks until `child` terminates. There is no timeout.
fn wait_for(child: Pid) -> ExecStatus {
    loop {
        match waitpid(child, None) {
            Ok(status) => {
                log::debug!("child {} finished: {:?}", child, status);
                return Ok(status);
            }
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ExecError::Wait(e)),
        }
    }
}

/// Reports `<name>: <reason>` on fd 2 and leaves without running the
/// parent's exit handlers or flushing its buffers. `name` is written as is.
fn child_exit(name: &OsStr, reason: &str) -> ! {
    let msg = diagnostic(name, reason);
    let mut rest = msg.as_slice();
    while !rest.is_empty() {
        // SAFETY: `rest` is a live byte slice.
        let n = unsafe { libc::write(libc::STDERR_FILENO, rest.as_ptr().cast(), rest.len()) };
        if n <= 0 {
            break;
        }
        rest = &rest[n as usize..];
    }
    // SAFETY: terminates only this process.
    unsafe { libc::_exit(EXIT_NOT_FOUND) }
}

fn diagnostic(name: &OsStr, reason: &str) -> Vec<u8> {
    let mut msg = Vec::with_capacity(name.len() + reason.len() + 3);
    msg.extend_from_slice(name.as_bytes());
    msg.extend_from_slice(b": ");
    msg.extend_from_slice(reason.as_bytes());
    msg.push(b'\n');
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;
    use nix::sys::wait::WaitStatus;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::env;
    use std::ffi::OsString;
    use std::fs;
    use std::os::unix::ffi::OsStringExt;
    use std::path::PathBuf;

    const UNSET_VAR: &str = "LITE_SHELL_TEST_UNSET_SEARCH_PATH";

    fn run(line: &str) -> ExecStatus {
        run_bytes(line.as_bytes())
    }

    fn run_bytes(line: &[u8]) -> ExecStatus {
        let mut executor = ForkExecutor::new(PathResolver::new(UNSET_VAR));
        executor.exec(&parse_line(line).unwrap())
    }

    fn exit_code(status: ExecStatus) -> Option<i32> {
        match status {
            Ok(WaitStatus::Exited(_, code)) => Some(code),
            _ => None,
        }
    }

    #[test]
    fn test_runs_absolute_path() {
        assert_eq!(exit_code(run("/bin/sh -c true")), Some(0));
    }

    #[test]
    fn test_passes_arguments() {
        assert_eq!(exit_code(run("/bin/sh -c false")), Some(1));
    }

    #[rstest]
    #[case("ls")]
    #[case("no-such-command-for-lite-shell")]
    fn test_unresolved_without_search_path_exits_127(#[case] line: &str) {
        assert_eq!(exit_code(run(line)), Some(EXIT_NOT_FOUND));
    }

    #[rstest]
    #[case("/no/such/binary")]
    #[case("./no-such-relative-binary")]
    #[case("/")]
    fn test_launch_failure_exits_127(#[case] line: &str) {
        assert_eq!(exit_code(run(line)), Some(EXIT_NOT_FOUND));
    }

    #[test]
    fn test_non_utf8_argument_reaches_child() {
        let mut path = env::temp_dir().into_os_string().into_vec();
        path.extend_from_slice(format!("/lite-shell-exec-{}-", std::process::id()).as_bytes());
        path.push(0xff);
        let path = PathBuf::from(OsString::from_vec(path));
        fs::write(&path, b"").unwrap();

        let mut line = b"/bin/cat ".to_vec();
        line.extend_from_slice(path.as_os_str().as_bytes());
        let status = run_bytes(&line);
        fs::remove_file(&path).unwrap();

        assert_eq!(exit_code(status), Some(0));
    }

    #[test]
    fn test_diagnostic_keeps_name_bytes() {
        let name = OsStr::from_bytes(b"tool\xff");
        assert_eq!(diagnostic(name, "command not found"), b"tool\xff: command not found\n");
    }

    #[test]
    fn test_empty_command_is_not_forked() {
        assert_eq!(run("   "), Err(ExecError::EmptyCommand));
    }

    #[test]
    #[ignore = "a child that never exits blocks the shell forever; there is no timeout"]
    fn test_hung_child_blocks() {
        let _ = run("/bin/sleep 1000000");
    }
}
