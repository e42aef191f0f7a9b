use std::io::{BufRead, Write};

use crate::error::ShellError;
use crate::executor::{BuiltinManager, Dispatch, Executor};
use crate::io::input::InputHandler;
use crate::parser::parse_line;

pub const SESSION_CLOSED: &str = "Session closed.";

/// The read, dispatch, wait cycle.
///
/// Ends on end of input or `exit`, printing [`SESSION_CLOSED`] either way.
/// Only fatal errors (argument allocation, fork) are returned.
pub struct Session<'a, R, W, E, X> {
    input: InputHandler<R>,
    out: W,
    err: E,
    builtins: &'a BuiltinManager,
    executor: X,
}

impl<'a, R, W, E, X> Session<'a, R, W, E, X>
where
    R: BufRead,
    W: Write,
    E: Write,
    X: Executor,
{
    pub fn new(
        input: InputHandler<R>,
        out: W,
        err: E,
        builtins: &'a BuiltinManager,
        executor: X,
    ) -> Self {
        Session {
            input,
            out,
            err,
            builtins,
            executor,
        }
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            let line = match self.input.read_line(&mut self.out) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    log::warn!("reading input failed, closing session: {}", e);
                    break;
                }
            };
            let cmd = parse_line(line)?;

            match self.builtins.dispatch(&cmd, &mut self.err) {
                Dispatch::Handled => continue,
                Dispatch::Terminate => break,
                Dispatch::NotBuiltin => {}
            }

            match self.executor.exec(&cmd) {
                Ok(status) => log::debug!("{}: {:?}", cmd, status),
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => log::warn!("{}: {}", cmd, e),
            }
        }

        writeln!(self.out, "{}", SESSION_CLOSED)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_parts(self) -> (W, E, X) {
        (self.out, self.err, self.executor)
    }
}
