mod executor;
mod builtins;
mod fork_executor;
mod path_resolver;

pub use builtins::{Builtin, BuiltinManager, Dispatch};
#[cfg(test)]
pub(crate) use builtins::cwd_lock;
pub use executor::{ExecError, ExecStatus, Executor};
pub use fork_executor::{ForkExecutor, EXIT_NOT_FOUND};
pub use path_resolver::{resolve_in, PathResolver};
