use std::io;

use lite_shell::config::Config;
use lite_shell::executor::{BuiltinManager, ForkExecutor, PathResolver};
use lite_shell::io::input::InputHandler;
use lite_shell::prompt::ShellPrompt;
use lite_shell::repl::Session;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::detect();
    log::debug!("starting with {:?}", config);

    let prompt = config.interactive.then(ShellPrompt::current_user);
    let input = InputHandler::new(io::stdin().lock(), config.line_capacity, prompt);
    let builtins = BuiltinManager::new();
    let executor = ForkExecutor::new(PathResolver::new(config.search_path_var.as_str()));

    let mut session = Session::new(input, io::stdout(), io::stderr(), &builtins, executor);
    session.run()?;
    Ok(())
}
