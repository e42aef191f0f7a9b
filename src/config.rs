use std::io::{self, IsTerminal};

pub const DEFAULT_SEARCH_PATH_VAR: &str = "LITE_SHELL_PATH";
pub const DEFAULT_LINE_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Environment variable holding the colon-separated command search path.
    pub search_path_var: String,
    /// Size of the input line buffer in bytes, terminator slot included.
    pub line_capacity: usize,
    /// Emit a prompt before each read.
    pub interactive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search_path_var: DEFAULT_SEARCH_PATH_VAR.to_string(),
            line_capacity: DEFAULT_LINE_CAPACITY,
            interactive: false,
        }
    }
}

impl Config {
    /// Defaults, with interactivity taken from whether stdin is a terminal.
    pub fn detect() -> Self {
        Config {
            interactive: io::stdin().is_terminal(),
            ..Config::default()
        }
    }
}
