pub mod config;
pub mod error;
pub mod executor;
pub mod io;
pub mod parser;
pub mod prompt;
pub mod repl;
