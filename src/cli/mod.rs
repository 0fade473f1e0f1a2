//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;
pub mod logging;
pub mod output;
pub mod viz;

pub use args::{Cli, Commands, GlobalOpts, InputArgs, OutputFormat};
pub use logging::init_logging;
