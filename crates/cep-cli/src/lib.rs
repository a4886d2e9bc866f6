//! cep CLI library.
//!
//! Configuration, task-list loading, command execution and output
//! formatting for the `cep` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod tasks;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
