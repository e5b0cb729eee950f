//! docqa CLI library.
//!
//! Core functionality for the `docqa` command-line interface: configuration
//! management, command execution, and output formatting. The binary is a
//! thin wrapper over [`commands`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
