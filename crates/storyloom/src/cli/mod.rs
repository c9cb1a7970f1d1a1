//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyloom binary.

mod commands;
mod handlers;

pub use commands::{Cli, Commands, FormatArg};
pub use handlers::{assemble, combine, draft, illustrate, list, run};
