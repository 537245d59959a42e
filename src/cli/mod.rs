//! CLI module for capsearch
//!
//! Provides command-line interface for:
//! - search: Run one search against a JSON fixture backend

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, SearchArgs};
pub use commands::{build_predicate, load_fixture, run, run_command, search};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_page, write_response};
