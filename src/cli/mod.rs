//! CLI module for Studify
//!
//! Provides command-line interface for:
//! - serve: Load the seed data and run the HTTP API
//! - query: One-shot list query against the seed data

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{query, run, run_command, run_query, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
