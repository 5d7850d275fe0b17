//! CLI argument definitions using clap
//!
//! Commands:
//! - studify serve --config <path> [--port <port>] [--seed <path>]
//! - studify query --config <path> --resource <name> [--seed <path>] <querystring>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::resource::Resource;

/// Studify - content API for the Studify learning platform
#[derive(Parser, Debug)]
#[command(name = "studify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./studify.json")]
        config: PathBuf,

        /// Port to listen on, overrides the configured port
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// Seed file to load, overrides the configured seed_path
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Run a single list query and print the response
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./studify.json")]
        config: PathBuf,

        /// Collection to query (discussions, productivity, tools, tutorials)
        #[arg(long)]
        resource: Resource,

        /// Seed file to load, overrides the configured seed_path
        #[arg(long)]
        seed: Option<PathBuf>,

        /// Querystring, e.g. "category=Focus&sort=-views&limit=2"
        #[arg(default_value = "")]
        querystring: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
