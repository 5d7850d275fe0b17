//! CLI command implementations
//!
//! Both commands share the same boot sequence: load the configuration,
//! install the log subscriber, build the catalog and load the seed file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::args::Command;
use super::errors::{CliError, CliResult};
use crate::config::StudifyConfig;
use crate::observability::init_logging;
use crate::query::{self, RawQuery};
use crate::resource::Resource;
use crate::rest_api::{ListResponse, RestServer};
use crate::store::Catalog;

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port, seed } => serve(&config, port, seed),
        Command::Query {
            config,
            resource,
            seed,
            querystring,
        } => query(&config, resource, seed, &querystring),
    }
}

/// Start the HTTP API and serve until Ctrl-C
pub fn serve(config_path: &Path, port: Option<u16>, seed: Option<PathBuf>) -> CliResult<()> {
    let mut config = load_config(config_path, seed)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    init_logging(&config.logging);
    let catalog = load_catalog(&config)?;

    let server = RestServer::new(&catalog, &config)
        .map_err(|e| CliError::server_error(e.to_string()))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::server_error(format!("Failed to start runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::server_error(e.to_string()))
}

/// Run one list query and print the response envelope to stdout
pub fn query(
    config_path: &Path,
    resource: Resource,
    seed: Option<PathBuf>,
    querystring: &str,
) -> CliResult<()> {
    let config = load_config(config_path, seed)?;
    init_logging(&config.logging);
    let catalog = load_catalog(&config)?;

    let response = run_query(&catalog, &config, resource, querystring)?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &response)?;
    writeln!(stdout)?;
    Ok(())
}

/// Execute `querystring` against one resource of a loaded catalog
pub fn run_query(
    catalog: &Catalog,
    config: &StudifyConfig,
    resource: Resource,
    querystring: &str,
) -> CliResult<ListResponse> {
    let raw = RawQuery::parse(querystring.trim_start_matches('?'))
        .map_err(query::PipelineError::from)?;
    let collection = catalog.collection(resource)?;
    let page = query::run(collection.as_ref(), &raw, config.query.max_limit)?;
    Ok(page.into())
}

/// Load configuration, applying the `--seed` override
fn load_config(path: &Path, seed: Option<PathBuf>) -> CliResult<StudifyConfig> {
    let mut config = StudifyConfig::load_or_default(path)?;
    if seed.is_some() {
        config.seed_path = seed;
    }
    Ok(config)
}

fn load_catalog(config: &StudifyConfig) -> CliResult<Catalog> {
    let catalog = Catalog::new();
    if let Some(path) = &config.seed_path {
        catalog.load_seed(path)?;
    } else {
        info!("no seed file configured, starting with empty collections");
    }
    Ok(catalog)
}
