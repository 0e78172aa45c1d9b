//! Command-line interface

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use commands::{QueryCommands, RecordsCommands};

#[derive(Parser, Debug)]
#[command(name = "dbz-cli", version, about = "Query dynamic objects through the dbz API")]
pub struct Cli {
    /// API origin, e.g. https://workspace.example.com (overrides DBZ_API_ORIGIN)
    #[arg(long, global = true)]
    pub origin: Option<String>,

    /// Bearer token (overrides DBZ_ACCESS_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and execute an OQL query
    Oql(QueryCommands),
    /// List records of an object page by page
    Records(RecordsCommands),
}

/// Resolve configuration and dispatch to the subcommand handler
pub async fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?.with_overrides(cli.origin, cli.token);

    match cli.command {
        Commands::Oql(args) => commands::handle_query_command(args, &config).await,
        Commands::Records(args) => commands::handle_records_command(args, &config).await,
    }
}
