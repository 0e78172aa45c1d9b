//! OQL command handler

use anyhow::{Context, Result};
use colored::*;
use std::sync::Arc;
use std::time::Instant;

use super::QueryCommands;
use crate::cli::output::{emit, format_output};
use crate::config::Config;

/// Build the OQL query from arguments, then print it or execute it
pub async fn handle_query_command(args: QueryCommands, config: &Config) -> Result<()> {
    let verbose = args.style.is_verbose();

    let start_build = Instant::now();
    let builder = args.to_builder().context("Failed to build OQL query")?;
    let oql = builder.build_oql();
    let build_duration = start_build.elapsed();

    if verbose {
        println!("Query: {}", oql.dimmed());
        println!("Build time: {:.2}ms", build_duration.as_secs_f64() * 1000.0);
        println!();
    }

    // If dry run, just show the query
    if args.dry {
        if args.parameterized {
            let parameterized = builder.build_parameterized();
            println!(
                "{}",
                serde_json::to_string_pretty(&parameterized)
                    .context("Failed to format parameterized query")?
            );
        } else {
            println!("{}", oql);
        }
        return Ok(());
    }

    let token = config.api.require_token()?;
    let client = Arc::new(config.api.http_client()?);

    if verbose {
        println!(
            "Executing against: {}{}",
            client.origin().unwrap_or_default().bright_green(),
            config.api.oql_path
        );
    }

    let start_exec = Instant::now();
    let result = builder
        .with_http_client(client)
        .with_base_url(&config.api.oql_path)
        .fetch(token)
        .await
        .context("Failed to execute OQL query")?;
    let exec_duration = start_exec.elapsed();

    if verbose {
        println!(
            "Execution time: {:.2}ms",
            exec_duration.as_secs_f64() * 1000.0
        );
        println!();
    }

    let formatted = format_output(&result, args.format)?;
    emit(&formatted, args.output.as_deref(), args.style)
}
