//! Records command handler

use anyhow::{Context, Result};
use colored::*;
use std::sync::Arc;
use std::time::Instant;

use super::RecordsCommands;
use crate::cli::output::{emit, format_output};
use crate::config::Config;

/// Build the records request from arguments, then print its URL or send it
pub async fn handle_records_command(args: RecordsCommands, config: &Config) -> Result<()> {
    let verbose = args.style.is_verbose();
    let builder = args.to_builder(&config.api.records_path);

    if args.dry {
        println!("{}", builder.build_url());
        return Ok(());
    }

    let token = config.api.require_token()?;
    let client = Arc::new(config.api.http_client()?);

    if verbose {
        println!(
            "Fetching: {}{}",
            client.origin().unwrap_or_default().bright_green(),
            builder.build_url().dimmed()
        );
    }

    let start = Instant::now();
    let result = builder
        .with_http_client(client)
        .fetch(token)
        .await
        .with_context(|| format!("Failed to fetch records for {}", args.object))?;

    if verbose {
        println!(
            "Execution time: {:.2}ms",
            start.elapsed().as_secs_f64() * 1000.0
        );
        println!();
    }

    let formatted = format_output(&result, args.format)?;
    emit(&formatted, args.output.as_deref(), args.style)
}
