//! `oql` command: build and run an OQL query

pub mod handler;

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::api::{Condition, OqlQueryBuilder};
use crate::cli::output::{DisplayStyle, OutputFormat};

pub use handler::handle_query_command;

#[derive(Args, Debug, Clone)]
pub struct QueryCommands {
    /// Object (table) to query, e.g. Account
    pub object: String,

    /// Field to select; repeat for more. Selects all fields when omitted.
    #[arg(short, long = "field")]
    pub fields: Vec<String>,

    /// Condition such as "status = active". Prefix with "and " or "or "
    /// to choose the connective (default and). Applied in the order given.
    #[arg(short = 'w', long = "where")]
    pub conditions: Vec<String>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<i64>,

    /// Print the generated OQL instead of executing it
    #[arg(long)]
    pub dry: bool,

    /// With --dry, print the query with values as separate parameters
    #[arg(long, requires = "dry")]
    pub parameterized: bool,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    #[arg(long, value_enum, default_value = "default")]
    pub style: DisplayStyle,

    /// Write results to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Connective requested for a command-line condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

/// Split an optional leading `and`/`or` keyword off a condition argument
///
/// The keyword is only taken as a connective when the remainder still parses
/// as a condition, so a field literally named `and` or `or` works too.
pub fn parse_clause(input: &str) -> Result<(Connective, Condition)> {
    let trimmed = input.trim_start();
    let keyword = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) if word.eq_ignore_ascii_case("and") => Some((Connective::And, rest)),
        Some((word, rest)) if word.eq_ignore_ascii_case("or") => Some((Connective::Or, rest)),
        _ => None,
    };

    if let Some((connective, rest)) = keyword
        && let Ok(condition) = Condition::parse(rest)
    {
        return Ok((connective, condition));
    }

    let condition =
        Condition::parse(trimmed).with_context(|| format!("Invalid condition: '{}'", input))?;
    Ok((Connective::And, condition))
}

impl QueryCommands {
    pub fn to_builder(&self) -> Result<OqlQueryBuilder> {
        let mut builder = self
            .fields
            .iter()
            .fold(OqlQueryBuilder::new(&self.object), |b, f| b.add_field(f));

        for raw in &self.conditions {
            builder = match parse_clause(raw)? {
                (Connective::And, condition) => builder.condition(condition),
                (Connective::Or, condition) => builder.or_condition(condition),
            };
        }

        if let Some(limit) = self.limit {
            builder = builder.limit(limit);
        }
        if let Some(offset) = self.offset {
            builder = builder.offset(offset);
        }

        Ok(builder)
    }
}
