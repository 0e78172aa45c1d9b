//! `records` command: page through a records collection

pub mod handler;

use clap::Args;
use std::path::PathBuf;

use crate::api::DataQueryBuilder;
use crate::cli::output::{DisplayStyle, OutputFormat};

pub use handler::handle_records_command;

#[derive(Args, Debug, Clone)]
pub struct RecordsCommands {
    /// Object (table) whose records to list, e.g. Employee
    pub object: String,

    /// Comma-separated fields to return. Returns all fields when omitted.
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Records per page
    #[arg(short, long, allow_negative_numbers = true)]
    pub size: Option<i64>,

    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction passed through to the service (usually asc or desc)
    #[arg(long, default_value = "asc")]
    pub sort_direction: String,

    /// Print the request URL instead of sending it
    #[arg(long)]
    pub dry: bool,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    #[arg(long, value_enum, default_value = "default")]
    pub style: DisplayStyle,

    /// Write results to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RecordsCommands {
    pub fn to_builder(&self, base_url: &str) -> DataQueryBuilder {
        let mut builder = DataQueryBuilder::new(&self.object)
            .with_base_url(base_url)
            .with_fields(self.fields.iter().filter(|f| !f.trim().is_empty()).map(|f| f.trim()));

        if let Some(page) = self.page {
            builder = builder.page(page);
        }
        if let Some(size) = self.size {
            builder = builder.limit(size);
        }
        if let Some(field) = &self.sort_by {
            builder = builder.sort_by(field, &self.sort_direction);
        }

        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::constants::RECORDS_PATH;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> RecordsCommands {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Records(args) => args,
            other => panic!("expected records command, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_from_args() {
        let args = parse(&[
            "dbz-cli",
            "records",
            "Employee",
            "--fields",
            "id, name",
            "--page",
            "2",
            "--size",
            "25",
            "--sort-by",
            "name",
            "--sort-direction",
            "desc",
        ]);

        assert_eq!(
            args.to_builder(RECORDS_PATH).build_url(),
            "/api/dbz/v1/data/records?object=Employee&fields=id,name&page=2&size=25&sortBy=name&sortDirection=desc"
        );
    }

    #[test]
    fn test_defaults_omit_paging() {
        let args = parse(&["dbz-cli", "records", "Employee"]);
        assert_eq!(
            args.to_builder("/records").build_url(),
            "/records?object=Employee"
        );
    }

    #[test]
    fn test_sort_direction_defaults_to_asc() {
        let args = parse(&["dbz-cli", "records", "Employee", "--sort-by", "hiredAt"]);
        assert!(
            args.to_builder(RECORDS_PATH)
                .build_url()
                .ends_with("sortBy=hiredAt&sortDirection=asc")
        );
    }
}
