//! Query builders and command-line client for the dbz dynamic-object API
//!
//! ```no_run
//! use std::sync::Arc;
//! use dbz_cli::api::{Operator, ReqwestHttpClient, oql_query_builder};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = Arc::new(ReqwestHttpClient::new("https://workspace.example.com"));
//! let accounts = oql_query_builder("Account")
//!     .add_field("name")
//!     .where_("status", Operator::Eq, "active")
//!     .limit(20)
//!     .with_http_client(client)
//!     .fetch("access-token")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;

pub use api::{DataQueryBuilder, HttpClient, OqlQueryBuilder, QueryError};
pub use config::Config;
