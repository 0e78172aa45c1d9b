//! dbz API client module
//!
//! Query builders for the records and OQL endpoints, and the HTTP transport
//! seam they run on.

pub mod constants;
pub mod error;
pub mod http;
pub mod query;

pub use error::QueryError;
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient, RequestHeaders};
pub use query::{
    Condition, DataQueryBuilder, Operator, OqlQueryBuilder, OrderBy, ParameterizedOql, Predicate,
    PredicateToken, data_query_builder, oql_query_builder,
};
