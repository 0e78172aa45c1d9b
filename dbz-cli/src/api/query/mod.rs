//! Query builders for the dbz dynamic-object API
//!
//! Two independent fluent builders share the same shape: configure with
//! chained calls, then consume with one `fetch`.
//! - [`DataQueryBuilder`] pages through a records collection over REST
//! - [`OqlQueryBuilder`] renders an OQL string and posts it for execution

pub mod filters;
pub mod oql;
pub mod orderby;
pub mod records;

pub use filters::{Condition, Operator, Predicate, PredicateToken};
pub use oql::{OqlQueryBuilder, ParameterizedOql, oql_query_builder};
pub use orderby::OrderBy;
pub use records::{DataQueryBuilder, data_query_builder};
