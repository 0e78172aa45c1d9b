//! Endpoint paths and header names for the dbz API

/// Records collection endpoint used by [`DataQueryBuilder`](super::query::DataQueryBuilder)
pub const RECORDS_PATH: &str = "/api/dbz/v1/data/records";

/// OQL execution endpoint used by [`OqlQueryBuilder`](super::query::OqlQueryBuilder)
pub const OQL_EXECUTE_PATH: &str = "/api/dbz/v1/oql/execute";

pub mod headers {
    pub const AUTHORIZATION: &str = "Authorization";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const APPLICATION_JSON: &str = "application/json";
}

pub mod query_params {
    pub const OBJECT: &str = "object";
    pub const FIELDS: &str = "fields";
    pub const PAGE: &str = "page";
    pub const SIZE: &str = "size";
    pub const SORT_BY: &str = "sortBy";
    pub const SORT_DIRECTION: &str = "sortDirection";
}
