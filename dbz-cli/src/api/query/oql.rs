//! OQL query builder
//!
//! Accumulates a projection, WHERE predicates and paging, renders them as a
//! single OQL string and POSTs it to the execution endpoint:
//!
//! ```text
//! SELECT <fields|*> FROM <object> [WHERE <predicates>] [LIMIT <n>] [OFFSET <n>]
//! ```

use anyhow::Result;
use log::{debug, info};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;

use super::filters::{Condition, Operator, Predicate};
use crate::api::constants::OQL_EXECUTE_PATH;
use crate::api::error::QueryError;
use crate::api::http::{HttpClient, RequestHeaders};

/// Shorthand for [`OqlQueryBuilder::new`]
pub fn oql_query_builder(object: impl Into<String>) -> OqlQueryBuilder {
    OqlQueryBuilder::new(object)
}

/// OQL text with condition values lifted out into positional parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterizedOql {
    /// Query with `:1`, `:2`, ... in place of each condition value
    pub query: String,
    /// Raw values in placeholder order
    pub params: Vec<String>,
}

/// Fluent builder for a single OQL query
#[derive(Clone)]
pub struct OqlQueryBuilder {
    object: String,
    fields: Vec<String>,
    predicate: Predicate,
    limit: Option<i64>,
    offset: Option<i64>,
    http_client: Option<Arc<dyn HttpClient>>,
    base_url: String,
}

impl fmt::Debug for OqlQueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OqlQueryBuilder")
            .field("object", &self.object)
            .field("fields", &self.fields)
            .field("predicate", &self.predicate)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("http_client", &self.http_client.is_some())
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OqlQueryBuilder {
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            fields: Vec::new(),
            predicate: Predicate::new(),
            limit: None,
            offset: None,
            http_client: None,
            base_url: OQL_EXECUTE_PATH.to_string(),
        }
    }

    /// Append a field to the projection. Duplicates are kept.
    pub fn add_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Add a condition. Joined with `AND` if conditions already exist.
    pub fn where_(
        mut self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        self.predicate.push(Condition::new(field, operator, value));
        self
    }

    /// Alias of [`where_`](Self::where_)
    pub fn filter(
        self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        self.where_(field, operator, value)
    }

    pub fn and_where(
        mut self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        self.predicate.push_and(Condition::new(field, operator, value));
        self
    }

    pub fn or_where(
        mut self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        self.predicate.push_or(Condition::new(field, operator, value));
        self
    }

    /// Add an already-built condition joined with `AND`
    pub fn condition(mut self, condition: Condition) -> Self {
        self.predicate.push_and(condition);
        self
    }

    /// Add an already-built condition joined with `OR`
    pub fn or_condition(mut self, condition: Condition) -> Self {
        self.predicate.push_or(condition);
        self
    }

    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }

    pub fn with_http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Render the OQL string. Condition values are quoted but not escaped.
    pub fn build_oql(&self) -> String {
        self.render(self.predicate.to_oql())
    }

    /// Render the query with positional placeholders instead of inline values
    pub fn build_parameterized(&self) -> ParameterizedOql {
        let mut params = Vec::new();
        let where_clause = self.predicate.render_with(|c| {
            params.push(c.value.clone());
            c.to_oql_with_placeholder(&format!(":{}", params.len()))
        });

        ParameterizedOql {
            query: self.render(where_clause),
            params,
        }
    }

    fn render(&self, where_clause: String) -> String {
        let projection = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(", ")
        };

        let mut oql = format!("SELECT {} FROM {}", projection, self.object);

        if !where_clause.is_empty() {
            oql.push_str(" WHERE ");
            oql.push_str(&where_clause);
        }
        if let Some(limit) = self.limit {
            oql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            oql.push_str(&format!(" OFFSET {}", offset));
        }

        oql
    }

    /// Execute the query, returning the response body as received
    ///
    /// Fails before sending anything if no HTTP client was configured.
    /// Transport errors are returned unchanged.
    pub async fn fetch(self, access_token: &str) -> Result<Value> {
        let client = self
            .http_client
            .as_ref()
            .ok_or_else(|| QueryError::MissingHttpClient {
                object: self.object.clone(),
            })?;

        let query = self.build_oql();
        debug!("Executing OQL against {}: {}", self.base_url, query);

        let body = json!({ "query": query });
        let headers = RequestHeaders::bearer(access_token);
        let response = client.post(&self.base_url, &body, &headers).await?;

        info!(
            "OQL query on {} returned status {}",
            self.object, response.status
        );
        Ok(response.data)
    }
}
