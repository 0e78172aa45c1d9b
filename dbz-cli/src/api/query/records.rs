//! Paginated record queries over the REST records endpoint

use anyhow::Result;
use log::{debug, info};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::orderby::OrderBy;
use crate::api::constants::{RECORDS_PATH, query_params};
use crate::api::error::QueryError;
use crate::api::http::{HttpClient, RequestHeaders};

/// Shorthand for [`DataQueryBuilder::new`]
pub fn data_query_builder(object: impl Into<String>) -> DataQueryBuilder {
    DataQueryBuilder::new(object)
}

/// Fluent builder for a single `GET <records>?object=...` request
#[derive(Clone)]
pub struct DataQueryBuilder {
    object: String,
    fields: Vec<String>,
    page: Option<i64>,
    size: Option<i64>,
    order_by: Option<OrderBy>,
    http_client: Option<Arc<dyn HttpClient>>,
    base_url: String,
}

impl fmt::Debug for DataQueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataQueryBuilder")
            .field("object", &self.object)
            .field("fields", &self.fields)
            .field("page", &self.page)
            .field("size", &self.size)
            .field("order_by", &self.order_by)
            .field("http_client", &self.http_client.is_some())
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DataQueryBuilder {
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            fields: Vec::new(),
            page: None,
            size: None,
            order_by: None,
            http_client: None,
            base_url: RECORDS_PATH.to_string(),
        }
    }

    /// Replace the requested field list. An empty list requests all fields.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn page(mut self, n: i64) -> Self {
        self.page = Some(n);
        self
    }

    /// Page size, sent as the `size` parameter
    pub fn limit(mut self, n: i64) -> Self {
        self.size = Some(n);
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.order_by = Some(OrderBy::new(field, direction));
        self
    }

    /// Sort ascending, the records service default
    pub fn sort_by_asc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(OrderBy::asc(field));
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

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query parameters in wire order, skipping anything unset
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if !self.object.is_empty() {
            params.push((
                query_params::OBJECT,
                urlencoding::encode(&self.object).into_owned(),
            ));
        }
        if !self.fields.is_empty() {
            // Encode names one by one so the separating commas stay literal
            let fields = self
                .fields
                .iter()
                .map(|f| urlencoding::encode(f).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            params.push((query_params::FIELDS, fields));
        }
        if let Some(page) = self.page {
            params.push((query_params::PAGE, page.to_string()));
        }
        if let Some(size) = self.size {
            params.push((query_params::SIZE, size.to_string()));
        }
        if let Some(order) = &self.order_by {
            params.push((
                query_params::SORT_BY,
                urlencoding::encode(&order.field).into_owned(),
            ));
            params.push((
                query_params::SORT_DIRECTION,
                urlencoding::encode(&order.direction).into_owned(),
            ));
        }

        params
    }

    /// Full request URL: base URL plus the encoded query string
    ///
    /// A base URL that already carries a query string is extended with `&`.
    pub fn build_url(&self) -> String {
        let query = self
            .query_params()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            self.base_url.clone()
        } else {
            let separator = if self.base_url.contains('?') { '&' } else { '?' };
            format!("{}{}{}", self.base_url, separator, query)
        }
    }

    /// Issue the GET and return the response body without unwrapping any envelope
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

        let url = self.build_url();
        debug!("Fetching records: {}", url);

        let headers = RequestHeaders::bearer(access_token);
        let response = client.get(&url, &headers).await?;

        info!(
            "Records query on {} returned status {}",
            self.object, response.status
        );
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::testing::RecordingHttpClient;
    use serde_json::json;

    #[test]
    fn test_url_with_object_only() {
        assert_eq!(
            DataQueryBuilder::new("Employee").build_url(),
            "/api/dbz/v1/data/records?object=Employee"
        );
    }

    #[test]
    fn test_unset_params_are_omitted() {
        let url = DataQueryBuilder::new("Employee").limit(10).build_url();
        assert_eq!(url, "/api/dbz/v1/data/records?object=Employee&size=10");
    }

    #[test]
    fn test_param_order_is_fixed() {
        let url = DataQueryBuilder::new("Employee")
            .sort_by_asc("hiredAt")
            .limit(5)
            .page(1)
            .with_fields(["id"])
            .build_url();

        assert_eq!(
            url,
            "/api/dbz/v1/data/records?object=Employee&fields=id&page=1&size=5&sortBy=hiredAt&sortDirection=asc"
        );
    }

    #[test]
    fn test_with_fields_replaces() {
        let url = DataQueryBuilder::new("E")
            .with_fields(vec!["a", "b"])
            .with_fields(vec!["c".to_string()])
            .build_url();
        assert_eq!(url, "/api/dbz/v1/data/records?object=E&fields=c");
    }

    #[test]
    fn test_base_url_with_query_string_is_extended() {
        let url = DataQueryBuilder::new("E")
            .with_base_url("/proxy?tenant=a")
            .page(1)
            .build_url();
        assert_eq!(url, "/proxy?tenant=a&object=E&page=1");

        let bare = DataQueryBuilder::new("").with_base_url("/proxy?tenant=a");
        assert_eq!(bare.build_url(), "/proxy?tenant=a");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let url = DataQueryBuilder::new("Sales Order")
            .with_fields(["first name", "id"])
            .build_url();

        assert_eq!(
            url,
            "/api/dbz/v1/data/records?object=Sales%20Order&fields=first%20name,id"
        );
    }

    #[test]
    fn test_numbers_and_direction_pass_through() {
        let url = DataQueryBuilder::new("E")
            .page(-2)
            .limit(0)
            .sort_by("name", "sideways")
            .build_url();

        assert_eq!(
            url,
            "/api/dbz/v1/data/records?object=E&page=-2&size=0&sortBy=name&sortDirection=sideways"
        );
    }

    #[tokio::test]
    async fn test_fetch_documented_example() {
        let body = json!({"data": [{"id": 1, "name": "Zoe"}], "total": 51});
        let client = Arc::new(RecordingHttpClient::responding(body.clone()));

        let data = data_query_builder("Employee")
            .with_fields(["id", "name"])
            .page(2)
            .limit(25)
            .sort_by("name", "desc")
            .with_http_client(client.clone())
            .fetch("secret-token")
            .await
            .unwrap();

        assert_eq!(data, body);

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(
            requests[0].url,
            "/api/dbz/v1/data/records?object=Employee&fields=id,name&page=2&size=25&sortBy=name&sortDirection=desc"
        );
        assert_eq!(
            requests[0].headers.get("Authorization"),
            Some("Bearer secret-token")
        );
        assert_eq!(
            requests[0].headers.get("Content-Type"),
            Some("application/json")
        );
        assert_eq!(requests[0].body, None);
    }

    #[tokio::test]
    async fn test_fetch_base_url_override() {
        let client = Arc::new(RecordingHttpClient::responding(json!([])));

        data_query_builder("Account")
            .with_base_url("/proxy/records")
            .with_http_client(client.clone())
            .fetch("t")
            .await
            .unwrap();

        assert_eq!(client.requests()[0].url, "/proxy/records?object=Account");
    }

    #[tokio::test]
    async fn test_fetch_without_client_fails() {
        let err = data_query_builder("Employee")
            .page(1)
            .fetch("t")
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<QueryError>(),
            Some(&QueryError::MissingHttpClient {
                object: "Employee".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_fetch_propagates_transport_error() {
        let client = Arc::new(RecordingHttpClient::failing("connection refused"));

        let err = data_query_builder("Employee")
            .with_http_client(client)
            .fetch("t")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "connection refused");
    }
}
