//! Async GraphQL client.
//!
//! Sends the document rendered from a [`Selection`] and decodes the `data`
//! of the response through that same selection. Retries, caching and
//! timeouts are left to the `reqwest::Client` the caller supplies.

use crate::document::Operation;
use crate::error::{ClientError, GraphQLError};
use crate::selection::Selection;

/// A GraphQL endpoint client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    headers: Vec<(String, String)>,
}

/// Raw GraphQL response shape.
#[derive(serde::Deserialize)]
struct GraphQLResponse {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphQLError>>,
}

impl Client {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            headers: Vec::new(),
        }
    }

    /// Add a header sent with every request (e.g. `Authorization`).
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, ...).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send an anonymous operation and decode the result.
    pub async fn send<T, W: Operation>(
        &self,
        selection: &Selection<T, W>,
    ) -> Result<T, ClientError> {
        self.send_named(selection, None).await
    }

    /// Send a named operation and decode the result.
    pub async fn send_named<T, W: Operation>(
        &self,
        selection: &Selection<T, W>,
        operation_name: Option<&str>,
    ) -> Result<T, ClientError> {
        let document = selection.document(operation_name);
        tracing::debug!(endpoint = %self.endpoint, %document, "sending GraphQL operation");

        let mut body = serde_json::json!({ "query": document });
        if let Some(name) = operation_name {
            body["operationName"] = serde_json::Value::String(name.to_string());
        }

        let mut request = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header(
                "User-Agent",
                format!("graphsel-sdk/{}", env!("CARGO_PKG_VERSION")),
            );
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let gql_response: GraphQLResponse = response.json().await?;

        if let Some(errors) = gql_response.errors {
            if !errors.is_empty() {
                return Err(ClientError::GraphQL(errors));
            }
        }

        let data = gql_response
            .data
            .ok_or_else(|| ClientError::MissingData("No data in response".to_string()))?;

        Ok(selection.decode(&data)?)
    }
}
