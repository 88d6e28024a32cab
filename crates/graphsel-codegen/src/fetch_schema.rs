//! Fetch a schema from a live endpoint via introspection.

use serde_json::Value;
use thiserror::Error;

use crate::introspection::IntrospectionError;
use crate::schema::Schema;

pub const INTROSPECTION_QUERY: &str = r#"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      kind
      name
      description
      fields(includeDeprecated: true) {
        name
        description
        args {
          name
          description
          type { ...TypeRef }
          defaultValue
        }
        type { ...TypeRef }
        isDeprecated
        deprecationReason
      }
      inputFields {
        name
        description
        type { ...TypeRef }
        defaultValue
      }
      interfaces { ...TypeRef }
      enumValues(includeDeprecated: true) {
        name
        description
        isDeprecated
        deprecationReason
      }
      possibleTypes { ...TypeRef }
    }
  }
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error(transparent)]
    Introspection(#[from] IntrospectionError),
}

/// Run the introspection query against `url` and build a schema.
///
/// `headers` are sent as-is, e.g. `("Authorization", "Bearer ...")`.
pub fn fetch(url: &str, headers: &[(String, String)]) -> Result<Schema, FetchError> {
    let client = reqwest::blocking::Client::new();
    let body = serde_json::json!({
        "query": INTROSPECTION_QUERY,
        "operationName": "IntrospectionQuery",
    });

    tracing::info!(url, "fetching schema via introspection");
    let mut request = client.post(url).json(&body);
    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }
    let response = request.send()?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(FetchError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let json: Value = response.json()?;
    let schema = Schema::from_introspection(&json)?;
    tracing::debug!(types = schema.types.len(), "introspection converted");
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_requests_roots_and_possible_types() {
        assert!(INTROSPECTION_QUERY.contains("queryType { name }"));
        assert!(INTROSPECTION_QUERY.contains("possibleTypes { ...TypeRef }"));
        assert!(INTROSPECTION_QUERY.contains("fragment TypeRef on __Type"));
    }

    #[test]
    fn unreachable_endpoint_is_http_error() {
        let err = fetch("http://127.0.0.1:9/graphql", &[]).unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }
}
