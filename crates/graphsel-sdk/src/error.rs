//! Error types for the selection runtime.
//!
//! [`DecodeError`] is scoped to a single `decode` call and carries the field
//! path it failed at. [`ClientError`] wraps transport, GraphQL-level and
//! decode failures for [`Client::send`](crate::Client::send).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to decode a response payload through a selection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The payload is missing a value the schema declared non-null.
    #[error("missing non-null value")]
    MissingValue,
    /// The payload carried a JSON value of the wrong shape.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
    /// An enum value outside the declared set.
    #[error("unknown enum value `{value}` for {enum_name}")]
    UnknownEnumValue { enum_name: String, value: String },
    /// A `__typename` that is not one of the known possible types.
    #[error("unknown type `{typename}` for {type_name}")]
    UnknownPossibleType { type_name: String, typename: String },
    /// A custom scalar failed to deserialize.
    #[error("invalid {type_name}: {message}")]
    InvalidScalar {
        type_name: &'static str,
        message: String,
    },
    /// A failure nested below `field`.
    #[error("{field}: {source}")]
    InField {
        field: String,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Wrap this error with the name of the field it occurred under.
    pub fn within(self, field: impl Into<String>) -> Self {
        Self::InField {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with the field path stripped.
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            Self::InField { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Field names from the outermost to the failing field.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::InField { field, source } = current {
            path.push(field.as_str());
            current = source;
        }
        path
    }

    pub(crate) fn mismatch(expected: &'static str, found: &serde_json::Value) -> Self {
        let found = match found {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "list",
            serde_json::Value::Object(_) => "object",
        };
        Self::TypeMismatch {
            expected,
            found: found.to_string(),
        }
    }
}

/// A single GraphQL error from the server response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
}

/// Errors that can occur when sending a selection to a GraphQL endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-2xx HTTP response.
    #[error("HTTP error {status}: {body}")]
    HttpError { status: u16, body: String },
    /// GraphQL errors returned by the server.
    #[error("GraphQL errors: {}", join_messages(.0))]
    GraphQL(Vec<GraphQLError>),
    /// The response had neither `data` nor `errors`.
    #[error("Missing data: {0}")]
    MissingData(String),
    /// The response did not match the selection.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| match &e.path {
            Some(path) => {
                let path: Vec<String> = path.iter().map(|p| p.to_string()).collect();
                format!("{} at {}", e.message, path.join("."))
            }
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_builds_path() {
        let err = DecodeError::MissingValue.within("name").within("hero");
        assert_eq!(err.path(), vec!["hero", "name"]);
        assert_eq!(err.root_cause(), &DecodeError::MissingValue);
        assert_eq!(err.to_string(), "hero: name: missing non-null value");
    }

    #[test]
    fn display_unknown_enum_value() {
        let err = DecodeError::UnknownEnumValue {
            enum_name: "Episode".to_string(),
            value: "PHANTOM".to_string(),
        };
        assert_eq!(err.to_string(), "unknown enum value `PHANTOM` for Episode");
    }

    #[test]
    fn mismatch_names_json_kind() {
        let err = DecodeError::mismatch("string", &serde_json::json!([1]));
        assert_eq!(err.to_string(), "expected string, found list");
    }

    #[test]
    fn display_graphql_errors_with_path() {
        let err = ClientError::GraphQL(vec![
            GraphQLError {
                message: "Boom".to_string(),
                extensions: None,
                path: Some(vec![serde_json::json!("hero"), serde_json::json!(0)]),
            },
            GraphQLError {
                message: "Second".to_string(),
                extensions: None,
                path: None,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Boom at \"hero\".0; Second"
        );
    }

    #[test]
    fn decode_error_converts_into_client_error() {
        let err: ClientError = DecodeError::MissingValue.within("id").into();
        assert_eq!(err.to_string(), "Decode error: id: missing non-null value");
    }

    #[test]
    fn graphql_error_deserializes_without_extensions() {
        let json = r#"{"message": "Something failed"}"#;
        let err: GraphQLError = serde_json::from_str(json).unwrap();
        assert_eq!(err.message, "Something failed");
        assert!(err.extensions.is_none());
    }
}
