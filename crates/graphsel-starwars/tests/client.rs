//! Client round trips against a mocked GraphQL endpoint.
//!
//! Uses wiremock to capture the request body the client sends and to serve
//! canned responses, so the whole send/decode path runs without a server.

use graphsel_sdk::{Client, ClientError, DecodeError, Selection};
use graphsel_starwars::objects::{Droid, DroidFields, Query, QueryFields};
use serde_json::{json, Value};
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup(response: ResponseTemplate) -> (MockServer, Client) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(response)
        .mount(&server)
        .await;
    let client = Client::new(server.uri());
    (server, client)
}

fn droid_name() -> Selection<String, Query> {
    Selection::new(|set| {
        set.droid(
            "2001".to_string(),
            Selection::<String, Droid>::new(|set| set.name()).non_null_or_fail(),
        )
    })
}

fn sent_body(requests: &[wiremock::Request]) -> Value {
    assert_eq!(requests.len(), 1, "expected exactly one request");
    serde_json::from_slice(&requests[0].body).unwrap()
}

#[tokio::test]
async fn send_posts_document_and_decodes_data() {
    let (server, client) = setup(ResponseTemplate::new(200).set_body_json(json!({
        "data": { "droid": { "name": "R2-D2" } }
    })))
    .await;

    let name = client.send(&droid_name()).await.unwrap();
    assert_eq!(name, "R2-D2");

    let body = sent_body(&server.received_requests().await.unwrap());
    assert_eq!(body["query"], r#"query { droid(id: "2001") { name } }"#);
    assert!(body.get("operationName").is_none());
}

#[tokio::test]
async fn send_named_includes_operation_name() {
    let (server, client) = setup(ResponseTemplate::new(200).set_body_json(json!({
        "data": { "droid": { "name": "R2-D2" } }
    })))
    .await;

    client
        .send_named(&droid_name(), Some("Artoo"))
        .await
        .unwrap();

    let body = sent_body(&server.received_requests().await.unwrap());
    assert_eq!(body["query"], r#"query Artoo { droid(id: "2001") { name } }"#);
    assert_eq!(body["operationName"], "Artoo");
}

#[tokio::test]
async fn custom_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "droid": { "name": "C-3PO" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).with_header("Authorization", "Bearer secret");
    assert_eq!(client.send(&droid_name()).await.unwrap(), "C-3PO");
}

#[tokio::test]
async fn http_error_keeps_status_and_body() {
    let (_server, client) = setup(ResponseTemplate::new(500).set_body_string("boom")).await;

    match client.send(&droid_name()).await.unwrap_err() {
        ClientError::HttpError { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected HttpError, got {:?}", other),
    }
}

#[tokio::test]
async fn graphql_errors_are_surfaced() {
    let (_server, client) = setup(ResponseTemplate::new(200).set_body_json(json!({
        "data": null,
        "errors": [{ "message": "droid not found", "path": ["droid"] }]
    })))
    .await;

    let err = client.send(&droid_name()).await.unwrap_err();
    match &err {
        ClientError::GraphQL(errors) => assert_eq!(errors[0].message, "droid not found"),
        other => panic!("expected GraphQL error, got {:?}", other),
    }
    assert!(err.to_string().contains("droid not found"));
}

#[tokio::test]
async fn response_without_data_is_missing_data() {
    let (_server, client) = setup(ResponseTemplate::new(200).set_body_json(json!({}))).await;

    let err = client.send(&droid_name()).await.unwrap_err();
    assert!(matches!(err, ClientError::MissingData(_)));
}

#[tokio::test]
async fn decode_failures_carry_the_field_path() {
    let (_server, client) = setup(ResponseTemplate::new(200).set_body_json(json!({
        "data": { "droid": null }
    })))
    .await;

    match client.send(&droid_name()).await.unwrap_err() {
        ClientError::Decode(err) => {
            assert_eq!(err.path(), vec!["droid"]);
            assert_eq!(err.root_cause(), &DecodeError::MissingValue);
        }
        other => panic!("expected Decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let client = Client::new("http://127.0.0.1:9/graphql");
    let err = client.send(&droid_name()).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}
