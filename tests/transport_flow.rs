//! HTTP transport against a mock server: failure mapping into the closed
//! cause set, and a full caller-over-transport retry round trip.

mod common;

use assert_matches::assert_matches;
use common::RecordingHooks;
use pagebridge::config::{CallConfig, EndpointConfig};
use pagebridge::pagination::{PaginatedResults, Pagination};
use pagebridge::rpc::{CallFailure, RpcCaller, RpcEndpoint};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Contact {
    name: String,
    email: String,
}

fn endpoint_for(server: &MockServer) -> RpcEndpoint {
    RpcEndpoint::new(EndpointConfig::new(server.uri()).unwrap())
}

fn page_body() -> serde_json::Value {
    serde_json::json!({
        "rows": [
            {"name": "Ada Lovelace", "email": "ada@example.org"},
            {"name": "Grace Hopper", "email": "grace@example.org"},
        ],
        "pagination": {
            "page_size": 10,
            "page_number": 2,
            "total_rows": 57,
            "total_finalized": true,
        }
    })
}

#[tokio::test]
async fn fetch_page_sends_window_and_decodes_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .mount(&server)
        .await;

    let endpoint = endpoint_for(&server);
    let results: PaginatedResults<Contact> = endpoint
        .fetch_page("/contacts", &Pagination::new(10).page(2))
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results.rows()[0].name, "Ada Lovelace");
    assert_eq!(results.pagination().total_rows(), 57);
    assert!(results.pagination().is_total_finalized());
}

#[tokio::test]
async fn bearer_token_rides_along_once_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .mount(&server)
        .await;

    let mut endpoint = endpoint_for(&server);
    endpoint.config_mut().set_token(Some("secret-token".to_string()));

    let result: Result<PaginatedResults<Contact>, _> =
        endpoint.fetch_page("/contacts", &Pagination::new(10).page(2)).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn error_statuses_map_to_status_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let endpoint = endpoint_for(&server);
    let result: Result<PaginatedResults<Contact>, _> =
        endpoint.fetch_page("/contacts", &Pagination::new(10)).await;

    assert_matches!(result, Err(CallFailure::Status { code: 403 }));
}

#[tokio::test]
async fn rejected_bearer_token_maps_to_token_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("WWW-Authenticate", "Bearer error=\"invalid_token\""),
        )
        .mount(&server)
        .await;

    let endpoint = endpoint_for(&server);
    let result: Result<PaginatedResults<Contact>, _> =
        endpoint.fetch_page("/contacts", &Pagination::new(10)).await;

    assert_matches!(result, Err(CallFailure::TokenRejected { message }) => {
        assert!(message.contains("invalid_token"));
    });
}

#[tokio::test]
async fn server_version_mismatch_maps_to_incompatible() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-api-version", "2")
                .set_body_json(page_body()),
        )
        .mount(&server)
        .await;

    let endpoint = endpoint_for(&server);
    let result: Result<PaginatedResults<Contact>, _> =
        endpoint.fetch_page("/contacts", &Pagination::new(10)).await;

    assert_matches!(result, Err(CallFailure::IncompatibleVersion { client, server: answered }) => {
        assert_eq!(client, "1");
        assert_eq!(answered, "2");
    });
}

#[tokio::test]
async fn validation_response_maps_to_validation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/contacts/save"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "message": "contact invalid",
            "field_errors": [{"field": "email", "message": "not an address"}],
        })))
        .mount(&server)
        .await;

    let endpoint = endpoint_for(&server);
    let body = Contact {
        name: "Bad".to_string(),
        email: "nope".to_string(),
    };
    let result: Result<Contact, _> = endpoint.call("/contacts/save", &body).await;

    assert_matches!(result, Err(CallFailure::Validation(failure)) => {
        assert_eq!(failure.message, "contact invalid");
        assert_eq!(failure.field_errors[0].field, "email");
    });
}

#[tokio::test]
async fn unreachable_server_maps_to_status_zero() {
    // Nothing listens on the discard port; the connect fails outright
    let endpoint = RpcEndpoint::new(EndpointConfig::new("http://127.0.0.1:9").unwrap());
    let result: Result<PaginatedResults<Contact>, _> =
        endpoint.fetch_page("/contacts", &Pagination::new(10)).await;

    assert_matches!(result, Err(CallFailure::Status { code: 0 }));
}

#[tokio::test]
async fn caller_retries_a_slow_endpoint_through_the_transport() {
    let server = MockServer::start().await;
    // First request stalls past the caller timeout, the follow-up answers
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body())
                .set_delay(Duration::from_secs(5)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .mount(&server)
        .await;

    let endpoint = endpoint_for(&server);
    let pagination = Pagination::new(10).page(2);
    let config = CallConfig::builder()
        .timeout_ms(200)
        .max_attempts(2)
        .build()
        .unwrap();
    let mut caller: RpcCaller<RecordingHooks<PaginatedResults<Contact>>> =
        RpcCaller::new("ContactService", "listContacts", config, RecordingHooks::default());

    caller
        .invoke(|| endpoint.fetch_page("/contacts", &pagination))
        .await;

    assert_eq!(caller.attempts(), 2);
    assert!(caller.hooks().errors.is_empty());
    assert_eq!(caller.hooks().results.len(), 1);
    assert_eq!(caller.hooks().results[0].rows().len(), 2);
}
