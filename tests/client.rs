//! End-to-end dispatch tests: the blocking and asynchronous paths against
//! a local mock server, and the capability/error contracts against
//! hand-rolled transports.

use httpmock::prelude::*;
use serde_json::json;
use sparkpost_client::{
    BlockingTransport, Client, Error, OptionsMap, Outcome, OutgoingRequest, Transport,
    TransportError, TransportResponse,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn server_options(server: &MockServer) -> OptionsMap {
    OptionsMap::new()
        .key("abc123")
        .protocol("http")
        .host(server.host())
        .port(server.port())
}

#[test]
fn blocking_post_sends_json_body_and_injected_headers() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/transmissions")
            .header("authorization", "abc123")
            .header("content-type", "application/json")
            .header("user-agent", concat!("rust-sparkpost/", env!("CARGO_PKG_VERSION")))
            .json_body(json!({"x": 1}));
        then.status(200)
            .json_body(json!({"results": {"id": "42"}}));
    });

    let client = Client::new(server_options(&server).use_async(false)).unwrap();
    let outcome = client
        .request("POST", "transmissions", Some(&json!({"x": 1})), None)
        .unwrap();

    mock.assert();
    let Outcome::Response(response) = outcome else {
        panic!("blocking dispatch must return a completed response");
    };
    assert_eq!(response.status, 200);
    assert_eq!(response.body.unwrap()["results"]["id"], "42");
}

#[test]
fn blocking_get_puts_params_in_the_query_and_sends_an_empty_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/transmissions")
            .query_param("ids", "a,b")
            .body("{}");
        then.status(200).json_body(json!({"results": []}));
    });

    let client = Client::new(server_options(&server).use_async(false)).unwrap();
    let outcome = client
        .request("GET", "transmissions", Some(&json!({"ids": ["a", "b"]})), None)
        .unwrap();

    mock.assert();
    assert!(matches!(outcome, Outcome::Response(_)));
}

#[test]
fn deferred_dispatch_resolves_to_the_wrapped_response() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/transmissions")
            .query_param("ids", "a,b");
        then.status(200).json_body(json!({"results": []}));
    });

    let client = Client::new(server_options(&server)).unwrap();
    let outcome = client
        .request("GET", "transmissions", Some(&json!({"ids": ["a", "b"]})), None)
        .unwrap();
    let Outcome::Deferred(deferred) = outcome else {
        panic!("asynchronous dispatch must return a deferred handle");
    };

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let response = runtime.block_on(deferred).unwrap();

    mock.assert();
    assert_eq!(response.status, 200);
    assert_eq!(response.body.unwrap()["results"], json!([]));
}

#[test]
fn deferred_rejection_keeps_the_transport_error_shape() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/transmissions");
        then.status(500).body("upstream exploded");
    });

    let client = Client::new(server_options(&server)).unwrap();
    let Outcome::Deferred(deferred) = client
        .request("POST", "transmissions", Some(&json!({"x": 1})), None)
        .unwrap()
    else {
        panic!("asynchronous dispatch must return a deferred handle");
    };

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let error = runtime.block_on(deferred).unwrap_err();
    // Passed through unchanged, not re-wrapped as a client error.
    assert!(matches!(error, TransportError::Http(_)));
}

#[test]
fn blocking_transport_reports_no_async_capability() {
    let transport = BlockingTransport::new().unwrap();
    assert!(transport.async_transport().is_none());

    let client = Client::with_transport("abc123", Box::new(transport)).unwrap();
    let error = client.request("GET", "transmissions", None, None).unwrap_err();
    assert!(matches!(error, Error::Capability));
}

#[test]
fn blocking_transport_performs_blocking_sends() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/transmissions");
        then.status(200).json_body(json!({"results": []}));
    });

    let options = server_options(&server).use_async(false);
    let transport = BlockingTransport::new().unwrap();
    let client = Client::with_transport(options, Box::new(transport)).unwrap();

    let outcome = client.request("GET", "transmissions", None, None).unwrap();

    mock.assert();
    assert!(matches!(outcome, Outcome::Response(_)));
}

/// Counts blocking sends; reports no async capability.
struct SyncOnlyTransport {
    sends: Arc<AtomicUsize>,
}

impl Transport for SyncOnlyTransport {
    fn send(&self, _: &OutgoingRequest) -> Result<TransportResponse, TransportError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        Ok(TransportResponse {
            status: 200,
            headers: Default::default(),
            body: "{}".to_string(),
        })
    }
}

#[test]
fn async_dispatch_over_a_sync_only_transport_fails_without_sending() {
    let sends = Arc::new(AtomicUsize::new(0));
    let transport = SyncOnlyTransport {
        sends: Arc::clone(&sends),
    };
    let client = Client::with_transport("abc123", Box::new(transport)).unwrap();

    let error = client
        .request("POST", "transmissions", Some(&json!({"x": 1})), None)
        .unwrap_err();

    assert!(matches!(error, Error::Capability));
    assert_eq!(sends.load(Ordering::SeqCst), 0);
}

#[test]
fn switching_to_blocking_dispatch_uses_the_same_transport() {
    let sends = Arc::new(AtomicUsize::new(0));
    let transport = SyncOnlyTransport {
        sends: Arc::clone(&sends),
    };
    let mut client = Client::with_transport("abc123", Box::new(transport)).unwrap();
    client
        .set_options(OptionsMap::new().use_async(false))
        .unwrap();

    let outcome = client.request("GET", "transmissions", None, None).unwrap();

    assert!(matches!(outcome, Outcome::Response(_)));
    assert_eq!(sends.load(Ordering::SeqCst), 1);
}

/// Always fails, so the sync path's error wrapping can be observed.
struct FailingTransport;

impl Transport for FailingTransport {
    fn send(&self, _: &OutgoingRequest) -> Result<TransportResponse, TransportError> {
        Err(TransportError::InvalidRequest("boom".to_string()))
    }
}

#[test]
fn blocking_send_failure_surfaces_as_request_error_with_cause() {
    let options = OptionsMap::new().key("abc123").use_async(false);
    let client = Client::with_transport(options, Box::new(FailingTransport)).unwrap();

    let error = client
        .request("POST", "transmissions", Some(&json!({"x": 1})), None)
        .unwrap_err();

    let Error::Request(cause) = &error else {
        panic!("expected a request error, got {error:?}");
    };
    assert!(cause.to_string().contains("boom"));
    assert!(std::error::Error::source(&error).is_some());
}
