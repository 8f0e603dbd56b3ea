//! Transport capability contract and the reqwest-backed implementations.

use crate::models::OutgoingRequest;
use reqwest::Method;
use reqwest::header::HeaderMap;
use std::future::Future;
use std::pin::Pin;

/// Raw response handed back by a transport, before the client wraps it.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

/// Failures raised inside a transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network failure, timeout, or a non-2xx status.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The built request cannot be represented by the underlying client.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Boxed future returned by async-capable transports.
pub type DeferredSend =
    Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send>>;

/// Blocking transport contract.
///
/// Every transport must support [`send`](Transport::send); asynchronous
/// capability is probed through [`async_transport`](Transport::async_transport)
/// rather than assumed.
pub trait Transport {
    /// Perform the request, blocking until the remote responds or fails.
    ///
    /// Non-2xx statuses are failures at this layer.
    fn send(&self, request: &OutgoingRequest) -> Result<TransportResponse, TransportError>;

    /// Capability probe: `Some` when this transport can also send without
    /// blocking. Defaults to `None`.
    fn async_transport(&self) -> Option<&dyn AsyncTransport> {
        None
    }
}

/// Non-blocking send capability.
pub trait AsyncTransport {
    /// Start the request and return a handle to its eventual outcome.
    fn send_deferred(&self, request: &OutgoingRequest) -> DeferredSend;
}

fn parse_method(request: &OutgoingRequest) -> Result<Method, TransportError> {
    Method::from_bytes(request.method.as_bytes()).map_err(|_| {
        TransportError::InvalidRequest(format!("unsupported http method: {}", request.method))
    })
}

fn send_blocking(
    http: &reqwest::blocking::Client,
    request: &OutgoingRequest,
) -> Result<TransportResponse, TransportError> {
    let response = http
        .request(parse_method(request)?, request.url.as_str())
        .headers(request.headers.clone())
        .body(request.body.clone())
        .send()?
        .error_for_status()?;

    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.text()?;
    Ok(TransportResponse {
        status,
        headers,
        body,
    })
}

/// Default transport: an async `reqwest::Client` plus a blocking client,
/// so both dispatch paths work out of the box.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    blocking: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build both underlying reqwest clients with their defaults.
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            blocking: reqwest::blocking::Client::builder().build()?,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &OutgoingRequest) -> Result<TransportResponse, TransportError> {
        send_blocking(&self.blocking, request)
    }

    fn async_transport(&self) -> Option<&dyn AsyncTransport> {
        Some(self)
    }
}

impl AsyncTransport for HttpTransport {
    fn send_deferred(&self, request: &OutgoingRequest) -> DeferredSend {
        let client = self.client.clone();
        let request = request.clone();
        Box::pin(async move {
            let response = client
                .request(parse_method(&request)?, request.url.as_str())
                .headers(request.headers.clone())
                .body(request.body.clone())
                .send()
                .await?
                .error_for_status()?;

            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let body = response.text().await?;
            Ok(TransportResponse {
                status,
                headers,
                body,
            })
        })
    }
}

/// Synchronous-only transport.
///
/// Its capability probe reports no async support, so asynchronous dispatch
/// against it fails before any network activity.
#[derive(Debug)]
pub struct BlockingTransport {
    http: reqwest::blocking::Client,
}

impl BlockingTransport {
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self {
            http: reqwest::blocking::Client::builder().build()?,
        })
    }
}

impl Transport for BlockingTransport {
    fn send(&self, request: &OutgoingRequest) -> Result<TransportResponse, TransportError> {
        send_blocking(&self.http, request)
    }
}
