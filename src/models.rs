//! Wire-facing data shapes: the outgoing request, the uniform response
//! wrapper, and the deferred handle for asynchronous sends.

use crate::transport::{DeferredSend, TransportError, TransportResponse};
use reqwest::header::HeaderMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A transport-ready HTTP request. Built fresh for every call, never reused.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    /// Upper-cased HTTP verb.
    pub method: String,
    pub url: String,
    pub headers: HeaderMap,
    /// JSON-encoded body; `{}` when there is nothing to send.
    pub body: String,
}

/// Uniform response wrapper returned by both dispatch paths.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Parsed body, when the raw body is valid JSON.
    pub body: Option<serde_json::Value>,
    pub raw_body: String,
}

impl ApiResponse {
    pub(crate) fn from_raw(raw: TransportResponse) -> Self {
        let body = serde_json::from_str(&raw.body).ok();
        Self {
            status: raw.status,
            headers: raw.headers,
            body,
            raw_body: raw.body,
        }
    }
}

/// Promise-like handle for an asynchronous send.
///
/// Resolves to the wrapped [`ApiResponse`]; transport failures are passed
/// through unchanged as [`TransportError`], never re-wrapped by the client.
pub struct Deferred {
    inner: DeferredSend,
}

impl Deferred {
    pub(crate) fn new(inner: DeferredSend) -> Self {
        Self { inner }
    }
}

impl Future for Deferred {
    type Output = Result<ApiResponse, TransportError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner
            .as_mut()
            .poll(cx)
            .map(|result| result.map(ApiResponse::from_raw))
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}

/// What one call to [`Client::request`](crate::Client::request) produces:
/// a completed response on the blocking path, or a [`Deferred`] to await
/// on the asynchronous path.
#[derive(Debug)]
pub enum Outcome {
    Response(ApiResponse),
    Deferred(Deferred),
}
