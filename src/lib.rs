//! # SparkPost Client
//! Rust wrapper around the SparkPost REST API, assembling authenticated HTTP requests from a `(method, path, payload, headers)` tuple and dispatching them synchronously or asynchronously through an injectable [`Transport`] via [`Client`].
//!
//! ## Audience and uses
//! For Rust developers integrating transactional email without hand-rolling request plumbing: configure once with an API key or an [`OptionsMap`], then call [`Client::request`] with the endpoint path and a JSON payload. Resource-specific helpers can be layered on top; this crate is the request core they call into.
//!
//! ## Dispatch model
//! The `use_async` option (default: on) selects the path per call. Asynchronous dispatch returns an [`Outcome::Deferred`] handle to await inside a Tokio (v1) runtime; blocking dispatch returns [`Outcome::Response`] directly and must not run inside an async context. Both paths go through `reqwest`.
//!
//! ## Out of scope
//! No retries, rate limiting, or request timeouts at this layer, and no authentication beyond the static key sent in the `Authorization` header. Those belong to the transport or the caller.
//!
//! ## Errors
//! Setup without a usable API key fails with [`Error::Configuration`]; asynchronous dispatch over a sync-only transport fails with [`Error::Capability`] before any network activity; blocking-send failures surface as [`Error::Request`] with the transport's error as the retrievable cause. Deferred handles reject with the raw [`TransportError`] instead. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use serde_json::json;
//! use sparkpost_client::{Client, Outcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("my-api-key")?;
//!     let payload = json!({
//!         "recipients": [{ "address": "to@example.com" }],
//!         "content": { "template_id": "welcome" },
//!     });
//!
//!     if let Outcome::Deferred(deferred) =
//!         client.request("POST", "transmissions", Some(&payload), None)?
//!     {
//!         let response = deferred.await?;
//!         println!("status: {}", response.status);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod models;
mod transport;

pub use client::Client;
pub use config::{Config, Options, OptionsMap};
pub use error::Error;
pub use models::{ApiResponse, Deferred, Outcome, OutgoingRequest};
pub use transport::{
    AsyncTransport, BlockingTransport, DeferredSend, HttpTransport, Transport, TransportError,
    TransportResponse,
};

/// Result type alias for SparkPost client operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
