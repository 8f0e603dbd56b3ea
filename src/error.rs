//! SparkPost client error taxonomy.

use crate::transport::TransportError;

/// Errors surfaced by the client itself.
///
/// Asynchronous sends are the one exception to this taxonomy: their
/// failures are delivered through the deferred handle as a raw
/// [`TransportError`], preserving the transport's native failure shape.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No usable API key was present after merging options.
    #[error("you must provide an API key")]
    Configuration,

    /// Asynchronous dispatch was requested but the configured transport
    /// only supports blocking sends. Raised before any network activity.
    #[error(
        "the configured transport does not support asynchronous requests; \
         supply an async-capable transport or set `use_async` to false"
    )]
    Capability,

    /// A transport failure on the blocking path: a synchronous send that
    /// raised, or a default transport that could not be constructed. The
    /// original transport error is retrievable through
    /// [`std::error::Error::source`].
    #[error("request failed: {0}")]
    Request(#[source] TransportError),
}
