//! SparkPost request builder and dispatcher.

use crate::config::{Config, Options};
use crate::models::{ApiResponse, Deferred, Outcome, OutgoingRequest};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use std::fmt;

/// Client for the SparkPost REST API.
///
/// Holds the merged configuration and an injected [`Transport`], and turns
/// `(method, path, payload, headers)` tuples into dispatched HTTP requests.
/// The configured `use_async` flag is re-read on every call, so switching
/// it through [`Client::set_options`] affects subsequent requests only.
pub struct Client {
    config: Config,
    configured: bool,
    transport: Box<dyn Transport>,
}

impl Client {
    /// Create a client over the default reqwest-backed transport, which
    /// supports both dispatch paths.
    ///
    /// `options` is either a bare API key or an
    /// [`OptionsMap`](crate::OptionsMap).
    ///
    /// # Examples
    /// ```no_run
    /// # use sparkpost_client::Client;
    /// # fn main() -> Result<(), sparkpost_client::Error> {
    /// let client = Client::new("my-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(options: impl Into<Options>) -> Result<Self> {
        let transport = HttpTransport::new().map_err(Error::Request)?;
        Self::with_transport(options, Box::new(transport))
    }

    /// Create a client over a caller-supplied transport.
    ///
    /// The transport performs all network I/O; the client never does any
    /// of its own.
    pub fn with_transport(
        options: impl Into<Options>,
        transport: Box<dyn Transport>,
    ) -> Result<Self> {
        let mut client = Self {
            config: Config::default(),
            configured: false,
            transport,
        };
        client.set_options(options)?;
        Ok(client)
    }

    /// Merge `options` into the current configuration.
    ///
    /// The first successful call must establish an API key with at least
    /// one non-whitespace character, or this fails with
    /// [`Error::Configuration`] and leaves the client unchanged. Later
    /// calls skip the key check, and fields they do not name keep their
    /// current values rather than resetting to defaults.
    pub fn set_options(&mut self, options: impl Into<Options>) -> Result<()> {
        let mut merged = self.config.clone();
        merged.apply(options.into());
        if !self.configured && !merged.has_key() {
            return Err(Error::Configuration);
        }
        self.config = merged;
        self.configured = true;
        Ok(())
    }

    /// Read access to the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the target URL for `path`, rendering `params` as a query
    /// string.
    ///
    /// Sequence values are comma-joined into a single scalar. Values are
    /// interpolated literally with no percent-encoding, so values
    /// containing `&`, `=`, or whitespace will corrupt the URL.
    pub fn url(&self, path: &str, params: Option<&Value>) -> String {
        let port = match self.config.port {
            Some(port) => format!(":{port}"),
            None => String::new(),
        };

        let query = params
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .map(|(key, value)| format!("{key}={}", Self::query_value(value)))
                    .collect::<Vec<_>>()
                    .join("&")
            })
            .unwrap_or_default();

        let mut url = format!(
            "{}://{}{}/api/{}/{}",
            self.config.protocol, self.config.host, port, self.config.version, path
        );
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    /// Render one query value; sequences collapse to comma-joined scalars.
    fn query_value(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(Self::query_value)
                .collect::<Vec<_>>()
                .join(","),
            other => other.to_string(),
        }
    }

    /// Build the header map for a request.
    ///
    /// Caller headers are kept, but `Authorization` (the raw API key,
    /// no scheme prefix), `Content-Type`, and `User-Agent` are always set
    /// by the client and win on collision.
    pub fn http_headers(&self, headers: Option<&HeaderMap>) -> HeaderMap {
        let mut merged = headers.cloned().unwrap_or_default();
        // A caller Authorization must never survive, even when the key
        // cannot be represented as a header value.
        merged.remove(AUTHORIZATION);
        if let Ok(value) = HeaderValue::from_str(&self.config.key) {
            merged.insert(AUTHORIZATION, value);
        }
        merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        merged.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        merged
    }

    /// Assemble a transport-ready request.
    ///
    /// The method is trimmed and upper-cased. `GET` routes the payload
    /// into the query string; every other method serializes it as the
    /// JSON body and uses no query parameters. A JSON body is attached
    /// even for `GET`, where it is the serialization of an empty mapping.
    pub fn build_request(
        &self,
        method: &str,
        uri: &str,
        payload: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> OutgoingRequest {
        let method = method.trim().to_uppercase();
        let empty = || Value::Object(serde_json::Map::new());
        let (params, body) = if method == "GET" {
            (payload, empty())
        } else {
            (None, payload.cloned().unwrap_or_else(empty))
        };

        OutgoingRequest {
            url: self.url(uri, params),
            headers: self.http_headers(headers),
            body: body.to_string(),
            method,
        }
    }

    /// Send a request, choosing the dispatch path from the configured
    /// `use_async` flag.
    ///
    /// With `use_async` set, the transport is probed for async capability
    /// before anything is built or sent; a sync-only transport fails with
    /// [`Error::Capability`]. Otherwise the call returns
    /// [`Outcome::Deferred`] immediately, and the handle resolves or
    /// rejects per the transport's own contract.
    ///
    /// With `use_async` unset, the call blocks on the transport's send and
    /// returns [`Outcome::Response`]; any transport failure comes back as
    /// [`Error::Request`] with the original cause attached.
    ///
    /// # Examples
    /// ```no_run
    /// # use sparkpost_client::{Client, Outcome};
    /// # use serde_json::json;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::new("my-api-key")?;
    /// let payload = json!({ "content": { "template_id": "welcome" } });
    /// match client.request("POST", "transmissions", Some(&payload), None)? {
    ///     Outcome::Deferred(deferred) => {
    ///         let response = deferred.await?;
    ///         println!("{}", response.status);
    ///     }
    ///     Outcome::Response(response) => println!("{}", response.status),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn request(
        &self,
        method: &str,
        uri: &str,
        payload: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<Outcome> {
        if self.config.use_async {
            // Probe before building anything: a sync-only transport must
            // fail without any I/O.
            let Some(transport) = self.transport.async_transport() else {
                return Err(Error::Capability);
            };
            let request = self.build_request(method, uri, payload, headers);
            Ok(Outcome::Deferred(Deferred::new(
                transport.send_deferred(&request),
            )))
        } else {
            let request = self.build_request(method, uri, payload, headers);
            let raw = self.transport.send(&request).map_err(Error::Request)?;
            Ok(Outcome::Response(ApiResponse::from_raw(raw)))
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("configured", &self.configured)
            .finish_non_exhaustive()
    }
}

const USER_AGENT_VALUE: &str = concat!("rust-sparkpost/", env!("CARGO_PKG_VERSION"));
