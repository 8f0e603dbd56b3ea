//! Client configuration: defaults, the string-or-mapping options input,
//! and the merge rules.

const DEFAULT_HOST: &str = "api.sparkpost.com";
const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_PORT: u16 = 443;
const DEFAULT_VERSION: &str = "v1";

/// Merged client configuration.
///
/// Created from defaults plus caller overrides via
/// [`Client::set_options`](crate::Client::set_options); read-only
/// thereafter except through another `set_options` call.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub protocol: String,
    /// `None` omits the port segment from built URLs entirely.
    pub port: Option<u16>,
    /// API key, sent raw in the `Authorization` header.
    pub key: String,
    pub version: String,
    /// Selects the dispatch path on every request.
    pub use_async: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            port: Some(DEFAULT_PORT),
            key: String::new(),
            version: DEFAULT_VERSION.to_string(),
            use_async: true,
        }
    }
}

impl Config {
    /// Overwrite the fields named by `options`, leaving the rest untouched.
    pub(crate) fn apply(&mut self, options: Options) {
        match options {
            Options::ApiKey(key) => self.key = key,
            Options::Map(map) => {
                if let Some(host) = map.host {
                    self.host = host;
                }
                if let Some(protocol) = map.protocol {
                    self.protocol = protocol;
                }
                if let Some(port) = map.port {
                    // A zero port disables the port segment.
                    self.port = if port == 0 { None } else { Some(port) };
                }
                if let Some(key) = map.key {
                    self.key = key;
                }
                if let Some(version) = map.version {
                    self.version = version;
                }
                if let Some(use_async) = map.use_async {
                    self.use_async = use_async;
                }
            }
        }
    }

    /// A key is usable once it contains at least one non-whitespace character.
    pub(crate) fn has_key(&self) -> bool {
        self.key.chars().any(|c| !c.is_whitespace())
    }
}

/// Options input accepted by [`Client::new`](crate::Client::new) and
/// [`Client::set_options`](crate::Client::set_options): either a bare API
/// key or a partial mapping over the recognized option fields.
#[derive(Debug, Clone)]
pub enum Options {
    ApiKey(String),
    Map(OptionsMap),
}

impl From<&str> for Options {
    fn from(key: &str) -> Self {
        Options::ApiKey(key.to_string())
    }
}

impl From<String> for Options {
    fn from(key: String) -> Self {
        Options::ApiKey(key)
    }
}

impl From<OptionsMap> for Options {
    fn from(map: OptionsMap) -> Self {
        Options::Map(map)
    }
}

/// Partial options mapping. Only the fields set here overwrite the
/// current configuration; everything else is left as-is.
///
/// ```
/// use sparkpost_client::OptionsMap;
///
/// let options = OptionsMap::new()
///     .key("my-api-key")
///     .host("api.eu.sparkpost.com")
///     .use_async(false);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionsMap {
    host: Option<String>,
    protocol: Option<String>,
    port: Option<u16>,
    key: Option<String>,
    version: Option<String>,
    use_async: Option<bool>,
}

impl OptionsMap {
    /// Create an empty mapping that overrides nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the URL scheme, e.g. `"https"`.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Set the port. Pass `0` to omit the port segment from built URLs.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the API key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the API version path segment, e.g. `"v1"`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Choose asynchronous (`true`) or blocking (`false`) dispatch.
    pub fn use_async(mut self, use_async: bool) -> Self {
        self.use_async = Some(use_async);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = Config::default();
        assert_eq!(config.host, "api.sparkpost.com");
        assert_eq!(config.protocol, "https");
        assert_eq!(config.port, Some(443));
        assert_eq!(config.version, "v1");
        assert!(config.key.is_empty());
        assert!(config.use_async);
    }

    #[test]
    fn bare_string_sets_only_the_key() {
        let mut config = Config::default();
        config.apply("abc123".into());
        assert_eq!(config.key, "abc123");
        assert_eq!(config.host, "api.sparkpost.com");
    }

    #[test]
    fn partial_map_leaves_unnamed_fields_alone() {
        let mut config = Config::default();
        config.apply("abc123".into());
        config.apply(OptionsMap::new().host("example.com").into());
        assert_eq!(config.key, "abc123");
        assert_eq!(config.host, "example.com");
        assert_eq!(config.port, Some(443));
    }

    #[test]
    fn zero_port_disables_the_port_segment() {
        let mut config = Config::default();
        config.apply(OptionsMap::new().port(0).into());
        assert_eq!(config.port, None);
    }

    #[test]
    fn whitespace_key_is_not_usable() {
        let mut config = Config::default();
        config.apply("   \t".into());
        assert!(!config.has_key());
        config.apply("k".into());
        assert!(config.has_key());
    }
}
