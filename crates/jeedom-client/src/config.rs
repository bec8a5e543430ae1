//! Client configuration
//!
//! [`ClientConfig`] is the resolved configuration a [`JeedomClient`](crate::JeedomClient)
//! is built from. [`ConfigOverrides`] is the partial form callers and config
//! files supply; [`ClientConfig::merge`] overlays it onto a base configuration.
//!
//! ```
//! use jeedom_client::{ClientConfig, ConfigOverrides};
//!
//! let config = ClientConfig::default().merge(
//!     ConfigOverrides::new()
//!         .base_url("http://192.168.1.10")
//!         .api_key("secret")
//!         .header("X-Trace", "1"),
//! );
//!
//! assert_eq!(config.base_url.as_deref(), Some("http://192.168.1.10"));
//! assert_eq!(config.request_options.headers["Accept"], "*/*");
//! assert_eq!(config.request_options.headers["X-Trace"], "1");
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `User-Agent` sent unless overridden
pub const DEFAULT_USER_AGENT: &str = concat!("jeedom-client/", env!("CARGO_PKG_VERSION"));

/// Default headers attached to every request
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Accept".to_string(), "*/*".to_string()),
        ("Connection".to_string(), "close".to_string()),
        ("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string()),
    ])
}

/// Transport-level options handed to the HTTP client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    /// Default headers for every request
    pub headers: BTreeMap<String, String>,
    /// Total request timeout in seconds (transport default when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Connection timeout in seconds (transport default when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: default_headers(),
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

impl RequestOptions {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

/// Resolved client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server root, e.g. `http://192.168.1.10`
    pub base_url: Option<String>,
    /// API key sent as the `apikey` query parameter
    pub api_key: Option<String>,
    /// Transport options
    pub request_options: RequestOptions,
    /// Unrecognised keys, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClientConfig {
    /// Overlay `overrides` onto this configuration.
    ///
    /// Scalar fields are replaced only when present in `overrides`. Headers
    /// and extra keys merge key by key, with the override winning on
    /// collision; header names collide regardless of letter case.
    #[must_use]
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(base_url) = overrides.base_url {
            self.base_url = Some(base_url);
        }
        if let Some(api_key) = overrides.api_key {
            self.api_key = Some(api_key);
        }

        let options = overrides.request_options;
        for (name, value) in options.headers {
            // Header names are case-insensitive on the wire
            self.request_options
                .headers
                .retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
            self.request_options.headers.insert(name, value);
        }
        if options.timeout_secs.is_some() {
            self.request_options.timeout_secs = options.timeout_secs;
        }
        if options.connect_timeout_secs.is_some() {
            self.request_options.connect_timeout_secs = options.connect_timeout_secs;
        }

        self.extra.extend(overrides.extra);
        self
    }
}

/// Partial request options; see [`ConfigOverrides`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptionsOverrides {
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
}

/// Caller-supplied partial configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub request_options: RequestOptionsOverrides,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_options
            .headers
            .insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.request_options.timeout_secs = Some(secs);
        self
    }

    #[must_use]
    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.request_options.connect_timeout_secs = Some(secs);
        self
    }

    /// Add an unrecognised key, carried through to [`ClientConfig::extra`]
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
