//! Jeedom HTTP client implementation

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::{ClientConfig, ConfigOverrides};
use crate::error::{JeedomClientError, Result};
use crate::types::{build_query, RequestType, ScenarioAction, API_PATH};

/// Resolve the control endpoint for a server root.
///
/// A single trailing `/` on `base_url` is dropped; any path prefix is kept.
pub fn resolve_endpoint(base_url: &str) -> Result<Url> {
    let root = base_url.strip_suffix('/').unwrap_or(base_url);
    Ok(Url::parse(&format!("{root}{API_PATH}"))?)
}

/// Jeedom HTTP API client
///
/// Every method issues exactly one GET against `<base_url>/core/api/jeeApi.php`.
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct JeedomClient {
    client: Client,
    config: Arc<ClientConfig>,
    endpoint: Option<Url>,
}

impl JeedomClient {
    /// Create a client for `base_url` authenticating with `api_key`
    ///
    /// # Arguments
    /// * `base_url` - Server root (e.g., "http://192.168.1.10")
    /// * `api_key` - API key from the Jeedom configuration page
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::from_overrides(ConfigOverrides::new().base_url(base_url).api_key(api_key))
    }

    /// Create a client from overrides applied on top of the defaults
    pub fn from_overrides(overrides: ConfigOverrides) -> Result<Self> {
        Self::with_config(ClientConfig::default().merge(overrides))
    }

    /// Create a client from a fully resolved configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let headers = build_headers(&config)?;

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_options.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.request_options.connect_timeout() {
            builder = builder.connect_timeout(connect_timeout);
        }
        let client = builder.build()?;

        let endpoint = config
            .base_url
            .as_deref()
            .map(resolve_endpoint)
            .transpose()?;

        Ok(Self {
            client,
            config: Arc::new(config),
            endpoint,
        })
    }

    /// Get the configuration this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the resolved control endpoint
    pub fn endpoint(&self) -> Result<&Url> {
        self.endpoint.as_ref().ok_or(JeedomClientError::MissingBaseUrl)
    }

    /// Get a reference to the underlying HTTP client.
    ///
    /// Requests sent through it carry the configured default headers.
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    // =========================================================================
    // Actions (raw text responses)
    // =========================================================================

    /// Start, stop, enable or disable a scenario
    ///
    /// `tags` (for example `"foo=1 bar=2"`) is only meaningful with
    /// [`ScenarioAction::Start`] and is omitted from the query when `None`.
    #[instrument(skip(self))]
    pub async fn scenario(
        &self,
        id: u64,
        action: ScenarioAction,
        tags: Option<&str>,
    ) -> Result<String> {
        let mut params = vec![("id", id.to_string()), ("action", action.to_string())];
        if let Some(tags) = tags {
            params.push(("tags", tags.to_string()));
        }
        self.request(RequestType::Scenario.as_str(), &params).await
    }

    /// Execute a command and return its result
    #[instrument(skip(self))]
    pub async fn command(&self, id: u64) -> Result<String> {
        self.request(RequestType::Cmd.as_str(), &[("id", id.to_string())])
            .await
    }

    /// Push a message to the message center
    #[instrument(skip(self))]
    pub async fn message(&self, category: &str, message: &str) -> Result<String> {
        let params = [
            ("category", category.to_string()),
            ("message", message.to_string()),
        ];
        self.request(RequestType::Message.as_str(), &params).await
    }

    // =========================================================================
    // Reads (JSON responses)
    // =========================================================================

    /// List all objects
    #[instrument(skip(self))]
    pub async fn object(&self) -> Result<Value> {
        self.request_json(RequestType::Object.as_str(), &[]).await
    }

    /// List the equipment of an object
    #[instrument(skip(self))]
    pub async fn equipment(&self, object_id: u64) -> Result<Value> {
        self.request_json(
            RequestType::EqLogic.as_str(),
            &[("object_id", object_id.to_string())],
        )
        .await
    }

    /// List the commands of an equipment
    #[instrument(skip(self))]
    pub async fn equipment_commands(&self, equipment_id: u64) -> Result<Value> {
        self.request_json(
            RequestType::Command.as_str(),
            &[("eqLogic_id", equipment_id.to_string())],
        )
        .await
    }

    /// Snapshot of every object with its equipment and commands
    #[instrument(skip(self))]
    pub async fn full_data(&self) -> Result<Value> {
        self.request_json(RequestType::FullData.as_str(), &[]).await
    }

    // =========================================================================
    // Request execution
    // =========================================================================

    /// Issue a GET for `kind` and return the raw body.
    ///
    /// The query is `apikey` and `type` followed by `params`; a param named
    /// `apikey` or `type` replaces the fixed value. Any status outside
    /// 200..=299 fails with [`JeedomClientError::HttpStatus`] and the body is
    /// discarded.
    #[instrument(skip(self, params))]
    pub async fn request(&self, kind: &str, params: &[(&str, String)]) -> Result<String> {
        let endpoint = self.endpoint()?;
        let query = build_query(self.config.api_key.as_deref(), kind, params);
        debug!("GET {} (type={}, {} params)", endpoint, kind, params.len());

        let response = self
            .client
            .get(endpoint.clone())
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Jeedom returned HTTP {} for type={}", status, kind);
            return Err(JeedomClientError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status"),
            ));
        }

        let body = response.text().await?;
        debug!("Received {} bytes for type={}", body.len(), kind);
        Ok(body)
    }

    /// Like [`request`](Self::request), decoding the body as JSON.
    ///
    /// An empty body is a valid answer and yields `Value::String("")`.
    #[instrument(skip(self, params))]
    pub async fn request_json(&self, kind: &str, params: &[(&str, String)]) -> Result<Value> {
        let body = self.request(kind, params).await?;
        parse_json_body(body)
    }
}

/// Decode a JSON endpoint body, treating an empty body as the empty string
fn parse_json_body(body: String) -> Result<Value> {
    if body.is_empty() {
        return Ok(Value::String(body));
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(source) => Err(JeedomClientError::ResponseFormat { body, source }),
    }
}

fn build_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.request_options.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| JeedomClientError::InvalidHeader(format!("{}: {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| JeedomClientError::InvalidHeader(format!("{}: {}", name, e)))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
