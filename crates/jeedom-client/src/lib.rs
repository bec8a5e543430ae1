//! Jeedom Client Library
//!
//! Provides a typed HTTP client for the Jeedom home-automation control API
//! (`/core/api/jeeApi.php`).
//!
//! # Example
//!
//! ```rust,no_run
//! use jeedom_client::{JeedomClient, ScenarioAction};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JeedomClient::new("http://192.168.1.10", "my-api-key")?;
//!
//!     // Actions return the server's raw text answer
//!     let state = client.command(42).await?;
//!     client.scenario(7, ScenarioAction::Start, Some("room=kitchen")).await?;
//!
//!     // Reads return decoded JSON
//!     let objects = client.object().await?;
//!     println!("{} -> {}", state, objects);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Default headers, timeouts and any forward-compatible keys are described by
//! [`ClientConfig`]; partial configuration is merged with
//! [`ClientConfig::merge`]:
//!
//! ```rust,no_run
//! use jeedom_client::{ConfigOverrides, JeedomClient};
//!
//! let client = JeedomClient::from_overrides(
//!     ConfigOverrides::new()
//!         .base_url("http://jeedom.local")
//!         .api_key("my-api-key")
//!         .header("User-Agent", "my-app/1.0")
//!         .timeout_secs(10),
//! )?;
//! # Ok::<(), jeedom_client::JeedomClientError>(())
//! ```
//!
//! # Testing
//!
//! The `testing` module provides a mock server for integration tests:
//!
//! ```rust,ignore
//! use jeedom_client::testing::MockJeedom;
//!
//! let server = MockJeedom::start().await?;
//! server.reply(200, r#"[{"id":"1","name":"Salon"}]"#);
//! let objects = server.client.object().await?;
//! ```

mod client;
pub mod config;
mod error;
pub mod testing;
mod types;

pub use client::{resolve_endpoint, JeedomClient};
pub use config::{ClientConfig, ConfigOverrides, RequestOptions, DEFAULT_USER_AGENT};
pub use error::{JeedomClientError, Result};
pub use types::*;
