//! Service configuration.
//!
//! Values come from the environment and can be overridden with the builder
//! methods (the CLI applies its `--host`/`--port` flags this way).
//!
//! # Example
//!
//! ```ignore
//! use sseconv::config::ServerConfig;
//!
//! let config = ServerConfig::from_env()
//!     .with_port(8080)
//!     .with_host("127.0.0.1");
//! ```

use std::net::{IpAddr, SocketAddr};

/// Default listening port of the HTTP service.
pub const DEFAULT_PORT: u16 = 3001;
/// Default bind address of the HTTP service.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default maximum accepted request body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "sseconv=info";

/// Configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub host: String,
    /// Port to bind (default: 3001, `PORT` env var)
    pub port: u16,
    /// Request body limit in bytes (`SSECONV_MAX_BODY_BYTES` env var)
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `HOST`, `PORT` and `SSECONV_MAX_BODY_BYTES`. Unset or unparsable
    /// values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup("PORT") {
            match port.trim().parse() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }

        if let Some(limit) = lookup("SSECONV_MAX_BODY_BYTES") {
            match limit.trim().parse() {
                Ok(limit) => config.max_body_bytes = limit,
                Err(_) => tracing::warn!("Ignoring invalid SSECONV_MAX_BODY_BYTES value: {}", limit),
            }
        }

        config
    }

    /// Set the bind host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the request body limit.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Resolve the socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
