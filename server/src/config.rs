use std::net::SocketAddr;
use std::time::Duration;

use remote_action_core::config::{BackendConfig, DEFAULT_BASE_URL, DEFAULT_SESSION_COOKIE_NAME};
use url::Url;

use crate::error::ServiceError;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:50053";
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub backend: BackendConfig,
    /// Upper bound on one outbound call, connect through body read.
    pub backend_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 50053)),
            backend: BackendConfig::default(),
            backend_timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys take the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServiceError> {
        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ServiceError::Configuration(format!("LISTEN_ADDR: {e}")))?;

        let base_url = lookup("BACKEND_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = Url::parse(&base_url)
            .map_err(|e| ServiceError::Configuration(format!("BACKEND_BASE_URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ServiceError::Configuration(format!(
                "BACKEND_BASE_URL: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let timeout_secs = match lookup("BACKEND_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| ServiceError::Configuration(format!("BACKEND_TIMEOUT_SECS: {e}")))?,
            None => DEFAULT_BACKEND_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ServiceError::Configuration(
                "BACKEND_TIMEOUT_SECS must be positive".to_string(),
            ));
        }

        let session_cookie_name = lookup("SESSION_COOKIE_NAME")
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string());

        Ok(Self {
            listen_addr,
            backend: BackendConfig {
                session_cookie_name,
                ..BackendConfig::with_base_url(&base_url)
            },
            backend_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
