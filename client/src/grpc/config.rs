use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the metric manager channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcClientConfig {
    /// e.g. `http://127.0.0.1:8082`
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub keepalive_interval: Duration,
    pub keepalive_timeout: Duration,
    /// Applied to calls whose context carries no deadline of its own.
    pub call_timeout: Option<Duration>,
}

impl GrpcClientConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "http://127.0.0.1:8082";
    const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(120); // 2 minutes
    const KEEPALIVE_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }
}

impl Default for GrpcClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Self::CONNECT_TIMEOUT,
            keepalive_interval: Self::KEEPALIVE_INTERVAL,
            keepalive_timeout: Self::KEEPALIVE_TIMEOUT,
            call_timeout: None,
        }
    }
}
