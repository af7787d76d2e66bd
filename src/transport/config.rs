//! HTTP transport configuration.

use serde::Deserialize;

use crate::error::{GatewayError, Result};

/// Timeouts and pooling for the HTTP transport.
///
/// All timeouts are bounded: a gateway that stops answering must surface as
/// a transport error, never hang the caller.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    /// Total per-request timeout in seconds (connect + transfer).
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Maximum idle pooled connections per host.
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 10, connect_timeout_secs: 5, pool_max_idle_per_host: 10 }
    }
}

impl HttpConfig {
    /// Checks the timeouts are within sane bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if a timeout is zero or
    /// unreasonably large (total > 300 s, connect > 60 s).
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(GatewayError::Configuration(format!(
                "timeout_secs must be 1-300, got {}",
                self.timeout_secs
            )));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(GatewayError::Configuration(format!(
                "connect_timeout_secs must be 1-60, got {}",
                self.connect_timeout_secs
            )));
        }
        Ok(())
    }
}
