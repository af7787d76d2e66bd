//! Production HTTP transport over reqwest.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::{
    error::{GatewayError, Result},
    transport::{HttpConfig, Transport, TransportRequest, TransportResponse},
};

/// [`Transport`] implementation backed by a pooled [`reqwest::Client`].
///
/// The client enforces the configured total and connect timeouts; dropping
/// the future returned by [`post`](Transport::post) cancels the request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport from validated HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the settings are out of
    /// bounds or the TLS backend fails to initialize.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|e| {
                GatewayError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn post<'a>(&'a self, request: &'a TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .post(&request.url)
            .header("Content-Type", "application/json")
            .body(request.body.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(status, "gateway returned non-success status");
            return Err(GatewayError::GatewayStatus(status));
        }

        let body = response.text().await?;
        debug!(status, body_len = body.len(), "gateway response received");
        Ok(TransportResponse { status, body })
    }
}
