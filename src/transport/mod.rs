//! HTTP transport abstraction.
//!
//! The gateway clients talk to the network through the [`Transport`] trait
//! so tests can substitute an in-memory transport. The production
//! implementation is [`HttpTransport`]. Cancellation is by dropping the
//! returned future; no request survives its caller.

mod config;
mod http;

pub use config::HttpConfig;
pub use http::HttpTransport;

use crate::error::Result;

/// An outbound POST request: absolute URL, extra headers, JSON body.
///
/// `Content-Type: application/json` is implied; `headers` carries only the
/// request-specific entries (bearer token, `X-Auth-*` signing headers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl TransportRequest {
    /// A request with no extra headers.
    #[must_use]
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self { url: url.into(), headers: Vec::new(), body: body.into() }
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A gateway response with a 2xx status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends signed JSON requests to the gateway.
///
/// Implementations must resolve to [`GatewayError::GatewayStatus`] for
/// non-2xx responses so callers only ever see successful bodies.
///
/// [`GatewayError::GatewayStatus`]: crate::GatewayError::GatewayStatus
pub trait Transport: Send + Sync {
    /// POSTs `request` and returns the successful response.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] for transport failures (timeout, DNS,
    /// TLS, connection) and [`GatewayError::GatewayStatus`] for non-2xx
    /// responses.
    ///
    /// [`GatewayError::Http`]: crate::GatewayError::Http
    /// [`GatewayError::GatewayStatus`]: crate::GatewayError::GatewayStatus
    fn post<'a>(
        &'a self,
        request: &'a TransportRequest,
    ) -> impl std::future::Future<Output = Result<TransportResponse>> + Send + 'a;
}
