//! Error types for the gateway client.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`]. Gateway-call failures (`Http`, `GatewayStatus`,
//! `AuthenticationFailed`, `ResponseParse`) are recovered at the client
//! boundary into an absent result plus a diagnostic log, so callers of
//! [`AuthClient::login`](crate::AuthClient::login) and
//! [`TransactionStatusClient::status`](crate::TransactionStatusClient::status)
//! never see them as errors. Signature mismatch is a boolean outcome of the
//! verifiers, never an error variant.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur in the gateway client.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required credential or configuration value is missing or malformed.
    ///
    /// Raised at construction/validation time; fatal, fails fast.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// HTTP request failed at the transport level.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refused, DNS or TLS
    /// failures. Recovered into an absent result by the clients.
    #[error("HTTP transport failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status.
    #[error("gateway returned status {0}")]
    GatewayStatus(u16),

    /// Login succeeded at the transport level but no usable access token was
    /// present in the response.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The gateway returned a body that could not be parsed as JSON.
    #[error("malformed gateway response: {0}")]
    ResponseParse(#[from] serde_json::Error),

    /// The caller supplied an amount that cannot appear in a payment request.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
