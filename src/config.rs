//! Gateway credentials and configuration.
//!
//! [`GatewayConfig`] carries the merchant credentials and endpoint settings
//! the protocol needs. It is deserialize-only: the secret key and client
//! secret are held in memory for the lifetime of the client and never appear
//! in any outbound payload or `Debug` output.

use std::fmt;

use serde::Deserialize;
use url::Url;

use crate::{
    error::{GatewayError, Result},
    transport::HttpConfig,
};

/// Merchant credentials and gateway endpoint configuration.
///
/// Immutable after construction. Call [`validate`](Self::validate) (or build
/// via [`from_toml`](Self::from_toml), which validates) before handing the
/// config to any client.
///
/// # Examples
///
/// ```
/// use hpp_gateway::GatewayConfig;
///
/// let config = GatewayConfig::from_toml(
///     r#"
///     merchant_id = "M000100001"
///     merchant_channel = "WEB"
///     access_key = "ak-123"
///     secret_key = "sk-456"
///     ins_id = "001"
///     client_secret = "cs-789"
///     payment_method = "CARD"
///     base_url = "https://gateway.example.com"
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.payment_expire_secs, 300);
/// ```
#[derive(Clone, Deserialize)]
pub struct GatewayConfig {
    /// Merchant user id (`MerchantUserID` / `ClientID` on the wire).
    pub merchant_id: String,

    /// Merchant channel (`Channel` on the wire).
    pub merchant_channel: String,

    /// Merchant access key (`AccessKey` field and `X-Auth-AccessKey` header).
    pub access_key: String,

    /// HMAC-SHA256 secret key. Used exclusively as a signing key; never
    /// transmitted, never logged.
    pub secret_key: String,

    /// Institution id (`InsID` in the protocol envelope).
    pub ins_id: String,

    /// Client secret for the client-credentials token exchange.
    pub client_secret: String,

    /// Payment method code (`PaymentMethod` on the wire).
    pub payment_method: String,

    /// Gateway base URL, e.g. `https://gateway.example.com`.
    pub base_url: String,

    /// Seconds until a hosted-page payment request expires.
    #[serde(default = "default_payment_expire_secs")]
    pub payment_expire_secs: u64,

    /// URL the gateway posts asynchronous callbacks to.
    #[serde(default)]
    pub callback_url: String,

    /// URL the browser is redirected to after a successful payment.
    #[serde(default)]
    pub success_url: String,

    /// URL the browser is redirected to after a failed payment.
    #[serde(default)]
    pub failure_url: String,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_payment_expire_secs() -> u64 {
    300
}

impl GatewayConfig {
    /// Parses a config from TOML and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the TOML is malformed or a
    /// required credential is missing.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)
            .map_err(|e| GatewayError::Configuration(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates that every required credential is present and the base URL
    /// is a usable HTTPS URL.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] on the first failing check.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("merchant_id", &self.merchant_id),
            ("merchant_channel", &self.merchant_channel),
            ("access_key", &self.access_key),
            ("secret_key", &self.secret_key),
            ("ins_id", &self.ins_id),
            ("client_secret", &self.client_secret),
            ("payment_method", &self.payment_method),
            ("base_url", &self.base_url),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(GatewayError::Configuration(format!("{name} must not be empty")));
            }
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            GatewayError::Configuration(format!("invalid base_url '{}': {e}", self.base_url))
        })?;
        if url.scheme() != "https" {
            return Err(GatewayError::Configuration(format!(
                "base_url must use HTTPS, got: {}",
                url.scheme()
            )));
        }

        self.http.validate()
    }

    /// Joins a relative endpoint path onto the gateway base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Absolute URL of the hosted payment page the signed envelope is
    /// submitted to by the browser.
    #[must_use]
    pub fn payment_page_url(&self) -> String {
        self.endpoint(crate::client::PAYMENT_REQUEST_URI)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("merchant_id", &self.merchant_id)
            .field("merchant_channel", &self.merchant_channel)
            .field("access_key", &self.access_key)
            .field("secret_key", &"[redacted]")
            .field("ins_id", &self.ins_id)
            .field("client_secret", &"[redacted]")
            .field("payment_method", &self.payment_method)
            .field("base_url", &self.base_url)
            .field("payment_expire_secs", &self.payment_expire_secs)
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}
