//! Client library for a bank hosted-payment-page gateway.
//!
//! The gateway authenticates every message with
//! `base64(HMAC-SHA256(secret, canonical))` signatures over deterministic
//! canonical strings. This crate covers the merchant side of that protocol:
//!
//! - [`PaymentRequestBuilder`] assembles and signs the field set a browser
//!   submits to the hosted payment page,
//! - [`AuthClient`] performs the client-credentials token exchange,
//! - [`TransactionStatusClient`] runs the authenticated status query,
//! - [`CallbackVerifier`] and [`RedirectVerifier`] check the signatures on
//!   inbound webhooks and browser redirects.
//!
//! Gateway calls fail soft: `login` and `status` return `None` on any
//! transport, status, or parse problem, with diagnostics emitted through
//! [`tracing`]. The crate never installs a tracing subscriber; wire up your
//! own to see the logs. Signature verification is a boolean outcome, never
//! an error.
//!
//! # Examples
//!
//! ```
//! use hpp_gateway::{FieldSet, GatewayConfig, PaymentRequestBuilder};
//! use rust_decimal_macros::dec;
//!
//! let config = GatewayConfig::from_toml(
//!     r#"
//!     merchant_id = "M000100001"
//!     merchant_channel = "WEB"
//!     access_key = "ak-123"
//!     secret_key = "sk-456"
//!     ins_id = "001"
//!     client_secret = "cs-789"
//!     payment_method = "CARD"
//!     base_url = "https://gateway.example.com"
//!     "#,
//! )?;
//!
//! let builder = PaymentRequestBuilder::new(config);
//! let extra: FieldSet = [("RequestID", "INV-2024-0042")].into_iter().collect();
//! let envelope = builder.build(dec!(1234.5), extra)?;
//!
//! assert_eq!(envelope.fields().get("Amount"), Some("1234.50"));
//! assert!(!envelope.signature().is_empty());
//! # Ok::<(), hpp_gateway::GatewayError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod sign;
pub mod transport;

pub use client::{
    AccessToken, AuthClient, PaymentRequestBuilder, TransactionStatusClient,
    TransactionStatusResult,
};
pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use sign::{
    CallbackVerifier, FieldSet, MsgInfo, RedirectVerifier, SignatureEngine, SignedEnvelope,
};
pub use transport::{HttpConfig, HttpTransport, Transport};
