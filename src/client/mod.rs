//! Gateway operations: hosted-page payment requests, login, status queries.

mod auth;
mod request;
mod status;

pub use auth::{AccessToken, AuthClient};
pub use request::PaymentRequestBuilder;
pub use status::{TransactionStatusClient, TransactionStatusResult};

/// Relative URI of the hosted payment page (browser form submission).
pub const PAYMENT_REQUEST_URI: &str = "Payments/Request";

/// Relative URI of the client-credentials login endpoint.
pub const LOGIN_URI: &str = "api/login";

/// Relative URI of the transaction status endpoint.
pub const STATUS_URI: &str = "api/transaction/status";
