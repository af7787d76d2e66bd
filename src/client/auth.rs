//! Client-credentials login against the gateway.

use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    client::LOGIN_URI,
    config::GatewayConfig,
    error::{GatewayError, Result},
    sign::MsgInfo,
    transport::{Transport, TransportRequest},
};

/// An opaque bearer token returned by the login endpoint.
///
/// Short-lived and never cached: every status query fetches a fresh one.
/// `Debug` output does not reveal the token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// The raw token, for building the `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([redacted])")
    }
}

#[derive(Serialize)]
struct LoginMsgData<'a> {
    #[serde(rename = "ClientID")]
    client_id: &'a str,
    #[serde(rename = "ClientSecret")]
    client_secret: &'a str,
    #[serde(rename = "GrantType")]
    grant_type: &'static str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "MsgInfo")]
    msg_info: &'a MsgInfo,
    #[serde(rename = "MsgData")]
    msg_data: LoginMsgData<'a>,
}

/// Exchanges merchant credentials for a bearer token.
///
/// Failure is soft: any problem (transport error, non-2xx status, a body
/// that is not JSON, a missing or empty token) yields `None` plus a
/// diagnostic log, never an error the caller has to catch.
#[derive(Debug, Clone)]
pub struct AuthClient<T> {
    config: GatewayConfig,
    transport: T,
}

impl<T: Transport> AuthClient<T> {
    #[must_use]
    pub fn new(config: GatewayConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Performs the client-credentials exchange.
    ///
    /// Returns `None` on any failure; check for absence, nothing is thrown.
    #[instrument(skip(self))]
    pub async fn login(&self) -> Option<AccessToken> {
        match self.try_login().await {
            Ok(token) => {
                debug!("login succeeded");
                Some(token)
            }
            Err(error) => {
                warn!(%error, "login failed, continuing without a token");
                None
            }
        }
    }

    async fn try_login(&self) -> Result<AccessToken> {
        let msg_info = MsgInfo::new("LOGIN", &self.config.ins_id);
        let body = serde_json::to_string(&LoginRequest {
            msg_info: &msg_info,
            msg_data: LoginMsgData {
                client_id: &self.config.merchant_id,
                client_secret: &self.config.client_secret,
                grant_type: "client_credentials",
            },
        })?;

        let request = TransportRequest::new(self.config.endpoint(LOGIN_URI), body);
        let response = self.transport.post(&request).await?;

        let parsed: serde_json::Value = serde_json::from_str(&response.body)?;
        match parsed["MsgData"]["AccessToken"].as_str() {
            Some(token) if !token.is_empty() => Ok(AccessToken(token.to_owned())),
            _ => Err(GatewayError::AuthenticationFailed(
                "response carries no MsgData.AccessToken".to_owned(),
            )),
        }
    }
}
