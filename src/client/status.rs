//! Authenticated transaction status queries.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    client::{AuthClient, STATUS_URI},
    config::GatewayConfig,
    error::Result,
    sign::{MsgInfo, SignatureEngine, engine::canonical_payload},
    transport::{Transport, TransportRequest},
};

/// Parsed status response, kept as opaque JSON. The gateway's status schema
/// varies by payment method; callers pick out the fields they need.
pub type TransactionStatusResult = serde_json::Value;

#[derive(Serialize)]
struct StatusMsgData<'a> {
    #[serde(rename = "RequestID")]
    request_id: &'a str,
    #[serde(rename = "MerchantUserID")]
    merchant_user_id: &'a str,
}

#[derive(Serialize)]
struct StatusRequest<'a> {
    #[serde(rename = "MsgInfo")]
    msg_info: &'a MsgInfo,
    #[serde(rename = "MsgData")]
    msg_data: StatusMsgData<'a>,
}

/// Queries the status of a previously submitted payment request.
///
/// A status call is a two-step composite: a fresh login, then the signed
/// status POST. If login yields no token the status call is never issued;
/// it would be rejected anyway. Like login, every failure is soft: the
/// caller sees `None` and a diagnostic log, never an error.
#[derive(Debug, Clone)]
pub struct TransactionStatusClient<T> {
    config: GatewayConfig,
    engine: SignatureEngine,
    auth: AuthClient<T>,
    transport: T,
}

impl<T: Transport + Clone> TransactionStatusClient<T> {
    #[must_use]
    pub fn new(config: GatewayConfig, transport: T) -> Self {
        let engine = SignatureEngine::new(&config.secret_key);
        let auth = AuthClient::new(config.clone(), transport.clone());
        Self { config, engine, auth, transport }
    }

    /// Fetches the gateway's view of the transaction behind `request_id`.
    ///
    /// Returns `None` if login fails, the gateway answers with a non-2xx
    /// status, the transport fails, or the body is not JSON.
    #[instrument(skip(self))]
    pub async fn status(&self, request_id: &str) -> Option<TransactionStatusResult> {
        let msg_info = MsgInfo::new("GET_TRANSACTION_STATUS", &self.config.ins_id);

        // Serialize and sign before logging in so the signed bytes are
        // exactly the bytes transmitted.
        let (payload, signature) = match self.signed_payload(&msg_info, request_id) {
            Ok(signed) => signed,
            Err(error) => {
                warn!(%error, "failed to build status payload");
                return None;
            }
        };

        let Some(token) = self.auth.login().await else {
            debug!("no access token, skipping status call");
            return None;
        };

        let request = TransportRequest::new(self.config.endpoint(STATUS_URI), payload)
            .header("Authorization", format!("Bearer {}", token.as_str()))
            .header("X-Auth-AccessKey", &self.config.access_key)
            .header("X-Auth-Timestamp", &msg_info.time_stamp)
            .header("X-Auth-Nonce", &msg_info.msg_id)
            .header("X-Auth-Signature", signature);

        match self.try_status(&request).await {
            Ok(result) => {
                debug!("status query succeeded");
                Some(result)
            }
            Err(error) => {
                warn!(%error, "status query failed");
                None
            }
        }
    }

    fn signed_payload(&self, msg_info: &MsgInfo, request_id: &str) -> Result<(String, String)> {
        let payload = serde_json::to_string(&StatusRequest {
            msg_info,
            msg_data: StatusMsgData {
                request_id,
                merchant_user_id: &self.config.merchant_id,
            },
        })?;
        let canonical = canonical_payload(
            "POST",
            STATUS_URI,
            &msg_info.time_stamp,
            &msg_info.msg_id,
            &payload,
        );
        let signature = self.engine.sign(canonical.as_bytes());
        Ok((payload, signature))
    }

    async fn try_status(&self, request: &TransportRequest) -> Result<TransactionStatusResult> {
        let response = self.transport.post(request).await?;
        Ok(serde_json::from_str(&response.body)?)
    }
}
