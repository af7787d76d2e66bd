//! HMAC-SHA256 signing engine and canonical string construction.
//!
//! Every signature in the protocol is `base64(HMAC-SHA256(secret, canonical))`
//! over a canonical byte string. The engine owns the keyed MAC prototype;
//! the canonical builders are free functions of their inputs so the exact
//! bytes being signed are always auditable at the call site.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use crate::sign::fields::FieldSet;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer/verifier keyed with the merchant secret.
///
/// The secret enters the engine once, at construction, and exists afterwards
/// only inside the keyed MAC state. The engine exposes no way to read it
/// back, and its `Debug` output carries no key material.
#[derive(Clone)]
pub struct SignatureEngine {
    mac: HmacSha256,
}

impl std::fmt::Debug for SignatureEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureEngine").finish_non_exhaustive()
    }
}

impl SignatureEngine {
    /// Creates an engine keyed with `secret`.
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        // HMAC accepts keys of any length.
        let mac = HmacSha256::new_from_slice(secret.as_ref())
            .expect("HMAC-SHA256 accepts keys of any length");
        Self { mac }
    }

    /// Signs `canonical`, returning the base64-encoded HMAC-SHA256 digest.
    #[must_use]
    pub fn sign(&self, canonical: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(canonical);
        BASE64.encode(mac.finalize().into_bytes())
    }

    /// Verifies a base64 `provided` signature against `canonical`.
    ///
    /// The digest comparison is constant-time. A signature that is not valid
    /// base64 fails verification; it is never an error.
    #[must_use]
    pub fn verify(&self, canonical: &[u8], provided: &str) -> bool {
        let Ok(signature) = BASE64.decode(provided) else {
            warn!("rejecting signature that is not valid base64");
            return false;
        };
        let mut mac = self.mac.clone();
        mac.update(canonical);
        mac.verify_slice(&signature).is_ok()
    }
}

/// Canonical string for an outbound hosted-page payment request:
/// `{method}|{uri}|{signed_date_time}|{request_id}|{k=v,k=v,...}`.
///
/// The fields term preserves the field set's insertion order.
#[must_use]
pub fn canonical_outbound(
    method: &str,
    uri: &str,
    signed_date_time: &str,
    request_id: &str,
    fields: &FieldSet,
) -> String {
    format!("{method}|{uri}|{signed_date_time}|{request_id}|{}", fields.pairs_joined())
}

/// Canonical string for a signed JSON payload (login, status):
/// `{method}|{uri}|{timestamp}|{msg_id}|{payload}`.
///
/// `payload` must be the exact serialized body that goes on the wire.
#[must_use]
pub fn canonical_payload(
    method: &str,
    uri: &str,
    timestamp: &str,
    msg_id: &str,
    payload: &str,
) -> String {
    format!("{method}|{uri}|{timestamp}|{msg_id}|{payload}")
}

/// Canonical bytes for an inbound server-to-server callback:
/// `{method}|{url}|{timestamp}|{nonce}|` followed by the raw body bytes.
///
/// The body term is the bytes exactly as received, before any parsing or
/// re-serialization; a single reordered JSON key or whitespace change must
/// fail verification.
#[must_use]
pub fn canonical_callback(
    method: &str,
    url: &str,
    timestamp: &str,
    nonce: &str,
    raw_body: &[u8],
) -> Vec<u8> {
    let mut canonical = format!("{method}|{url}|{timestamp}|{nonce}|").into_bytes();
    canonical.extend_from_slice(raw_body);
    canonical
}

/// Canonical string for an inbound browser redirect:
/// `{method}|{url}|{request_id}|{k=v,k=v,...}` over the redirect parameters
/// minus the signature parameter itself.
#[must_use]
pub fn canonical_redirect(method: &str, url: &str, request_id: &str, fields: &FieldSet) -> String {
    format!("{method}|{url}|{request_id}|{}", fields.pairs_joined())
}

/// Legacy flat canonical string: `k=v,k=v,...` with no context terms.
///
/// Kept only for interoperability with counterparties still verifying the
/// pre-context scheme. It binds neither method, URL, time, nor request id;
/// new integrations must use [`canonical_outbound`].
#[must_use]
pub fn legacy_flat(fields: &FieldSet) -> String {
    fields.pairs_joined()
}
