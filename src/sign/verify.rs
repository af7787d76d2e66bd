//! Inbound signature verification for webhooks and browser redirects.
//!
//! Both verifiers are framework-agnostic: the embedder hands over the raw
//! header values, the untouched body bytes, or the decoded form fields, and
//! gets back a boolean. An invalid signature is an outcome, not an error:
//! the caller rejects the request as untrusted, nothing panics or raises.

use tracing::{debug, warn};

use crate::sign::{
    engine::{self, SignatureEngine},
    fields::{FieldSet, SIGNATURE_FIELD},
};

/// Verifies signatures on asynchronous server-to-server callbacks.
///
/// The canonical string covers the request method, callback URL, the
/// `X-Auth-Timestamp` and `X-Auth-Nonce` header values, and the request
/// body exactly as received on the wire. Pass the raw bytes, not a parsed
/// and re-serialized form: JSON re-serialization reorders keys and changes
/// whitespace, which invalidates the signature.
#[derive(Debug, Clone)]
pub struct CallbackVerifier {
    engine: SignatureEngine,
}

impl CallbackVerifier {
    #[must_use]
    pub fn new(engine: SignatureEngine) -> Self {
        Self { engine }
    }

    /// Returns `true` if `signature` covers exactly this callback.
    ///
    /// `timestamp`, `nonce`, and `signature` are the values of the
    /// `X-Auth-Timestamp`, `X-Auth-Nonce`, and `X-Auth-Signature` headers.
    #[must_use]
    pub fn verify(
        &self,
        method: &str,
        url: &str,
        timestamp: &str,
        nonce: &str,
        signature: &str,
        raw_body: &[u8],
    ) -> bool {
        let canonical = engine::canonical_callback(method, url, timestamp, nonce, raw_body);
        let valid = self.engine.verify(&canonical, signature);
        if valid {
            debug!(%url, %nonce, "callback signature verified");
        } else {
            warn!(%url, %nonce, "callback signature mismatch");
        }
        valid
    }
}

/// Verifies signatures on browser redirects back from the hosted page.
///
/// The redirect carries its signature inside the field set (`Signature`),
/// so verification removes that field first and signs what remains, in the
/// order given. A missing `RequestID` field enters the canonical string as
/// an empty value rather than failing.
#[derive(Debug, Clone)]
pub struct RedirectVerifier {
    engine: SignatureEngine,
}

impl RedirectVerifier {
    #[must_use]
    pub fn new(engine: SignatureEngine) -> Self {
        Self { engine }
    }

    /// Returns `true` if the `Signature` entry of `fields` covers the
    /// remaining fields of this redirect.
    #[must_use]
    pub fn verify(&self, method: &str, url: &str, mut fields: FieldSet) -> bool {
        let Some(signature) = fields.remove(SIGNATURE_FIELD) else {
            warn!(%url, "redirect carries no signature field");
            return false;
        };
        let request_id = fields.get("RequestID").unwrap_or_default().to_owned();

        let canonical = engine::canonical_redirect(method, url, &request_id, &fields);
        let valid = self.engine.verify(canonical.as_bytes(), &signature);
        if valid {
            debug!(%url, %request_id, "redirect signature verified");
        } else {
            warn!(%url, %request_id, "redirect signature mismatch");
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "s3cr3t";

    fn sign_callback(body: &[u8]) -> String {
        let engine = SignatureEngine::new(SECRET);
        let canonical =
            engine::canonical_callback("POST", "https://m.example.com/cb", "t1", "n1", body);
        engine.sign(&canonical)
    }

    #[test]
    fn test_callback_round_trip() {
        let body = br#"{"RequestID":"R1","Status":"SUCCESS"}"#;
        let signature = sign_callback(body);
        let verifier = CallbackVerifier::new(SignatureEngine::new(SECRET));
        assert!(verifier.verify("POST", "https://m.example.com/cb", "t1", "n1", &signature, body));
    }

    #[test]
    fn test_callback_body_tamper_rejected() {
        let body = br#"{"RequestID":"R1","Status":"SUCCESS"}"#;
        let signature = sign_callback(body);
        let verifier = CallbackVerifier::new(SignatureEngine::new(SECRET));

        // Flip one byte.
        let mut tampered = body.to_vec();
        tampered[20] ^= 0x01;
        assert!(!verifier.verify(
            "POST",
            "https://m.example.com/cb",
            "t1",
            "n1",
            &signature,
            &tampered
        ));
    }

    #[test]
    fn test_callback_reserialized_body_rejected() {
        // Same JSON value, different key order: must fail, the signature
        // covers the wire bytes.
        let body = br#"{"A":1,"B":2}"#;
        let signature = sign_callback(body);
        let verifier = CallbackVerifier::new(SignatureEngine::new(SECRET));
        assert!(!verifier.verify(
            "POST",
            "https://m.example.com/cb",
            "t1",
            "n1",
            &signature,
            br#"{"B":2,"A":1}"#
        ));
    }

    #[test]
    fn test_callback_header_tamper_rejected() {
        let body = br#"{"RequestID":"R1"}"#;
        let signature = sign_callback(body);
        let verifier = CallbackVerifier::new(SignatureEngine::new(SECRET));
        assert!(!verifier.verify("POST", "https://m.example.com/cb", "t2", "n1", &signature, body));
        assert!(!verifier.verify("POST", "https://m.example.com/cb", "t1", "n2", &signature, body));
        assert!(!verifier.verify("GET", "https://m.example.com/cb", "t1", "n1", &signature, body));
    }

    fn signed_redirect_fields() -> FieldSet {
        let engine = SignatureEngine::new(SECRET);
        let mut fields: FieldSet =
            [("RequestID", "R1"), ("Status", "SUCCESS"), ("Amount", "10.00")].into_iter().collect();
        let canonical =
            engine::canonical_redirect("GET", "https://m.example.com/ok", "R1", &fields);
        fields.insert(SIGNATURE_FIELD, engine.sign(canonical.as_bytes()));
        fields
    }

    #[test]
    fn test_redirect_round_trip() {
        let verifier = RedirectVerifier::new(SignatureEngine::new(SECRET));
        assert!(verifier.verify("GET", "https://m.example.com/ok", signed_redirect_fields()));
    }

    #[test]
    fn test_redirect_field_tamper_rejected() {
        let verifier = RedirectVerifier::new(SignatureEngine::new(SECRET));
        let mut fields = signed_redirect_fields();
        fields.insert("Amount", "999999.00");
        assert!(!verifier.verify("GET", "https://m.example.com/ok", fields));
    }

    #[test]
    fn test_redirect_missing_signature_rejected() {
        let verifier = RedirectVerifier::new(SignatureEngine::new(SECRET));
        let fields: FieldSet = [("RequestID", "R1")].into_iter().collect();
        assert!(!verifier.verify("GET", "https://m.example.com/ok", fields));
    }

    #[test]
    fn test_redirect_missing_request_id_is_empty_not_error() {
        let engine = SignatureEngine::new(SECRET);
        let mut fields: FieldSet = [("Status", "SUCCESS")].into_iter().collect();
        let canonical = engine::canonical_redirect("GET", "https://m.example.com/ok", "", &fields);
        fields.insert(SIGNATURE_FIELD, engine.sign(canonical.as_bytes()));

        let verifier = RedirectVerifier::new(engine);
        assert!(verifier.verify("GET", "https://m.example.com/ok", fields));
    }
}
