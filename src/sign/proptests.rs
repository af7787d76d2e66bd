//! Property tests for the signing engine and field-set ordering.

use proptest::prelude::*;

use crate::sign::{
    engine::{self, SignatureEngine},
    fields::{FieldSet, SIGNATURE_FIELD},
    verify::{CallbackVerifier, RedirectVerifier},
};

fn key_strategy() -> impl Strategy<Value = String> {
    // Field names on the wire are alphanumeric identifiers.
    "[A-Za-z][A-Za-z0-9]{0,15}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    // Values never contain the separator characters of the canonical form.
    "[A-Za-z0-9 ._:/-]{0,24}"
}

fn fields_strategy() -> impl Strategy<Value = FieldSet> {
    proptest::collection::vec((key_strategy(), value_strategy()), 0..12)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_sign_verify_round_trip(secret in any::<Vec<u8>>(), message in any::<Vec<u8>>()) {
        let engine = SignatureEngine::new(&secret);
        let signature = engine.sign(&message);
        prop_assert!(engine.verify(&message, &signature));
    }

    #[test]
    fn prop_tampered_message_rejected(
        secret in any::<Vec<u8>>(),
        message in any::<Vec<u8>>(),
        other in any::<Vec<u8>>(),
    ) {
        prop_assume!(message != other);
        let engine = SignatureEngine::new(&secret);
        let signature = engine.sign(&message);
        prop_assert!(!engine.verify(&other, &signature));
    }

    #[test]
    fn prop_wrong_key_rejected(
        secret in any::<Vec<u8>>(),
        other_secret in any::<Vec<u8>>(),
        message in any::<Vec<u8>>(),
    ) {
        prop_assume!(secret != other_secret);
        let signature = SignatureEngine::new(&secret).sign(&message);
        prop_assert!(!SignatureEngine::new(&other_secret).verify(&message, &signature));
    }

    #[test]
    fn prop_garbage_signature_never_verifies(
        secret in any::<Vec<u8>>(),
        message in any::<Vec<u8>>(),
        garbage in "[^=]{0,64}",
    ) {
        let engine = SignatureEngine::new(&secret);
        prop_assume!(garbage != engine.sign(&message));
        prop_assert!(!engine.verify(&message, &garbage));
    }

    #[test]
    fn prop_insert_preserves_first_seen_order(
        pairs in proptest::collection::vec((key_strategy(), value_strategy()), 0..12),
    ) {
        let fields: FieldSet = pairs.clone().into_iter().collect();

        // Keys appear in first-seen order, deduplicated, with the last
        // value winning.
        let mut expected_keys: Vec<&str> = Vec::new();
        for (key, _) in &pairs {
            if !expected_keys.contains(&key.as_str()) {
                expected_keys.push(key);
            }
        }
        prop_assert_eq!(fields.keys().collect::<Vec<_>>(), expected_keys);

        for (key, _) in &pairs {
            let last = pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
            prop_assert_eq!(fields.get(key), last);
        }
    }

    #[test]
    fn prop_callback_verifier_accepts_own_signature(
        secret in any::<Vec<u8>>(),
        body in any::<Vec<u8>>(),
        timestamp in "[0-9]{14}",
        nonce in "[A-Za-z0-9]{1,32}",
    ) {
        let engine = SignatureEngine::new(&secret);
        let canonical = engine::canonical_callback(
            "POST", "https://m.example.com/cb", &timestamp, &nonce, &body,
        );
        let signature = engine.sign(&canonical);
        let verifier = CallbackVerifier::new(engine);
        prop_assert!(verifier.verify(
            "POST", "https://m.example.com/cb", &timestamp, &nonce, &signature, &body,
        ));
    }

    #[test]
    fn prop_redirect_verifier_accepts_own_signature(fields in fields_strategy()) {
        prop_assume!(!fields.contains_key(SIGNATURE_FIELD));
        let engine = SignatureEngine::new("prop-secret");
        let request_id = fields.get("RequestID").unwrap_or_default().to_owned();
        let canonical = engine::canonical_redirect(
            "GET", "https://m.example.com/ok", &request_id, &fields,
        );
        let mut signed = fields;
        signed.insert(SIGNATURE_FIELD, engine.sign(canonical.as_bytes()));

        let verifier = RedirectVerifier::new(engine);
        prop_assert!(verifier.verify("GET", "https://m.example.com/ok", signed));
    }
}
