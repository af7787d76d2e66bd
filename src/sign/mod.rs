//! Request signing and verification.
//!
//! The protocol signs four distinct surfaces with one primitive,
//! `base64(HMAC-SHA256(secret, canonical))`:
//!
//! - outbound hosted-page payment requests ([`engine::canonical_outbound`]),
//! - outbound JSON API payloads ([`engine::canonical_payload`]),
//! - inbound server callbacks ([`engine::canonical_callback`]),
//! - inbound browser redirects ([`engine::canonical_redirect`]).
//!
//! [`SignatureEngine`] holds the keyed MAC; [`FieldSet`] preserves the
//! insertion order the canonical strings depend on; [`CallbackVerifier`] and
//! [`RedirectVerifier`] wrap the two inbound surfaces.

pub mod engine;
pub mod fields;
pub mod msg_info;
pub mod verify;

#[cfg(test)]
mod proptests;

pub use engine::SignatureEngine;
pub use fields::{FieldSet, SIGNATURE_FIELD, SIGNED_FIELDS_FIELD, SignedEnvelope};
pub use msg_info::MsgInfo;
pub use verify::{CallbackVerifier, RedirectVerifier};
