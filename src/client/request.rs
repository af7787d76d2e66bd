//! Outbound hosted-page payment request assembly and signing.

use rust_decimal::{Decimal, RoundingStrategy};
use time::OffsetDateTime;
use tracing::debug;

use crate::{
    client::PAYMENT_REQUEST_URI,
    config::GatewayConfig,
    error::{GatewayError, Result},
    sign::{
        SIGNATURE_FIELD, SIGNED_FIELDS_FIELD, SignatureEngine, SignedEnvelope,
        engine::canonical_outbound,
        fields::FieldSet,
        msg_info::signed_date_time,
    },
};

/// Builds signed hosted-payment-page requests.
///
/// The builder assembles the merchant's default field block, overlays the
/// caller's fields, signs the result, and returns a [`SignedEnvelope`] ready
/// to render as a hidden-field form posting to the payment page.
#[derive(Debug, Clone)]
pub struct PaymentRequestBuilder {
    config: GatewayConfig,
    engine: SignatureEngine,
}

impl PaymentRequestBuilder {
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        let engine = SignatureEngine::new(&config.secret_key);
        Self { config, engine }
    }

    /// Builds and signs a payment request for `total_amount`.
    ///
    /// `extra` is overlaid onto the default field block: keys already
    /// present override in place, new keys (such as `RequestID`) append at
    /// the end. The overlay order is preserved into the signature, so two
    /// calls with the same fields in a different order produce different
    /// signatures.
    ///
    /// `total_amount` is rounded half away from zero to two decimals before
    /// rendering.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidAmount`] if `total_amount` is
    /// negative. Empty `extra` is legal.
    pub fn build(&self, total_amount: Decimal, extra: FieldSet) -> Result<SignedEnvelope> {
        self.build_at(total_amount, extra, OffsetDateTime::now_utc())
    }

    /// [`build`](Self::build) with an explicit signing instant.
    pub fn build_at(
        &self,
        total_amount: Decimal,
        extra: FieldSet,
        now: OffsetDateTime,
    ) -> Result<SignedEnvelope> {
        if total_amount.is_sign_negative() {
            return Err(GatewayError::InvalidAmount(format!(
                "amount must not be negative, got {total_amount}"
            )));
        }

        let mut fields = self.default_fields(total_amount, now);
        fields.overlay(extra);

        // RequestID is not part of the default block; callers supply it in
        // `extra`. Absent means empty in the canonical string.
        let request_id = fields.get("RequestID").unwrap_or_default().to_owned();
        let date_time = fields.get("SignedDateTime").unwrap_or_default().to_owned();

        let signed_keys = fields.keys_joined();
        let canonical =
            canonical_outbound("POST", PAYMENT_REQUEST_URI, &date_time, &request_id, &fields);
        let signature = self.engine.sign(canonical.as_bytes());

        // Appended only after every business field is final.
        fields.insert(SIGNATURE_FIELD, signature);
        fields.insert(SIGNED_FIELDS_FIELD, signed_keys);

        debug!(%request_id, field_count = fields.len(), "payment request signed");
        Ok(SignedEnvelope::new(self.config.payment_page_url(), fields))
    }

    /// Default field block in the wire order the gateway expects: merchant
    /// identity, amount, fixed currency, blank billing block, expiry, and
    /// the `SignedDateTime` capture.
    fn default_fields(&self, total_amount: Decimal, now: OffsetDateTime) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.insert("MerchantUserID", &self.config.merchant_id);
        fields.insert("AccessKey", &self.config.access_key);
        fields.insert("Channel", &self.config.merchant_channel);
        fields.insert("PaymentMethod", &self.config.payment_method);
        // Half-away-from-zero to two decimals, the gateway's rounding rule.
        let amount =
            total_amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        fields.insert("Amount", format!("{amount:.2}"));
        fields.insert("Currency", "MMK");
        fields.insert("BillToAddressLine1", "");
        fields.insert("BillToAddressLine2", "");
        fields.insert("BillToAddressCity", "");
        fields.insert("BillToAddressPostalCode", "");
        fields.insert("BillToAddressState", "");
        fields.insert("BillToAddressCountry", "MM");
        fields.insert("BillToForename", "");
        fields.insert("BillToSurname", "");
        fields.insert("BillToPhone", "");
        fields.insert("BillToEmail", "");
        fields.insert("ExpiredInSeconds", self.config.payment_expire_secs.to_string());
        fields.insert("Remark", "");
        fields.insert("UserDefined1", "");
        fields.insert("UserDefined2", "");
        fields.insert("UserDefined3", "");
        fields.insert("UserDefined4", "");
        fields.insert("UserDefined5", "");
        fields.insert("SignedDateTime", signed_date_time(now));
        fields
    }
}
