//! Protocol message envelope (`MsgInfo`) and message id generation.

use rand::Rng;
use serde::Serialize;
use time::OffsetDateTime;

/// Protocol version carried in every `MsgInfo` envelope.
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Envelope metadata attached to every JSON API payload.
///
/// Serializes with the wire field names the gateway expects:
///
/// ```json
/// {"VersionNo":"1.0.0","MsgID":"M001...","TimeStamp":"20240101120000",
///  "MsgType":"LOGIN","InsID":"001"}
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MsgInfo {
    #[serde(rename = "VersionNo")]
    pub version_no: String,

    /// Unique message id, `"M" + ins_id + YYYYMMDDHHMMSS + 6-digit serial`.
    #[serde(rename = "MsgID")]
    pub msg_id: String,

    /// Envelope creation time as a compact UTC timestamp, `YYYYMMDDHHMMSS`.
    #[serde(rename = "TimeStamp")]
    pub time_stamp: String,

    /// Operation discriminator, e.g. `LOGIN` or `GET_TRANSACTION_STATUS`.
    #[serde(rename = "MsgType")]
    pub msg_type: String,

    /// Institution id of the calling merchant.
    #[serde(rename = "InsID")]
    pub ins_id: String,
}

impl MsgInfo {
    /// Builds an envelope for `msg_type` stamped with the current UTC time
    /// and a fresh message id.
    #[must_use]
    pub fn new(msg_type: &str, ins_id: &str) -> Self {
        Self::at(msg_type, ins_id, OffsetDateTime::now_utc())
    }

    /// Builds an envelope stamped at an explicit instant. Used by `new` and
    /// by tests that need a fixed clock.
    #[must_use]
    pub fn at(msg_type: &str, ins_id: &str, now: OffsetDateTime) -> Self {
        let time_stamp = compact_timestamp(now);
        let serial: u32 = rand::thread_rng().gen_range(0..1_000_000);
        Self {
            version_no: PROTOCOL_VERSION.to_owned(),
            msg_id: format!("M{ins_id}{time_stamp}{serial:06}"),
            time_stamp,
            msg_type: msg_type.to_owned(),
            ins_id: ins_id.to_owned(),
        }
    }
}

/// Formats an instant as the compact wire timestamp `YYYYMMDDHHMMSS`.
#[must_use]
pub fn compact_timestamp(at: OffsetDateTime) -> String {
    format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}",
        at.year(),
        at.month() as u8,
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

/// Formats an instant as the hosted-page `SignedDateTime` field,
/// `YYYY-MM-DDTHH:MM:SS`.
#[must_use]
pub fn signed_date_time(at: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        at.year(),
        at.month() as u8,
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}
