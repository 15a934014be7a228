use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::decode;
use super::experience::ExperienceId;
use crate::pii::Masked;

/// Body of `POST /api/bookings`. Built once at submit time and never retried.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingSubmission {
    pub name: Masked<String>,
    pub email: Masked<String>,
    pub promo_code: Option<String>,
    pub experience_id: ExperienceId,
    pub total_price: f64,
    /// Serialized as an ISO calendar date (`YYYY-MM-DD`) or `null`.
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

/// What the booking API answers on creation; only the identifier matters here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingConfirmation {
    #[serde(rename = "bookingId", deserialize_with = "decode::identifier")]
    pub booking_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A booking persisted by the remote API. Read-only on this side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    #[serde(
        rename = "bookingId",
        default,
        deserialize_with = "decode::optional_identifier"
    )]
    pub booking_id: Option<String>,
    /// Required so that a payload which is not a booking fails to decode.
    pub name: Masked<String>,
    pub email: Masked<String>,
    #[serde(default, deserialize_with = "decode::lenient_price")]
    pub total_price: f64,
    #[serde(default)]
    pub experience_id: Option<ExperienceId>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_wire_shape() {
        let submission = BookingSubmission {
            name: Masked::from("Asha"),
            email: Masked::from("asha@example.com"),
            promo_code: None,
            experience_id: 4,
            total_price: 1120.0,
            date: NaiveDate::from_ymd_opt(2026, 10, 20),
            time: None,
        };

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["name"], "Asha");
        assert_eq!(value["email"], "asha@example.com");
        assert_eq!(value["promo_code"], serde_json::Value::Null);
        assert_eq!(value["experience_id"], 4);
        assert_eq!(value["date"], "2026-10-20");
        assert_eq!(value["time"], serde_json::Value::Null);

        // Logs only ever see the mask.
        let debug = format!("{:?}", submission);
        assert!(!debug.contains("asha@example.com"));
    }

    #[test]
    fn test_confirmation_accepts_numeric_id() {
        let parsed: BookingConfirmation =
            serde_json::from_str(r#"{"bookingId": 1042, "message": "created"}"#).unwrap();
        assert_eq!(parsed.booking_id, "1042");
    }

    #[test]
    fn test_record_tolerates_sparse_payload() {
        let parsed: BookingRecord = serde_json::from_str(
            r#"{"bookingId": "BK-9", "name": "Asha", "email": "a@x.io", "total_price": "1008"}"#,
        )
        .unwrap();
        assert_eq!(parsed.booking_id.as_deref(), Some("BK-9"));
        assert_eq!(parsed.total_price, 1008.0);
        assert_eq!(parsed.date, None);
    }

    #[test]
    fn test_record_requires_contact_fields() {
        let experience = r#"{"id": 1, "title": "Desert Safari", "price": 1499}"#;
        assert!(serde_json::from_str::<BookingRecord>(experience).is_err());
    }
}
