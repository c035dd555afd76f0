pub mod category_dtos;
pub mod comment_dtos;
pub mod follow_dtos;
pub mod like_dtos;
pub mod post_dtos;
pub mod stats_dtos;
pub mod user_dtos;

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::Serialize;

use crate::errors::ApiError;
use crate::ids::IdParam;

/// The uniform response wrapper. `data` is omitted entirely when there is
/// nothing to return (deletes, errors).
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Returns the value of a required body field, rejecting absent and blank
/// values with `MissingField`.
pub fn require(field: &'static str, value: &Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(ApiError::MissingField(field)),
    }
}

/// Same as [`require`] for reference fields.
pub fn require_id<'a>(
    field: &'static str,
    value: &'a Option<IdParam>,
) -> Result<&'a IdParam, ApiError> {
    match value {
        Some(v) if !v.is_empty_text() => Ok(v),
        _ => Err(ApiError::MissingField(field)),
    }
}

/// Parses a numeric `limit` query parameter, falling back to `default` when
/// absent or unparseable and clamping the result to [1, 100].
pub fn clamped_limit(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(default)
        .clamp(1, 100)
}

/// Stored datetimes go out as ISO-8601 with a Z suffix.
pub fn to_iso_string(date: bson::DateTime) -> String {
    date.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an ISO-8601 / RFC 3339 datetime from a request body.
pub fn parse_iso_datetime(value: &str) -> Option<bson::DateTime> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| bson::DateTime::from_chrono(dt.with_timezone(&Utc)))
}

/// 00:00:00 UTC of a `YYYY-MM-DD` day, for the `after` filter.
pub fn day_start(value: &str) -> Option<bson::DateTime> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let instant = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
    Some(bson::DateTime::from_chrono(instant))
}

/// 23:59:59 UTC of a `YYYY-MM-DD` day, for the `before` filter.
pub fn day_end(value: &str) -> Option<bson::DateTime> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let instant = Utc.from_utc_datetime(&date.and_hms_opt(23, 59, 59)?);
    Some(bson::DateTime::from_chrono(instant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_absent_data() {
        let response = ApiResponse::<()> {
            message: "Deleted".into(),
            data: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Deleted" }));
    }

    #[test]
    fn envelope_carries_data_when_present() {
        let response = ApiResponse {
            message: "Count".into(),
            data: Some(serde_json::json!({ "count": 2 })),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"]["count"], serde_json::json!(2));
    }

    #[test]
    fn required_fields_reject_absent_and_blank() {
        assert!(require("username", &None).is_err());
        assert!(require("username", &Some("".into())).is_err());
        assert!(require("username", &Some("   ".into())).is_err());
        assert_eq!(require("username", &Some("alice".into())).unwrap(), "alice");
    }

    #[test]
    fn required_id_rejects_blank_text() {
        assert!(require_id("user_id", &None).is_err());
        assert!(require_id("user_id", &Some(IdParam::Text(" ".into()))).is_err());
        assert!(require_id("user_id", &Some(IdParam::Int(3))).is_ok());
    }

    #[test]
    fn limit_clamping() {
        assert_eq!(clamped_limit(None, 5), 5);
        assert_eq!(clamped_limit(Some("0"), 5), 1);
        assert_eq!(clamped_limit(Some("-3"), 5), 1);
        assert_eq!(clamped_limit(Some("200"), 5), 100);
        assert_eq!(clamped_limit(Some("17"), 5), 17);
        assert_eq!(clamped_limit(Some("junk"), 5), 5);
    }

    #[test]
    fn day_boundaries_are_inclusive_day_edges() {
        let start = day_start("2024-01-01").unwrap();
        let end = day_end("2024-01-01").unwrap();
        assert_eq!(to_iso_string(start), "2024-01-01T00:00:00.000Z");
        assert_eq!(to_iso_string(end), "2024-01-01T23:59:59.000Z");
        assert!(day_start("01/02/2024").is_none());
        assert!(day_start("2024-13-40").is_none());
    }

    #[test]
    fn datetime_parsing_round_trips() {
        let parsed = parse_iso_datetime("2024-06-15T10:30:00Z").unwrap();
        assert_eq!(to_iso_string(parsed), "2024-06-15T10:30:00.000Z");
        assert!(parse_iso_datetime("yesterday").is_none());
    }
}
