use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

pub type Id = String;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// Current time, used for every `date` field.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a calendar date as sent by the client's date inputs.
///
/// Accepts plain `YYYY-MM-DD` as well as a full RFC 3339 timestamp, in which
/// case only the date part is kept.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// Returns `Some(trimmed)` only when the input carries a non-blank value.
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
