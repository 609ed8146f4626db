//! Lenient coercion of loosely typed request input into column values.
//!
//! Clients send ids and plan references either as JSON numbers or as strings,
//! and dates in a handful of shapes. Everything here maps those inputs onto
//! the typed columns or reports why it could not.

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Leading-integer parse: optional whitespace and sign, then digits. Anything
/// after the first non-digit is ignored, so `"12abc"` yields 12.
pub fn parse_int(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

/// `null`, `false`, `0` and `""` count as "no plan"; anything else must
/// coerce to an integer.
pub fn coerce_plan_id(value: &Value) -> Result<Option<i32>> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(raw) if raw.is_empty() => Ok(None),
        Value::String(raw) => parse_int(raw)
            .map(Some)
            .ok_or_else(|| anyhow!("planId must be an integer, got {raw:?}")),
        Value::Number(number) => {
            if number.as_f64() == Some(0.0) {
                return Ok(None);
            }
            let truncated = number
                .as_i64()
                .or_else(|| number.as_f64().map(|float| float.trunc() as i64))
                .ok_or_else(|| anyhow!("planId must be an integer, got {number}"))?;
            i32::try_from(truncated)
                .map(Some)
                .map_err(|_| anyhow!("planId is out of range: {number}"))
        }
        other => bail!("planId must be an integer, got {other}"),
    }
}

/// Returns `None` for falsy input so the caller can apply its own default.
/// Numbers are epoch milliseconds, truncated toward zero.
pub fn coerce_date_time(value: &Value) -> Result<Option<DateTime<Utc>>> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(raw) if raw.is_empty() => Ok(None),
        Value::String(raw) => parse_date_time(raw).map(Some),
        Value::Number(number) => {
            if number.as_f64() == Some(0.0) {
                return Ok(None);
            }
            let millis = number
                .as_i64()
                .or_else(|| number.as_f64().map(|float| float.trunc() as i64))
                .ok_or_else(|| anyhow!("startDate timestamp is out of range: {number}"))?;
            Utc.timestamp_millis_opt(millis)
                .single()
                .map(Some)
                .ok_or_else(|| anyhow!("startDate timestamp is out of range: {millis}"))
        }
        other => bail!("startDate must be a date string, got {other}"),
    }
}

/// Accepts RFC 3339, a naive date-time (read as UTC) or a plain date
/// (midnight UTC).
pub fn parse_date_time(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date_time.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    bail!("startDate is not a valid date: {raw:?}")
}
