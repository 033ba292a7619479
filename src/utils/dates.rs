//! Expiry timestamp parsing and display.
//!
//! The form collects expiry as text. Whatever the user types is normalized to an
//! absolute UTC instant before it is sent, so the wire never carries a local
//! wall-clock string.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::error::ClientError;

/// Wall-clock layouts accepted in addition to RFC 3339.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses expiry text in the machine's local timezone.
///
/// See [`parse_expiry_in`].
pub fn parse_expiry(input: &str) -> Result<Option<DateTime<Utc>>, ClientError> {
    parse_expiry_in(input, &Local)
}

/// Parses expiry text, interpreting wall-clock input in `tz`.
///
/// - Empty or whitespace-only input means "no expiry" (`Ok(None)`)
/// - RFC 3339 input keeps its own offset
/// - `YYYY-MM-DDTHH:MM[:SS]` (or with a space separator) is read as wall-clock
///   time in `tz`; during a DST fold the earlier instant is used
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for unparseable input or a wall-clock time
/// that does not exist in `tz` (DST gap).
pub fn parse_expiry_in<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
) -> Result<Option<DateTime<Utc>>, ClientError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| {
            ClientError::validation(
                "expires_at",
                "Expiry must look like 2026-01-08T12:00 or 2026-01-08T12:00:00Z",
            )
        })?;

    let local = tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        ClientError::validation(
            "expires_at",
            format!("{input} does not exist in the local timezone"),
        )
    })?;

    Ok(Some(local.with_timezone(&Utc)))
}

/// Formats an optional instant in the local timezone, `—` when absent.
pub fn format_local(value: Option<DateTime<Utc>>) -> String {
    format_in(value, &Local)
}

/// Formats an optional instant in `tz`, `—` when absent.
pub fn format_in<Tz: TimeZone>(value: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match value {
        Some(v) => v.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
        None => "—".to_string(),
    }
}
