//! Row-to-entity parsing helpers.
//!
//! Rows come back column-indexed. These helpers isolate the parsing of TEXT
//! columns into typed values and accept both timestamp formats that may be
//! found in a `tasks` file: RFC 3339 UTC (written by this crate) and the
//! plain `YYYY-MM-DD HH:MM:SS` form, which older files hold in local time.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::DatabaseError;

/// Format a timestamp the way `created_date` is stored.
///
/// Second precision with a `Z` suffix.
#[must_use]
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// SQL expression ordering rows by creation instant.
///
/// Text order is wrong once both formats share a table (a space sorts
/// before `T`), so both are converted to Julian days; plain stamps are
/// shifted from local time first, matching [`parse_datetime`].
pub const CREATED_INSTANT_SQL: &str = "CASE WHEN instr(created_date, 'T') > 0 \
     THEN julianday(created_date) \
     ELSE julianday(created_date, 'utc') END";

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// A plain `YYYY-MM-DD HH:MM:SS` stamp is read as local time. A local time
/// skipped by a DST change is read as UTC.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string matches neither format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))?;
    Ok(Local
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc)))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}
