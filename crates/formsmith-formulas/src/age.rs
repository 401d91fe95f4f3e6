// File: formsmith-formulas/src/age.rs
// Purpose: Calendar date parsing and age arithmetic for age_from_dob

use crate::error::DerivationError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use formsmith_types::Value;

/// Read a date out of a field value.
///
/// Accepts `YYYY-MM-DD` (what date inputs report), RFC 3339 timestamps and
/// naive `YYYY-MM-DDTHH:MM[:SS]` timestamps. Numbers are Unix epoch
/// milliseconds.
pub fn parse_date(value: &Value) -> Result<NaiveDate, DerivationError> {
    let invalid = || DerivationError::InvalidDate {
        value: value.to_string(),
    };

    match value {
        Value::Text(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
                .or_else(|| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
                        .ok()
                        .map(|dt| dt.date())
                })
                .ok_or_else(invalid)
        }
        Value::Number(millis) if millis.is_finite() => {
            DateTime::<Utc>::from_timestamp_millis(*millis as i64)
                .map(|dt| dt.date_naive())
                .ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

/// Whole calendar years from `birth` to `today`.
///
/// The year difference drops by one until the birthday has come round in
/// `today`'s year. A birth date after `today` gives a negative age.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years - 1
    } else {
        years
    }
}
