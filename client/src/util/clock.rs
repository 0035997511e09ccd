//! Wall-clock reads for session expiry and lease dates.
//!
//! In the browser the clock comes from `js_sys::Date` (the local calendar
//! date for lease math). Outside the browser it falls back to the system
//! clock in UTC.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use time::{Date, Month, OffsetDateTime};

/// Current Unix time in seconds.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn now_unix_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        OffsetDateTime::now_utc().unix_timestamp()
    }
}

/// Today's calendar date.
#[must_use]
pub fn today() -> Date {
    #[cfg(feature = "hydrate")]
    {
        let now = js_sys::Date::new_0();
        calendar_date(now.get_full_year(), now.get_month() + 1, now.get_date())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        OffsetDateTime::now_utc().date()
    }
}

/// Build a date from browser calendar parts (1-based month), falling back to
/// the Unix epoch for out-of-range input.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn calendar_date(year: u32, month: u32, day: u32) -> Date {
    let epoch = OffsetDateTime::UNIX_EPOCH.date();
    let Ok(month) = Month::try_from(month as u8) else {
        return epoch;
    };
    Date::from_calendar_date(year as i32, month, day as u8).unwrap_or(epoch)
}
