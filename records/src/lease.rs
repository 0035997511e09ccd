//! Lease rules owned by the client: expiry math and room occupancy.
//!
//! DESIGN
//! ======
//! The backend stores lease dates as `YYYY-MM-DD` strings. Everything here
//! takes "today" as an argument so the rules stay deterministic; the UI
//! supplies the browser's local date.
//!
//! A room may hold at most one open lease (`draft` or `active`). The backend
//! schema was never relied on for this: `ensure_room_free` is checked before
//! every lease insert.

#[cfg(test)]
#[path = "lease_test.rs"]
mod lease_test;

use time::macros::format_description;
use time::{Date, Duration};

use crate::model::{Lease, LeaseStatus};

/// Default look-ahead for "expiring soon" lists and banners.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

/// Creating a lease would give a room a second open lease.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("A room can only have one active contract.")]
pub struct LeaseConflict {
    pub room_id: String,
    pub existing_lease_id: String,
}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), &format_description!("[year]-[month]-[day]")).ok()
}

/// Whole days from `today` until `end` (negative once past).
#[must_use]
pub fn days_until(end: Date, today: Date) -> i64 {
    (end - today).whole_days()
}

/// Days until the lease's end date, or `None` if the stored date is malformed.
#[must_use]
pub fn days_until_expiry(lease: &Lease, today: Date) -> Option<i64> {
    parse_date(&lease.end_date).map(|end| days_until(end, today))
}

/// An active lease ending within `window_days` (today inclusive).
#[must_use]
pub fn is_expiring_soon(lease: &Lease, today: Date, window_days: i64) -> bool {
    lease.status == LeaseStatus::Active
        && days_until_expiry(lease, today).is_some_and(|d| (0..=window_days).contains(&d))
}

/// Leases expiring within the window, preserving input order.
#[must_use]
pub fn expiring_leases(leases: &[Lease], today: Date, window_days: i64) -> Vec<Lease> {
    leases
        .iter()
        .filter(|l| is_expiring_soon(l, today, window_days))
        .cloned()
        .collect()
}

/// Inclusive `(from, to)` date bounds for an expiring-leases query.
#[must_use]
pub fn expiry_window(today: Date, window_days: i64) -> (String, String) {
    let end = today.checked_add(Duration::days(window_days)).unwrap_or(today);
    (today.to_string(), end.to_string())
}

/// Refuse a new lease on a room that already has an open one.
///
/// `editing` excludes the lease being edited from the check.
///
/// # Errors
///
/// Returns [`LeaseConflict`] naming the first open lease found on the room.
pub fn ensure_room_free(room_id: &str, existing: &[Lease], editing: Option<&str>) -> Result<(), LeaseConflict> {
    let conflict = existing
        .iter()
        .filter(|l| l.room_id == room_id)
        .filter(|l| editing != Some(l.id.as_str()))
        .find(|l| l.status.is_open());
    match conflict {
        Some(lease) => Err(LeaseConflict { room_id: room_id.to_owned(), existing_lease_id: lease.id.clone() }),
        None => Ok(()),
    }
}

/// "Expiring in N days" banner text.
#[must_use]
pub fn expiry_banner(days: i64) -> String {
    if days == 1 {
        "Expiring in 1 day".to_owned()
    } else {
        format!("Expiring in {days} days")
    }
}
