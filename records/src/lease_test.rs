use super::*;
use crate::model::PaymentFrequency;
use time::macros::date;

fn lease(id: &str, room_id: &str, status: LeaseStatus, end_date: &str) -> Lease {
    Lease {
        id: id.to_owned(),
        client_id: "c1".to_owned(),
        room_id: room_id.to_owned(),
        tenant_id: "t1".to_owned(),
        lease_number: None,
        start_date: "2025-01-01".to_owned(),
        end_date: end_date.to_owned(),
        rent_amount: 1000.0,
        deposit_amount: None,
        payment_due_day: 1,
        payment_frequency: PaymentFrequency::Monthly,
        contract_url: None,
        status,
        notes: None,
        tenants: None,
        rooms: None,
    }
}

// =============================================================================
// dates
// =============================================================================

#[test]
fn parse_date_accepts_iso_and_trims() {
    assert_eq!(parse_date(" 2025-03-09 "), Some(date!(2025 - 03 - 09)));
}

#[test]
fn parse_date_rejects_other_layouts() {
    assert_eq!(parse_date("03/09/2025"), None);
    assert_eq!(parse_date("2025-13-01"), None);
    assert_eq!(parse_date(""), None);
}

#[test]
fn days_until_counts_whole_days() {
    let today = date!(2025 - 01 - 30);
    assert_eq!(days_until(date!(2025 - 02 - 01), today), 2);
    assert_eq!(days_until(today, today), 0);
    assert_eq!(days_until(date!(2025 - 01 - 29), today), -1);
}

#[test]
fn expiry_window_spans_inclusive_bounds() {
    let (from, to) = expiry_window(date!(2025 - 12 - 15), 30);
    assert_eq!(from, "2025-12-15");
    assert_eq!(to, "2026-01-14");
}

// =============================================================================
// expiring
// =============================================================================

#[test]
fn active_lease_inside_window_is_expiring() {
    let today = date!(2025 - 06 - 01);
    assert!(is_expiring_soon(&lease("l1", "r1", LeaseStatus::Active, "2025-06-01"), today, 30));
    assert!(is_expiring_soon(&lease("l1", "r1", LeaseStatus::Active, "2025-07-01"), today, 30));
}

#[test]
fn lease_outside_window_or_past_is_not_expiring() {
    let today = date!(2025 - 06 - 01);
    assert!(!is_expiring_soon(&lease("l1", "r1", LeaseStatus::Active, "2025-07-02"), today, 30));
    assert!(!is_expiring_soon(&lease("l1", "r1", LeaseStatus::Active, "2025-05-31"), today, 30));
}

#[test]
fn non_active_lease_is_never_expiring() {
    let today = date!(2025 - 06 - 01);
    assert!(!is_expiring_soon(&lease("l1", "r1", LeaseStatus::Draft, "2025-06-10"), today, 30));
    assert!(!is_expiring_soon(&lease("l1", "r1", LeaseStatus::Terminated, "2025-06-10"), today, 30));
}

#[test]
fn malformed_end_date_is_not_expiring() {
    let today = date!(2025 - 06 - 01);
    let l = lease("l1", "r1", LeaseStatus::Active, "soon");
    assert_eq!(days_until_expiry(&l, today), None);
    assert!(!is_expiring_soon(&l, today, 30));
}

#[test]
fn expiring_leases_keeps_input_order() {
    let today = date!(2025 - 06 - 01);
    let leases = vec![
        lease("a", "r1", LeaseStatus::Active, "2025-06-20"),
        lease("b", "r2", LeaseStatus::Active, "2026-01-01"),
        lease("c", "r3", LeaseStatus::Active, "2025-06-05"),
    ];
    let ids: Vec<_> = expiring_leases(&leases, today, EXPIRY_WINDOW_DAYS)
        .into_iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[test]
fn expiry_banner_pluralizes() {
    assert_eq!(expiry_banner(1), "Expiring in 1 day");
    assert_eq!(expiry_banner(0), "Expiring in 0 days");
    assert_eq!(expiry_banner(12), "Expiring in 12 days");
}

// =============================================================================
// ensure_room_free
// =============================================================================

#[test]
fn room_without_leases_is_free() {
    assert_eq!(ensure_room_free("r1", &[], None), Ok(()));
}

#[test]
fn closed_leases_do_not_block_room() {
    let leases = vec![
        lease("l1", "r1", LeaseStatus::Expired, "2024-01-01"),
        lease("l2", "r1", LeaseStatus::Terminated, "2024-06-01"),
        lease("l3", "r1", LeaseStatus::Renewed, "2024-09-01"),
    ];
    assert_eq!(ensure_room_free("r1", &leases, None), Ok(()));
}

#[test]
fn open_lease_on_same_room_conflicts() {
    let leases = vec![lease("l1", "r1", LeaseStatus::Draft, "2026-01-01")];
    let err = ensure_room_free("r1", &leases, None).unwrap_err();
    assert_eq!(err.existing_lease_id, "l1");
    assert_eq!(err.to_string(), "A room can only have one active contract.");
}

#[test]
fn open_lease_on_other_room_is_ignored() {
    let leases = vec![lease("l1", "r2", LeaseStatus::Active, "2026-01-01")];
    assert_eq!(ensure_room_free("r1", &leases, None), Ok(()));
}

#[test]
fn edited_lease_does_not_conflict_with_itself() {
    let leases = vec![lease("l1", "r1", LeaseStatus::Active, "2026-01-01")];
    assert_eq!(ensure_room_free("r1", &leases, Some("l1")), Ok(()));
}
