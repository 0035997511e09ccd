use super::*;

#[test]
fn calendar_date_builds_valid_dates() {
    let date = calendar_date(2025, 2, 28);
    assert_eq!(date.to_string(), "2025-02-28");
}

#[test]
fn calendar_date_falls_back_on_invalid_parts() {
    assert_eq!(calendar_date(2025, 13, 1), OffsetDateTime::UNIX_EPOCH.date());
    assert_eq!(calendar_date(2025, 2, 30), OffsetDateTime::UNIX_EPOCH.date());
}

#[test]
fn now_is_after_2020() {
    assert!(now_unix_secs() > 1_577_836_800);
    assert!(today().year() >= 2020);
}
