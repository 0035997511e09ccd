use super::*;

#[test]
fn confirm_is_false_off_browser() {
    assert!(!confirm("Delete?"));
}

#[test]
fn money_groups_thousands() {
    assert_eq!(money("USD", 1200.0), "USD 1,200.00");
    assert_eq!(money("EUR", 1_234_567.5), "EUR 1,234,567.50");
}

#[test]
fn money_handles_small_and_negative_amounts() {
    assert_eq!(money("USD", 0.0), "USD 0.00");
    assert_eq!(money("USD", 999.999), "USD 1,000.00");
    assert_eq!(money("USD", -50.25), "USD -50.25");
}
