use super::*;

fn sample_lease() -> Lease {
    Lease {
        id: "l1".to_owned(),
        client_id: "c1".to_owned(),
        room_id: "r1".to_owned(),
        tenant_id: "t1".to_owned(),
        lease_number: Some("LEASE-001".to_owned()),
        start_date: "2025-01-01".to_owned(),
        end_date: "2025-12-31".to_owned(),
        rent_amount: 1200.0,
        deposit_amount: None,
        payment_due_day: 1,
        payment_frequency: PaymentFrequency::Monthly,
        contract_url: None,
        status: LeaseStatus::Active,
        notes: None,
        tenants: None,
        rooms: None,
    }
}

#[test]
fn building_deserializes_with_missing_optional_columns() {
    let json = r#"{
        "id": "b1", "client_id": "c1", "name": "Maple Court", "address": "1 Main St",
        "city": "Springfield", "state": null, "country": "US", "postal_code": null,
        "description": null, "total_floors": 4, "total_rooms": 16, "year_built": 1998,
        "building_type": "mixed", "status": "under_construction"
    }"#;
    let building: Building = serde_json::from_str(json).expect("building");
    assert_eq!(building.building_type, BuildingType::Mixed);
    assert_eq!(building.status, BuildingStatus::UnderConstruction);
    assert_eq!(building.amenities, None);
    assert_eq!(building.created_at, None);
}

#[test]
fn room_type_uses_numeric_wire_names() {
    let json = serde_json::to_value(RoomType::TwoBedroom).expect("room type");
    assert_eq!(json, serde_json::json!("2bedroom"));
    let parsed: RoomType = serde_json::from_str("\"1bedroom\"").expect("parse");
    assert_eq!(parsed, RoomType::OneBedroom);
}

#[test]
fn room_type_parse_falls_back_to_default() {
    assert_eq!(RoomType::parse("penthouse"), RoomType::Penthouse);
    assert_eq!(RoomType::parse("castle"), RoomType::OneBedroom);
}

#[test]
fn lease_status_open_covers_draft_and_active_only() {
    let open: Vec<_> = LeaseStatus::ALL.into_iter().filter(|s| s.is_open()).collect();
    assert_eq!(open, vec![LeaseStatus::Draft, LeaseStatus::Active]);
}

#[test]
fn lease_status_parse_rejects_unknown() {
    assert_eq!(LeaseStatus::parse("terminated"), Some(LeaseStatus::Terminated));
    assert_eq!(LeaseStatus::parse("paused"), None);
}

#[test]
fn lease_deserializes_embedded_joins() {
    let json = r#"{
        "id": "l1", "client_id": "c1", "room_id": "r1", "tenant_id": "t1",
        "lease_number": null, "start_date": "2025-01-01", "end_date": "2025-06-30",
        "rent_amount": 950.5, "deposit_amount": 500, "payment_due_day": 5,
        "payment_frequency": "quarterly", "status": "draft", "notes": null,
        "tenants": {"first_name": "Alice", "last_name": "Smith", "phone": "555-0001"},
        "rooms": {"room_number": "2B", "buildings": {"name": "Maple Court"}}
    }"#;
    let lease: Lease = serde_json::from_str(json).expect("lease");
    assert_eq!(lease.payment_frequency, PaymentFrequency::Quarterly);
    assert_eq!(lease.tenant_name().as_deref(), Some("Alice Smith"));
    assert_eq!(lease.room_label().as_deref(), Some("Maple Court - Room 2B"));
}

#[test]
fn lease_labels_absent_without_joins() {
    let lease = sample_lease();
    assert_eq!(lease.tenant_name(), None);
    assert_eq!(lease.room_label(), None);
}

#[test]
fn new_lease_omits_tenant_when_unchanged() {
    let payload = NewLease {
        client_id: "c1".to_owned(),
        room_id: "r1".to_owned(),
        tenant_id: None,
        lease_number: None,
        start_date: "2025-01-01".to_owned(),
        end_date: "2025-12-31".to_owned(),
        rent_amount: 1000.0,
        deposit_amount: None,
        payment_due_day: 1,
        payment_frequency: PaymentFrequency::Monthly,
        status: LeaseStatus::Draft,
        notes: None,
    };
    let json = serde_json::to_value(&payload).expect("payload");
    assert!(json.get("tenant_id").is_none());
    assert_eq!(json["status"], "draft");
}

#[test]
fn tenant_full_name_joins_names() {
    let tenant: Tenant = serde_json::from_value(serde_json::json!({
        "id": "t1", "client_id": "c1", "first_name": "Bob", "last_name": "Jones",
        "email": null, "phone": "555-0002", "date_of_birth": null, "national_id": null,
        "emergency_contact_name": null, "emergency_contact_phone": null,
        "current_address": null, "occupation": null, "employer": null,
        "monthly_income": null, "notes": null
    }))
    .expect("tenant");
    assert_eq!(tenant.full_name(), "Bob Jones");
    assert_eq!(tenant.status, TenantStatus::Active);
}

#[test]
fn room_status_parse_falls_back_to_available() {
    assert_eq!(RoomStatus::parse("maintenance"), RoomStatus::Maintenance);
    assert_eq!(RoomStatus::parse("demolished"), RoomStatus::Available);
}

#[test]
fn tenant_status_parse_round_trips_known_values() {
    for status in TenantStatus::ALL {
        assert_eq!(TenantStatus::parse(status.as_str()), status);
    }
    assert_eq!(TenantStatus::parse(""), TenantStatus::Active);
}
