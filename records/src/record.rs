//! Keyed field access for rows shown in pickers and searchable lists.
//!
//! DESIGN
//! ======
//! Pickers name a display column by key (`"name"`, `"phone"`) or derive the
//! text with a closure. `Record::field` is the key half of that: it maps a
//! column name to its display text, returning `None` for unknown keys and
//! null columns so callers can treat both as empty.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use crate::model::{AvailableRoom, Building, Lease, Room, Tenant, UserProfile};

/// A row with a stable identifier and keyed display fields.
pub trait Record {
    /// Unique identifier of the row.
    fn id(&self) -> &str;

    /// Display text of the named column, or `None` if unknown or null.
    fn field(&self, key: &str) -> Option<String>;
}

fn opt(value: Option<&String>) -> Option<String> {
    value.cloned()
}

fn num<T: ToString>(value: Option<T>) -> Option<String> {
    value.map(|v| v.to_string())
}

impl Record for Building {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "address" => Some(self.address.clone()),
            "city" => Some(self.city.clone()),
            "state" => opt(self.state.as_ref()),
            "country" => Some(self.country.clone()),
            "postal_code" => opt(self.postal_code.as_ref()),
            "description" => opt(self.description.as_ref()),
            "total_floors" => Some(self.total_floors.to_string()),
            "total_rooms" => Some(self.total_rooms.to_string()),
            "year_built" => num(self.year_built),
            "building_type" => Some(self.building_type.as_str().to_owned()),
            "status" => Some(self.status.as_str().to_owned()),
            _ => None,
        }
    }
}

impl Record for Room {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "id" => Some(self.id.clone()),
            "building_id" => Some(self.building_id.clone()),
            "room_number" => Some(self.room_number.clone()),
            "floor_number" => num(self.floor_number),
            "room_type" => Some(self.room_type.as_str().to_owned()),
            "bedrooms" => Some(self.bedrooms.to_string()),
            "bathrooms" => Some(self.bathrooms.to_string()),
            "description" => opt(self.description.as_ref()),
            "rent_amount" => Some(self.rent_amount.to_string()),
            "currency" => Some(self.currency.clone()),
            "status" => Some(self.status.as_str().to_owned()),
            _ => None,
        }
    }
}

impl Record for AvailableRoom {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "id" => Some(self.id.clone()),
            "room_number" => Some(self.room_number.clone()),
            "room_type" => Some(self.room_type.clone()),
            "rent_amount" => Some(self.rent_amount.to_string()),
            "building_name" => Some(self.building_name.clone()),
            "building_address" => Some(self.building_address.clone()),
            "building_city" => Some(self.building_city.clone()),
            "available_from" => opt(self.available_from.as_ref()),
            _ => None,
        }
    }
}

impl Record for Tenant {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "id" => Some(self.id.clone()),
            "first_name" => Some(self.first_name.clone()),
            "last_name" => Some(self.last_name.clone()),
            "full_name" => Some(self.full_name()),
            "email" => opt(self.email.as_ref()),
            "phone" => Some(self.phone.clone()),
            "national_id" => opt(self.national_id.as_ref()),
            "occupation" => opt(self.occupation.as_ref()),
            "employer" => opt(self.employer.as_ref()),
            "status" => Some(self.status.as_str().to_owned()),
            _ => None,
        }
    }
}

impl Record for Lease {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "id" => Some(self.id.clone()),
            "lease_number" => opt(self.lease_number.as_ref()),
            "start_date" => Some(self.start_date.clone()),
            "end_date" => Some(self.end_date.clone()),
            "status" => Some(self.status.as_str().to_owned()),
            "tenant_name" => self.tenant_name(),
            "room_label" => self.room_label(),
            _ => None,
        }
    }
}

impl Record for UserProfile {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "id" => Some(self.id.clone()),
            "email" => Some(self.email.clone()),
            "full_name" => opt(self.full_name.as_ref()),
            "phone" => opt(self.phone.as_ref()),
            "role" => Some(self.role.as_str().to_owned()),
            _ => None,
        }
    }
}
