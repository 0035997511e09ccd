//! Row types for the backend tables and views.
//!
//! DESIGN
//! ======
//! Field names match the database columns so rows deserialize straight from
//! the REST responses. Nullable columns are `Option`; timestamps are kept as
//! the ISO strings the backend returns. `New*` types are insert/update
//! payloads and omit the server-assigned columns.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// ENUMS
// =============================================================================

/// Role of a signed-in user inside their client organisation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    User,
}

impl UserRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::User => "user",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    #[default]
    Residential,
    Commercial,
    Mixed,
}

impl BuildingType {
    pub const ALL: [Self; 3] = [Self::Residential, Self::Commercial, Self::Mixed];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Mixed => "mixed",
        }
    }

    /// Parse a wire value, falling back to residential for unknown input.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::ALL.into_iter().find(|t| t.as_str() == raw).unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingStatus {
    #[default]
    Active,
    Inactive,
    UnderConstruction,
    Maintenance,
}

impl BuildingStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::UnderConstruction => "under_construction",
            Self::Maintenance => "maintenance",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "studio")]
    Studio,
    #[default]
    #[serde(rename = "1bedroom")]
    OneBedroom,
    #[serde(rename = "2bedroom")]
    TwoBedroom,
    #[serde(rename = "3bedroom")]
    ThreeBedroom,
    #[serde(rename = "penthouse")]
    Penthouse,
    #[serde(rename = "other")]
    Other,
}

impl RoomType {
    pub const ALL: [Self; 6] = [
        Self::Studio,
        Self::OneBedroom,
        Self::TwoBedroom,
        Self::ThreeBedroom,
        Self::Penthouse,
        Self::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Studio => "studio",
            Self::OneBedroom => "1bedroom",
            Self::TwoBedroom => "2bedroom",
            Self::ThreeBedroom => "3bedroom",
            Self::Penthouse => "penthouse",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Studio => "Studio",
            Self::OneBedroom => "1 Bedroom",
            Self::TwoBedroom => "2 Bedrooms",
            Self::ThreeBedroom => "3 Bedrooms",
            Self::Penthouse => "Penthouse",
            Self::Other => "Other",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::ALL.into_iter().find(|t| t.as_str() == raw).unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
    Reserved,
}

impl RoomStatus {
    pub const ALL: [Self; 4] = [Self::Available, Self::Occupied, Self::Maintenance, Self::Reserved];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
            Self::Reserved => "reserved",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::ALL.into_iter().find(|s| s.as_str() == raw).unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    #[default]
    Active,
    Inactive,
    Blacklisted,
}

impl TenantStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Blacklisted];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Blacklisted => "blacklisted",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::ALL.into_iter().find(|s| s.as_str() == raw).unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl PaymentFrequency {
    pub const ALL: [Self; 5] = [Self::Weekly, Self::Biweekly, Self::Monthly, Self::Quarterly, Self::Yearly];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::ALL.into_iter().find(|f| f.as_str() == raw).unwrap_or_default()
    }
}

/// Lifecycle of a lease contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStatus {
    #[default]
    Draft,
    Active,
    Expired,
    Terminated,
    Renewed,
}

impl LeaseStatus {
    pub const ALL: [Self; 5] = [Self::Draft, Self::Active, Self::Expired, Self::Terminated, Self::Renewed];

    /// Statuses offered as manual transitions on the contract details screen.
    pub const SETTABLE: [Self; 4] = [Self::Draft, Self::Active, Self::Expired, Self::Terminated];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Terminated => "terminated",
            Self::Renewed => "renewed",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    /// A lease that still occupies its room.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Draft | Self::Active)
    }

    /// Badge color used by lease lists and details.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Draft => "#9E9E9E",
            Self::Active => "#4CAF50",
            Self::Expired => "#FF9800",
            Self::Terminated => "#F44336",
            Self::Renewed => "#2196F3",
        }
    }
}

// =============================================================================
// USER PROFILE
// =============================================================================

/// Application-level profile row linked 1:1 with an auth user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub client_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
}

// =============================================================================
// BUILDINGS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub total_floors: i32,
    pub total_rooms: i32,
    pub year_built: Option<i32>,
    #[serde(default)]
    pub building_type: BuildingType,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: BuildingStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Insert/update payload for `buildings`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewBuilding {
    pub client_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub total_floors: i32,
    pub total_rooms: i32,
    pub year_built: Option<i32>,
    pub building_type: BuildingType,
    pub status: BuildingStatus,
    pub amenities: Option<Vec<String>>,
    pub image_url: Option<String>,
}

// =============================================================================
// ROOMS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub client_id: String,
    pub building_id: String,
    pub room_number: String,
    pub floor_number: Option<i32>,
    #[serde(default)]
    pub room_type: RoomType,
    pub area_sqft: Option<f64>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub description: Option<String>,
    pub rent_amount: f64,
    pub deposit_amount: Option<f64>,
    pub currency: String,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    #[serde(default)]
    pub status: RoomStatus,
    #[serde(default)]
    pub available_from: Option<String>,
}

/// Insert/update payload for `rooms`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewRoom {
    pub client_id: String,
    pub building_id: String,
    pub room_number: String,
    pub floor_number: Option<i32>,
    pub room_type: RoomType,
    pub area_sqft: Option<f64>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub description: Option<String>,
    pub rent_amount: f64,
    pub deposit_amount: Option<f64>,
    pub currency: String,
    pub status: RoomStatus,
}

/// Row of the `available_rooms_view` view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvailableRoom {
    pub id: String,
    pub client_id: String,
    pub room_number: String,
    pub floor_number: Option<i32>,
    pub room_type: String,
    pub area_sqft: Option<f64>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub rent_amount: f64,
    pub available_from: Option<String>,
    pub building_name: String,
    pub building_address: String,
    pub building_city: String,
}

// =============================================================================
// TENANTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub client_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: Option<String>,
    pub national_id: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub current_address: Option<String>,
    pub occupation: Option<String>,
    pub employer: Option<String>,
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub status: TenantStatus,
    pub notes: Option<String>,
}

impl Tenant {
    /// "First Last", as shown in pickers and lists.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Insert/update payload for `tenants`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTenant {
    pub client_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: Option<String>,
    pub national_id: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub current_address: Option<String>,
    pub occupation: Option<String>,
    pub employer: Option<String>,
    pub monthly_income: Option<f64>,
    pub status: TenantStatus,
    pub notes: Option<String>,
}

// =============================================================================
// LEASES
// =============================================================================

/// Tenant columns embedded in a lease query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaseTenant {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

/// Building columns embedded in a lease's room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaseBuilding {
    pub name: String,
}

/// Room columns embedded in a lease query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaseRoom {
    pub room_number: String,
    #[serde(default)]
    pub buildings: Option<LeaseBuilding>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    pub id: String,
    pub client_id: String,
    pub room_id: String,
    pub tenant_id: String,
    pub lease_number: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub rent_amount: f64,
    pub deposit_amount: Option<f64>,
    pub payment_due_day: u8,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    #[serde(default)]
    pub contract_url: Option<String>,
    #[serde(default)]
    pub status: LeaseStatus,
    pub notes: Option<String>,
    /// Present only when the query embeds `tenants(...)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenants: Option<LeaseTenant>,
    /// Present only when the query embeds `rooms(...)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<LeaseRoom>,
}

impl Lease {
    /// Tenant display name from the embedded join, if loaded.
    #[must_use]
    pub fn tenant_name(&self) -> Option<String> {
        self.tenants
            .as_ref()
            .map(|t| format!("{} {}", t.first_name, t.last_name))
    }

    /// "Building - Room N" from the embedded join, if loaded.
    #[must_use]
    pub fn room_label(&self) -> Option<String> {
        self.rooms.as_ref().map(|room| {
            let building = room.buildings.as_ref().map_or("", |b| b.name.as_str());
            format!("{building} - Room {}", room.room_number)
        })
    }
}

/// Insert/update payload for `leases`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewLease {
    pub client_id: String,
    pub room_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub lease_number: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub rent_amount: f64,
    pub deposit_amount: Option<f64>,
    pub payment_due_day: u8,
    pub payment_frequency: PaymentFrequency,
    pub status: LeaseStatus,
    pub notes: Option<String>,
}

/// Partial update that only changes a lease's status.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LeaseStatusUpdate {
    pub status: LeaseStatus,
}
