//! Form drafts and their validation into insert/update payloads.
//!
//! DESIGN
//! ======
//! Each screen edits a `*Draft` holding the raw text of its inputs. Submitting
//! calls `validate`, which checks fields in the order the screen shows its
//! errors and either returns the first `FormError` or a typed payload ready
//! for the data service. Blank optional text becomes `None`.
//!
//! ERROR HANDLING
//! ==============
//! `FormError`'s `Display` is the exact message shown above the form.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use crate::lease::parse_date;
use crate::model::{
    BuildingStatus, BuildingType, LeaseStatus, NewBuilding, NewLease, NewRoom, NewTenant, PaymentFrequency, RoomStatus,
    RoomType, TenantStatus,
};

/// Minimum accepted password length on sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please enter email and password")]
    MissingCredentials,
    #[error("Please fill in all required fields")]
    MissingRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Please enter your email address")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("First name is required")]
    MissingFirstName,
    #[error("Last name is required")]
    MissingLastName,
    #[error("Phone number is required")]
    MissingPhone,
    #[error("Please fill in all required fields (start date, end date, rent amount)")]
    MissingLeaseFields,
    #[error("Please select a tenant")]
    MissingTenant,
    #[error("Dates must use the YYYY-MM-DD format")]
    InvalidDate,
    #[error("End date must be after start date")]
    EndBeforeStart,
    #[error("Payment due day must be between 1 and 31")]
    InvalidDueDay,
    #[error("{field} must be a number")]
    InvalidNumber { field: &'static str },
}

fn blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn int(raw: &str, field: &'static str) -> Result<i32, FormError> {
    raw.trim().parse().map_err(|_| FormError::InvalidNumber { field })
}

fn float(raw: &str, field: &'static str) -> Result<f64, FormError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(FormError::InvalidNumber { field })
}

fn optional_int(raw: &str, field: &'static str) -> Result<Option<i32>, FormError> {
    if blank(raw) { Ok(None) } else { int(raw, field).map(Some) }
}

fn optional_float(raw: &str, field: &'static str) -> Result<Option<f64>, FormError> {
    if blank(raw) { Ok(None) } else { float(raw, field).map(Some) }
}

// =============================================================================
// AUTH
// =============================================================================

/// Validated sign-in input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    /// # Errors
    ///
    /// [`FormError::MissingCredentials`] when either field is blank.
    pub fn validate(&self) -> Result<Credentials, FormError> {
        if blank(&self.email) || self.password.is_empty() {
            return Err(FormError::MissingCredentials);
        }
        Ok(Credentials { email: self.email.trim().to_owned(), password: self.password.clone() })
    }
}

/// Validated sign-up input, including the profile metadata sent with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpDraft {
    /// # Errors
    ///
    /// Missing fields first, then mismatched confirmation, then short password.
    pub fn validate(&self) -> Result<Registration, FormError> {
        if blank(&self.full_name) || blank(&self.email) || self.password.is_empty() {
            return Err(FormError::MissingRequired);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort);
        }
        Ok(Registration {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_owned(),
            phone: optional(&self.phone),
        })
    }
}

/// # Errors
///
/// [`FormError::MissingEmail`] for a blank address.
pub fn validate_reset_email(email: &str) -> Result<String, FormError> {
    optional(email).ok_or(FormError::MissingEmail)
}

// =============================================================================
// BUILDINGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildingDraft {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub description: String,
    pub total_floors: String,
    pub total_rooms: String,
    pub year_built: String,
    pub building_type: BuildingType,
}

impl BuildingDraft {
    /// Draft pre-filled from an existing building for the edit screen.
    #[must_use]
    pub fn from_building(b: &crate::model::Building) -> Self {
        Self {
            name: b.name.clone(),
            address: b.address.clone(),
            city: b.city.clone(),
            state: b.state.clone().unwrap_or_default(),
            country: b.country.clone(),
            postal_code: b.postal_code.clone().unwrap_or_default(),
            description: b.description.clone().unwrap_or_default(),
            total_floors: b.total_floors.to_string(),
            total_rooms: b.total_rooms.to_string(),
            year_built: b.year_built.map(|y| y.to_string()).unwrap_or_default(),
            building_type: b.building_type,
        }
    }

    /// # Errors
    ///
    /// [`FormError::MissingRequired`] or [`FormError::InvalidNumber`].
    pub fn validate(&self, client_id: &str) -> Result<NewBuilding, FormError> {
        let required = [&self.name, &self.address, &self.city, &self.country, &self.total_floors, &self.total_rooms];
        if required.iter().any(|f| blank(f)) {
            return Err(FormError::MissingRequired);
        }
        Ok(NewBuilding {
            client_id: client_id.to_owned(),
            name: self.name.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: optional(&self.state),
            country: self.country.trim().to_owned(),
            postal_code: optional(&self.postal_code),
            description: optional(&self.description),
            total_floors: int(&self.total_floors, "Total floors")?,
            total_rooms: int(&self.total_rooms, "Total rooms")?,
            year_built: optional_int(&self.year_built, "Year built")?,
            building_type: self.building_type,
            status: BuildingStatus::Active,
            amenities: None,
            image_url: None,
        })
    }
}

// =============================================================================
// ROOMS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDraft {
    pub building_id: Option<String>,
    pub room_number: String,
    pub floor_number: String,
    pub room_type: RoomType,
    pub area_sqft: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub description: String,
    pub rent_amount: String,
    pub deposit_amount: String,
    pub currency: String,
    pub status: RoomStatus,
}

impl Default for RoomDraft {
    fn default() -> Self {
        Self {
            building_id: None,
            room_number: String::new(),
            floor_number: String::new(),
            room_type: RoomType::default(),
            area_sqft: String::new(),
            bedrooms: "1".to_owned(),
            bathrooms: "1".to_owned(),
            description: String::new(),
            rent_amount: String::new(),
            deposit_amount: String::new(),
            currency: "USD".to_owned(),
            status: RoomStatus::Available,
        }
    }
}

impl RoomDraft {
    #[must_use]
    pub fn from_room(r: &crate::model::Room) -> Self {
        Self {
            building_id: Some(r.building_id.clone()),
            room_number: r.room_number.clone(),
            floor_number: r.floor_number.map(|f| f.to_string()).unwrap_or_default(),
            room_type: r.room_type,
            area_sqft: r.area_sqft.map(|a| a.to_string()).unwrap_or_default(),
            bedrooms: r.bedrooms.to_string(),
            bathrooms: r.bathrooms.to_string(),
            description: r.description.clone().unwrap_or_default(),
            rent_amount: r.rent_amount.to_string(),
            deposit_amount: r.deposit_amount.map(|d| d.to_string()).unwrap_or_default(),
            currency: r.currency.clone(),
            status: r.status,
        }
    }

    /// # Errors
    ///
    /// [`FormError::MissingRequired`] (including no building picked) or
    /// [`FormError::InvalidNumber`].
    pub fn validate(&self, client_id: &str) -> Result<NewRoom, FormError> {
        let required = [&self.room_number, &self.bedrooms, &self.bathrooms, &self.rent_amount];
        if required.iter().any(|f| blank(f)) {
            return Err(FormError::MissingRequired);
        }
        let building_id = self.building_id.clone().ok_or(FormError::MissingRequired)?;
        Ok(NewRoom {
            client_id: client_id.to_owned(),
            building_id,
            room_number: self.room_number.trim().to_owned(),
            floor_number: optional_int(&self.floor_number, "Floor number")?,
            room_type: self.room_type,
            area_sqft: optional_float(&self.area_sqft, "Area")?,
            bedrooms: int(&self.bedrooms, "Bedrooms")?,
            bathrooms: int(&self.bathrooms, "Bathrooms")?,
            description: optional(&self.description),
            rent_amount: float(&self.rent_amount, "Rent amount")?,
            deposit_amount: optional_float(&self.deposit_amount, "Deposit amount")?,
            currency: optional(&self.currency).unwrap_or_else(|| "USD".to_owned()),
            status: self.status,
        })
    }
}

// =============================================================================
// TENANTS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub national_id: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub current_address: String,
    pub occupation: String,
    pub employer: String,
    pub monthly_income: String,
    pub status: TenantStatus,
    pub notes: String,
}

impl TenantDraft {
    #[must_use]
    pub fn from_tenant(t: &crate::model::Tenant) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            first_name: t.first_name.clone(),
            last_name: t.last_name.clone(),
            email: text(&t.email),
            phone: t.phone.clone(),
            date_of_birth: text(&t.date_of_birth),
            national_id: text(&t.national_id),
            emergency_contact_name: text(&t.emergency_contact_name),
            emergency_contact_phone: text(&t.emergency_contact_phone),
            current_address: text(&t.current_address),
            occupation: text(&t.occupation),
            employer: text(&t.employer),
            monthly_income: t.monthly_income.map(|m| m.to_string()).unwrap_or_default(),
            status: t.status,
            notes: text(&t.notes),
        }
    }

    /// # Errors
    ///
    /// One error per missing required field, in screen order, then email
    /// shape and numeric income.
    pub fn validate(&self, client_id: &str) -> Result<NewTenant, FormError> {
        if blank(&self.first_name) {
            return Err(FormError::MissingFirstName);
        }
        if blank(&self.last_name) {
            return Err(FormError::MissingLastName);
        }
        if blank(&self.phone) {
            return Err(FormError::MissingPhone);
        }
        let email = optional(&self.email);
        if email.as_ref().is_some_and(|e| !e.contains('@')) {
            return Err(FormError::InvalidEmail);
        }
        Ok(NewTenant {
            client_id: client_id.to_owned(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email,
            phone: self.phone.trim().to_owned(),
            date_of_birth: optional(&self.date_of_birth),
            national_id: optional(&self.national_id),
            emergency_contact_name: optional(&self.emergency_contact_name),
            emergency_contact_phone: optional(&self.emergency_contact_phone),
            current_address: optional(&self.current_address),
            occupation: optional(&self.occupation),
            employer: optional(&self.employer),
            monthly_income: optional_float(&self.monthly_income, "Monthly income")?,
            status: self.status,
            notes: optional(&self.notes),
        })
    }
}

// =============================================================================
// LEASES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseDraft {
    /// Chosen tenant; only required when creating.
    pub tenant_id: Option<String>,
    pub lease_number: String,
    pub start_date: String,
    pub end_date: String,
    pub rent_amount: String,
    pub deposit_amount: String,
    pub payment_due_day: String,
    pub payment_frequency: PaymentFrequency,
    pub status: LeaseStatus,
    pub notes: String,
}

impl Default for LeaseDraft {
    fn default() -> Self {
        Self {
            tenant_id: None,
            lease_number: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            rent_amount: String::new(),
            deposit_amount: String::new(),
            payment_due_day: "1".to_owned(),
            payment_frequency: PaymentFrequency::Monthly,
            status: LeaseStatus::Draft,
            notes: String::new(),
        }
    }
}

impl LeaseDraft {
    /// Draft for a new lease with rent and deposit defaulted from the room.
    #[must_use]
    pub fn for_room(room: &crate::model::Room) -> Self {
        Self {
            rent_amount: room.rent_amount.to_string(),
            deposit_amount: room.deposit_amount.map(|d| d.to_string()).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Draft pre-filled from an existing lease. The tenant is fixed on edit.
    #[must_use]
    pub fn from_lease(l: &crate::model::Lease) -> Self {
        Self {
            tenant_id: None,
            lease_number: l.lease_number.clone().unwrap_or_default(),
            start_date: l.start_date.clone(),
            end_date: l.end_date.clone(),
            rent_amount: l.rent_amount.to_string(),
            deposit_amount: l.deposit_amount.map(|d| d.to_string()).unwrap_or_default(),
            payment_due_day: l.payment_due_day.to_string(),
            payment_frequency: l.payment_frequency,
            status: l.status,
            notes: l.notes.clone().unwrap_or_default(),
        }
    }

    /// Validate for `room_id`. `creating` requires a tenant to be chosen.
    ///
    /// # Errors
    ///
    /// Missing required fields, missing tenant, malformed or inverted dates,
    /// out-of-range due day, or non-numeric amounts.
    pub fn validate(&self, client_id: &str, room_id: &str, creating: bool) -> Result<NewLease, FormError> {
        if blank(&self.start_date) || blank(&self.end_date) || blank(&self.rent_amount) {
            return Err(FormError::MissingLeaseFields);
        }
        if creating && self.tenant_id.is_none() {
            return Err(FormError::MissingTenant);
        }
        let start = parse_date(&self.start_date).ok_or(FormError::InvalidDate)?;
        let end = parse_date(&self.end_date).ok_or(FormError::InvalidDate)?;
        if end <= start {
            return Err(FormError::EndBeforeStart);
        }
        let due_day = self
            .payment_due_day
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|d| (1..=31).contains(d))
            .ok_or(FormError::InvalidDueDay)?;
        Ok(NewLease {
            client_id: client_id.to_owned(),
            room_id: room_id.to_owned(),
            tenant_id: if creating { self.tenant_id.clone() } else { None },
            lease_number: optional(&self.lease_number),
            start_date: start.to_string(),
            end_date: end.to_string(),
            rent_amount: float(&self.rent_amount, "Rent amount")?,
            deposit_amount: optional_float(&self.deposit_amount, "Deposit amount")?,
            payment_due_day: due_day,
            payment_frequency: self.payment_frequency,
            status: self.status,
            notes: optional(&self.notes),
        })
    }
}
