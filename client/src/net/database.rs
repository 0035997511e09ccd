//! Data client over the backend's PostgREST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every screen that lists, shows or edits buildings, rooms, tenants or
//! leases goes through `Database`. Row-level security on the backend scopes
//! rows to the signed-in user's client; the `client_id` filters here only
//! narrow list queries.
//!
//! DESIGN
//! ======
//! - `RestQuery` renders PostgREST filter syntax (`col=eq.value`) with
//!   percent-encoded values.
//! - Single-row reads ask for the object representation; the backend answers
//!   406 when no row matches, surfaced as `BackendError::NotFound`.
//! - Writes ask for `return=representation` so callers get the stored row.
//! - Requests carry the session's bearer token, or the anon key when signed
//!   out.
//!
//! ERROR HANDLING
//! ==============
//! Lease creation checks the room's existing leases first and refuses with
//! `BackendError::Conflict` when one is still open.

#[cfg(test)]
#[path = "database_test.rs"]
mod database_test;

use std::sync::Arc;

use records::lease::{ensure_room_free, expiry_window};
use records::{
    AvailableRoom, Building, Lease, LeaseStatus, LeaseStatusUpdate, NewBuilding, NewLease, NewRoom, NewTenant, Room,
    RoomStatus, Tenant, UserProfile,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use time::Date;

use super::error::BackendError;
use super::supabase::SupabaseConfig;
use super::supabase_auth::SupabaseAuth;
use super::transport::{ApiRequest, ApiResponse, Method, Transport};

const OBJECT_ACCEPT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Lease columns plus the tenant and room/building joins shown in lists.
pub const LEASE_SELECT: &str = "*,tenants(first_name,last_name,phone),rooms(room_number,buildings(name))";

// =============================================================================
// QUERY
// =============================================================================

/// PostgREST query-string builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestQuery {
    params: Vec<(String, String)>,
}

impl RestQuery {
    #[must_use]
    pub fn select(columns: &str) -> Self {
        Self { params: vec![("select".to_owned(), columns.to_owned())] }
    }

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn filter(mut self, column: &str, op: &str, value: &str) -> Self {
        self.params.push((column.to_owned(), format!("{op}.{value}")));
        self
    }

    #[must_use]
    pub fn eq(self, column: &str, value: &str) -> Self {
        self.filter(column, "eq", value)
    }

    #[must_use]
    pub fn gte(self, column: &str, value: &str) -> Self {
        self.filter(column, "gte", value)
    }

    #[must_use]
    pub fn lte(self, column: &str, value: &str) -> Self {
        self.filter(column, "lte", value)
    }

    #[must_use]
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.params.push(("order".to_owned(), format!("{column}.{dir}")));
        self
    }

    /// Rendered query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct Database {
    config: SupabaseConfig,
    transport: Arc<dyn Transport>,
    auth: SupabaseAuth,
}

impl Database {
    pub fn new(config: SupabaseConfig, transport: Arc<dyn Transport>, auth: SupabaseAuth) -> Self {
        Self { config, transport, auth }
    }

    /// The auth client whose session authorizes these requests.
    #[must_use]
    pub fn auth(&self) -> &SupabaseAuth {
        &self.auth
    }

    fn request(&self, method: Method, resource: &str, query: &RestQuery) -> Result<ApiRequest, BackendError> {
        if !self.config.is_configured() {
            return Err(BackendError::NotConfigured);
        }
        let mut url = self.config.rest_endpoint(resource);
        let qs = query.to_query_string();
        if !qs.is_empty() {
            url.push('?');
            url.push_str(&qs);
        }
        let bearer = self.auth.access_token().unwrap_or_else(|| self.config.anon_key.clone());
        Ok(ApiRequest::new(method, url)
            .header("apikey", self.config.anon_key.clone())
            .header("Authorization", format!("Bearer {bearer}")))
    }

    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, BackendError> {
        let resp = self.transport.send(req).await?;
        if resp.status == 406 {
            return Err(BackendError::NotFound);
        }
        let resp = resp.error_for_status();
        if let Err(e) = &resp {
            log::warn!("data request failed: {} {e}", e.error_code());
        }
        resp
    }

    async fn fetch_all<T: DeserializeOwned>(&self, resource: &str, query: RestQuery) -> Result<Vec<T>, BackendError> {
        let req = self.request(Method::Get, resource, &query)?;
        self.send(req).await?.json()
    }

    async fn fetch_one<T: DeserializeOwned>(&self, resource: &str, query: RestQuery) -> Result<T, BackendError> {
        let req = self.request(Method::Get, resource, &query)?.header("Accept", OBJECT_ACCEPT);
        self.send(req).await?.json()
    }

    async fn insert<B: Serialize, T: DeserializeOwned>(&self, resource: &str, body: &B) -> Result<T, BackendError> {
        let req = self
            .request(Method::Post, resource, &RestQuery::select("*"))?
            .header("Accept", OBJECT_ACCEPT)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(to_json(body)?);
        self.send(req).await?.json()
    }

    async fn update<B: Serialize, T: DeserializeOwned>(&self, resource: &str, id: &str, body: &B) -> Result<T, BackendError> {
        let req = self
            .request(Method::Patch, resource, &RestQuery::select("*").eq("id", id))?
            .header("Accept", OBJECT_ACCEPT)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(to_json(body)?);
        self.send(req).await?.json()
    }

    async fn delete(&self, resource: &str, id: &str) -> Result<(), BackendError> {
        let req = self.request(Method::Delete, resource, &RestQuery::new().eq("id", id))?;
        self.send(req).await.map(|_| ())
    }

    // -------------------------------------------------------------------------
    // Buildings
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn buildings(&self, client_id: &str) -> Result<Vec<Building>, BackendError> {
        self.fetch_all("buildings", RestQuery::select("*").eq("client_id", client_id).order("name", true))
            .await
    }

    /// # Errors
    ///
    /// [`BackendError::NotFound`] for an unknown id, or transport/backend errors.
    pub async fn building(&self, id: &str) -> Result<Building, BackendError> {
        self.fetch_one("buildings", RestQuery::select("*").eq("id", id)).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn create_building(&self, building: &NewBuilding) -> Result<Building, BackendError> {
        self.insert("buildings", building).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn update_building(&self, id: &str, building: &NewBuilding) -> Result<Building, BackendError> {
        self.update("buildings", id, building).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn delete_building(&self, id: &str) -> Result<(), BackendError> {
        self.delete("buildings", id).await
    }

    // -------------------------------------------------------------------------
    // Rooms
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn rooms_by_building(&self, building_id: &str) -> Result<Vec<Room>, BackendError> {
        self.fetch_all(
            "rooms",
            RestQuery::select("*").eq("building_id", building_id).order("room_number", true),
        )
        .await
    }

    /// # Errors
    ///
    /// [`BackendError::NotFound`] for an unknown id, or transport/backend errors.
    pub async fn room(&self, id: &str) -> Result<Room, BackendError> {
        self.fetch_one("rooms", RestQuery::select("*").eq("id", id)).await
    }

    /// Rooms with no open lease, from the `available_rooms_view` view.
    ///
    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn available_rooms(&self, client_id: &str) -> Result<Vec<AvailableRoom>, BackendError> {
        self.fetch_all("available_rooms_view", RestQuery::select("*").eq("client_id", client_id))
            .await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn create_room(&self, room: &NewRoom) -> Result<Room, BackendError> {
        self.insert("rooms", room).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn update_room(&self, id: &str, room: &NewRoom) -> Result<Room, BackendError> {
        self.update("rooms", id, room).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn set_room_status(&self, id: &str, status: RoomStatus) -> Result<Room, BackendError> {
        self.update("rooms", id, &json!({ "status": status })).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn delete_room(&self, id: &str) -> Result<(), BackendError> {
        self.delete("rooms", id).await
    }

    // -------------------------------------------------------------------------
    // Tenants
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn tenants(&self, client_id: &str) -> Result<Vec<Tenant>, BackendError> {
        self.fetch_all(
            "tenants",
            RestQuery::select("*").eq("client_id", client_id).order("first_name", true),
        )
        .await
    }

    /// # Errors
    ///
    /// [`BackendError::NotFound`] for an unknown id, or transport/backend errors.
    pub async fn tenant(&self, id: &str) -> Result<Tenant, BackendError> {
        self.fetch_one("tenants", RestQuery::select("*").eq("id", id)).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn create_tenant(&self, tenant: &NewTenant) -> Result<Tenant, BackendError> {
        self.insert("tenants", tenant).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn update_tenant(&self, id: &str, tenant: &NewTenant) -> Result<Tenant, BackendError> {
        self.update("tenants", id, tenant).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn delete_tenant(&self, id: &str) -> Result<(), BackendError> {
        self.delete("tenants", id).await
    }

    // -------------------------------------------------------------------------
    // Leases
    // -------------------------------------------------------------------------

    /// All leases of a client with tenant and room joins, newest first.
    ///
    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn leases(&self, client_id: &str) -> Result<Vec<Lease>, BackendError> {
        self.fetch_all(
            "leases",
            RestQuery::select(LEASE_SELECT).eq("client_id", client_id).order("start_date", false),
        )
        .await
    }

    /// # Errors
    ///
    /// [`BackendError::NotFound`] for an unknown id, or transport/backend errors.
    pub async fn lease(&self, id: &str) -> Result<Lease, BackendError> {
        self.fetch_one("leases", RestQuery::select(LEASE_SELECT).eq("id", id)).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn leases_by_tenant(&self, tenant_id: &str) -> Result<Vec<Lease>, BackendError> {
        self.fetch_all(
            "leases",
            RestQuery::select(LEASE_SELECT).eq("tenant_id", tenant_id).order("start_date", false),
        )
        .await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn leases_by_room(&self, room_id: &str) -> Result<Vec<Lease>, BackendError> {
        self.fetch_all(
            "leases",
            RestQuery::select(LEASE_SELECT).eq("room_id", room_id).order("start_date", false),
        )
        .await
    }

    /// The room's open (draft or active) lease, if any.
    ///
    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn open_lease_for_room(&self, room_id: &str) -> Result<Option<Lease>, BackendError> {
        let leases = self.leases_by_room(room_id).await?;
        Ok(leases.into_iter().find(|l| l.status.is_open()))
    }

    /// Active leases whose end date falls within `days` of `today`.
    ///
    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn expiring_leases(&self, client_id: &str, days: i64, today: Date) -> Result<Vec<Lease>, BackendError> {
        let (from, to) = expiry_window(today, days);
        self.fetch_all(
            "leases",
            RestQuery::select(LEASE_SELECT)
                .eq("client_id", client_id)
                .eq("status", LeaseStatus::Active.as_str())
                .gte("end_date", &from)
                .lte("end_date", &to)
                .order("end_date", true),
        )
        .await
    }

    /// Create a lease after confirming its room has no open lease.
    ///
    /// # Errors
    ///
    /// [`BackendError::Conflict`] if the room already has a draft or active
    /// lease, otherwise transport or backend errors.
    pub async fn create_lease(&self, lease: &NewLease) -> Result<Lease, BackendError> {
        let existing = self.leases_by_room(&lease.room_id).await?;
        ensure_room_free(&lease.room_id, &existing, None)?;
        self.insert("leases", lease).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn update_lease(&self, id: &str, lease: &NewLease) -> Result<Lease, BackendError> {
        self.update("leases", id, lease).await
    }

    /// Move a lease to `status`. Reopening a lease checks that its room has
    /// no other open lease.
    ///
    /// # Errors
    ///
    /// [`BackendError::Conflict`] when reopening would double-book the room,
    /// otherwise transport or backend errors.
    pub async fn set_lease_status(&self, id: &str, status: LeaseStatus) -> Result<Lease, BackendError> {
        if status.is_open() {
            let lease = self.lease(id).await?;
            let existing = self.leases_by_room(&lease.room_id).await?;
            ensure_room_free(&lease.room_id, &existing, Some(id))?;
        }
        self.update("leases", id, &LeaseStatusUpdate { status }).await
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn delete_lease(&self, id: &str) -> Result<(), BackendError> {
        self.delete("leases", id).await
    }

    // -------------------------------------------------------------------------
    // User profiles
    // -------------------------------------------------------------------------

    /// The application profile linked to an auth user, if one exists.
    ///
    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, BackendError> {
        let rows: Vec<UserProfile> = self.fetch_all("users", RestQuery::select("*").eq("id", user_id)).await?;
        Ok(rows.into_iter().next())
    }

    /// # Errors
    ///
    /// Transport or backend errors.
    pub async fn create_user_profile(
        &self,
        user_id: &str,
        client_id: &str,
        email: &str,
        full_name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<UserProfile, BackendError> {
        let body = json!({
            "id": user_id,
            "client_id": client_id,
            "email": email,
            "full_name": full_name,
            "phone": phone,
            "role": "user",
            "status": "active",
        });
        self.insert("users", &body).await
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<serde_json::Value, BackendError> {
    serde_json::to_value(body).map_err(|e| BackendError::Decode(e.to_string()))
}
