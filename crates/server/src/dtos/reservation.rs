use models::reservation::ReservationStatus;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub table_id: Uuid,
    /// RFC 3339 or `YYYY-MM-DDTHH:MM[:SS]` (UTC)
    pub date: String,
    pub guests: i32,
}

/// Absent fields are left unchanged
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateReservationRequest {
    pub table_id: Option<Uuid>,
    pub date: Option<String>,
    pub guests: Option<i32>,
    pub status: Option<ReservationStatus>,
}
