use booking::TableAvailability;
use chrono::{DateTime, Utc};
use models::table::DiningTable;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTableRequest {
    pub number: i32,
    pub seats: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// RFC 3339 or `YYYY-MM-DDTHH:MM[:SS]` (UTC). A `+` offset may be sent unencoded.
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TableAvailabilityResponse {
    pub table: DiningTable,
    pub available: bool,
}

impl From<TableAvailability> for TableAvailabilityResponse {
    fn from(entry: TableAvailability) -> Self {
        Self {
            table: entry.table,
            available: entry.available,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    pub date: DateTime<Utc>,
    pub tables: Vec<TableAvailabilityResponse>,
}
