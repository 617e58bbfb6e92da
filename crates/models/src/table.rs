use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Floor status of a dining table, managed by staff
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

#[cfg(feature = "database")]
string_column!(TableStatus);

/// A dining table that reservations point at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiningTable {
    pub id: Uuid,
    pub number: i32,
    /// Maximum party size
    pub seats: i32,
    pub status: TableStatus,
}

impl DiningTable {
    pub fn new(number: i32, seats: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            seats,
            status: TableStatus::Available,
        }
    }

    pub fn fits(&self, guests: i32) -> bool {
        guests <= self.seats
    }
}

/// Partial update of a table; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TableUpdate {
    pub number: Option<i32>,
    pub seats: Option<i32>,
    pub status: Option<TableStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_table_fits() {
        let table = DiningTable::new(1, 4);
        assert!(table.fits(4));
        assert!(table.fits(1));
        assert!(!table.fits(5));
    }

    #[test]
    fn test_table_status_parsing() {
        assert_eq!(
            TableStatus::from_str("occupied").unwrap(),
            TableStatus::Occupied
        );
        assert!(TableStatus::from_str("closed").is_err());
        assert_eq!(TableStatus::Reserved.to_string(), "reserved");
    }
}
