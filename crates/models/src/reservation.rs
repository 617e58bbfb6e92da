use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of a reservation
///
/// `Cancelled` is terminal: a cancelled reservation no longer holds its slot,
/// so bringing it back would need a fresh conflict check. Callers book again
/// instead.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
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
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Whether the reservation still holds its table
    pub fn is_active(self) -> bool {
        self != Self::Cancelled
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        use ReservationStatus::*;

        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled)
        ) || self == next
    }
}

#[cfg(feature = "database")]
string_column!(ReservationStatus);

/// A booking of one table for one party at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub table_id: Uuid,
    /// Requested seating time
    pub date: DateTime<Utc>,
    /// Party size
    pub guests: i32,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// A new `pending` reservation
    pub fn new(user_id: Uuid, table_id: Uuid, date: DateTime<Utc>, guests: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            table_id,
            date,
            guests,
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_new_reservation_is_pending() {
        let reservation = Reservation::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now(), 2);
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert!(reservation.is_active());
    }

    #[test]
    fn test_only_cancelled_is_inactive() {
        for status in ReservationStatus::iter() {
            assert_eq!(status.is_active(), status != ReservationStatus::Cancelled);
        }
    }

    #[test]
    fn test_status_transitions() {
        use ReservationStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Confirmed));

        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Confirmed));
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ReservationStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");

        let parsed: ReservationStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(parsed, ReservationStatus::Confirmed);
    }
}
